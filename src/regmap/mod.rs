mod parser;
mod register;

pub use self::parser::RegisterParser;
pub use self::register::{Register, WORD_BITS};
use indexmap::IndexMap;

/// Registers of one module, in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterMap {
    pub(crate) module: String,
    pub(crate) registers: IndexMap<String, Register>,
}

impl RegisterMap {
    /// Upper-case module name, the `#define` prefix.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Returns an iterator over all register names.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.registers.keys().map(String::as_str)
    }

    /// Returns an iterator over all registers.
    pub fn registers(&self) -> impl Iterator<Item = &Register> + '_ {
        self.registers.values()
    }

    /// Returns the register with name `name`.
    pub fn get(&self, name: &str) -> Option<&Register> {
        self.registers.get(name)
    }

    /// Number of registers.
    pub fn len(&self) -> usize {
        self.registers.len()
    }

    /// Returns `true` if the module declares no registers.
    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }
}
