use super::register::Register;
use super::RegisterMap;
use crate::error::{LineError, ParseErrorKind};
use crate::header::{Classifier, Line, Target};
use crate::memmap::BaseAddressTable;
use indexmap::IndexMap;
use log::{debug, trace};

/// Single-pass builder of a [`RegisterMap`] from a `hw_<module>.h` header.
pub struct RegisterParser<'a> {
    module: String,
    bases: &'a BaseAddressTable,
    classifier: Classifier<'a>,
    active_bases: Option<Vec<u32>>,
    registers: IndexMap<String, Register>,
}

impl<'a> RegisterParser<'a> {
    /// Creates a parser for `module`, resolving instances against `bases`.
    pub fn new(module: &str, bases: &'a BaseAddressTable, protected_marker: &'a str) -> Self {
        Self {
            module: module.to_uppercase(),
            bases,
            classifier: Classifier::new(module, protected_marker),
            active_bases: None,
            registers: IndexMap::new(),
        }
    }

    /// Consumes the header text. Stops at the first violation.
    pub fn parse(mut self, text: &str) -> Result<RegisterMap, LineError> {
        for (n, line) in text.lines().enumerate() {
            self.process(line).map_err(|kind| LineError::new(n + 1, line, kind))?;
        }
        Ok(RegisterMap { module: self.module, registers: self.registers })
    }

    fn process(&mut self, line: &str) -> Result<(), ParseErrorKind> {
        let line = self.classifier.classify(line)?;
        trace!("{:?}", line);
        match line {
            Line::BaseRegisters(names) => {
                let bases = names
                    .into_iter()
                    .map(|name| {
                        self.bases
                            .get(name)
                            .ok_or_else(|| ParseErrorKind::UnknownBaseRegister(name.to_owned()))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                self.active_bases = Some(bases);
                Ok(())
            }
            Line::Definition { target, value, locked } => self.define(target, value, locked),
            Line::Other => Ok(()),
        }
    }

    fn define(
        &mut self,
        target: Target<'_>,
        value: u32,
        locked: bool,
    ) -> Result<(), ParseErrorKind> {
        match target {
            Target::Offset(name) => {
                if self.registers.contains_key(name) {
                    return Err(ParseErrorKind::DuplicateOffset);
                }
                let bases = self.active_bases.as_ref().ok_or(ParseErrorKind::BaseNotInitialized)?;
                let register = Register::new(name, value, bases, locked)?;
                debug!("{} @ {:X?}", name, register.addresses);
                self.registers.insert(name.to_owned(), register);
                Ok(())
            }
            Target::Size(name) => {
                let register =
                    self.registers.get_mut(name).ok_or(ParseErrorKind::OffsetNotDefined)?;
                debug!("{} is {} words wide", name, value);
                register.set_size(value)
            }
            Target::Bit(name, field) => self.sized_register(name)?.add_bit(field, value),
            Target::Shift(name, field) => self.sized_register(name)?.add_shift(field, value),
            Target::Mask(name, field) => self.sized_register(name)?.add_mask(field, value),
            Target::Unknown => Err(ParseErrorKind::UnexpectedLineFormat),
        }
    }

    fn sized_register(&mut self, name: &str) -> Result<&mut Register, ParseErrorKind> {
        self.registers
            .get_mut(name)
            .filter(|register| register.is_sized())
            .ok_or(ParseErrorKind::RegisterNotInitialized)
    }
}
