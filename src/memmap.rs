use crate::error::{LineError, ParseErrorKind};
use crate::header::parse_int;
use indexmap::IndexMap;
use regex::Regex;

/// Absolute addresses of peripheral instances, keyed by `<NAME>_BASE`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BaseAddressTable {
    bases: IndexMap<String, u32>,
}

impl BaseAddressTable {
    /// Collects every `#define <NAME>_BASE <HEX>UL` line of `hw_memmap.h`.
    pub fn parse(text: &str) -> Result<Self, LineError> {
        let pattern = Regex::new(r"#define\s+(\S+)\s+(\S+?)UL(?:\s|$)")
            .expect("static pattern is valid");
        let mut bases = IndexMap::new();
        for (n, line) in text.lines().enumerate() {
            let Some(captures) = pattern.captures(line) else { continue };
            let name = &captures[1];
            if !name.contains("_BASE") {
                continue;
            }
            let address = parse_int(&captures[2])
                .map_err(|_| LineError::new(n + 1, line, ParseErrorKind::InvalidNumber))?;
            bases.insert(name.to_owned(), address);
        }
        Ok(Self { bases })
    }

    /// Returns the address of the base register `name`.
    pub fn get(&self, name: &str) -> Option<u32> {
        self.bases.get(name).copied()
    }

    /// Inserts a base register.
    pub fn insert(&mut self, name: impl Into<String>, address: u32) {
        self.bases.insert(name.into(), address);
    }

    /// Number of known base registers.
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    /// Returns `true` if no base register is known.
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_base_lines() {
        let table = BaseAddressTable::parse(
            "#ifndef HW_MEMMAP_H\n\
             #define HW_MEMMAP_H\n\
             \n\
             #define DEVCFG_BASE                 0x00000880UL\n\
             #define CPUTIMER0_BASE              0x00000C00UL\n\
             #define FLASH_SIZE                  0x00008000UL\n\
             #define CANA_MSG_RAM_BASE           0x00006100UL /* message RAM */\n",
        )
        .unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.get("DEVCFG_BASE"), Some(0x880));
        assert_eq!(table.get("CPUTIMER0_BASE"), Some(0xC00));
        assert_eq!(table.get("CANA_MSG_RAM_BASE"), Some(0x6100));
        assert_eq!(table.get("FLASH_SIZE"), None);
    }

    #[test]
    fn reports_bad_address() {
        let err = BaseAddressTable::parse("\n#define BAD_BASE 0xZZUL\n").unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.kind, ParseErrorKind::InvalidNumber);
    }
}
