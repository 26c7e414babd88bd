//! Peripheral clock enable bits extracted from `sysctl.h`.

use crate::error::{LineError, ParseErrorKind};
use crate::generator::generate_bits;
use crate::header::parse_int;
use eyre::Result;
use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use std::io::Write;

/// Bits per `PCLKCR` register.
const CLOCK_BITS: usize = 16;

/// Names and base address of the clock control registers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockLayout {
    /// Address the decoded offsets are relative to.
    pub base: u32,
    /// Register name by offset.
    pub registers: IndexMap<u32, String>,
}

impl Default for ClockLayout {
    /// F2803x layout.
    fn default() -> Self {
        let registers = [(12, "PCLKCR0"), (13, "PCLKCR1"), (9, "PCLKCR2"), (16, "PCLKCR3")]
            .into_iter()
            .map(|(offset, name)| (offset, name.to_owned()))
            .collect();
        Self { base: 0x7010, registers }
    }
}

/// Clock enable bit owners per clock control register.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClockTable {
    layout: ClockLayout,
    registers: IndexMap<u32, Vec<Option<String>>>,
}

impl ClockTable {
    /// Collects every `SYSCTL_PERIPH_CLK_<NAME> = <VALUE>U` enumerator.
    pub fn parse(text: &str, layout: ClockLayout) -> Result<Self, LineError> {
        let pattern = Regex::new(r"\s+SYSCTL_PERIPH_CLK_(.*?)U,?(?:\s|$)")
            .expect("static pattern is valid");
        let separator = Regex::new(r"\s*=\s*").expect("static pattern is valid");
        let mut table = Self { layout, registers: IndexMap::new() };
        for (n, line) in text.lines().enumerate() {
            let Some(captures) = pattern.captures(line) else { continue };
            let parts = separator.split(&captures[1]).collect::<Vec<_>>();
            let [name, value] = parts[..] else { continue };
            table.insert(name, value).map_err(|kind| LineError::new(n + 1, line, kind))?;
        }
        Ok(table)
    }

    fn insert(&mut self, name: &str, value: &str) -> Result<(), ParseErrorKind> {
        let value = parse_int(value).map_err(|_| ParseErrorKind::InvalidNumber)?;
        let offset = value & 0x001F;
        let bit = ((value & 0x0F00) >> 8) as usize;
        if !self.layout.registers.contains_key(&offset) {
            return Err(ParseErrorKind::UnknownClockRegister(offset));
        }
        let bits = self.registers.entry(offset).or_insert_with(|| vec![None; CLOCK_BITS]);
        let slot = &mut bits[bit];
        if slot.is_some() {
            return Err(ParseErrorKind::ClockAlreadyAssigned(name.to_owned()));
        }
        debug!("{} -> offset 0x{:02X} bit {}", name, offset, bit);
        *slot = Some(name.to_owned());
        Ok(())
    }

    /// Owner of every enable bit of the register at `offset`.
    pub fn bits(&self, offset: u32) -> Option<&[Option<String>]> {
        self.registers.get(&offset).map(Vec::as_slice)
    }

    /// Writes each register in first-seen order with its bit layout.
    pub fn generate(&self, output: &mut impl Write) -> Result<()> {
        for (offset, bits) in &self.registers {
            let name = &self.layout.registers[offset];
            writeln!(output, "{} @ 0x{:04X} (1)", name, self.layout.base + offset)?;
            generate_bits(output, bits)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "\
typedef enum
{
    SYSCTL_PERIPH_CLK_HRPWM     = 0x000CU,      /* HRPWM clock */
    SYSCTL_PERIPH_CLK_LINA      = 0x010CU,      /* LIN-A clock */
    SYSCTL_PERIPH_CLK_TBCLKSYNC = 0x020CU,      /* ePWM Module Time Base Clock Sync */
    SYSCTL_PERIPH_CLK_EPWM1     = 0x000DU,      /* ePWM1 clock */
    SYSCTL_PERIPH_CLK_CLA1      = 0x0E10U       /* CLA1 clock */
} SysCtl_PeripheralPCLOCKCR;
";

    #[test]
    fn decodes_offsets_and_bits() {
        let table = ClockTable::parse(HEADER, ClockLayout::default()).unwrap();
        let pclkcr0 = table.bits(12).unwrap();
        assert_eq!(pclkcr0[0].as_deref(), Some("HRPWM"));
        assert_eq!(pclkcr0[1].as_deref(), Some("LINA"));
        assert_eq!(pclkcr0[2].as_deref(), Some("TBCLKSYNC"));
        assert_eq!(table.bits(13).unwrap()[0].as_deref(), Some("EPWM1"));
        assert_eq!(table.bits(16).unwrap()[14].as_deref(), Some("CLA1"));
        assert_eq!(table.bits(9), None);
    }

    #[test]
    fn generates_layout() {
        let table = ClockTable::parse(HEADER, ClockLayout::default()).unwrap();
        let mut output = Vec::new();
        table.generate(&mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.starts_with(
            "PCLKCR0 @ 0x701C (1)\n\
             15:3  Reserved\n\
             2     TBCLKSYNC\n\
             1     LINA\n\
             0     HRPWM\n\
             \n\
             PCLKCR1 @ 0x701D (1)\n"
        ));
        assert!(text.contains(
            "PCLKCR3 @ 0x7020 (1)\n15    Reserved\n14    CLA1\n13:0  Reserved\n"
        ));
    }

    #[test]
    fn rejects_duplicate_bit() {
        let err = ClockTable::parse(
            "    SYSCTL_PERIPH_CLK_A = 0x000CU,\n    SYSCTL_PERIPH_CLK_B = 0x000CU,\n",
            ClockLayout::default(),
        )
        .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::ClockAlreadyAssigned("B".into()));
        assert_eq!(err.line, 2);
    }

    #[test]
    fn rejects_unknown_register() {
        let err = ClockTable::parse("    SYSCTL_PERIPH_CLK_X = 0x0001U,\n", ClockLayout::default())
            .unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownClockRegister(1));
    }
}
