//! Line classification for driverlib `hw_*.h` headers.

use crate::error::ParseErrorKind;
use regex::Regex;
use std::num::ParseIntError;

/// Inline comment marker of registers behind the `EALLOW` protection.
pub const PROTECTED_MARKER: &str = "*E* */";

const BASE_REGISTER_MARKER: &str = "BASE REGISTER";

/// A module header line, classified once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    /// `BASE REGISTER` declaration listing the instances of the module.
    BaseRegisters(Vec<&'a str>),
    /// `#define <MODULE>_<tail> <value>` line.
    Definition { target: Target<'a>, value: u32, locked: bool },
    /// Anything else.
    Other,
}

/// Decoded `<tail>` of a definition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Target<'a> {
    /// `O_<REG>`
    Offset(&'a str),
    /// `S_<REG>`
    Size(&'a str),
    /// `<REG>_<FLD>`
    Bit(&'a str, &'a str),
    /// `<REG>_<FLD>_S`
    Shift(&'a str, &'a str),
    /// `<REG>_<FLD>_M`
    Mask(&'a str, &'a str),
    Unknown,
}

impl<'a> Target<'a> {
    fn from_tail(tail: &'a str) -> Self {
        let parts = tail.split('_').collect::<Vec<_>>();
        match *parts.as_slice() {
            ["O", reg] => Self::Offset(reg),
            ["S", reg] => Self::Size(reg),
            [reg, fld] => Self::Bit(reg, fld),
            [reg, fld, "S"] => Self::Shift(reg, fld),
            [reg, fld, "M"] => Self::Mask(reg, fld),
            _ => Self::Unknown,
        }
    }
}

/// Classifies the lines of one module header.
pub(crate) struct Classifier<'m> {
    definition: Regex,
    base_register: Regex,
    protected_marker: &'m str,
}

impl<'m> Classifier<'m> {
    pub(crate) fn new(module: &str, protected_marker: &'m str) -> Self {
        let definition = Regex::new(&format!(
            r"#define[ \t]+{}_(\S+)[ \t]+([^\s/]+)[ \t]*(?:/|$)",
            regex::escape(&module.to_uppercase())
        ))
        .expect("escaped module name always forms a valid pattern");
        let base_register = Regex::new(&format!(r"{BASE_REGISTER_MARKER}\s+(\S+)"))
            .expect("static pattern is valid");
        Self { definition, base_register, protected_marker }
    }

    pub(crate) fn classify<'a>(&self, line: &'a str) -> Result<Line<'a>, ParseErrorKind> {
        if line.contains(BASE_REGISTER_MARKER) && line.contains("_BASE") {
            if let Some(captures) = self.base_register.captures(line) {
                let names = captures.get(1).map_or("", |m| m.as_str());
                return Ok(Line::BaseRegisters(names.split(',').collect()));
            }
        }
        let Some(captures) = self.definition.captures(line) else {
            return Ok(Line::Other);
        };
        let (Some(tail), Some(value)) = (captures.get(1), captures.get(2)) else {
            return Ok(Line::Other);
        };
        let value = parse_int(value.as_str()).map_err(|_| ParseErrorKind::InvalidNumber)?;
        Ok(Line::Definition {
            target: Target::from_tail(tail.as_str()),
            value,
            locked: line.contains(self.protected_marker),
        })
    }
}

/// Parses a C integer literal, choosing the radix by prefix and ignoring the
/// `U`/`L` suffixes.
pub fn parse_int(src: &str) -> Result<u32, ParseIntError> {
    let src = src.trim_end_matches(['U', 'u', 'L', 'l']);
    let mut range = 0..src.len();
    let radix = if src.starts_with("0x") || src.starts_with("0X") {
        range.start += 2;
        16
    } else if src.starts_with("0b") || src.starts_with("0B") {
        range.start += 2;
        2
    } else if src.starts_with("0o") || src.starts_with("0O") {
        range.start += 2;
        8
    } else if src.starts_with('0') && src.len() > 1 {
        range.start += 1;
        8
    } else {
        10
    };
    u32::from_str_radix(&src[range], radix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_int_radix() {
        assert_eq!(parse_int("0x10U"), Ok(0x10));
        assert_eq!(parse_int("0xFFFFFFFFUL"), Ok(0xFFFF_FFFF));
        assert_eq!(parse_int("2"), Ok(2));
        assert_eq!(parse_int("0"), Ok(0));
        assert_eq!(parse_int("010"), Ok(8));
        assert_eq!(parse_int("0b101"), Ok(5));
        assert!(parse_int("(0x10U").is_err());
    }

    #[test]
    fn classify_definitions() {
        let classifier = Classifier::new("cputimer", PROTECTED_MARKER);
        assert_eq!(
            classifier.classify("#define CPUTIMER_O_TCR      0x4U        /* Control Register */"),
            Ok(Line::Definition { target: Target::Offset("TCR"), value: 4, locked: false })
        );
        assert_eq!(
            classifier.classify("#define CPUTIMER_S_TIM      2"),
            Ok(Line::Definition { target: Target::Size("TIM"), value: 2, locked: false })
        );
        assert_eq!(
            classifier.classify("#define CPUTIMER_TCR_TSS            0x0010U"),
            Ok(Line::Definition { target: Target::Bit("TCR", "TSS"), value: 0x10, locked: false })
        );
        assert_eq!(
            classifier.classify("#define CPUTIMER_TPR_PSC_S          8U"),
            Ok(Line::Definition { target: Target::Shift("TPR", "PSC"), value: 8, locked: false })
        );
        assert_eq!(
            classifier.classify("#define CPUTIMER_TIM_TIM_M          0xFFFFFFFFUL"),
            Ok(Line::Definition {
                target: Target::Mask("TIM", "TIM"),
                value: 0xFFFF_FFFF,
                locked: false
            })
        );
        assert_eq!(
            classifier.classify("#define CPUTIMER_A_B_C_D 0x1U"),
            Ok(Line::Definition { target: Target::Unknown, value: 1, locked: false })
        );
    }

    #[test]
    fn classify_protected_offset() {
        let classifier = Classifier::new("hrpwm", PROTECTED_MARKER);
        assert_eq!(
            classifier.classify(
                "#define HRPWM_O_HRCNFG          0x20U   /* HRPWM Configuration Register *E* */"
            ),
            Ok(Line::Definition { target: Target::Offset("HRCNFG"), value: 0x20, locked: true })
        );
    }

    #[test]
    fn classify_base_registers() {
        let classifier = Classifier::new("cputimer", PROTECTED_MARKER);
        assert_eq!(
            classifier.classify(" * BASE REGISTER    CPUTIMER0_BASE,CPUTIMER1_BASE"),
            Ok(Line::BaseRegisters(vec!["CPUTIMER0_BASE", "CPUTIMER1_BASE"]))
        );
    }

    #[test]
    fn classify_other() {
        let classifier = Classifier::new("cputimer", PROTECTED_MARKER);
        assert_eq!(classifier.classify("#define HW_CPUTIMER_H"), Ok(Line::Other));
        assert_eq!(classifier.classify(" * The following are defines"), Ok(Line::Other));
        assert_eq!(classifier.classify("#define ADC_O_CTL1 0x0U"), Ok(Line::Other));
        assert_eq!(
            classifier.classify("#define CPUTIMER_O_TIM  zzz"),
            Err(ParseErrorKind::InvalidNumber)
        );
    }
}
