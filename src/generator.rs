use crate::ranges::bit_ranges;
use crate::{Register, RegisterMap};
use eyre::Result;
use std::io::Write;

/// Writes the bit layout of every register of `map`.
pub fn generate_registers(output: &mut impl Write, map: &RegisterMap) -> Result<()> {
    for register in map.registers() {
        generate_register(output, register)?;
    }
    Ok(())
}

fn generate_register(output: &mut impl Write, register: &Register) -> Result<()> {
    write!(output, "{} @ ", register.name)?;
    for (i, address) in register.addresses.iter().enumerate() {
        if i > 0 {
            write!(output, ",")?;
        }
        write!(output, "0x{:04X}", address)?;
    }
    write!(output, " ({})", register.size)?;
    if register.locked {
        write!(output, " EALLOW")?;
    }
    writeln!(output)?;
    generate_bits(output, register.bits())
}

/// Writes one line per same-owner bit run followed by a blank line.
pub(crate) fn generate_bits(output: &mut impl Write, bits: &[Option<String>]) -> Result<()> {
    for range in bit_ranges(bits) {
        writeln!(output, "{}", range)?;
    }
    writeln!(output)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::PROTECTED_MARKER;
    use crate::{BaseAddressTable, RegisterParser};

    fn render(header: &str) -> String {
        let mut bases = BaseAddressTable::default();
        bases.insert("TMR0_BASE", 0x0C00);
        bases.insert("TMR1_BASE", 0x0C08);
        let map = RegisterParser::new("tmr", &bases, PROTECTED_MARKER).parse(header).unwrap();
        let mut output = Vec::new();
        generate_registers(&mut output, &map).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn layout() {
        let text = render(
            "BASE REGISTER TMR0_BASE,TMR1_BASE\n\
             #define TMR_O_TCR 0x4U /* Control Register *E* */\n\
             #define TMR_S_TCR 1\n\
             #define TMR_TCR_TSS 0x0010U\n\
             #define TMR_TCR_FREESOFT_S 10U\n\
             #define TMR_TCR_FREESOFT_M 0x0C00U\n\
             #define TMR_TCR_TIF 0x8000U\n",
        );
        assert_eq!(
            text,
            "TCR @ 0x0C04,0x0C0C (1) EALLOW\n\
             15    TIF\n\
             14:12 Reserved\n\
             11:10 FREESOFT\n\
             9:5   Reserved\n\
             4     TSS\n\
             3:0   Reserved\n\
             \n"
        );
    }

    #[test]
    fn unsized_register_has_no_layout() {
        let text = render("BASE REGISTER TMR0_BASE\n#define TMR_O_TIM 0x0U\n");
        assert_eq!(text, "TIM @ 0x0C00 (0)\n\n");
    }
}
