//! PIE vector table extracted from `hw_ints.h`.

use crate::error::{LineError, ParseErrorKind};
use crate::header::parse_int;
use eyre::Result;
use log::debug;
use regex::Regex;
use std::io::Write;

/// Number of core interrupt vectors.
pub const CORE_VECTORS: usize = 32;
/// Number of PIE groups.
pub const PIE_GROUPS: usize = 12;
/// Number of channels per PIE group.
pub const PIE_CHANNELS: usize = 8;

/// First vector identifier of PIE group 1.
const PIE_VECTOR_START: u32 = 32;

/// Interrupt signal names by vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterruptTable {
    core: Vec<Option<String>>,
    groups: Vec<Vec<Option<String>>>,
}

impl Default for InterruptTable {
    fn default() -> Self {
        Self { core: vec![None; CORE_VECTORS], groups: vec![vec![None; PIE_CHANNELS]; PIE_GROUPS] }
    }
}

impl InterruptTable {
    /// Collects every `#define INT_<NAME> <CODE>UL` line.
    pub fn parse(text: &str) -> Result<Self, LineError> {
        let pattern =
            Regex::new(r"#define\s+INT_(\S+)\s+(\S+?)UL(?:\s|$)").expect("static pattern is valid");
        let mut table = Self::default();
        for (n, line) in text.lines().enumerate() {
            let Some(captures) = pattern.captures(line) else { continue };
            table
                .insert(&captures[1], &captures[2])
                .map_err(|kind| LineError::new(n + 1, line, kind))?;
        }
        Ok(table)
    }

    fn insert(&mut self, name: &str, code: &str) -> Result<(), ParseErrorKind> {
        let code = parse_int(code).map_err(|_| ParseErrorKind::InvalidNumber)?;
        let group = (code >> 8) & 0xFF;
        let channel = code & 0xFF;
        let vector = (code >> 16) & 0xFFFF;
        let slot = if group > 0 && channel > 0 {
            if vector != PIE_VECTOR_START + (group - 1) * PIE_CHANNELS as u32 + (channel - 1) {
                return Err(ParseErrorKind::InvalidVectorId);
            }
            self.groups
                .get_mut(group as usize - 1)
                .and_then(|channels| channels.get_mut(channel as usize - 1))
                .ok_or(ParseErrorKind::InvalidGroupChannel)?
        } else if group == 0 && channel == 0 {
            self.core.get_mut(vector as usize).ok_or(ParseErrorKind::InvalidVectorId)?
        } else {
            return Err(ParseErrorKind::InvalidGroupChannel);
        };
        if slot.is_some() {
            return Err(ParseErrorKind::InterruptAlreadyAssigned);
        }
        debug!("{} -> {}.{} (vector {})", name, group, channel, vector);
        *slot = Some(name.to_owned());
        Ok(())
    }

    /// Signal assigned to core vector `vector`.
    pub fn core(&self, vector: usize) -> Option<&str> {
        self.core.get(vector)?.as_deref()
    }

    /// Signal assigned to PIE `group` and `channel`, both 1-based.
    pub fn pie(&self, group: usize, channel: usize) -> Option<&str> {
        self.groups.get(group.checked_sub(1)?)?.get(channel.checked_sub(1)?)?.as_deref()
    }

    /// Writes the core vectors, then one row per PIE group with channels
    /// from 8 down to 1.
    pub fn generate(&self, output: &mut impl Write) -> Result<()> {
        for (vector, name) in self.core.iter().enumerate() {
            if let Some(name) = name {
                writeln!(output, "{:<3}{:<10}", vector, name)?;
            }
        }
        writeln!(output)?;
        for (group, channels) in self.groups.iter().enumerate() {
            write!(output, "{:<3}", group + 1)?;
            for name in channels.iter().rev() {
                write!(output, "{:<10}", name.as_deref().unwrap_or("Reserved"))?;
            }
            writeln!(output)?;
        }
        Ok(())
    }
}
