//! Register map, interrupt and clock table extractor for C2000 driverlib
//! headers.
//!
//! The driverlib `hw_<module>.h` headers describe every register with a
//! fixed set of `#define` shapes:
//!
//! ```c
//! #define MOD_O_REG       0x10U       /* offset                       */
//! #define MOD_S_REG       1           /* size in 16-bit words         */
//! #define MOD_REG_BIT     0x0001U     /* single-bit field             */
//! #define MOD_REG_FLD_S   4U          /* multi-bit field shift        */
//! #define MOD_REG_FLD_M   0x0030U     /* multi-bit field mask         */
//! ```
//!
//! # Usage
//!
//! ```no_run
//! let extractor = hwscan::Extractor::new("driverlib/inc");
//! let map = extractor.register_map("cputimer")?;
//! hwscan::generate_registers(&mut std::io::stdout(), &map)?;
//! # Ok::<(), eyre::Report>(())
//! ```

#![deny(elided_lifetimes_in_paths)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

mod clock;
mod error;
mod generator;
mod header;
mod interrupt;
mod memmap;
mod ranges;
mod regmap;
mod svd;

pub use self::clock::{ClockLayout, ClockTable};
pub use self::error::{LineError, ParseErrorKind};
pub use self::generator::generate_registers;
pub use self::header::{parse_int, PROTECTED_MARKER};
pub use self::interrupt::{InterruptTable, CORE_VECTORS, PIE_CHANNELS, PIE_GROUPS};
pub use self::memmap::BaseAddressTable;
pub use self::ranges::{bit_ranges, BitRange, BitRanges};
pub use self::regmap::{Register, RegisterMap, RegisterParser, WORD_BITS};
pub use self::svd::to_svd;

use eyre::{Result, WrapErr};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Options to configure where headers are read from.
#[derive(Clone, Debug)]
pub struct Extractor<'a> {
    dir: PathBuf,
    memmap: &'a str,
    protected_marker: &'a str,
}

impl<'a> Extractor<'a> {
    /// Creates a blank new set of options reading headers from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), memmap: "hw_memmap.h", protected_marker: PROTECTED_MARKER }
    }

    /// Sets the file name of the memory map header.
    pub fn memmap(&mut self, memmap: &'a str) -> &mut Self {
        self.memmap = memmap;
        self
    }

    /// Sets the comment marker of `EALLOW`-protected registers.
    pub fn protected_marker(&mut self, protected_marker: &'a str) -> &mut Self {
        self.protected_marker = protected_marker;
        self
    }

    /// Loads the base address of every peripheral instance.
    pub fn base_addresses(&self) -> Result<BaseAddressTable> {
        let bases = BaseAddressTable::parse(&self.read(self.memmap)?)?;
        info!("{} base registers in {}", bases.len(), self.memmap);
        Ok(bases)
    }

    /// Builds the register map of `module` from `hw_<module>.h`.
    pub fn register_map(&self, module: &str) -> Result<RegisterMap> {
        let bases = self.base_addresses()?;
        let file = format!("hw_{}.h", module.to_lowercase());
        let map = RegisterParser::new(module, &bases, self.protected_marker)
            .parse(&self.read(&file)?)?;
        info!("{} registers in {}", map.len(), file);
        Ok(map)
    }

    /// Builds the PIE vector table from `file`.
    pub fn interrupts(&self, file: impl AsRef<Path>) -> Result<InterruptTable> {
        Ok(InterruptTable::parse(&self.read(file)?)?)
    }

    /// Builds the peripheral clock table from `file`.
    pub fn clocks(&self, file: impl AsRef<Path>, layout: ClockLayout) -> Result<ClockTable> {
        Ok(ClockTable::parse(&self.read(file)?, layout)?)
    }

    fn read(&self, file: impl AsRef<Path>) -> Result<String> {
        let path = self.dir.join(file);
        info!("reading {}", path.display());
        fs::read_to_string(&path).wrap_err_with(|| format!("failed to read {}", path.display()))
    }
}
