use thiserror::Error;

/// Structural violation found in a header file.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The base register named in a `BASE REGISTER` declaration is not in the
    /// memory map.
    #[error("Unknown base register: {0}")]
    UnknownBaseRegister(String),
    /// A register offset appeared before any `BASE REGISTER` declaration.
    #[error("Base register not initialized")]
    BaseNotInitialized,
    /// The register offset is defined twice.
    #[error("Register offset already defined")]
    DuplicateOffset,
    /// The register size is defined twice.
    #[error("Register size already specified")]
    DuplicateSize,
    /// The register is wider than a 32-bit value can describe.
    #[error("Register size exceeds {0} bits")]
    SizeOutOfRange(usize),
    /// A register instance lies beyond the 32-bit address space.
    #[error("Register address overflows the address space")]
    AddressOverflow,
    /// The register size is defined before its offset.
    #[error("Register size specified before offset")]
    OffsetNotDefined,
    /// A field references a register without offset or size.
    #[error("Register offset or size not initialized")]
    RegisterNotInitialized,
    /// A single-bit field value does not have exactly one bit set.
    #[error("Invalid bit mask")]
    InvalidBitMask,
    /// The field name already owns a bit of this register.
    #[error("Bit name already exists for this register")]
    DuplicateFieldName,
    /// The bit is already owned by another field.
    #[error("Bit field already initialized")]
    BitAlreadyAssigned,
    /// The field shift is defined twice.
    #[error("Bit field shift already initialized")]
    DuplicateShift,
    /// The field mask appeared before its shift.
    #[error("Bit field shift not initialized")]
    ShiftNotDefined,
    /// The mask is not a contiguous run of ones starting at the shift.
    #[error("Mask and shift combination do not match")]
    InvalidMaskShiftCombination,
    /// The field lies outside the register width.
    #[error("Bit field exceeds register width of {0} bits")]
    BitOutOfRange(usize),
    /// The definition name has an unrecognized shape.
    #[error("Unexpected line format")]
    UnexpectedLineFormat,
    /// The definition value is not an integer literal.
    #[error("Could not parse number")]
    InvalidNumber,
    /// The vector identifier disagrees with the PIE group and channel.
    #[error("Invalid vector identifier")]
    InvalidVectorId,
    /// The PIE group or channel is out of range.
    #[error("Invalid X and Y parameters")]
    InvalidGroupChannel,
    /// Two interrupt signals share the same vector.
    #[error("Interrupt signal is already initialized")]
    InterruptAlreadyAssigned,
    /// Two peripheral clocks share the same enable bit.
    #[error("Peripheral clock {0} already initialized")]
    ClockAlreadyAssigned(String),
    /// No clock control register is known at the decoded offset.
    #[error("Unknown peripheral clock register at offset 0x{0:02X}")]
    UnknownClockRegister(u32),
}

/// A [`ParseErrorKind`] located at a source line.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}:\n[{line}] {text}")]
pub struct LineError {
    /// 1-based line number.
    pub line: usize,
    /// Raw line text.
    pub text: String,
    /// What went wrong.
    pub kind: ParseErrorKind,
}

impl LineError {
    pub(crate) fn new(line: usize, text: &str, kind: ParseErrorKind) -> Self {
        Self { line, text: text.to_owned(), kind }
    }
}
