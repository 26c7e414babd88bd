use std::fmt;

/// Inclusive run of bits sharing the same owner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitRange<'a> {
    /// Most significant bit of the run.
    pub high: usize,
    /// Least significant bit of the run.
    pub low: usize,
    /// Owning field, `None` for reserved bits.
    pub owner: Option<&'a str>,
}

impl BitRange<'_> {
    /// Number of bits in the run.
    pub fn width(&self) -> usize {
        self.high - self.low + 1
    }

    /// Owner name as printed, `Reserved` for unowned bits.
    pub fn label(&self) -> &str {
        self.owner.unwrap_or("Reserved")
    }
}

impl fmt::Display for BitRange<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = if self.high == self.low {
            self.high.to_string()
        } else {
            format!("{}:{}", self.high, self.low)
        };
        write!(f, "{:<5} {}", span, self.label())
    }
}

/// Iterator over the runs of a bit-owner table, from the most significant bit
/// down.
#[derive(Clone, Debug)]
pub struct BitRanges<'a> {
    bits: &'a [Option<String>],
    end: usize,
}

/// Splits `bits` (index 0 is the LSB) into maximal same-owner runs.
pub fn bit_ranges(bits: &[Option<String>]) -> BitRanges<'_> {
    BitRanges { bits, end: bits.len() }
}

impl<'a> Iterator for BitRanges<'a> {
    type Item = BitRange<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let high = self.end.checked_sub(1)?;
        let owner = &self.bits[high];
        let mut low = high;
        while low > 0 && self.bits[low - 1] == *owner {
            low -= 1;
        }
        self.end = low;
        Some(BitRange { high, low, owner: owner.as_deref() })
    }
}
