use crate::error::ParseErrorKind;
use crate::ranges::{bit_ranges, BitRanges};
use indexmap::IndexMap;

/// Bits per register size unit.
pub const WORD_BITS: usize = 16;

/// Field values are `u32`, so no register is wider than that.
const MAX_WIDTH: usize = u32::BITS as usize;

/// A memory-mapped register and the owners of its bits.
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Register {
    /// Short name of the register, unique within its module.
    pub name: String,
    /// Offset relative to each base register.
    pub offset: u32,
    /// Absolute address of every instance.
    pub addresses: Vec<u32>,
    /// Width in 16-bit words, zero until the size line is seen.
    pub size: u32,
    /// Writes need the `EALLOW` unlock sequence.
    pub locked: bool,
    pub(crate) bits: Vec<Option<String>>,
    pub(crate) shifts: IndexMap<String, u32>,
}

impl Register {
    pub(crate) fn new(
        name: &str,
        offset: u32,
        bases: &[u32],
        locked: bool,
    ) -> Result<Self, ParseErrorKind> {
        let addresses = bases
            .iter()
            .map(|base| base.checked_add(offset).ok_or(ParseErrorKind::AddressOverflow))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { name: name.to_owned(), offset, addresses, locked, ..Self::default() })
    }

    /// Width of the register in bits.
    pub fn width(&self) -> usize {
        self.bits.len()
    }

    /// Owner of every bit, index 0 is the least significant bit.
    pub fn bits(&self) -> &[Option<String>] {
        &self.bits
    }

    /// Maximal same-owner bit runs, from the most significant bit down.
    pub fn bit_ranges(&self) -> BitRanges<'_> {
        bit_ranges(&self.bits)
    }

    /// Returns `true` once the size line was seen.
    pub fn is_sized(&self) -> bool {
        self.size > 0
    }

    pub(crate) fn set_size(&mut self, words: u32) -> Result<(), ParseErrorKind> {
        if self.is_sized() {
            return Err(ParseErrorKind::DuplicateSize);
        }
        let width = (words as usize)
            .checked_mul(WORD_BITS)
            .filter(|&width| width <= MAX_WIDTH)
            .ok_or(ParseErrorKind::SizeOutOfRange(MAX_WIDTH))?;
        self.size = words;
        self.bits = vec![None; width];
        Ok(())
    }

    pub(crate) fn add_bit(&mut self, field: &str, mask: u32) -> Result<(), ParseErrorKind> {
        if mask.count_ones() != 1 {
            return Err(ParseErrorKind::InvalidBitMask);
        }
        if self.bits.iter().flatten().any(|owner| owner == field) {
            return Err(ParseErrorKind::DuplicateFieldName);
        }
        let width = self.width();
        let index = mask.trailing_zeros() as usize;
        let slot = self.bits.get_mut(index).ok_or(ParseErrorKind::BitOutOfRange(width))?;
        if slot.is_some() {
            return Err(ParseErrorKind::BitAlreadyAssigned);
        }
        *slot = Some(field.to_owned());
        Ok(())
    }

    pub(crate) fn add_shift(&mut self, field: &str, shift: u32) -> Result<(), ParseErrorKind> {
        if self.shifts.contains_key(field) {
            return Err(ParseErrorKind::DuplicateShift);
        }
        self.shifts.insert(field.to_owned(), shift);
        Ok(())
    }

    pub(crate) fn add_mask(&mut self, field: &str, mask: u32) -> Result<(), ParseErrorKind> {
        let shift = *self.shifts.get(field).ok_or(ParseErrorKind::ShiftNotDefined)?;
        let count = mask.count_ones();
        if mask == 0 || shift >= u32::BITS || ((1_u64 << count) - 1) << shift != u64::from(mask) {
            return Err(ParseErrorKind::InvalidMaskShiftCombination);
        }
        let range = shift as usize..(shift + count) as usize;
        if range.end > self.width() {
            return Err(ParseErrorKind::BitOutOfRange(self.width()));
        }
        for slot in &mut self.bits[range] {
            match slot {
                Some(owner) if owner.as_str() != field => {
                    return Err(ParseErrorKind::BitAlreadyAssigned);
                }
                _ => *slot = Some(field.to_owned()),
            }
        }
        Ok(())
    }
}
