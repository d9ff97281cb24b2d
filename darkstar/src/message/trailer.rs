//! The Trailing-Field Assembler: the performance globals after the voice data.
//!
//! Unlike the voice data these bytes are raw 7-bit values, not nibble pairs.
//! Offsets are relative to the end of the fifth voice block.

use crate::patch::Patch;
use crate::{SysexError, NUM_PARTS};

/// Offset of the edit part in a base trailer, after one zero byte
const BASE_EDIT_PART: usize = 1;

/// Offset of the first FX send in an XP2 trailer, one byte per part
const XP2_FX_SENDS: usize = 0;
/// Offset of the chorus depth in an XP2 trailer.  The byte before is zero.
const XP2_CHORUS_DEPTH: usize = NUM_PARTS + 1;
/// Offset of the chorus rate in an XP2 trailer
const XP2_CHORUS_RATE: usize = XP2_CHORUS_DEPTH + 1;
/// Offset of the edit part in an XP2 trailer.  Three zero bytes follow.
const XP2_EDIT_PART: usize = XP2_CHORUS_RATE + 1;

/// The layout of a performance trailer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trailer {
    /// `00 <edit part> 00 00`
    EditPartOnly,
    /// `<fx send x5> 00 <chorus depth> <chorus rate> <edit part> 00 00 00`
    Xp2,
}

impl Trailer {
    /// The number of bytes in the trailer, not counting the terminator
    pub const fn len(&self) -> usize {
        match self {
            Self::EditPartOnly => 4,
            Self::Xp2 => 12,
        }
    }
    /// The offset of the edit part within the trailer
    pub const fn edit_part_offset(&self) -> usize {
        match self {
            Self::EditPartOnly => BASE_EDIT_PART,
            Self::Xp2 => XP2_EDIT_PART,
        }
    }
    /// Read the trailer at `data[offset..]` into `patch`.  Fields this
    /// trailer does not carry are left alone.
    pub(crate) fn read(&self, data: &[u8], offset: usize, patch: &mut Patch) -> Result<(), SysexError> {
        let trailer = &data[offset..offset + self.len()];
        let edit_part = trailer[self.edit_part_offset()];
        if edit_part as usize >= NUM_PARTS {
            return Err(SysexError::EditPartOutOfRange(edit_part));
        }
        if let Self::Xp2 = self {
            let sends = &trailer[XP2_FX_SENDS..XP2_FX_SENDS + NUM_PARTS];
            for (part, send) in patch.parts.iter_mut().zip(sends) {
                part.fx_send = *send;
            }
            patch.chorus_depth = trailer[XP2_CHORUS_DEPTH];
            patch.chorus_rate = trailer[XP2_CHORUS_RATE];
        }
        patch.edit_part = edit_part;
        Ok(())
    }
    /// Write the fields of `patch` this trailer carries into `data[offset..]`.
    /// Reserved bytes are left as they are (zero in a freshly framed buffer).
    pub(crate) fn write(&self, patch: &Patch, data: &mut [u8], offset: usize) {
        let trailer = &mut data[offset..offset + self.len()];
        if let Self::Xp2 = self {
            let sends = &mut trailer[XP2_FX_SENDS..XP2_FX_SENDS + NUM_PARTS];
            for (send, part) in sends.iter_mut().zip(patch.parts.iter()) {
                *send = part.fx_send & 0x7F;
            }
            trailer[XP2_CHORUS_DEPTH] = patch.chorus_depth & 0x7F;
            trailer[XP2_CHORUS_RATE] = patch.chorus_rate & 0x7F;
        }
        trailer[self.edit_part_offset()] = patch.edit_part & 0x7F;
    }
}
