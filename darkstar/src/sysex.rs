//! Framing constants and the nibble encoding shared by every DarkStar
//! message.
//!
//! Frame layout:
//!
//! ```text
//! F0 00 20 3B 02 01 <kind> [number lo, number hi] <voice data...> [trailer] F7
//! ```

use arrayvec::ArrayVec;

/// Start of System Exclusive
pub const SYSEX_START: u8 = 0xF0;
/// End of System Exclusive
pub const END_OF_EXCLUSIVE: u8 = 0xF7;

/// The fixed prefix of every message: SysEx start, the Red Sound
/// manufacturer ID (`00 20 3B`), then the DarkStar model bytes.
pub const HEADER: [u8; 6] = [SYSEX_START, 0x00, 0x20, 0x3B, 0x02, 0x01];

/// Index of the kind byte, immediately after [HEADER]
pub const KIND_OFFSET: usize = HEADER.len();

/// Length of the frame before the voice data when there is no number field
pub const HEADER_LEN: usize = KIND_OFFSET + 1;
/// Length of the frame before the voice data for bulk messages, which carry
/// the performance number as two nibbles after the kind byte
pub const BULK_HEADER_LEN: usize = HEADER_LEN + 2;

/// The size of one encoded part, in bytes
pub const VOICE_DATA_LEN: usize = 100;

/// The longest message the DarkStar sends (an XP2 bulk performance)
pub const MAX_MESSAGE_LEN: usize = 522;

/// Fixed-capacity storage for one encoded message.  An empty buffer means
/// nothing was emitted.
pub type SysexBuffer = ArrayVec<u8, MAX_MESSAGE_LEN>;

/// The kind byte at [KIND_OFFSET]
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    /// A performance to/from working memory
    Performance = 0x01,
    /// A performance addressed by number
    BulkPerformance = 0x02,
    /// A single part's voice data
    SingleVoice = 0x03,
}

impl MessageKind {
    /// Try to create a `MessageKind` from the raw kind byte
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::Performance),
            0x02 => Some(Self::BulkPerformance),
            0x03 => Some(Self::SingleVoice),
            _ => None,
        }
    }
}

/// Read the value stored as a nibble pair at `pos`.
///
/// The documentation for the DarkStar says the high nibble comes first.  It
/// doesn't: `data[pos]` holds the low nibble and `data[pos + 1]` the high
/// nibble.  Each byte is masked to four bits so the result is always an
/// unsigned 0-255 value.
pub fn denybble(data: &[u8], pos: usize) -> u8 {
    ((data[pos + 1] & 0x0F) << 4) | (data[pos] & 0x0F)
}

/// Write `value` as a nibble pair at `pos`, low nibble first
pub fn nybblize(data: &mut [u8], pos: usize, value: u8) {
    data[pos] = value & 0x0F;
    data[pos + 1] = (value >> 4) & 0x0F;
}

/// Build a zeroed buffer of length `len` with the header, kind byte, and
/// terminator already in place.
pub(crate) fn framed(len: usize, kind: MessageKind) -> SysexBuffer {
    let mut data = SysexBuffer::new();
    // len never exceeds MAX_MESSAGE_LEN: every caller passes a MessageShape length
    data.extend(core::iter::repeat(0u8).take(len));
    data[..HEADER.len()].copy_from_slice(&HEADER);
    data[KIND_OFFSET] = kind as u8;
    data[len - 1] = END_OF_EXCLUSIVE;
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn low_nibble_is_written_first() {
        let mut data = [0u8; 4];
        for v in 0..=127u8 {
            nybblize(&mut data, 1, v);
            assert_eq!(data[1], v & 0x0F);
            assert_eq!(data[2], (v >> 4) & 0x0F);
        }
    }
    #[test]
    fn denybble_is_unsigned() {
        // A high nibble of 0xF would go negative as a signed byte
        let data = [0x08, 0x0F];
        assert_eq!(denybble(&data, 0), 0xF8);
        // stray high bits in either byte are ignored
        let data = [0x78, 0x7F];
        assert_eq!(denybble(&data, 0), 0xF8);
    }
    #[test]
    fn full_byte_values_survive() {
        let mut data = [0u8; 2];
        for v in 0..=255u8 {
            nybblize(&mut data, 0, v);
            assert_eq!(denybble(&data, 0), v);
        }
    }
    #[test]
    fn framed_buffer_layout() {
        let data = framed(108, MessageKind::SingleVoice);
        assert_eq!(data.len(), 108);
        assert_eq!(&data[..7], &[0xF0, 0x00, 0x20, 0x3B, 0x02, 0x01, 0x03]);
        assert_eq!(data[107], 0xF7);
        assert!(data[7..107].iter().all(|&b| b == 0));
    }
    #[test]
    fn kind_from_u8() {
        assert_eq!(MessageKind::from_u8(0x01), Some(MessageKind::Performance));
        assert_eq!(MessageKind::from_u8(0x02), Some(MessageKind::BulkPerformance));
        assert_eq!(MessageKind::from_u8(0x03), Some(MessageKind::SingleVoice));
        assert_eq!(MessageKind::from_u8(0x04), None);
    }
}
