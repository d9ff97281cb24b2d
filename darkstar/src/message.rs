//! The Message Classifier: working out which layout a message uses.
//!
//! DarkStar messages do not describe their own layout beyond the kind byte,
//! and the kind byte does not distinguish the two hardware generations, so
//! the layout is determined from the length of the message alone:
//!
//! | Length | Shape                   | Parts | Number | Trailer            |
//! |--------|-------------------------|-------|--------|--------------------|
//! | 108    | Single voice            | 1     | no     | none               |
//! | 512    | Performance             | 5     | no     | edit part          |
//! | 514    | Bulk performance        | 5     | yes    | edit part          |
//! | 520    | Performance (XP2)       | 5     | no     | FX, chorus, edit   |
//! | 522    | Bulk performance (XP2)  | 5     | yes    | FX, chorus, edit   |
//!
//! The DarkStar documentation gives the XP2 lengths as 516 and 518.  Real
//! units send 520 and 522, and those are what is recognized here.

mod trailer;
pub use trailer::Trailer;

use crate::patch::Generation;
use crate::sysex::{MessageKind, BULK_HEADER_LEN, HEADER, HEADER_LEN, KIND_OFFSET, VOICE_DATA_LEN};
use crate::{SysexError, NUM_PARTS};

/// Where an encoded performance is headed
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Destination {
    /// The synth's edit buffer
    WorkingMemory,
    /// A numbered performance location (bulk dump)
    Addressed,
}

/// One of the known message layouts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageShape {
    /// Voice data for one part.  The destination part is not in the message.
    SingleVoice,
    /// A performance for working memory
    Performance(Generation),
    /// A performance with its location number
    BulkPerformance(Generation),
}

impl MessageShape {
    /// Every known shape
    pub const ALL: [MessageShape; 5] = [
        Self::SingleVoice,
        Self::Performance(Generation::Base),
        Self::BulkPerformance(Generation::Base),
        Self::Performance(Generation::Xp2),
        Self::BulkPerformance(Generation::Xp2),
    ];
    /// Look up the shape of a message with `len` bytes
    pub const fn from_len(len: usize) -> Option<Self> {
        match len {
            108 => Some(Self::SingleVoice),
            512 => Some(Self::Performance(Generation::Base)),
            514 => Some(Self::BulkPerformance(Generation::Base)),
            520 => Some(Self::Performance(Generation::Xp2)),
            522 => Some(Self::BulkPerformance(Generation::Xp2)),
            _ => None,
        }
    }
    /// The shape to emit a performance in.  Sends to working memory and
    /// writes to a file use a plain performance, anything else is a bulk
    /// performance addressed by number.
    pub const fn for_target(generation: Generation, destination: Destination, to_file: bool) -> Self {
        match (destination, to_file) {
            (Destination::WorkingMemory, _) | (_, true) => Self::Performance(generation),
            (Destination::Addressed, false) => Self::BulkPerformance(generation),
        }
    }
    /// The kind byte for this shape
    pub const fn kind(&self) -> MessageKind {
        match self {
            Self::SingleVoice => MessageKind::SingleVoice,
            Self::Performance(_) => MessageKind::Performance,
            Self::BulkPerformance(_) => MessageKind::BulkPerformance,
        }
    }
    /// The hardware generation implied by this shape.  Single voices are the
    /// same on both generations.
    pub const fn generation(&self) -> Option<Generation> {
        match self {
            Self::SingleVoice => None,
            Self::Performance(generation) | Self::BulkPerformance(generation) => Some(*generation),
        }
    }
    /// True if the caller must say which part this message is for
    pub const fn needs_destination(&self) -> bool {
        matches!(self, Self::SingleVoice)
    }
    /// True if the message carries a performance number
    pub const fn has_number(&self) -> bool {
        matches!(self, Self::BulkPerformance(_))
    }
    /// The number of parts of voice data in the message
    pub const fn num_parts(&self) -> usize {
        match self {
            Self::SingleVoice => 1,
            _ => NUM_PARTS,
        }
    }
    /// The fields following the voice data, if any
    pub const fn trailer(&self) -> Option<Trailer> {
        match self.generation() {
            None => None,
            Some(Generation::Base) => Some(Trailer::EditPartOnly),
            Some(Generation::Xp2) => Some(Trailer::Xp2),
        }
    }
    /// The number of bytes before the first part's voice data
    pub const fn header_len(&self) -> usize {
        if self.has_number() {
            BULK_HEADER_LEN
        } else {
            HEADER_LEN
        }
    }
    /// The offset of the voice data for part `idx`
    pub const fn voice_offset(&self, idx: usize) -> usize {
        self.header_len() + VOICE_DATA_LEN * idx
    }
    /// The offset of the first byte after the voice data
    pub const fn trailer_offset(&self) -> usize {
        self.voice_offset(self.num_parts())
    }
    /// The total length of the message, including the terminator
    pub const fn len(&self) -> usize {
        let trailer = match self.trailer() {
            Some(trailer) => trailer.len(),
            None => 0,
        };
        self.trailer_offset() + trailer + 1
    }
}

/// Determine the layout of `bytes` from its length.
///
/// The header and kind byte are not needed to classify a message, but a
/// mismatch is logged since it usually means the data is from another synth.
pub fn classify(bytes: &[u8]) -> Result<MessageShape, SysexError> {
    let shape = MessageShape::from_len(bytes.len()).ok_or_else(|| {
        log::debug!("No DarkStar layout is {} bytes long", bytes.len());
        SysexError::UnrecognizedLength(bytes.len())
    })?;
    if bytes[..HEADER.len()] != HEADER || bytes[KIND_OFFSET] != shape.kind() as u8 {
        log::warn!(
            "{} byte message does not have the expected DarkStar header: {:02X?}",
            bytes.len(),
            &bytes[..HEADER_LEN]
        );
    }
    log::debug!("Classified {} byte message as {:?}", bytes.len(), shape);
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_lengths() {
        assert_eq!(classify(&[0u8; 108]), Ok(MessageShape::SingleVoice));
        assert_eq!(
            classify(&[0u8; 512]),
            Ok(MessageShape::Performance(Generation::Base))
        );
        assert_eq!(
            classify(&[0u8; 514]),
            Ok(MessageShape::BulkPerformance(Generation::Base))
        );
        assert_eq!(
            classify(&[0u8; 520]),
            Ok(MessageShape::Performance(Generation::Xp2))
        );
        assert_eq!(
            classify(&[0u8; 522]),
            Ok(MessageShape::BulkPerformance(Generation::Xp2))
        );
    }
    #[test]
    fn misdocumented_xp2_lengths_are_rejected() {
        assert_eq!(classify(&[0u8; 516]), Err(SysexError::UnrecognizedLength(516)));
        assert_eq!(classify(&[0u8; 518]), Err(SysexError::UnrecognizedLength(518)));
    }
    #[test]
    fn other_lengths_are_rejected() {
        for len in [0usize, 1, 7, 107, 109, 511, 513, 515, 519, 521, 523, 1024] {
            let data = [0u8; 1024];
            assert_eq!(
                classify(&data[..len]),
                Err(SysexError::UnrecognizedLength(len))
            );
        }
    }
    #[test]
    fn computed_lengths_match_table() {
        for shape in MessageShape::ALL {
            assert_eq!(MessageShape::from_len(shape.len()), Some(shape));
        }
    }
    #[test]
    fn offsets() {
        let bulk = MessageShape::BulkPerformance(Generation::Xp2);
        assert_eq!(bulk.header_len(), 9);
        assert_eq!(bulk.voice_offset(1), 109);
        assert_eq!(bulk.trailer_offset(), 509);
        let single = MessageShape::SingleVoice;
        assert_eq!(single.header_len(), 7);
        assert_eq!(single.trailer_offset(), 107);
        assert_eq!(single.trailer(), None);
    }
    #[test]
    fn target_shapes() {
        use Destination::*;
        let g = Generation::Xp2;
        assert_eq!(MessageShape::for_target(g, WorkingMemory, false), MessageShape::Performance(g));
        assert_eq!(MessageShape::for_target(g, WorkingMemory, true), MessageShape::Performance(g));
        assert_eq!(MessageShape::for_target(g, Addressed, true), MessageShape::Performance(g));
        assert_eq!(MessageShape::for_target(g, Addressed, false), MessageShape::BulkPerformance(g));
    }
    #[test]
    fn only_single_voice_is_ambiguous() {
        for shape in MessageShape::ALL {
            assert_eq!(shape.needs_destination(), shape == MessageShape::SingleVoice);
            assert_eq!(shape.generation().is_none(), shape.needs_destination());
        }
    }
}
