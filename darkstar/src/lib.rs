//! This crate contains the SysEx codec for the Red Sound DarkStar (and the
//! DarkStar XP2).  It is `no_std` and does no allocation: every encoded
//! message fits in a [SysexBuffer], and decoding works directly on the
//! incoming byte slice.
//!
//! The DarkStar exchanges three kinds of message:
//!  - A single voice ([MessageShape::SingleVoice]), which carries one part
//!    but does not say which part it belongs to.
//!  - A single performance, sent to or from working memory.
//!  - A bulk performance, addressed by performance number.
//!
//! The performance messages come in two sizes depending on the hardware
//! generation ([Generation]).  The XP2 adds FX sends and a chorus to the
//! trailing globals.  Which layout is present is determined from the length
//! of the message alone, see [classify].
//!
//! Most users will want [decode]/[encode] (or [Patch::apply_sysex]) and the
//! [Part] and [Patch] types.

#![no_std]
#![warn(missing_docs)]

mod codec;
mod error;
pub mod message;
pub mod patch;
pub mod sysex;
pub mod voice;

pub use codec::{decode, emit_parameter, encode, encode_single_voice};
pub use codec::{Decoded, FixedPart, PartResolver};
pub use error::SysexError;
pub use message::{classify, Destination, MessageShape};
pub use patch::{Generation, GlobalParam, ParamRef, Patch};
pub use sysex::SysexBuffer;
pub use voice::{Part, PartParam};

/// The number of parts in a performance
pub const NUM_PARTS: usize = 5;
