use crate::message::{classify, Destination, MessageShape};
use crate::patch::{Generation, ParamRef, Patch, NUM_LOCATIONS};
use crate::sysex::{denybble, framed, nybblize, SysexBuffer, HEADER_LEN};
use crate::voice::Part;
use crate::{SysexError, NUM_PARTS};

/// Chooses the destination part for a single voice message, which does not
/// carry one.  Returning `None` cancels the decode.
///
/// Implemented for any `FnMut() -> Option<usize>`, so a closure can be used
/// wherever a resolver is needed.
pub trait PartResolver {
    /// Pick a part index, 0-4, or `None` to cancel
    fn choose_part(&mut self) -> Option<usize>;
}

impl<F: FnMut() -> Option<usize>> PartResolver for F {
    fn choose_part(&mut self) -> Option<usize> {
        self()
    }
}

/// A resolver that always gives the same answer
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixedPart(pub Option<usize>);

impl PartResolver for FixedPart {
    fn choose_part(&mut self) -> Option<usize> {
        self.0
    }
}

/// The result of a successful [decode]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded {
    /// The decoded patch, including any fields carried over from the patch
    /// it was decoded over
    pub patch: Patch,
    /// The layout of the message
    pub shape: MessageShape,
}

impl Decoded {
    /// The hardware generation the message was laid out for.  `None` for
    /// single voice messages, which do not say.
    pub fn generation(&self) -> Option<Generation> {
        self.shape.generation()
    }
}

fn decode_number(bytes: &[u8]) -> Result<u8, SysexError> {
    // only the low 7 bits are significant
    let number = denybble(bytes, HEADER_LEN) & 0x7F;
    if number >= NUM_LOCATIONS {
        return Err(SysexError::MalformedNumber(number));
    }
    Ok(number)
}

fn encode_number(number: u8, data: &mut [u8]) {
    let clamped = if number >= NUM_LOCATIONS {
        log::warn!("Performance number {} out of range, sending {}", number, NUM_LOCATIONS - 1);
        NUM_LOCATIONS - 1
    } else {
        number
    };
    nybblize(data, HEADER_LEN, clamped);
}

/// Decode `bytes` over the top of `current`.
///
/// Fields not present in the message keep their values from `current`: the
/// number for non-bulk messages, the FX sends and chorus for base messages,
/// and everything but the chosen part's voice data for single voices.  The
/// resolver is only consulted for single voice messages.
///
/// `current` is never modified.  See [Patch::apply_sysex] to decode in place.
pub fn decode<R: PartResolver + ?Sized>(
    current: &Patch,
    bytes: &[u8],
    resolver: &mut R,
) -> Result<Decoded, SysexError> {
    let shape = classify(bytes)?;
    let mut patch = current.clone();
    if shape.needs_destination() {
        let idx = resolver
            .choose_part()
            .filter(|idx| *idx < NUM_PARTS)
            .ok_or(SysexError::Cancelled)?;
        log::debug!("Decoding single voice into part {}", idx + 1);
        patch.parts[idx].decode_into(bytes, shape.voice_offset(0));
        return Ok(Decoded { patch, shape });
    }
    if shape.has_number() {
        patch.number = decode_number(bytes)?;
    }
    for (idx, part) in patch.parts.iter_mut().enumerate() {
        part.decode_into(bytes, shape.voice_offset(idx));
    }
    if let Some(trailer) = shape.trailer() {
        trailer.read(bytes, shape.trailer_offset(), &mut patch)?;
    }
    Ok(Decoded { patch, shape })
}

/// Encode a full performance.
///
/// Sends to working memory and writes to file produce a performance message,
/// anything else a bulk performance addressed by the patch number.  The
/// generation decides which trailer is written; in base messages the FX
/// sends and chorus are dropped.
pub fn encode(
    patch: &Patch,
    generation: Generation,
    destination: Destination,
    to_file: bool,
) -> SysexBuffer {
    let shape = MessageShape::for_target(generation, destination, to_file);
    let mut data = framed(shape.len(), shape.kind());
    if shape.has_number() {
        encode_number(patch.number, &mut data);
    }
    for (idx, part) in patch.parts.iter().enumerate() {
        part.encode(&mut data, shape.voice_offset(idx));
    }
    if let Some(trailer) = shape.trailer() {
        trailer.write(patch, &mut data, shape.trailer_offset());
    }
    data
}

/// Encode one part as a single voice message.  The DarkStar will load it into
/// the currently selected part.
pub fn encode_single_voice(part: &Part) -> SysexBuffer {
    let shape = MessageShape::SingleVoice;
    let mut data = framed(shape.len(), shape.kind());
    part.encode(&mut data, shape.voice_offset(0));
    data
}

/// Encode a single parameter change.
///
/// The DarkStar has no message for this, so the result is always empty and
/// callers must send the whole performance instead.
pub fn emit_parameter(param: ParamRef) -> SysexBuffer {
    log::debug!("Not emitting {:?}: {}", param, SysexError::Unsupported);
    SysexBuffer::new()
}

impl Patch {
    /// Decode `bytes` into this patch.  On error the patch is unchanged.
    ///
    /// Returns the generation of the message, if it has one.
    pub fn apply_sysex<R: PartResolver + ?Sized>(
        &mut self,
        bytes: &[u8],
        resolver: &mut R,
    ) -> Result<Option<Generation>, SysexError> {
        let decoded = decode(self, bytes, resolver)?;
        *self = decoded.patch;
        Ok(decoded.shape.generation())
    }
}
