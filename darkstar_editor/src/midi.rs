//! Conversion between DarkStar messages and `wmidi` messages

use darkstar::sysex::{END_OF_EXCLUSIVE, SYSEX_START};
use wmidi::{MidiMessage, U7};

use crate::EditorError;

/// View an encoded buffer as a MIDI message.  Fails if `bytes` is empty (an
/// unsupported emission) or not a well formed SysEx message.
pub fn to_midi(bytes: &[u8]) -> Result<MidiMessage<'_>, EditorError> {
    match MidiMessage::try_from(bytes)? {
        msg @ MidiMessage::SysEx(_) => Ok(msg),
        _ => Err(EditorError::NotSysex),
    }
}

/// Frame the payload of a SysEx message so it can be decoded.  `wmidi`
/// strips the start and end bytes, the codec expects them.
pub fn from_midi(msg: &MidiMessage<'_>) -> Result<Vec<u8>, EditorError> {
    match msg {
        MidiMessage::SysEx(data) => {
            let payload = U7::data_to_bytes(data);
            let mut bytes = Vec::with_capacity(payload.len() + 2);
            bytes.push(SYSEX_START);
            bytes.extend_from_slice(payload);
            bytes.push(END_OF_EXCLUSIVE);
            Ok(bytes)
        }
        _ => Err(EditorError::NotSysex),
    }
}

/// The program change selecting performance `number` on `channel`
pub fn program_change(channel: wmidi::Channel, number: u8) -> MidiMessage<'static> {
    MidiMessage::ProgramChange(channel, U7::from_u8_lossy(number))
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkstar::{encode_single_voice, Part};

    #[test]
    fn encoded_voice_is_sysex() {
        let bytes = encode_single_voice(&Part::init());
        let msg = to_midi(&bytes).unwrap();
        let MidiMessage::SysEx(data) = &msg else {
            panic!("expected SysEx, got {:?}", msg);
        };
        assert_eq!(data.len(), bytes.len() - 2);
        assert_eq!(from_midi(&msg).unwrap(), &bytes[..]);
    }
    #[test]
    fn empty_buffer_is_rejected() {
        assert!(matches!(to_midi(&[]), Err(EditorError::Midi(_))));
    }
    #[test]
    fn other_messages_are_not_sysex() {
        let msg = program_change(wmidi::Channel::Ch3, 12);
        assert!(matches!(from_midi(&msg), Err(EditorError::NotSysex)));
        let mut bytes = [0u8; 2];
        assert_eq!(msg.copy_to_slice(&mut bytes).unwrap(), 2);
        assert_eq!(bytes, [0xC2, 12]);
        assert!(matches!(to_midi(&bytes), Err(EditorError::NotSysex)));
    }
}
