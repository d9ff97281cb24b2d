use darkstar::SysexError;
use thiserror::Error;

/// Errors produced by the editor host
#[derive(Error, Debug)]
pub enum EditorError {
    /// The DarkStar data could not be decoded
    #[error(transparent)]
    Sysex(#[from] SysexError),
    /// Reading or writing a file failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    /// A patch or preference file could not be (de)serialized
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Bytes were not a valid MIDI message
    #[error("invalid MIDI data: {0:?}")]
    Midi(wmidi::FromBytesError),
    /// A MIDI message that is not System Exclusive was given to the codec
    #[error("not a System Exclusive message")]
    NotSysex,
    /// A parameter key that does not name any patch value
    #[error("unknown parameter key: {0}")]
    UnknownKey(String),
    /// A part index outside 0-4
    #[error("part index {0} out of range")]
    BadPart(usize),
    /// A location that is not a number from 1 to 64
    #[error("\"{0}\" is not a patch location (1-64)")]
    BadLocation(String),
    /// A value too large for its parameter
    #[error("{value} is out of range for {key} (0-{max})")]
    OutOfRange {
        /// The parameter key
        key: String,
        /// The rejected value
        value: u8,
        /// The largest valid value
        max: u8,
    },
}

impl From<wmidi::FromBytesError> for EditorError {
    fn from(value: wmidi::FromBytesError) -> Self {
        Self::Midi(value)
    }
}
