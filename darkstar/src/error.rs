use thiserror::Error;

/// Errors produced while classifying or decoding a DarkStar message
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysexError {
    /// The message length does not match any known DarkStar layout
    #[error("unrecognized DarkStar message length: {0} bytes")]
    UnrecognizedLength(usize),
    /// A single voice was received and no destination part was chosen
    #[error("no destination part chosen for single voice data")]
    Cancelled,
    /// The bulk performance number is outside 0-63
    #[error("performance number {0} out of range")]
    MalformedNumber(u8),
    /// The current edit part is outside 0-4
    #[error("edit part {0} out of range")]
    EditPartOutOfRange(u8),
    /// The DarkStar cannot receive individual parameters
    #[error("the DarkStar only accepts whole voices and performances")]
    Unsupported,
}
