// src/common/error.rs

#[derive(Debug, thiserror::Error)]
pub enum Bm25Error<E = ()>
where
    E: core::fmt::Debug,
{
    /// Underlying I/O error from the serial binding.
    #[error("I/O error: {0:?}")]
    Io(E),

    /// No complete frame arrived within the per-byte timeout.
    #[error("Operation timed out")]
    Timeout,

    /// Trailing checksum byte does not match the sum of the preceding bytes.
    #[error("Checksum mismatch: expected {expected:#04x}, calculated {calculated:#04x}")]
    ChecksumMismatch { expected: u8, calculated: u8 },

    /// Frame checksum was fine, but the echoed command/address do not match the request.
    #[error("Unexpected response: echoed command {command:#04x}, address {address:#04x}")]
    UnexpectedResponse { command: u8, address: u8 },

    /// Frame too short to carry a checksum, or otherwise malformed.
    #[error("Invalid frame format")]
    InvalidFormat,

    /// Module reported a concentration level outside 1..=4.
    #[error("Invalid VOC level: {0}")]
    InvalidLevel(u8),
}

impl<E: core::fmt::Debug> From<E> for Bm25Error<E> {
    fn from(e: E) -> Self {
        Bm25Error::Io(e)
    }
}

impl<E: core::fmt::Debug> Bm25Error<E> {
    /// True for errors where a frame arrived but failed validation.
    pub fn is_check_error(&self) -> bool {
        matches!(
            self,
            Bm25Error::ChecksumMismatch { .. }
                | Bm25Error::UnexpectedResponse { .. }
                | Bm25Error::InvalidFormat
        )
    }
}
