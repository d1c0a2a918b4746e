// src/common/checksum.rs

use super::error::Bm25Error;

/// Calculates the BM25S3421-1 frame checksum.
///
/// The module uses the two's-complement negation of the byte sum: all bytes
/// are added modulo 256, the sum is inverted, and one is added. Appending the
/// result to the data makes the whole frame sum to zero.
///
/// # Arguments
///
/// * `data`: Every byte of the frame *before* the checksum byte.
///
/// # Returns
///
/// The checksum byte to transmit (or to compare against).
#[inline]
pub fn checksum(data: &[u8]) -> u8 {
    let sum = data.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    (!sum).wrapping_add(1)
}

/// Verifies a complete frame whose last byte is the checksum.
///
/// # Returns
///
/// * `Ok(())` if the checksum matches.
/// * `Err(Bm25Error::InvalidFormat)` if the frame is empty.
/// * `Err(Bm25Error::ChecksumMismatch)` if the checksums don't match.
pub fn verify_frame<E>(frame: &[u8]) -> Result<(), Bm25Error<E>>
where
    E: core::fmt::Debug,
{
    let (received, data) = frame.split_last().ok_or(Bm25Error::InvalidFormat)?;
    let calculated = checksum(data);

    if calculated == *received {
        Ok(())
    } else {
        Err(Bm25Error::ChecksumMismatch { expected: *received, calculated })
    }
}

/// Convenience check, discarding the mismatch details.
#[inline]
pub fn is_valid_frame(frame: &[u8]) -> bool {
    verify_frame::<()>(frame).is_ok()
}
