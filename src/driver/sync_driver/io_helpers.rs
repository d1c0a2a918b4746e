// src/driver/sync_driver/io_helpers.rs

use super::Bm25s3421;
use crate::common::{
    checksum::verify_frame,
    error::Bm25Error,
    frame::CommandFrame,
    hal_traits::{SensorSerial, SensorTimer},
    timing,
};
use core::time::Duration;
use embedded_hal::digital::InputPin;
use log::{debug, trace, warn};
use nb::Result as NbResult;

impl<S, T, P> Bm25s3421<S, T, P>
where
    S: SensorSerial,
    T: SensorTimer,
    P: InputPin,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning the final result or a timeout error.
    ///
    /// Sleeps `timing::POLL_STEP` between attempts; the deadline is measured
    /// on the timer's monotonic clock.
    pub(super) fn execute_blocking_io_with_timeout<FN, R>(
        &mut self,
        timeout: Duration,
        mut f: FN,
    ) -> Result<R, Bm25Error<S::Error>>
    where
        FN: FnMut(&mut S) -> NbResult<R, S::Error>,
    {
        let deadline = self.timer.now() + timeout;

        loop {
            match f(&mut self.serial) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.timer.now() >= deadline {
                        return Err(Bm25Error::Timeout);
                    }
                    self.timer.delay_us(timing::POLL_STEP.as_micros() as u32);
                }
                Err(nb::Error::Other(e)) => return Err(Bm25Error::Io(e)),
            }
        }
    }

    /// Drains and discards everything currently in the RX buffer.
    ///
    /// Returns the number of bytes thrown away.
    pub fn clear_receive_fifo(&mut self) -> usize {
        let mut discarded = 0;
        while self.serial.bytes_available() > 0 {
            match self.serial.read_byte() {
                Ok(_) => discarded += 1,
                Err(_) => break,
            }
        }
        if discarded > 0 {
            trace!("Discarded {} stale RX bytes", discarded);
        }
        discarded
    }

    /// Clears stale input, then writes and flushes a command frame.
    pub(super) fn send_frame(&mut self, frame: &CommandFrame) -> Result<(), Bm25Error<S::Error>> {
        self.clear_receive_fifo();

        let bytes = frame.as_bytes();
        let write_timeout = timing::BYTE_DURATION * bytes.len() as u32 + Duration::from_millis(20);

        debug!("TX {:02X?}", bytes);
        for byte in bytes {
            self.execute_blocking_io_with_timeout(write_timeout, |serial| serial.write_byte(*byte))?;
        }

        self.execute_blocking_io_with_timeout(timing::FLUSH_TIMEOUT, |serial| serial.flush())?;
        Ok(())
    }

    /// Reads exactly `N` bytes, each within `timing::BYTE_TIMEOUT`, and
    /// checks the trailing checksum.
    pub(super) fn read_frame<const N: usize>(&mut self) -> Result<[u8; N], Bm25Error<S::Error>> {
        let mut buffer = [0u8; N];

        for (received, slot) in buffer.iter_mut().enumerate() {
            match self.execute_blocking_io_with_timeout(timing::BYTE_TIMEOUT, |serial| serial.read_byte()) {
                Ok(byte) => *slot = byte,
                Err(Bm25Error::Timeout) => {
                    debug!("RX timeout after {} of {} bytes", received, N);
                    return Err(Bm25Error::Timeout);
                }
                Err(e) => return Err(e),
            }
        }

        debug!("RX {:02X?}", buffer);
        if let Err(e) = verify_frame(&buffer) {
            warn!("Rejected reply: {:?}", e);
            return Err(e);
        }
        Ok(buffer)
    }
}
