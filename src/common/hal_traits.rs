// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::{Add, Sub};
use core::time::Duration;

/// A monotonic point in time, as produced by [`SensorTimer::now`].
pub trait SensorInstant:
    Copy + Ord + Add<Duration, Output = Self> + Sub<Self, Output = Duration>
{
}

impl<T> SensorInstant for T where
    T: Copy + Ord + Add<Duration, Output = T> + Sub<T, Output = Duration>
{
}

/// Abstraction for timer/delay operations required by the driver.
///
/// Note: delays could be taken from `embedded_hal::delay::DelayNs`, but the
/// timeout loops also need a monotonic clock, which embedded-hal v1 lacks.
pub trait SensorTimer {
    type Instant: SensorInstant;

    /// Delay for at least the specified number of microseconds.
    fn delay_us(&mut self, us: u32);

    /// Delay for at least the specified number of milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Current monotonic time.
    fn now(&self) -> Self::Instant;
}

/// Abstraction for the byte-stream link to the module.
pub trait SensorSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the RX buffer.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if no byte is available yet.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if the write buffer is full.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;

    /// Number of received bytes that can be read without blocking.
    fn bytes_available(&mut self) -> usize;

    /// (Re)configures the line rate. Framing is always 8N1.
    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error>;
}
