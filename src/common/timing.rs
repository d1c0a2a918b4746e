// src/common/timing.rs

use core::time::Duration;

// The module's UART is fixed at 9600 8N1. One byte is 10 bits on the wire,
// so a byte takes ~1.04 ms and an 8-byte reply ~8.3 ms.

/// Line rate of the module's UART.
pub const BAUD_RATE: u32 = 9600;

/// Nominal duration of a single byte (10 bits) at 9600 baud.
pub const BYTE_DURATION: Duration = Duration::from_micros(1042);

/// Time the module needs between receiving a command and its reply being readable.
pub const RESPONSE_SETTLE: Duration = Duration::from_millis(50);

/// Maximum wait for each byte of a reply once the settle delay has passed.
pub const BYTE_TIMEOUT: Duration = Duration::from_millis(10);

/// Sleep between polls of the serial binding while waiting for a byte.
pub const POLL_STEP: Duration = Duration::from_millis(1);

/// Maximum wait for the transmit buffer to drain after a command.
pub const FLUSH_TIMEOUT: Duration = Duration::from_millis(10);

/// Header mismatches / bad checksums tolerated by one telemetry scan.
pub const MAX_RESYNC_ATTEMPTS: usize = 3;
