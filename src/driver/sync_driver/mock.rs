// src/driver/sync_driver/mock.rs

// Test doubles shared by the driver's unit tests.

use crate::common::{
    checksum::checksum,
    frame::{PACKET_LEN, RESPONSE_LEN, TELEMETRY_HEADER},
    hal_traits::{SensorSerial, SensorTimer},
};
use core::convert::Infallible;
use core::time::Duration;
use heapless::{Deque, Vec};
use nb::Result as NbResult;

// --- Mock Instant ---
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct MockInstant(pub u64);

impl core::ops::Add<Duration> for MockInstant {
    type Output = Self;
    fn add(self, rhs: Duration) -> Self {
        MockInstant(self.0.saturating_add(rhs.as_micros() as u64))
    }
}

impl core::ops::Sub<MockInstant> for MockInstant {
    type Output = Duration;
    fn sub(self, rhs: MockInstant) -> Duration {
        Duration::from_micros(self.0.saturating_sub(rhs.0))
    }
}

// --- Mock Timer ---
#[derive(Debug, Default)]
pub(crate) struct MockTimer {
    pub current_time_us: u64,
}

impl MockTimer {
    pub fn elapsed(&self) -> Duration {
        Duration::from_micros(self.current_time_us)
    }
}

impl SensorTimer for MockTimer {
    type Instant = MockInstant;
    fn delay_us(&mut self, us: u32) {
        self.current_time_us = self.current_time_us.saturating_add(us as u64);
    }
    fn delay_ms(&mut self, ms: u32) {
        self.delay_us(ms.saturating_mul(1000));
    }
    fn now(&self) -> Self::Instant {
        MockInstant(self.current_time_us)
    }
}

// --- Mock Comm Error ---
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) struct MockCommError;

// --- Mock Serial ---
// Replies are released into the RX queue on flush, i.e. after the driver has
// cleared stale input and sent its command.
#[derive(Debug, Default)]
pub(crate) struct MockSerial {
    pub rx: Deque<u8, 128>,
    pub replies: Deque<Vec<u8, 32>, 4>,
    pub write_log: Vec<u8, 64>,
    pub baud: Option<u32>,
    pub flush_count: usize,
    pub fail_reads: bool,
    pub fail_config: bool,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes already sitting in the RX buffer.
    pub fn stage_rx(&mut self, data: &[u8]) {
        for byte in data {
            self.rx.push_back(*byte).expect("mock rx queue full");
        }
    }

    /// Bytes the module sends back after the next command.
    pub fn queue_reply(&mut self, data: &[u8]) {
        let reply = Vec::from_slice(data).expect("mock reply too long");
        self.replies.push_back(reply).expect("too many mock replies");
    }
}

impl SensorSerial for MockSerial {
    type Error = MockCommError;

    fn read_byte(&mut self) -> NbResult<u8, Self::Error> {
        if self.fail_reads {
            return Err(nb::Error::Other(MockCommError));
        }
        self.rx.pop_front().ok_or(nb::Error::WouldBlock)
    }

    fn write_byte(&mut self, byte: u8) -> NbResult<(), Self::Error> {
        self.write_log.push(byte).map_err(|_| nb::Error::Other(MockCommError))
    }

    fn flush(&mut self) -> NbResult<(), Self::Error> {
        self.flush_count += 1;
        if let Some(reply) = self.replies.pop_front() {
            self.stage_rx(&reply);
        }
        Ok(())
    }

    fn bytes_available(&mut self) -> usize {
        self.rx.len()
    }

    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error> {
        if self.fail_config {
            return Err(MockCommError);
        }
        self.baud = Some(baud);
        Ok(())
    }
}

// --- Mock Status Pin ---
#[derive(Debug, Default)]
pub(crate) struct MockPin {
    pub high: bool,
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = Infallible;
}

impl embedded_hal::digital::InputPin for MockPin {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

// --- Frame builders ---

/// 8-byte parameter reply echoing `cmd`/`addr` with `data` in byte 6.
pub(crate) fn param_reply(cmd: u8, addr: u8, data: u8) -> [u8; RESPONSE_LEN] {
    let mut frame = [0xAA, 0x08, 0x00, 0x00, cmd, addr, data, 0x00];
    frame[RESPONSE_LEN - 1] = checksum(&frame[..RESPONSE_LEN - 1]);
    frame
}

/// 8-byte reply whose first two bytes are `b0`/`b1`.
pub(crate) fn ack_reply(b0: u8, b1: u8) -> [u8; RESPONSE_LEN] {
    let mut frame = [b0, b1, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];
    frame[RESPONSE_LEN - 1] = checksum(&frame[..RESPONSE_LEN - 1]);
    frame
}

/// Valid 14-byte info package carrying `payload`.
pub(crate) fn telemetry_packet(payload: [u8; 8]) -> [u8; PACKET_LEN] {
    let mut frame = [0u8; PACKET_LEN];
    frame[..5].copy_from_slice(&TELEMETRY_HEADER);
    frame[5..13].copy_from_slice(&payload);
    frame[PACKET_LEN - 1] = checksum(&frame[..PACKET_LEN - 1]);
    frame
}

/// Flips the last bit of the checksum byte.
pub(crate) fn corrupt<const N: usize>(mut frame: [u8; N]) -> [u8; N] {
    frame[N - 1] ^= 0x01;
    frame
}
