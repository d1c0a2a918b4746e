// src/driver/sync_driver/telemetry.rs

use super::Bm25s3421;
use crate::common::{
    checksum::verify_frame,
    frame::{TelemetryPacket, PACKET_LEN, TELEMETRY_HEADER},
    hal_traits::{SensorSerial, SensorTimer},
    timing,
};
use arrayvec::ArrayVec;
use embedded_hal::digital::InputPin;
use log::{debug, trace, warn};

/// Outcome of one pass looking for the fixed header.
enum HeaderScan {
    /// All five header bytes matched and sit in the packet buffer.
    Found,
    /// A later header byte was wrong; counts as a failed attempt.
    Broken,
    /// Ran out of bytes that could still start a full packet.
    Exhausted,
}

impl<S, T, P> Bm25s3421<S, T, P>
where
    S: SensorSerial,
    T: SensorTimer,
    P: InputPin,
{
    /// Looks for an auto-uploaded info package in the bytes already received.
    ///
    /// Only scans when at least one full packet's worth of bytes is buffered.
    /// Leading bytes that cannot start the header are skipped; a header that
    /// breaks off partway or a packet with a bad checksum counts as a failed
    /// attempt, and the scan gives up after `timing::MAX_RESYNC_ATTEMPTS`.
    /// Each call starts over from the current read position.
    ///
    /// On success the packet is held until `consume_telemetry` or
    /// `take_telemetry`.
    pub fn is_telemetry_available(&mut self) -> bool {
        self.receive_buffer = [0; PACKET_LEN];

        let available = self.serial.bytes_available();
        if available < PACKET_LEN {
            return false;
        }
        // Beyond this many skipped bytes, no complete packet can follow.
        let max_skip = available - PACKET_LEN;
        let mut skipped = 0usize;
        let mut failures = 0usize;

        while failures < timing::MAX_RESYNC_ATTEMPTS {
            let mut packet: ArrayVec<u8, PACKET_LEN> = ArrayVec::new();

            match self.scan_for_header(&mut packet, &mut skipped, max_skip) {
                HeaderScan::Found => {}
                HeaderScan::Broken => {
                    failures += 1;
                    continue;
                }
                HeaderScan::Exhausted => return false,
            }

            while !packet.is_full() {
                match self.execute_blocking_io_with_timeout(timing::BYTE_TIMEOUT, |serial| serial.read_byte()) {
                    Ok(byte) => packet.push(byte),
                    Err(e) => {
                        debug!("Telemetry body read failed: {:?}", e);
                        return false;
                    }
                }
            }

            match verify_frame::<S::Error>(&packet) {
                Ok(()) => {
                    self.receive_buffer.copy_from_slice(&packet);
                    debug!("Telemetry packet {:02X?}", self.receive_buffer);
                    return true;
                }
                Err(e) => {
                    warn!("Dropping telemetry packet: {:?}", e);
                    failures += 1;
                }
            }
        }

        debug!("Telemetry scan gave up after {} failed attempts", failures);
        false
    }

    /// Reads bytes without blocking until the header is complete, breaks, or
    /// too many leading bytes had to be skipped.
    fn scan_for_header(
        &mut self,
        packet: &mut ArrayVec<u8, PACKET_LEN>,
        skipped: &mut usize,
        max_skip: usize,
    ) -> HeaderScan {
        while packet.len() < TELEMETRY_HEADER.len() {
            let byte = match self.serial.read_byte() {
                Ok(byte) => byte,
                Err(_) => return HeaderScan::Exhausted,
            };

            let position = packet.len();
            if byte == TELEMETRY_HEADER[position] {
                packet.push(byte);
            } else if position > 0 {
                trace!("Header broke at byte {} ({:#04x})", position, byte);
                return HeaderScan::Broken;
            } else {
                *skipped += 1;
                if *skipped > max_skip {
                    return HeaderScan::Exhausted;
                }
            }
        }
        HeaderScan::Found
    }

    /// Copies the held packet into `out` and clears the internal buffer.
    ///
    /// Only meaningful right after `is_telemetry_available` returned true;
    /// otherwise `out` receives zeros.
    pub fn consume_telemetry(&mut self, out: &mut [u8; PACKET_LEN]) {
        *out = self.receive_buffer;
        self.receive_buffer = [0; PACKET_LEN];
    }

    /// Like `consume_telemetry`, but only yields a packet that passed validation.
    pub fn take_telemetry(&mut self) -> Option<TelemetryPacket> {
        let packet = TelemetryPacket::from_bytes(self.receive_buffer);
        self.receive_buffer = [0; PACKET_LEN];
        packet.is_valid().then_some(packet)
    }
}
