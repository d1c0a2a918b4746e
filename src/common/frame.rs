// src/common/frame.rs

use super::checksum::{checksum, is_valid_frame};

// === Frame lengths ===

/// Length of every command frame sent to the module.
pub const COMMAND_LEN: usize = 4;
/// Length of the reply to parameter reads and configuration writes.
pub const RESPONSE_LEN: usize = 8;
/// Length of the info package, whether requested or auto-uploaded.
pub const PACKET_LEN: usize = 14;

// === Command and address codes (datasheet command table) ===

/// Parameter read.
pub const CMD_READ_PARAM: u8 = 0xD2;
/// Configuration write.
pub const CMD_WRITE_CONFIG: u8 = 0xE0;
/// Calibration; the calibration parameter travels in the address slot.
pub const CMD_CALIBRATE: u8 = 0xAB;
pub const CMD_RESET: u8 = 0xAF;
pub const CMD_REQUEST_INFO: u8 = 0xAC;
pub const CMD_RESTORE_DEFAULTS: u8 = 0xA0;

/// AD value, high byte.
pub const ADDR_AD_HIGH: u8 = 0x40;
/// AD value, low byte.
pub const ADDR_AD_LOW: u8 = 0x41;
/// Current VOC level (1..=4).
pub const ADDR_VOC_LEVEL: u8 = 0x42;
/// Auto-upload on/off.
pub const ADDR_UPLOAD_MODE: u8 = 0x1E;
/// Alarm output polarity.
pub const ADDR_ALARM_LEVEL: u8 = 0x1F;

/// Fixed first five bytes of every 14-byte info package.
pub const TELEMETRY_HEADER: [u8; 5] = [0xAA, 0x0E, 0x41, 0x01, 0xAC];

/// A 4-byte command frame: `[cmd, addr, param, checksum]`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CommandFrame([u8; COMMAND_LEN]);

impl CommandFrame {
    pub const RESET: CommandFrame = CommandFrame([CMD_RESET, 0x00, 0x00, 0x51]);
    pub const REQUEST_INFO: CommandFrame = CommandFrame([CMD_REQUEST_INFO, 0x00, 0x00, 0x54]);
    pub const RESTORE_DEFAULTS: CommandFrame = CommandFrame([CMD_RESTORE_DEFAULTS, 0x00, 0x00, 0x60]);

    /// Builds a frame and appends its checksum.
    pub fn new(command: u8, address: u8, param: u8) -> Self {
        let mut bytes = [command, address, param, 0x00];
        bytes[COMMAND_LEN - 1] = checksum(&bytes[..COMMAND_LEN - 1]);
        CommandFrame(bytes)
    }

    #[inline]
    pub const fn command(&self) -> u8 {
        self.0[0]
    }

    #[inline]
    pub const fn address(&self) -> u8 {
        self.0[1]
    }

    #[inline]
    pub const fn param(&self) -> u8 {
        self.0[2]
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; COMMAND_LEN] {
        &self.0
    }
}

/// View over an 8-byte reply to a parameter read.
///
/// Bytes 4 and 5 echo the command and address of the request, byte 6 carries
/// the value. Validity of the checksum is checked by whoever read the frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ParamResponse<'a>(pub &'a [u8; RESPONSE_LEN]);

impl<'a> ParamResponse<'a> {
    #[inline]
    pub fn echoed_command(&self) -> u8 {
        self.0[4]
    }

    #[inline]
    pub fn echoed_address(&self) -> u8 {
        self.0[5]
    }

    #[inline]
    pub fn data(&self) -> u8 {
        self.0[6]
    }

    /// True when the reply belongs to the given request.
    pub fn matches(&self, command: u8, address: u8) -> bool {
        self.echoed_command() == command && self.echoed_address() == address
    }
}

/// The 14-byte info package.
///
/// Layout: 5-byte fixed header, 8 payload bytes, checksum.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct TelemetryPacket([u8; PACKET_LEN]);

impl TelemetryPacket {
    pub const HEADER_LEN: usize = TELEMETRY_HEADER.len();
    pub const PAYLOAD_LEN: usize = PACKET_LEN - TELEMETRY_HEADER.len() - 1;

    #[inline]
    pub const fn from_bytes(bytes: [u8; PACKET_LEN]) -> Self {
        TelemetryPacket(bytes)
    }

    #[inline]
    pub const fn as_bytes(&self) -> &[u8; PACKET_LEN] {
        &self.0
    }

    #[inline]
    pub const fn into_bytes(self) -> [u8; PACKET_LEN] {
        self.0
    }

    pub fn header(&self) -> &[u8] {
        &self.0[..Self::HEADER_LEN]
    }

    pub fn payload(&self) -> &[u8] {
        &self.0[Self::HEADER_LEN..PACKET_LEN - 1]
    }

    #[inline]
    pub fn checksum(&self) -> u8 {
        self.0[PACKET_LEN - 1]
    }

    pub fn has_valid_header(&self) -> bool {
        self.header() == TELEMETRY_HEADER
    }

    /// Header and checksum both check out.
    pub fn is_valid(&self) -> bool {
        self.has_valid_header() && is_valid_frame(&self.0)
    }
}

impl From<[u8; PACKET_LEN]> for TelemetryPacket {
    fn from(value: [u8; PACKET_LEN]) -> Self {
        TelemetryPacket(value)
    }
}

impl From<TelemetryPacket> for [u8; PACKET_LEN] {
    fn from(value: TelemetryPacket) -> Self {
        value.0
    }
}
