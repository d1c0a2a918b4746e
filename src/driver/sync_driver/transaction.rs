// src/driver/sync_driver/transaction.rs

use super::Bm25s3421;
use crate::common::{
    error::Bm25Error,
    frame::{
        CommandFrame, ParamResponse, TelemetryPacket, ADDR_ALARM_LEVEL, ADDR_UPLOAD_MODE,
        CMD_CALIBRATE, CMD_RESET, CMD_WRITE_CONFIG, PACKET_LEN, RESPONSE_LEN,
    },
    hal_traits::{SensorSerial, SensorTimer},
    timing,
    types::{AlarmOutputLevel, UploadMode},
};
use embedded_hal::digital::InputPin;
use log::warn;

impl<S, T, P> Bm25s3421<S, T, P>
where
    S: SensorSerial,
    T: SensorTimer,
    P: InputPin,
{
    /// One command/response cycle: send, wait for the module to settle,
    /// read an `N`-byte reply and check its checksum.
    ///
    /// No retries; a single failure is returned as is.
    pub(super) fn execute_transaction<const N: usize>(
        &mut self,
        frame: &CommandFrame,
    ) -> Result<[u8; N], Bm25Error<S::Error>> {
        self.send_frame(frame)?;
        self.timer.delay_ms(timing::RESPONSE_SETTLE.as_millis() as u32);
        self.read_frame::<N>()
    }

    /// Reads one parameter, checking that the reply echoes `command`/`address`.
    pub fn try_read_parameter(&mut self, command: u8, address: u8) -> Result<u8, Bm25Error<S::Error>> {
        let frame = CommandFrame::new(command, address, 0x00);
        let reply = self.execute_transaction::<RESPONSE_LEN>(&frame)?;
        let response = ParamResponse(&reply);

        if response.matches(command, address) {
            Ok(response.data())
        } else {
            warn!(
                "Reply echoes {:#04x}/{:#04x}, expected {:#04x}/{:#04x}",
                response.echoed_command(),
                response.echoed_address(),
                command,
                address
            );
            Err(Bm25Error::UnexpectedResponse {
                command: response.echoed_command(),
                address: response.echoed_address(),
            })
        }
    }

    pub fn try_write_command(&mut self, command: u8, address: u8, param: u8) -> Result<(), Bm25Error<S::Error>> {
        let frame = CommandFrame::new(command, address, param);
        self.execute_transaction::<RESPONSE_LEN>(&frame).map(|_| ())
    }

    /// Software reset; the reply must start with the reset command echo.
    pub fn try_reset(&mut self) -> Result<(), Bm25Error<S::Error>> {
        let reply = self.execute_transaction::<RESPONSE_LEN>(&CommandFrame::RESET)?;
        if reply[0] == CMD_RESET && reply[1] == 0x00 {
            Ok(())
        } else {
            warn!("Reset reply starts {:#04x} {:#04x}", reply[0], reply[1]);
            Err(Bm25Error::UnexpectedResponse { command: reply[0], address: reply[1] })
        }
    }

    pub fn try_request_info_package(&mut self) -> Result<TelemetryPacket, Bm25Error<S::Error>> {
        self.execute_transaction::<PACKET_LEN>(&CommandFrame::REQUEST_INFO)
            .map(TelemetryPacket::from_bytes)
    }

    pub fn try_restore_defaults(&mut self) -> Result<(), Bm25Error<S::Error>> {
        self.execute_transaction::<RESPONSE_LEN>(&CommandFrame::RESTORE_DEFAULTS)
            .map(|_| ())
    }

    pub fn try_calibrate(&mut self, param: u8) -> Result<(), Bm25Error<S::Error>> {
        self.try_write_command(CMD_CALIBRATE, param, 0x00)
    }

    /// Switches the module between answering commands only and auto-uploading
    /// the info package (picked up with `is_telemetry_available`).
    pub fn set_upload_mode(&mut self, mode: UploadMode) -> Result<(), Bm25Error<S::Error>> {
        self.try_write_command(CMD_WRITE_CONFIG, ADDR_UPLOAD_MODE, mode as u8)
    }

    /// Sets the active level of the alarm output pin.
    pub fn set_alarm_output_level(&mut self, level: AlarmOutputLevel) -> Result<(), Bm25Error<S::Error>> {
        self.try_write_command(CMD_WRITE_CONFIG, ADDR_ALARM_LEVEL, level as u8)
    }
}
