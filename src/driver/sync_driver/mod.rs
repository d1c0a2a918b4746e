// src/driver/sync_driver/mod.rs

mod io_helpers;
mod telemetry;
mod transaction;

#[cfg(test)]
pub(crate) mod mock;

use crate::common::{
    error::Bm25Error,
    frame::{ADDR_AD_HIGH, ADDR_AD_LOW, ADDR_VOC_LEVEL, CMD_CALIBRATE, CMD_READ_PARAM, PACKET_LEN},
    hal_traits::{SensorSerial, SensorTimer},
    timing,
    types::{ExchangeStatus, VocLevel},
};
use embedded_hal::digital::InputPin;
use log::debug;

/// Driver for one BM25S3421-1 module, blocking and single-threaded.
///
/// Owns the serial binding, a timer used for the settle delay and reply
/// timeouts, and the module's STATUS pin.
#[derive(Debug)]
pub struct Bm25s3421<S, T, P>
where
    S: SensorSerial,
    T: SensorTimer,
    P: InputPin,
{
    serial: S,
    timer: T,
    status_pin: P,
    /// Last telemetry packet accepted by `is_telemetry_available`.
    receive_buffer: [u8; PACKET_LEN],
}

impl<S, T, P> Bm25s3421<S, T, P>
where
    S: SensorSerial,
    T: SensorTimer,
    P: InputPin,
{
    pub fn new(serial: S, timer: T, status_pin: P) -> Self {
        Bm25s3421 {
            serial,
            timer,
            status_pin,
            receive_buffer: [0; PACKET_LEN],
        }
    }

    /// Gives the peripherals back.
    pub fn release(self) -> (S, T, P) {
        (self.serial, self.timer, self.status_pin)
    }

    /// Configures the link for the module's fixed 9600 baud.
    ///
    /// The STATUS pin is already an input by its type, so only the serial
    /// binding needs touching.
    pub fn initialize(&mut self) -> Result<(), Bm25Error<S::Error>> {
        self.serial
            .set_baud_rate(timing::BAUD_RATE)
            .map_err(Bm25Error::Io)
    }

    /// Level of the STATUS pin. A pin read error reads as low.
    pub fn get_status(&mut self) -> bool {
        self.status_pin.is_high().unwrap_or(false)
    }

    // --- Parameter reads ---
    // These keep the module library's contract: 0 on any failure. Use the
    // `try_` variants to tell a failed read from a genuine zero.

    /// Current VOC level (1..=4), or 0 if the read failed.
    pub fn read_voc_level(&mut self) -> u8 {
        self.read_parameter(CMD_READ_PARAM, ADDR_VOC_LEVEL)
    }

    pub fn try_read_voc_level(&mut self) -> Result<VocLevel, Bm25Error<S::Error>> {
        let raw = self.try_read_parameter(CMD_READ_PARAM, ADDR_VOC_LEVEL)?;
        VocLevel::try_from(raw).map_err(|_| Bm25Error::InvalidLevel(raw))
    }

    /// 12-bit AD value of the VOC channel, or 0 if either half failed.
    pub fn read_ad_value(&mut self) -> u16 {
        self.try_read_ad_value().unwrap_or_else(|e| {
            debug!("AD value read failed: {:?}", e);
            0
        })
    }

    pub fn try_read_ad_value(&mut self) -> Result<u16, Bm25Error<S::Error>> {
        let high = self.try_read_parameter(CMD_READ_PARAM, ADDR_AD_HIGH)?;
        let low = self.try_read_parameter(CMD_READ_PARAM, ADDR_AD_LOW)?;
        Ok((u16::from(high) << 8) | u16::from(low))
    }

    /// Reads one module parameter, or 0 if the exchange failed or the reply
    /// echoed a different command/address.
    pub fn read_parameter(&mut self, command: u8, address: u8) -> u8 {
        self.try_read_parameter(command, address).unwrap_or_else(|e| {
            debug!("Parameter {:#04x}/{:#04x} read failed: {:?}", command, address, e);
            0
        })
    }

    // --- Commands reporting an ExchangeStatus ---

    pub fn write_command(&mut self, command: u8, address: u8, param: u8) -> ExchangeStatus {
        ExchangeStatus::from(&self.try_write_command(command, address, param))
    }

    /// Software reset. The module preheats again afterwards.
    pub fn reset(&mut self) -> ExchangeStatus {
        ExchangeStatus::from(&self.try_reset())
    }

    /// Requests the 14-byte info package into `out`; `out` is zeroed on failure.
    pub fn request_info_package(&mut self, out: &mut [u8; PACKET_LEN]) -> ExchangeStatus {
        let result = self.try_request_info_package();
        *out = match &result {
            Ok(packet) => packet.into_bytes(),
            Err(_) => [0; PACKET_LEN],
        };
        ExchangeStatus::from(&result)
    }

    /// Restores factory settings (alarm Level3, exit Level1, 180 s preheat).
    pub fn restore_defaults(&mut self) -> ExchangeStatus {
        ExchangeStatus::from(&self.try_restore_defaults())
    }

    pub fn calibrate(&mut self, param: u8) -> ExchangeStatus {
        self.write_command(CMD_CALIBRATE, param, 0x00)
    }
}
