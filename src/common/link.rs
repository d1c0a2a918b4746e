// src/common/link.rs

use super::hal_traits::SensorSerial;

/// One of two serial bindings, fixed when the link is built.
///
/// Boards usually reach the module either through a hardware UART peripheral
/// or through a bit-banged software serial on two GPIOs. `SerialLink` lets a
/// single driver type accept either without runtime null checks.
#[derive(Debug)]
pub enum SerialLink<H, S> {
    Hardware(H),
    Software(S),
}

/// Error from whichever binding is active.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LinkError<HE, SE> {
    Hardware(HE),
    Software(SE),
}

impl<H, S> SerialLink<H, S> {
    pub fn is_hardware(&self) -> bool {
        matches!(self, SerialLink::Hardware(_))
    }

    pub fn is_software(&self) -> bool {
        matches!(self, SerialLink::Software(_))
    }
}

impl<H, S> SensorSerial for SerialLink<H, S>
where
    H: SensorSerial,
    S: SensorSerial,
{
    type Error = LinkError<H::Error, S::Error>;

    fn read_byte(&mut self) -> nb::Result<u8, Self::Error> {
        match self {
            SerialLink::Hardware(h) => h.read_byte().map_err(|e| e.map(LinkError::Hardware)),
            SerialLink::Software(s) => s.read_byte().map_err(|e| e.map(LinkError::Software)),
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error> {
        match self {
            SerialLink::Hardware(h) => h.write_byte(byte).map_err(|e| e.map(LinkError::Hardware)),
            SerialLink::Software(s) => s.write_byte(byte).map_err(|e| e.map(LinkError::Software)),
        }
    }

    fn flush(&mut self) -> nb::Result<(), Self::Error> {
        match self {
            SerialLink::Hardware(h) => h.flush().map_err(|e| e.map(LinkError::Hardware)),
            SerialLink::Software(s) => s.flush().map_err(|e| e.map(LinkError::Software)),
        }
    }

    fn bytes_available(&mut self) -> usize {
        match self {
            SerialLink::Hardware(h) => h.bytes_available(),
            SerialLink::Software(s) => s.bytes_available(),
        }
    }

    fn set_baud_rate(&mut self, baud: u32) -> Result<(), Self::Error> {
        match self {
            SerialLink::Hardware(h) => h.set_baud_rate(baud).map_err(LinkError::Hardware),
            SerialLink::Software(s) => s.set_baud_rate(baud).map_err(LinkError::Software),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::hal_traits::SensorTimer;
    use crate::driver::sync_driver::mock::{
        param_reply, MockCommError, MockPin, MockSerial, MockTimer,
    };
    use crate::driver::Bm25s3421;

    type Link = SerialLink<MockSerial, MockSerial>;

    #[test]
    fn test_delegates_to_active_binding() {
        let mut hardware = MockSerial::new();
        hardware.stage_rx(&[0x42]);
        let mut link: Link = SerialLink::Hardware(hardware);
        assert!(link.is_hardware());
        assert!(!link.is_software());

        assert_eq!(link.bytes_available(), 1);
        assert_eq!(link.read_byte().unwrap(), 0x42);
        assert!(matches!(link.read_byte(), Err(nb::Error::WouldBlock)));
        link.write_byte(0x01).unwrap();
        link.set_baud_rate(9600).unwrap();

        match link {
            SerialLink::Hardware(h) => {
                assert_eq!(&h.write_log[..], &[0x01]);
                assert_eq!(h.baud, Some(9600));
            }
            SerialLink::Software(_) => panic!("binding changed"),
        }
    }

    #[test]
    fn test_wraps_errors_by_binding() {
        let mut software = MockSerial::new();
        software.fail_reads = true;
        software.fail_config = true;
        let mut link: Link = SerialLink::Software(software);
        assert!(link.is_software());

        assert!(matches!(
            link.read_byte(),
            Err(nb::Error::Other(LinkError::Software(MockCommError)))
        ));
        assert_eq!(link.set_baud_rate(9600), Err(LinkError::Software(MockCommError)));
    }

    #[test]
    fn test_driver_over_software_link() {
        let mut software = MockSerial::new();
        software.queue_reply(&param_reply(0xD2, 0x42, 2));
        let link: Link = SerialLink::Software(software);
        let mut sensor = Bm25s3421::new(link, MockTimer::default(), MockPin::default());

        sensor.initialize().unwrap();
        assert_eq!(sensor.read_voc_level(), 2);

        let (link, timer, _) = sensor.release();
        assert!(link.is_software());
        assert!(timer.now().0 > 0);
    }
}
