// src/common/types.rs

use super::error::Bm25Error;
use core::convert::TryFrom;
use core::fmt;

/// VOC concentration level reported by the module (register 0x42).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(u8)]
pub enum VocLevel {
    Level1 = 1,
    Level2 = 2,
    Level3 = 3,
    Level4 = 4,
}

impl VocLevel {
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for VocLevel {
    type Error = Bm25Error<()>;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(VocLevel::Level1),
            2 => Ok(VocLevel::Level2),
            3 => Ok(VocLevel::Level3),
            4 => Ok(VocLevel::Level4),
            other => Err(Bm25Error::InvalidLevel(other)),
        }
    }
}

impl fmt::Display for VocLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level{}", self.as_u8())
    }
}

/// Whether the module pushes the 14-byte info package on its own.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum UploadMode {
    /// Module only answers commands.
    Command = 0,
    /// Module uploads the info package periodically.
    Auto = 8,
}

/// Active level of the module's alarm output pin.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum AlarmOutputLevel {
    Low = 0,
    High = 8,
}

/// Outcome of a command/response exchange, in the module's 0/1/2 encoding.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ExchangeStatus {
    Ok,
    ChecksumError,
    Timeout,
}

impl ExchangeStatus {
    /// Numeric status code: 0 ok, 1 check error, 2 timeout.
    #[inline]
    pub const fn code(self) -> u8 {
        match self {
            ExchangeStatus::Ok => 0,
            ExchangeStatus::ChecksumError => 1,
            ExchangeStatus::Timeout => 2,
        }
    }

    #[inline]
    pub const fn is_ok(self) -> bool {
        matches!(self, ExchangeStatus::Ok)
    }
}

// I/O failures surface as Timeout: no valid reply made it back either way.
impl<T, E: fmt::Debug> From<&Result<T, Bm25Error<E>>> for ExchangeStatus {
    fn from(result: &Result<T, Bm25Error<E>>) -> Self {
        match result {
            Ok(_) => ExchangeStatus::Ok,
            Err(e) if e.is_check_error() => ExchangeStatus::ChecksumError,
            Err(_) => ExchangeStatus::Timeout,
        }
    }
}

impl fmt::Display for ExchangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeStatus::Ok => write!(f, "ok"),
            ExchangeStatus::ChecksumError => write!(f, "check error"),
            ExchangeStatus::Timeout => write!(f, "timeout"),
        }
    }
}
