// src/lib.rs

#![no_std] // Specify no_std at the crate root

pub mod common;
pub mod driver;

// Re-export key types for convenience
pub use common::{Bm25Error, ExchangeStatus, SerialLink, TelemetryPacket, VocLevel};
pub use driver::Bm25s3421;
