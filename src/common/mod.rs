// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod checksum;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod link;
pub mod timing;
pub mod types;

// --- Re-export key types/traits/functions for easier access ---

// From checksum.rs
pub use checksum::{checksum, is_valid_frame, verify_frame};

// From error.rs
pub use error::Bm25Error;

// From frame.rs
pub use frame::{CommandFrame, ParamResponse, TelemetryPacket, PACKET_LEN, RESPONSE_LEN, TELEMETRY_HEADER};

// From hal_traits.rs
pub use hal_traits::{SensorInstant, SensorSerial, SensorTimer};

// From link.rs
pub use link::{LinkError, SerialLink};

// From types.rs
pub use types::{AlarmOutputLevel, ExchangeStatus, UploadMode, VocLevel};

// From timing.rs (constants - users can access via common::timing::*)
