// src/driver/mod.rs

pub mod sync_driver;

// Re-export the public driver struct
pub use sync_driver::Bm25s3421;
