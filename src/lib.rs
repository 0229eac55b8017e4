//! `cayenne_lpp` - Cayenne Low Power Payload encoder
//!
//! Serializes typed sensor readings into the compact, fixed-format byte stream
//! used on constrained IoT links such as LoRaWAN. Each reading becomes one
//! record tagged with a caller-chosen channel and a protocol type code.
//!
//! # Features
//! - **Fixed capacity**: one buffer allocated at construction, never grown
//! - **Atomic adds**: a record that does not fit is rejected whole, nothing is written
//! - **Table-driven**: every sensor kind, including the three-axis and GPS
//!   records, goes through one generic field encoder
//!
//! # Example
//! ```
//! use cayenne_lpp::Encoder;
//!
//! let mut lpp = Encoder::new(51);
//! lpp.add_temperature(1, 22.5).unwrap();
//! lpp.add_relative_humidity(2, 41.0).unwrap();
//! lpp.add_gps(3, 42.3519, -87.9094, 10.0).unwrap();
//!
//! assert_eq!(lpp.size(), 4 + 3 + 11);
//! assert_eq!(&lpp.as_bytes()[..4], &[1, 103, 0x00, 0xE1]);
//! ```
//!
//! # Wire Format
//!
//! A payload is a plain concatenation of records with no length prefix,
//! padding, checksum, or terminator. The total length travels out of band
//! (usually the transport frame length).
//!
//! | Offset | Size | Field | Description |
//! |--------|------|-------|-------------|
//! | 0 | 1 | `channel` | Caller-supplied tag, echoed as is |
//! | 1 | 1 | `type` | LPP type code, see table below |
//! | 2 | `byte_width` | `value` | Scaled fields, most significant byte first |
//!
//! ## Types
//!
//! | Type | Code | Field bytes | Multiplier | Signed |
//! |------|------|-------------|------------|--------|
//! | Digital input | 0 | 1 | 1 | no |
//! | Digital output | 1 | 1 | 1 | no |
//! | Analog input | 2 | 2 | 100 | yes |
//! | Analog output | 3 | 2 | 100 | yes |
//! | Illuminance | 101 | 2 | 1 | no |
//! | Presence | 102 | 1 | 1 | no |
//! | Temperature | 103 | 2 | 10 | yes |
//! | Humidity | 104 | 1 | 2 | no |
//! | Accelerometer | 113 | 2 × 3 | 1000 | yes |
//! | Barometric pressure | 115 | 2 | 10 | no |
//! | Gyrometer | 134 | 2 × 3 | 100 | yes |
//! | GPS | 136 | 3 × 3 | 10000, 10000, 100 | yes |
//!
//! ## Value Encoding
//!
//! Each field is `round(|value| * multiplier)`. For signed types a negative
//! value is stored as the two's complement of that magnitude within the field
//! width. Magnitudes wider than the field are truncated to their low bytes,
//! matching deployed device firmware; keep readings inside the sensor range.
//!
//! ## Supported Ranges
//! - Capacity: up to 255 bytes (larger requests are clamped)
//! - Channels: 0-255, not validated

#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

mod constants;
mod encoder;
mod error;
mod reading;
mod types;

#[cfg(test)]
mod tests;

// Re-export public API
pub use constants::{MAX_CAPACITY, RECORD_HEADER_SIZE};
pub use encoder::Encoder;
pub use error::LppError;
pub use reading::Reading;
pub use types::{descriptor_for, Descriptor, TypeId, MIN_RECORD_SIZE};
