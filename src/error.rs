//! Error types for LPP payload encoding.

use std::fmt;

/// Error returned when adding a record or copying a payload fails.
///
/// No failing operation mutates the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LppError {
    /// Record does not fit in the remaining capacity
    Overflow { required: usize, available: usize },
    /// Type code has no registry entry
    UnknownType(u8),
    /// Destination buffer is smaller than the written payload
    InvalidDestination { required: usize, available: usize },
    /// Number of values does not match the type's field count
    FieldCount { expected: usize, actual: usize },
    /// Requested capacity is above [`MAX_CAPACITY`](crate::MAX_CAPACITY)
    CapacityTooLarge { requested: usize, max: usize },
    /// Payload ends inside the record starting at `offset`
    TruncatedRecord { offset: usize, required: usize, available: usize },
}

impl fmt::Display for LppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow { required, available } => {
                write!(f, "payload overflow: record needs {required} bytes, {available} available")
            }
            Self::UnknownType(code) => write!(f, "unknown LPP type code {code}"),
            Self::InvalidDestination { required, available } => {
                write!(f, "destination too small: need {required} bytes, got {available}")
            }
            Self::FieldCount { expected, actual } => {
                write!(f, "expected {expected} values, got {actual}")
            }
            Self::CapacityTooLarge { requested, max } => {
                write!(f, "capacity {requested} exceeds maximum {max}")
            }
            Self::TruncatedRecord { offset, required, available } => {
                write!(f, "record at offset {offset} needs {required} bytes, {available} left")
            }
        }
    }
}

impl std::error::Error for LppError {}
