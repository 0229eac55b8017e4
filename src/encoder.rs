//! Payload encoder for the Cayenne LPP format.

use serde::{Deserialize, Serialize};

use crate::constants::{narrow, scale_magnitude, write_be, MAX_CAPACITY, MAX_FIELD_WIDTH, RECORD_HEADER_SIZE};
use crate::error::LppError;
use crate::reading::Reading;
use crate::types::{descriptor_for, TypeId, MIN_RECORD_SIZE};

/// Encoder for LPP payloads
///
/// Owns a buffer of fixed capacity allocated once at construction. Records are
/// appended behind a per-instance cursor; a failed add leaves both the buffer
/// and the cursor untouched.
///
/// Every mutating method takes `&mut self`, so one encoder cannot be written
/// from two places at once. Threads building payloads concurrently each need
/// their own encoder.
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "EncoderRepr", into = "EncoderRepr")]
pub struct Encoder {
    /// Backing storage, `buf.len()` is the capacity
    buf: Vec<u8>,
    /// Bytes committed so far
    len: usize,
}

impl Encoder {
    /// Create an encoder holding at most `capacity` bytes
    ///
    /// Capacities above [`MAX_CAPACITY`] are clamped to it.
    #[inline]
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity.min(MAX_CAPACITY)],
            len: 0,
        }
    }

    /// Rewind the cursor so the buffer can be reused
    ///
    /// Previously written bytes stay in memory but are no longer part of the
    /// payload.
    #[inline]
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Maximum payload size in bytes
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes written so far
    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Bytes still free
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.len
    }

    /// True when nothing has been written since construction or the last reset
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// True when not even the smallest record fits any more
    #[inline]
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.remaining() < MIN_RECORD_SIZE
    }

    /// The written payload
    ///
    /// The slice borrows the encoder, so it cannot outlive it or be held
    /// across the next add or reset.
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Owned copy of the written payload
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    /// Copy the payload into the front of `dst`
    ///
    /// # Errors
    /// Returns [`LppError::InvalidDestination`] without copying anything if
    /// `dst` is shorter than [`size`](Self::size).
    pub fn copy_into(&self, dst: &mut [u8]) -> Result<usize, LppError> {
        if dst.len() < self.len {
            return Err(LppError::InvalidDestination {
                required: self.len,
                available: dst.len(),
            });
        }
        dst[..self.len].copy_from_slice(self.as_bytes());
        Ok(self.len)
    }

    /// Append a single-field record of type `type_id`
    ///
    /// # Errors
    /// See [`add_fields`](Self::add_fields).
    #[inline]
    pub fn add_field(&mut self, type_id: TypeId, channel: u8, value: f32) -> Result<usize, LppError> {
        self.add_fields(type_id, channel, &[value])
    }

    /// Append a record of type `type_id` with one value per field
    ///
    /// Each value is scaled by its field's multiplier, rounded, and written most
    /// significant byte first. Negative values of signed types use two's
    /// complement within the field width. Magnitudes too large for the field
    /// lose their high bits.
    ///
    /// Returns the payload size after the write.
    ///
    /// # Errors
    /// - [`LppError::FieldCount`] if `values` does not match the field count
    /// - [`LppError::Overflow`] if the record does not fit
    pub fn add_fields(&mut self, type_id: TypeId, channel: u8, values: &[f32]) -> Result<usize, LppError> {
        let desc = type_id.descriptor();
        if values.len() != desc.fields() {
            return Err(LppError::FieldCount {
                expected: desc.fields(),
                actual: values.len(),
            });
        }

        let required = desc.record_size();
        let available = self.remaining();
        if required > available {
            return Err(LppError::Overflow { required, available });
        }

        let width = desc.field_width;
        debug_assert!(width <= MAX_FIELD_WIDTH, "field width {width} exceeds {MAX_FIELD_WIDTH}");

        let record = &mut self.buf[self.len..self.len + required];
        record[0] = channel;
        record[1] = type_id.code();
        let fields = record[RECORD_HEADER_SIZE..].chunks_exact_mut(width);
        for ((out, &value), &multiplier) in fields.zip(values).zip(desc.multipliers) {
            let (magnitude, negative) = scale_magnitude(value, multiplier);
            write_be(out, narrow(magnitude, negative, desc.signed, width), width);
        }

        self.len += required;
        Ok(self.len)
    }

    /// Append a record by raw type code
    ///
    /// # Errors
    /// Returns [`LppError::UnknownType`] for codes outside the registry, and
    /// otherwise the errors of [`add_fields`](Self::add_fields).
    pub fn add_raw(&mut self, code: u8, channel: u8, values: &[f32]) -> Result<usize, LppError> {
        let desc = descriptor_for(code).ok_or(LppError::UnknownType(code))?;
        self.add_fields(desc.type_id, channel, values)
    }

    /// Append a typed reading
    ///
    /// # Errors
    /// Returns [`LppError::Overflow`] if the record does not fit.
    pub fn add(&mut self, channel: u8, reading: &Reading) -> Result<usize, LppError> {
        let (values, len) = reading.values();
        self.add_fields(reading.type_id(), channel, &values[..len])
    }

    /// Digital input state, one byte
    ///
    /// # Errors
    /// Returns [`LppError::Overflow`] if the record does not fit.
    #[inline]
    pub fn add_digital_input(&mut self, channel: u8, value: u8) -> Result<usize, LppError> {
        self.add_field(TypeId::DigitalInput, channel, f32::from(value))
    }

    /// Digital output state, one byte
    ///
    /// # Errors
    /// Returns [`LppError::Overflow`] if the record does not fit.
    #[inline]
    pub fn add_digital_output(&mut self, channel: u8, value: u8) -> Result<usize, LppError> {
        self.add_field(TypeId::DigitalOutput, channel, f32::from(value))
    }

    /// Analog value with 0.01 resolution
    ///
    /// # Errors
    /// Returns [`LppError::Overflow`] if the record does not fit.
    #[inline]
    pub fn add_analog_input(&mut self, channel: u8, value: f32) -> Result<usize, LppError> {
        self.add_field(TypeId::AnalogInput, channel, value)
    }

    /// Analog value with 0.01 resolution
    ///
    /// # Errors
    /// Returns [`LppError::Overflow`] if the record does not fit.
    #[inline]
    pub fn add_analog_output(&mut self, channel: u8, value: f32) -> Result<usize, LppError> {
        self.add_field(TypeId::AnalogOutput, channel, value)
    }

    /// Illuminance in lux
    ///
    /// # Errors
    /// Returns [`LppError::Overflow`] if the record does not fit.
    #[inline]
    pub fn add_luminosity(&mut self, channel: u8, lux: f32) -> Result<usize, LppError> {
        self.add_field(TypeId::Illuminance, channel, lux)
    }

    /// Presence flag, one byte
    ///
    /// # Errors
    /// Returns [`LppError::Overflow`] if the record does not fit.
    #[inline]
    pub fn add_presence(&mut self, channel: u8, value: u8) -> Result<usize, LppError> {
        self.add_field(TypeId::Presence, channel, f32::from(value))
    }

    /// Temperature in °C with 0.1 resolution
    ///
    /// # Errors
    /// Returns [`LppError::Overflow`] if the record does not fit.
    #[inline]
    pub fn add_temperature(&mut self, channel: u8, celsius: f32) -> Result<usize, LppError> {
        self.add_field(TypeId::Temperature, channel, celsius)
    }

    /// Relative humidity in % with 0.5 resolution
    ///
    /// # Errors
    /// Returns [`LppError::Overflow`] if the record does not fit.
    #[inline]
    pub fn add_relative_humidity(&mut self, channel: u8, percent: f32) -> Result<usize, LppError> {
        self.add_field(TypeId::Humidity, channel, percent)
    }

    /// Barometric pressure in hPa with 0.1 resolution
    ///
    /// # Errors
    /// Returns [`LppError::Overflow`] if the record does not fit.
    #[inline]
    pub fn add_barometric_pressure(&mut self, channel: u8, hpa: f32) -> Result<usize, LppError> {
        self.add_field(TypeId::BarometricPressure, channel, hpa)
    }

    /// Acceleration in G per axis, 0.001 resolution
    ///
    /// The record is written only if all three axes fit.
    ///
    /// # Errors
    /// Returns [`LppError::Overflow`] if the record does not fit.
    #[inline]
    pub fn add_accelerometer(&mut self, channel: u8, x: f32, y: f32, z: f32) -> Result<usize, LppError> {
        self.add_fields(TypeId::Accelerometer, channel, &[x, y, z])
    }

    /// Angular rate in °/s per axis, 0.01 resolution
    ///
    /// # Errors
    /// Returns [`LppError::Overflow`] if the record does not fit.
    #[inline]
    pub fn add_gyrometer(&mut self, channel: u8, x: f32, y: f32, z: f32) -> Result<usize, LppError> {
        self.add_fields(TypeId::Gyrometer, channel, &[x, y, z])
    }

    /// GPS fix: latitude and longitude in degrees (0.0001), altitude in meters (0.01)
    ///
    /// # Errors
    /// Returns [`LppError::Overflow`] if the record does not fit.
    #[inline]
    pub fn add_gps(&mut self, channel: u8, latitude: f32, longitude: f32, altitude: f32) -> Result<usize, LppError> {
        self.add_fields(TypeId::Gps, channel, &[latitude, longitude, altitude])
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(MAX_CAPACITY)
    }
}

/// Encoders are equal when capacity and written payload match
impl PartialEq for Encoder {
    fn eq(&self, other: &Self) -> bool {
        self.capacity() == other.capacity() && self.as_bytes() == other.as_bytes()
    }
}

impl Eq for Encoder {}

impl std::fmt::Debug for Encoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Encoder")
            .field("capacity", &self.capacity())
            .field("size", &self.len)
            .field("payload", &self.as_bytes())
            .finish()
    }
}

/// Serialized form: only the written prefix is kept
#[derive(Serialize, Deserialize)]
struct EncoderRepr {
    capacity: usize,
    payload: Vec<u8>,
}

impl From<Encoder> for EncoderRepr {
    fn from(enc: Encoder) -> Self {
        Self {
            capacity: enc.capacity(),
            payload: enc.to_bytes(),
        }
    }
}

impl TryFrom<EncoderRepr> for Encoder {
    type Error = LppError;

    /// Rebuild an encoder, accepting only payloads made of whole registered records
    fn try_from(repr: EncoderRepr) -> Result<Self, Self::Error> {
        if repr.capacity > MAX_CAPACITY {
            return Err(LppError::CapacityTooLarge {
                requested: repr.capacity,
                max: MAX_CAPACITY,
            });
        }
        if repr.payload.len() > repr.capacity {
            return Err(LppError::Overflow {
                required: repr.payload.len(),
                available: repr.capacity,
            });
        }
        validate_records(&repr.payload)?;

        let mut enc = Self::new(repr.capacity);
        enc.buf[..repr.payload.len()].copy_from_slice(&repr.payload);
        enc.len = repr.payload.len();
        Ok(enc)
    }
}

/// Walk `payload` record by record using the registry widths
fn validate_records(payload: &[u8]) -> Result<(), LppError> {
    let mut offset = 0;
    while offset < payload.len() {
        let available = payload.len() - offset;
        if available < RECORD_HEADER_SIZE {
            return Err(LppError::TruncatedRecord {
                offset,
                required: RECORD_HEADER_SIZE,
                available,
            });
        }
        let code = payload[offset + 1];
        let desc = descriptor_for(code).ok_or(LppError::UnknownType(code))?;
        if desc.record_size() > available {
            return Err(LppError::TruncatedRecord {
                offset,
                required: desc.record_size(),
                available,
            });
        }
        offset += desc.record_size();
    }
    Ok(())
}
