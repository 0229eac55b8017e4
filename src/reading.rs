//! Typed sensor readings accepted by the encoder.

use serde::{Deserialize, Serialize};

use crate::types::TypeId;

/// A typed sensor reading ready to be encoded on a channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reading {
    DigitalInput { value: u8 },
    DigitalOutput { value: u8 },
    AnalogInput { value: f32 },
    AnalogOutput { value: f32 },
    /// Lux
    Luminosity { value: f32 },
    Presence { value: u8 },
    /// °C
    Temperature { value: f32 },
    /// % relative humidity
    RelativeHumidity { value: f32 },
    /// hPa
    BarometricPressure { value: f32 },
    /// G per axis
    Accelerometer { x: f32, y: f32, z: f32 },
    /// °/s per axis
    Gyrometer { x: f32, y: f32, z: f32 },
    /// Degrees, degrees, meters
    Gps { latitude: f32, longitude: f32, altitude: f32 },
}

impl Reading {
    /// Registry type this reading encodes as
    #[must_use]
    pub const fn type_id(&self) -> TypeId {
        match self {
            Self::DigitalInput { .. } => TypeId::DigitalInput,
            Self::DigitalOutput { .. } => TypeId::DigitalOutput,
            Self::AnalogInput { .. } => TypeId::AnalogInput,
            Self::AnalogOutput { .. } => TypeId::AnalogOutput,
            Self::Luminosity { .. } => TypeId::Illuminance,
            Self::Presence { .. } => TypeId::Presence,
            Self::Temperature { .. } => TypeId::Temperature,
            Self::RelativeHumidity { .. } => TypeId::Humidity,
            Self::BarometricPressure { .. } => TypeId::BarometricPressure,
            Self::Accelerometer { .. } => TypeId::Accelerometer,
            Self::Gyrometer { .. } => TypeId::Gyrometer,
            Self::Gps { .. } => TypeId::Gps,
        }
    }

    /// Field values in wire order.
    ///
    /// Unused trailing slots are zero; only the first `len` entries count.
    #[must_use]
    pub fn values(&self) -> ([f32; 3], usize) {
        match *self {
            Self::DigitalInput { value } | Self::DigitalOutput { value } | Self::Presence { value } => {
                ([f32::from(value), 0.0, 0.0], 1)
            }
            Self::AnalogInput { value }
            | Self::AnalogOutput { value }
            | Self::Luminosity { value }
            | Self::Temperature { value }
            | Self::RelativeHumidity { value }
            | Self::BarometricPressure { value } => ([value, 0.0, 0.0], 1),
            Self::Accelerometer { x, y, z } | Self::Gyrometer { x, y, z } => ([x, y, z], 3),
            Self::Gps {
                latitude,
                longitude,
                altitude,
            } => ([latitude, longitude, altitude], 3),
        }
    }
}
