//! Type registry: LPP type codes and their encoding descriptors.
//!
//! The registry is a `const` table built at compile time. Every [`TypeId`] has
//! exactly one [`Descriptor`]; raw codes that are not in the table are
//! rejected by [`descriptor_for`] and `TypeId::try_from`.

use serde::{Deserialize, Serialize};

use crate::constants::RECORD_HEADER_SIZE;
use crate::error::LppError;

/// LPP data type codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum TypeId {
    /// 1 bit resolution
    DigitalInput = 0,
    /// 1 bit resolution
    DigitalOutput = 1,
    /// 0.01 signed
    AnalogInput = 2,
    /// 0.01 signed
    AnalogOutput = 3,
    /// 1 lux unsigned
    Illuminance = 101,
    /// 1 bit resolution
    Presence = 102,
    /// 0.1 °C signed
    Temperature = 103,
    /// 0.5 % unsigned
    Humidity = 104,
    /// 0.001 G signed, per axis
    Accelerometer = 113,
    /// 0.1 hPa unsigned
    BarometricPressure = 115,
    /// 0.01 °/s signed, per axis
    Gyrometer = 134,
    /// Latitude/longitude 0.0001° signed, altitude 0.01 m signed
    Gps = 136,
}

impl TypeId {
    /// Every type in ascending code order
    pub const ALL: [Self; 12] = [
        Self::DigitalInput,
        Self::DigitalOutput,
        Self::AnalogInput,
        Self::AnalogOutput,
        Self::Illuminance,
        Self::Presence,
        Self::Temperature,
        Self::Humidity,
        Self::Accelerometer,
        Self::BarometricPressure,
        Self::Gyrometer,
        Self::Gps,
    ];

    /// Wire code of this type
    #[inline]
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Encoding descriptor for this type
    #[inline]
    #[must_use]
    pub fn descriptor(self) -> &'static Descriptor {
        match self {
            Self::DigitalInput => &DESCRIPTORS[0],
            Self::DigitalOutput => &DESCRIPTORS[1],
            Self::AnalogInput => &DESCRIPTORS[2],
            Self::AnalogOutput => &DESCRIPTORS[3],
            Self::Illuminance => &DESCRIPTORS[4],
            Self::Presence => &DESCRIPTORS[5],
            Self::Temperature => &DESCRIPTORS[6],
            Self::Humidity => &DESCRIPTORS[7],
            Self::Accelerometer => &DESCRIPTORS[8],
            Self::BarometricPressure => &DESCRIPTORS[9],
            Self::Gyrometer => &DESCRIPTORS[10],
            Self::Gps => &DESCRIPTORS[11],
        }
    }
}

impl TryFrom<u8> for TypeId {
    type Error = LppError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        descriptor_for(code)
            .map(|d| d.type_id)
            .ok_or(LppError::UnknownType(code))
    }
}

impl From<TypeId> for u8 {
    #[inline]
    fn from(id: TypeId) -> Self {
        id.code()
    }
}

/// How values of one type are laid out on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Descriptor {
    /// Type this descriptor belongs to
    pub type_id: TypeId,
    /// Bytes per field
    pub field_width: usize,
    /// Scale factor for each field, in wire order
    pub multipliers: &'static [u32],
    /// Whether negative values are stored as two's complement
    pub signed: bool,
}

impl Descriptor {
    /// Number of fields in one record
    #[inline]
    #[must_use]
    pub const fn fields(&self) -> usize {
        self.multipliers.len()
    }

    /// Total value bytes of one record
    #[inline]
    #[must_use]
    pub const fn byte_width(&self) -> usize {
        self.field_width * self.fields()
    }

    /// Full record size including channel and type bytes
    #[inline]
    #[must_use]
    pub const fn record_size(&self) -> usize {
        RECORD_HEADER_SIZE + self.byte_width()
    }
}

const fn scalar(type_id: TypeId, field_width: usize, multiplier: &'static [u32; 1], signed: bool) -> Descriptor {
    Descriptor { type_id, field_width, multipliers: multiplier, signed }
}

/// Registry table in ascending code order.
static DESCRIPTORS: [Descriptor; 12] = [
    scalar(TypeId::DigitalInput, 1, &[1], false),
    scalar(TypeId::DigitalOutput, 1, &[1], false),
    scalar(TypeId::AnalogInput, 2, &[100], true),
    scalar(TypeId::AnalogOutput, 2, &[100], true),
    scalar(TypeId::Illuminance, 2, &[1], false),
    scalar(TypeId::Presence, 1, &[1], false),
    scalar(TypeId::Temperature, 2, &[10], true),
    scalar(TypeId::Humidity, 1, &[2], false),
    Descriptor {
        type_id: TypeId::Accelerometer,
        field_width: 2,
        multipliers: &[1000, 1000, 1000],
        signed: true,
    },
    scalar(TypeId::BarometricPressure, 2, &[10], false),
    Descriptor {
        type_id: TypeId::Gyrometer,
        field_width: 2,
        multipliers: &[100, 100, 100],
        signed: true,
    },
    Descriptor {
        type_id: TypeId::Gps,
        field_width: 3,
        multipliers: &[10_000, 10_000, 100],
        signed: true,
    },
];

/// Smallest record any registered type produces
pub const MIN_RECORD_SIZE: usize = RECORD_HEADER_SIZE + 1;

/// Look up the descriptor for a raw wire code.
///
/// Returns `None` for codes that are not in the registry.
#[must_use]
pub fn descriptor_for(code: u8) -> Option<&'static Descriptor> {
    DESCRIPTORS.iter().find(|d| d.type_id.code() == code)
}
