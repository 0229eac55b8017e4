//! Protocol limits and integer helpers for LPP encoding.

/// Hard upper bound on encoder capacity.
///
/// Payload sizes are reported as a single byte on the wire, so a buffer can
/// never hold more than 255 bytes.
pub const MAX_CAPACITY: usize = u8::MAX as usize;

/// Bytes preceding every value: channel (1) + type code (1)
pub const RECORD_HEADER_SIZE: usize = 2;

/// Widest single field in the registry (GPS coordinates use 3 bytes)
pub(crate) const MAX_FIELD_WIDTH: usize = 3;

/// Mask selecting the low `width` bytes of a u64
#[inline]
pub(crate) const fn width_mask(width: usize) -> u64 {
    (1u64 << (8 * width)) - 1
}

/// Scale a measurement into an unsigned magnitude.
///
/// Returns `(magnitude, is_negative)`. The product is rounded to the nearest
/// integer; NaN maps to zero and out-of-range values saturate at `u64::MAX`
/// before the caller narrows them.
#[inline]
pub(crate) fn scale_magnitude(value: f32, multiplier: u32) -> (u64, bool) {
    let value = f64::from(value);
    let magnitude = (value.abs() * f64::from(multiplier)).round() as u64;
    (magnitude, value < 0.0)
}

/// Narrow a scaled magnitude to exactly `width` bytes.
///
/// Negative signed values become two's complement within `width` bytes.
/// High bits that do not fit are dropped.
#[inline]
pub(crate) const fn narrow(magnitude: u64, negative: bool, signed: bool, width: usize) -> u64 {
    let mask = width_mask(width);
    if signed && negative {
        magnitude.wrapping_neg() & mask
    } else {
        magnitude & mask
    }
}

/// Write the low `width` bytes of `encoded` into `out`, most significant first
#[inline]
pub(crate) fn write_be(out: &mut [u8], encoded: u64, width: usize) {
    let bytes = encoded.to_be_bytes();
    out[..width].copy_from_slice(&bytes[bytes.len() - width..]);
}
