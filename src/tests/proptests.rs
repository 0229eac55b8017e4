use super::parse_records;
use crate::{Encoder, LppError, Reading, TypeId};
use proptest::prelude::*;

prop_compose! {
    fn arb_reading()(
        kind in 0usize..12,
        byte in any::<u8>(),
        a in -300.0f32..300.0,
        b in -300.0f32..300.0,
        c in -300.0f32..300.0,
    ) -> Reading {
        match kind {
            0 => Reading::DigitalInput { value: byte },
            1 => Reading::DigitalOutput { value: byte },
            2 => Reading::AnalogInput { value: a },
            3 => Reading::AnalogOutput { value: a },
            4 => Reading::Luminosity { value: a.abs() * 100.0 },
            5 => Reading::Presence { value: byte },
            6 => Reading::Temperature { value: a },
            7 => Reading::RelativeHumidity { value: a.abs() / 3.0 },
            8 => Reading::Accelerometer { x: a / 10.0, y: b / 10.0, z: c / 10.0 },
            9 => Reading::BarometricPressure { value: a.abs() * 10.0 },
            10 => Reading::Gyrometer { x: a, y: b, z: c },
            _ => Reading::Gps { latitude: a.clamp(-90.0, 90.0), longitude: b / 2.0, altitude: c * 100.0 },
        }
    }
}

fn arb_calls() -> impl Strategy<Value = Vec<(u8, Reading)>> {
    prop::collection::vec((any::<u8>(), arb_reading()), 0..100)
}

/// Resolution of each field of a type (1 / multiplier)
fn resolution(type_id: TypeId) -> Vec<f64> {
    type_id
        .descriptor()
        .multipliers
        .iter()
        .map(|&m| 1.0 / f64::from(m))
        .collect()
}

proptest! {
    /// Property: a successful add grows size by exactly the record size
    #[test]
    fn prop_size_grows_by_record_size(capacity in 0usize..300, calls in arb_calls()) {
        let mut enc = Encoder::new(capacity);
        for (channel, reading) in &calls {
            let before = enc.size();
            let record = reading.type_id().descriptor().record_size();
            match enc.add(*channel, reading) {
                Ok(size) => {
                    prop_assert_eq!(size, before + record);
                    prop_assert_eq!(enc.size(), size);
                }
                Err(e) => {
                    prop_assert_eq!(e, LppError::Overflow { required: record, available: enc.capacity() - before });
                    prop_assert_eq!(enc.size(), before);
                    prop_assert!(before + record > enc.capacity());
                }
            }
            prop_assert!(enc.size() <= enc.capacity());
        }
    }

    /// Property: a rejected add never changes the written bytes
    #[test]
    fn prop_failure_preserves_payload(capacity in 0usize..40, calls in arb_calls()) {
        let mut enc = Encoder::new(capacity);
        for (channel, reading) in &calls {
            let before = enc.to_bytes();
            if enc.add(*channel, reading).is_err() {
                prop_assert_eq!(enc.to_bytes(), before);
            } else {
                prop_assert_eq!(&enc.as_bytes()[..before.len()], &before[..]);
            }
        }
    }

    /// Property: every record parses back to its channel, type, and values within resolution
    #[test]
    fn prop_values_recovered_within_resolution(calls in arb_calls()) {
        let mut enc = Encoder::default();
        let mut accepted = Vec::new();
        for (channel, reading) in calls {
            if enc.add(channel, &reading).is_ok() {
                accepted.push((channel, reading));
            }
        }

        let records = parse_records(enc.as_bytes());
        prop_assert_eq!(records.len(), accepted.len());
        for (record, (channel, reading)) in records.iter().zip(&accepted) {
            prop_assert_eq!(record.channel, *channel);
            prop_assert_eq!(record.type_id, reading.type_id());
            let (values, len) = reading.values();
            let steps = resolution(reading.type_id());
            for ((&decoded, &input), step) in record.values.iter().zip(&values[..len]).zip(steps) {
                let input = f64::from(input);
                let expected = if reading.type_id().descriptor().signed { input } else { input.abs() };
                prop_assert!((decoded - expected).abs() <= step / 2.0 + 1e-6,
                    "{:?}: decoded {} from {}", reading.type_id(), decoded, input);
            }
        }
    }

    /// Property: negative values of signed types come back negative
    #[test]
    fn prop_sign_roundtrip(value in -327.0f32..-0.01) {
        let mut enc = Encoder::new(4);
        enc.add_analog_input(1, value).unwrap();
        let records = parse_records(enc.as_bytes());
        prop_assert!(records[0].values[0] < 0.0);
        prop_assert!((records[0].values[0] - f64::from(value)).abs() <= 0.005 + 1e-6);
    }

    /// Property: reset followed by the same calls reproduces a fresh encoder's output
    #[test]
    fn prop_reset_matches_fresh(capacity in 0usize..255, first in arb_calls(), second in arb_calls()) {
        let mut reused = Encoder::new(capacity);
        for (channel, reading) in &first {
            let _ = reused.add(*channel, reading);
        }
        reused.reset();

        let mut fresh = Encoder::new(capacity);
        for (channel, reading) in &second {
            prop_assert_eq!(reused.add(*channel, reading), fresh.add(*channel, reading));
        }
        prop_assert_eq!(reused.as_bytes(), fresh.as_bytes());
    }

    /// Property: copy_into copies exactly size() bytes or nothing
    #[test]
    fn prop_copy_into(calls in arb_calls(), dst_len in 0usize..300) {
        let mut enc = Encoder::default();
        for (channel, reading) in &calls {
            let _ = enc.add(*channel, reading);
        }
        let mut dst = vec![0xEEu8; dst_len];
        match enc.copy_into(&mut dst) {
            Ok(n) => {
                prop_assert_eq!(n, enc.size());
                prop_assert_eq!(&dst[..n], enc.as_bytes());
                prop_assert!(dst[n..].iter().all(|&b| b == 0xEE));
            }
            Err(e) => {
                prop_assert!(dst_len < enc.size());
                prop_assert_eq!(e, LppError::InvalidDestination { required: enc.size(), available: dst_len });
                prop_assert!(dst.iter().all(|&b| b == 0xEE));
            }
        }
    }

    /// Property: raw codes outside the registry are always rejected without writing
    #[test]
    fn prop_unknown_codes_rejected(code in any::<u8>(), value in -100.0f32..100.0) {
        let mut enc = Encoder::new(16);
        let known = TypeId::try_from(code).is_ok();
        let values = vec![value; if known { TypeId::try_from(code).unwrap().descriptor().fields() } else { 1 }];
        match enc.add_raw(code, 0, &values) {
            Ok(_) => prop_assert!(known),
            Err(e) => {
                prop_assert!(!known);
                prop_assert_eq!(e, LppError::UnknownType(code));
                prop_assert!(enc.is_empty());
            }
        }
    }

    /// Property: any encoder survives a JSON round trip unchanged
    #[test]
    fn prop_serde_roundtrip(capacity in 0usize..256, calls in arb_calls()) {
        let mut enc = Encoder::new(capacity);
        for (channel, reading) in &calls {
            let _ = enc.add(*channel, reading);
        }
        let json = serde_json::to_string(&enc).unwrap();
        let restored: Encoder = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(restored, enc);
    }
}
