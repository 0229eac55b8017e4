#![no_main]

use cayenne_lpp::{descriptor_for, Encoder, LppError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte is the capacity, the rest is a stream of (code, channel, raw value) triples
    let mut enc = Encoder::new(usize::from(data[0]));
    let mut shadow: Vec<u8> = Vec::new();

    for chunk in data[1..].chunks_exact(4) {
        let code = chunk[0];
        let channel = chunk[1];
        let value = f32::from(i16::from_be_bytes([chunk[2], chunk[3]])) / 10.0;
        let fields = descriptor_for(code).map_or(1, |d| d.fields());
        let values = vec![value; fields];
        let before = enc.size();

        match enc.add_raw(code, channel, &values) {
            Ok(size) => {
                let desc = descriptor_for(code).expect("accepted code must be registered");
                assert_eq!(size, before + desc.record_size());
                assert_eq!(&enc.as_bytes()[before..before + 2], &[channel, code]);
                shadow.extend_from_slice(&enc.as_bytes()[before..]);
            }
            Err(LppError::UnknownType(c)) => {
                assert_eq!(c, code);
                assert!(descriptor_for(code).is_none());
                assert_eq!(enc.size(), before);
            }
            Err(LppError::Overflow { required, available }) => {
                assert!(required > available);
                assert_eq!(available, enc.capacity() - before);
                assert_eq!(enc.size(), before);
            }
            Err(e) => panic!("unexpected error {e}"),
        }

        assert!(enc.size() <= enc.capacity());
        assert_eq!(enc.as_bytes(), &shadow[..]);
    }
});
