#![no_main]

use cayenne_lpp::{Encoder, TypeId};
use libfuzzer_sys::fuzz_target;

fn replay(enc: &mut Encoder, data: &[u8]) {
    for chunk in data.chunks_exact(3) {
        let type_id = TypeId::ALL[usize::from(chunk[0]) % TypeId::ALL.len()];
        let value = f32::from(chunk[2] as i8) * 0.37;
        let values = vec![value; type_id.descriptor().fields()];
        let _ = enc.add_fields(type_id, chunk[1], &values);
    }
}

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = usize::from(data[0]);
    let split = usize::from(data[1]).min(data.len() - 2) + 2;
    let (first, second) = (&data[2..split], &data[split..]);

    // Property: reset followed by a call sequence matches a fresh encoder
    let mut reused = Encoder::new(capacity);
    replay(&mut reused, first);
    reused.reset();
    replay(&mut reused, second);

    let mut fresh = Encoder::new(capacity);
    replay(&mut fresh, second);

    assert_eq!(reused.as_bytes(), fresh.as_bytes());
    assert_eq!(reused.size(), fresh.size());
});
