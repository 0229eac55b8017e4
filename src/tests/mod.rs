mod proptests;

use crate::types::{descriptor_for, TypeId};

/// A record read back from a payload, values divided by their multipliers
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Record {
    pub channel: u8,
    pub type_id: TypeId,
    pub values: Vec<f64>,
}

/// Walk a payload record by record using the registry widths
pub(crate) fn parse_records(mut bytes: &[u8]) -> Vec<Record> {
    let mut records = Vec::new();
    while !bytes.is_empty() {
        let desc = descriptor_for(bytes[1]).expect("registered type code");
        let width = desc.field_width;
        let values = bytes[2..desc.record_size()]
            .chunks_exact(width)
            .zip(desc.multipliers)
            .map(|(field, &multiplier)| {
                let raw = field.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b));
                let bits = 8 * width as u32;
                let value = if desc.signed && raw >> (bits - 1) == 1 {
                    raw as i64 - (1i64 << bits)
                } else {
                    raw as i64
                };
                value as f64 / f64::from(multiplier)
            })
            .collect();
        records.push(Record {
            channel: bytes[0],
            type_id: desc.type_id,
            values,
        });
        bytes = &bytes[desc.record_size()..];
    }
    records
}
