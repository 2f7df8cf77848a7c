//! Canonical byte encoding of values, the input to fingerprints.
//!
//! The layout follows SQLite's changeset value encoding:
//! - 1: INTEGER (8 bytes, big-endian i64)
//! - 2: FLOAT (8 bytes, big-endian IEEE 754 bit pattern)
//! - 3: TEXT (varint length + UTF-8 bytes)
//! - 4: BLOB (varint length + raw bytes)
//! - 5: NULL (no data follows)
//!
//! Every value is self-delimiting, so concatenating the encodings of a tuple
//! never makes two different tuples produce the same bytes.

use super::Value;

/// Append a u64 as a big-endian varint with 7-bit continuation groups.
///
/// 300 (0x12C) encodes as `[0x82, 0x2c]`.
fn push_varint(out: &mut Vec<u8>, value: u64) {
    if value < 128 {
        out.push(u8::try_from(value).unwrap_or_default());
        return;
    }

    // Extract 7-bit chunks starting from LSB, then emit MSB first
    let mut groups = [0u8; 10];
    let mut len = 0;
    let mut v = value;
    while v > 0 {
        groups[len] = (v & 0x7f) as u8;
        v >>= 7;
        len += 1;
    }

    for i in (0..len).rev() {
        if i == 0 {
            out.push(groups[i]);
        } else {
            out.push(groups[i] | 0x80);
        }
    }
}

/// Append one value to the buffer.
fn encode_value(out: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Null => out.push(0x05),
        Value::Integer(v) => {
            out.push(0x01);
            out.extend(v.to_be_bytes());
        }
        Value::Real(v) => {
            // Raw bits: no NaN or -0.0 normalization, matching Value equality.
            out.push(0x02);
            out.extend(v.to_bits().to_be_bytes());
        }
        Value::Text(s) => {
            out.push(0x03);
            push_varint(out, s.len() as u64);
            out.extend(s.as_bytes());
        }
        Value::RawText(b) => {
            // Same tag as TEXT: invalid UTF-8 never collides with a String.
            out.push(0x03);
            push_varint(out, b.len() as u64);
            out.extend(b);
        }
        Value::Blob(b) => {
            out.push(0x04);
            push_varint(out, b.len() as u64);
            out.extend(b);
        }
    }
}

/// Encode a tuple: its arity as a varint, then each value in order.
#[must_use]
pub(crate) fn encode_tuple(values: &[Value]) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + values.len() * 9);
    push_varint(&mut out, values.len() as u64);
    for value in values {
        encode_value(&mut out, value);
    }
    out
}
