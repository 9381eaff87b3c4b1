//! Type tags and the tagged scalar value decoder.
//!
//! Every cell in a row is preceded by a one-byte type tag selecting its
//! decoding rule. Tags 0–10 are recognized; any other byte falls back to
//! the generic-object path instead of failing, so a newer writer cannot
//! abort an older reader.

use std::io::Read;

use crate::perflog::stream::PerfStream;
use crate::PerfError;

pub const TAG_NULL: u8 = 0;
pub const TAG_BYTE: u8 = 1;
pub const TAG_SHORT: u8 = 2;
pub const TAG_INT: u8 = 3;
pub const TAG_LONG: u8 = 4;
pub const TAG_FLOAT: u8 = 5;
pub const TAG_DOUBLE: u8 = 6;
pub const TAG_BOOLEAN: u8 = 7;
pub const TAG_TIMESTAMP: u8 = 8;
pub const TAG_DECIMAL: u8 = 9;
pub const TAG_OBJECT: u8 = 10;

/// One decoded cell value.
///
/// A closed set of variants, one per recognized type tag. `Decimal` and
/// `Text` carry their textual form eagerly because their payloads have no
/// stable in-memory scalar representation; everything else renders at
/// emission time via [`Value::render`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    Bool(bool),
    /// Millisecond timestamp carried on the wire as a plain i64.
    Timestamp(i64),
    /// Arbitrary-precision decimal, already rendered in plain notation.
    Decimal(String),
    /// Generic-object payload, rendered opaquely as text by the writer.
    Text(String),
}

impl Value {
    /// Render the value to its CSV text form. Null is the empty string.
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Int8(v) => v.to_string(),
            Value::Int16(v) => v.to_string(),
            Value::Int32(v) => v.to_string(),
            Value::Int64(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Double(v) => v.to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Timestamp(v) => v.to_string(),
            Value::Decimal(s) => s.clone(),
            Value::Text(s) => s.clone(),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Decode one value whose type tag has already been read.
///
/// Tag 0 consumes no payload. Tags 1–9 map one-to-one onto a primitive
/// read. Tag 10 and every unrecognized byte take the generic-object path,
/// which yields `Value::Null` when the object itself is absent.
pub fn read_value<R: Read>(stream: &mut PerfStream<R>, tag: u8) -> Result<Value, PerfError> {
    match tag {
        TAG_NULL => Ok(Value::Null),
        TAG_BYTE => stream.read_i8().map(Value::Int8),
        TAG_SHORT => stream.read_i16().map(Value::Int16),
        TAG_INT => stream.read_i32().map(Value::Int32),
        TAG_LONG => stream.read_i64().map(Value::Int64),
        TAG_FLOAT => stream.read_f32().map(Value::Float),
        TAG_DOUBLE => stream.read_f64().map(Value::Double),
        TAG_BOOLEAN => stream.read_bool().map(Value::Bool),
        TAG_TIMESTAMP => stream.read_i64().map(Value::Timestamp),
        TAG_DECIMAL => stream.read_decimal().map(Value::Decimal),
        _ => Ok(match stream.read_object_text()? {
            Some(text) => Value::Text(text),
            None => Value::Null,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{BigEndian, WriteBytesExt};
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::{Cursor, Write};

    fn stream(payload: &[u8]) -> PerfStream<Cursor<Vec<u8>>> {
        let mut enc = GzEncoder::new(Vec::new(), Compression::default());
        enc.write_all(payload).unwrap();
        PerfStream::new(Cursor::new(enc.finish().unwrap()))
    }

    #[test]
    fn test_null_tag_consumes_nothing() {
        let mut s = stream(&[]);
        assert_eq!(read_value(&mut s, TAG_NULL).unwrap(), Value::Null);
        assert_eq!(s.position(), 0);
    }

    #[test]
    fn test_integer_tags() {
        let mut payload = Vec::new();
        payload.write_i8(-1).unwrap();
        payload.write_i16::<BigEndian>(512).unwrap();
        payload.write_i32::<BigEndian>(-100_000).unwrap();
        payload.write_i64::<BigEndian>(1 << 40).unwrap();

        let mut s = stream(&payload);
        assert_eq!(read_value(&mut s, TAG_BYTE).unwrap(), Value::Int8(-1));
        assert_eq!(read_value(&mut s, TAG_SHORT).unwrap(), Value::Int16(512));
        assert_eq!(read_value(&mut s, TAG_INT).unwrap(), Value::Int32(-100_000));
        assert_eq!(read_value(&mut s, TAG_LONG).unwrap(), Value::Int64(1 << 40));
    }

    #[test]
    fn test_float_bool_timestamp_tags() {
        let mut payload = Vec::new();
        payload.write_f32::<BigEndian>(0.5).unwrap();
        payload.write_f64::<BigEndian>(-4.75).unwrap();
        payload.push(1);
        payload.write_i64::<BigEndian>(1_700_000_000_000).unwrap();

        let mut s = stream(&payload);
        assert_eq!(read_value(&mut s, TAG_FLOAT).unwrap(), Value::Float(0.5));
        assert_eq!(read_value(&mut s, TAG_DOUBLE).unwrap(), Value::Double(-4.75));
        assert_eq!(read_value(&mut s, TAG_BOOLEAN).unwrap(), Value::Bool(true));
        assert_eq!(
            read_value(&mut s, TAG_TIMESTAMP).unwrap(),
            Value::Timestamp(1_700_000_000_000)
        );
    }

    #[test]
    fn test_object_tag_present_and_absent() {
        let mut payload = vec![0x01];
        payload.write_u32::<BigEndian>(5).unwrap();
        payload.extend_from_slice(b"hello");
        payload.push(0x00);

        let mut s = stream(&payload);
        assert_eq!(
            read_value(&mut s, TAG_OBJECT).unwrap(),
            Value::Text("hello".to_string())
        );
        assert_eq!(read_value(&mut s, TAG_OBJECT).unwrap(), Value::Null);
    }

    #[test]
    fn test_unrecognized_tag_uses_object_path() {
        let mut payload = vec![0x01];
        payload.write_u32::<BigEndian>(6).unwrap();
        payload.extend_from_slice(b"opaque");

        let mut s = stream(&payload);
        assert_eq!(
            read_value(&mut s, 99).unwrap(),
            Value::Text("opaque".to_string())
        );
    }

    #[test]
    fn test_render() {
        assert_eq!(Value::Null.render(), "");
        assert_eq!(Value::Int32(-7).render(), "-7");
        assert_eq!(Value::Bool(false).render(), "false");
        assert_eq!(Value::Double(2.5).render(), "2.5");
        assert_eq!(Value::Timestamp(12).render(), "12");
        assert_eq!(Value::Decimal("123.45".into()).render(), "123.45");
        assert_eq!(Value::Text("a,b".into()).render(), "a,b");
    }
}
