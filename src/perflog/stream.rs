//! Gzip decompression and primitive wire reads.
//!
//! [`PerfStream`] wraps the raw input in a streaming gzip inflater and
//! exposes one read operation per primitive kind of the container format:
//! fixed-width big-endian integers, IEEE floats, booleans, length-prefixed
//! UTF-8 strings, self-describing arbitrary-precision decimals, and the
//! generic object record. Every read consumes exactly the bytes it
//! declares and advances a monotone cursor; there is no peeking and no
//! seek-back.
//!
//! A short read anywhere raises [`PerfError::TruncatedStream`] carrying
//! the decompressed byte position. The single place where end-of-input is
//! legitimate is the table-name marker; [`PerfStream::read_string_or_end`]
//! reports that as a plain `Ok(None)` rather than an error.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

use byteorder::{BigEndian, ByteOrder};
use flate2::read::GzDecoder;

use crate::PerfError;

/// String marker byte for a null (absent) string.
const MARKER_NULL: u8 = 0x00;

/// Sequential reader over the decompressed container payload.
///
/// Owns the gzip inflater and the decode cursor. All multi-byte values on
/// the wire are big-endian.
pub struct PerfStream<R: Read> {
    inner: GzDecoder<R>,
    /// Bytes of decompressed payload consumed so far. Used in error context.
    position: u64,
}

impl PerfStream<BufReader<File>> {
    /// Open a gzip-compressed container file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PerfError> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| PerfError::Io(format!("Cannot open {}: {}", path.display(), e)))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: Read> PerfStream<R> {
    /// Wrap an arbitrary byte source holding a gzip-compressed container.
    pub fn new(reader: R) -> Self {
        PerfStream {
            inner: GzDecoder::new(reader),
            position: 0,
        }
    }

    /// Decompressed bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Read exactly `buf.len()` bytes, advancing the cursor.
    fn fill(&mut self, buf: &mut [u8]) -> Result<(), PerfError> {
        self.inner
            .read_exact(buf)
            .map_err(|e| self.decode_err(e))?;
        self.position += buf.len() as u64;
        Ok(())
    }

    /// Map a read failure: clean gzip data that simply ran out is a
    /// truncation; anything else means the compressed framing is bad.
    fn decode_err(&self, e: io::Error) -> PerfError {
        if e.kind() == io::ErrorKind::UnexpectedEof {
            PerfError::TruncatedStream(format!(
                "unexpected end of input at byte {}",
                self.position
            ))
        } else {
            PerfError::StreamCorrupt(format!("{} at byte {}", e, self.position))
        }
    }

    pub fn read_u8(&mut self) -> Result<u8, PerfError> {
        let mut buf = [0u8; 1];
        self.fill(&mut buf)?;
        Ok(buf[0])
    }

    pub fn read_i8(&mut self) -> Result<i8, PerfError> {
        Ok(self.read_u8()? as i8)
    }

    pub fn read_i16(&mut self) -> Result<i16, PerfError> {
        let mut buf = [0u8; 2];
        self.fill(&mut buf)?;
        Ok(BigEndian::read_i16(&buf))
    }

    pub fn read_i32(&mut self) -> Result<i32, PerfError> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(BigEndian::read_i32(&buf))
    }

    pub fn read_u32(&mut self) -> Result<u32, PerfError> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(BigEndian::read_u32(&buf))
    }

    pub fn read_i64(&mut self) -> Result<i64, PerfError> {
        let mut buf = [0u8; 8];
        self.fill(&mut buf)?;
        Ok(BigEndian::read_i64(&buf))
    }

    pub fn read_f32(&mut self) -> Result<f32, PerfError> {
        let mut buf = [0u8; 4];
        self.fill(&mut buf)?;
        Ok(BigEndian::read_f32(&buf))
    }

    pub fn read_f64(&mut self) -> Result<f64, PerfError> {
        let mut buf = [0u8; 8];
        self.fill(&mut buf)?;
        Ok(BigEndian::read_f64(&buf))
    }

    /// Read a boolean (one byte, nonzero = true).
    pub fn read_bool(&mut self) -> Result<bool, PerfError> {
        Ok(self.read_u8()? != 0)
    }

    /// Read a length-prefixed UTF-8 string. `Ok(None)` for the null marker.
    pub fn read_string(&mut self) -> Result<Option<String>, PerfError> {
        if self.read_u8()? == MARKER_NULL {
            return Ok(None);
        }
        self.read_string_body().map(Some)
    }

    /// Read a string at the one position where end-of-input is a normal
    /// stop rather than a truncation: the table-name marker.
    ///
    /// Returns `Ok(None)` both for a clean EOF exactly at the marker byte
    /// and for the null marker itself; both mean "no more tables". EOF
    /// anywhere inside the string body is still a truncation error.
    pub fn read_string_or_end(&mut self) -> Result<Option<String>, PerfError> {
        let mut marker = [0u8; 1];
        loop {
            match self.inner.read(&mut marker) {
                Ok(0) => return Ok(None),
                Ok(_) => break,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(self.decode_err(e)),
            }
        }
        self.position += 1;
        if marker[0] == MARKER_NULL {
            return Ok(None);
        }
        self.read_string_body().map(Some)
    }

    /// Read the length + bytes of a string whose marker was already consumed.
    fn read_string_body(&mut self) -> Result<String, PerfError> {
        let len = self.read_u32()? as usize;
        let mut buf = vec![0u8; len];
        self.fill(&mut buf)?;
        String::from_utf8(buf).map_err(|e| {
            PerfError::StreamCorrupt(format!("invalid UTF-8 at byte {}: {}", self.position, e))
        })
    }

    /// Read an arbitrary-precision decimal sub-record and render it as a
    /// plain-notation decimal string.
    ///
    /// Wire layout: `i32` scale, `i32` magnitude length, then that many
    /// bytes of big-endian two's-complement unscaled integer. The value is
    /// `unscaled * 10^-scale`.
    pub fn read_decimal(&mut self) -> Result<String, PerfError> {
        let scale = self.read_i32()?;
        let len = self.read_i32()?;
        if len < 0 {
            return Err(PerfError::StreamCorrupt(format!(
                "negative decimal magnitude length {} at byte {}",
                len, self.position
            )));
        }
        let mut magnitude = vec![0u8; len as usize];
        self.fill(&mut magnitude)?;
        Ok(render_decimal(scale, &magnitude))
    }

    /// Read a generic object record: the writer's textual rendering of a
    /// payload this decoder does not otherwise enumerate. `Ok(None)` when
    /// the object itself is absent.
    pub fn read_object_text(&mut self) -> Result<Option<String>, PerfError> {
        self.read_string()
    }
}

/// Render a two's-complement unscaled integer plus scale as a decimal
/// string in plain notation (no exponent). An empty magnitude is zero.
fn render_decimal(scale: i32, magnitude: &[u8]) -> String {
    let negative = magnitude.first().is_some_and(|b| b & 0x80 != 0);

    // Absolute value of the two's-complement magnitude.
    let abs: Vec<u8> = if negative {
        let mut inverted: Vec<u8> = magnitude.iter().map(|b| !b).collect();
        for byte in inverted.iter_mut().rev() {
            let (sum, carry) = byte.overflowing_add(1);
            *byte = sum;
            if !carry {
                break;
            }
        }
        inverted
    } else {
        magnitude.to_vec()
    };

    let digits = base256_to_digits(&abs);
    if digits == "0" {
        // Scale never turns zero into anything but zero.
        return digits;
    }

    let unscaled = if scale <= 0 {
        // Non-positive scale multiplies by a power of ten.
        let mut s = digits;
        s.extend(std::iter::repeat('0').take(scale.unsigned_abs() as usize));
        s
    } else {
        let scale = scale as usize;
        if digits.len() <= scale {
            let mut s = String::from("0.");
            s.extend(std::iter::repeat('0').take(scale - digits.len()));
            s.push_str(&digits);
            s
        } else {
            let split = digits.len() - scale;
            format!("{}.{}", &digits[..split], &digits[split..])
        }
    };

    if negative {
        format!("-{unscaled}")
    } else {
        unscaled
    }
}

/// Convert a big-endian base-256 magnitude to its decimal digit string
/// via repeated division by ten.
fn base256_to_digits(bytes: &[u8]) -> String {
    let mut num = bytes.to_vec();
    let mut digits: Vec<char> = Vec::new();
    while num.iter().any(|&b| b != 0) {
        let mut rem: u32 = 0;
        for byte in num.iter_mut() {
            let cur = (rem << 8) | u32::from(*byte);
            *byte = (cur / 10) as u8;
            rem = cur % 10;
        }
        digits.push(char::from(b'0' + rem as u8));
    }
    if digits.is_empty() {
        digits.push('0');
    }
    digits.iter().rev().collect()
}
