//! Stream writer: each field becomes a one-byte header plus a
//! width-minimized payload.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

use crate::error::EncodeError;
use crate::header::FieldHeader;
use crate::layout::Layout;
use crate::record::Records;
use crate::value::Value;
use crate::MAX_STR_LEN;

/// Minimal number of bytes (1-4) that hold `v` as an unsigned value.
pub(crate) fn unsigned_width(v: u32) -> usize {
    if v <= 0xFF {
        1
    } else if v <= 0xFFFF {
        2
    } else if v <= 0xFF_FFFF {
        3
    } else {
        4
    }
}

/// Minimal number of bytes (1-4) that sign-extend back to `v` exactly.
///
/// Shrinks while the top byte is redundant sign extension of the byte below
/// it: 0x00 over a clear high bit, or 0xFF over a set high bit.
pub(crate) fn signed_width(v: i32) -> usize {
    let mut n = 4;
    while n > 1 {
        let top = (v >> ((n - 1) * 8)) as u8;
        let next = (v >> ((n - 2) * 8)) as u8;
        if (top == 0x00 && next & 0x80 == 0) || (top == 0xFF && next & 0x80 != 0) {
            n -= 1;
        } else {
            break;
        }
    }
    n
}

fn write_int<W: Write>(w: &mut W, val: u32, signed: bool, last: bool) -> Result<(), EncodeError> {
    let len = if signed {
        signed_width(val as i32)
    } else {
        unsigned_width(val)
    };
    let header = FieldHeader::Int {
        signed,
        len: len as u8,
        last,
    };
    w.write_u8(header.into_u8())?;
    // Low `len` bytes only; write_uint insists the value fits its width.
    let mask = if len == 4 {
        u64::from(u32::MAX)
    } else {
        (1u64 << (8 * len)) - 1
    };
    w.write_uint::<BigEndian>(u64::from(val) & mask, len)?;
    Ok(())
}

fn write_str<W: Write>(w: &mut W, s: &[u8], last: bool) -> Result<(), EncodeError> {
    // The 6-bit header length caps a used string at 63 bytes; a full
    // 64-byte field loses its final byte on the wire.
    let used = s.len().min(MAX_STR_LEN);
    let header = FieldHeader::Str {
        len: used as u8,
        last,
    };
    w.write_u8(header.into_u8())?;
    w.write_all(&s[..used])?;
    Ok(())
}

/// Encode `count` records from `buffer` into a fresh byte vector.
///
/// `buffer` holds the records back to back at the layout's stride and is
/// only read. The output starts with one count byte, then each record as a
/// run of header+payload fields, the last field of each record flagged in
/// its header. Integer payloads are the minimal big-endian byte count that
/// reproduces the 32-bit value; string payloads are the used length —
/// `min(capacity, first zero byte, 63)` — with no terminator.
///
/// Fails fast if `count` exceeds 255 or `buffer` is shorter than
/// `count * stride`; nothing is retried.
pub fn encode(count: usize, buffer: &[u8], layout: &Layout) -> Result<Vec<u8>, EncodeError> {
    let mut out = Vec::new();
    encode_into(&mut out, count, buffer, layout)?;
    Ok(out)
}

/// Encode `count` records from `buffer` straight onto a writer.
///
/// Same stream as [`encode`]. A write failure surfaces as
/// [`EncodeError::Io`]; bytes already flushed are not rolled back, and the
/// caller must treat the stream as unusable.
pub fn encode_into<W: Write>(
    w: &mut W,
    count: usize,
    buffer: &[u8],
    layout: &Layout,
) -> Result<(), EncodeError> {
    let records = Records::new(buffer, layout, count)?;
    w.write_u8(count as u8)?;
    let nfields = layout.len();
    for record in records.iter() {
        for (i, value) in record.fields().enumerate() {
            let last = i + 1 == nfields;
            match value {
                Value::Unsigned(v) => write_int(w, v, false, last)?,
                Value::Signed(v) => write_int(w, v as u32, true, last)?,
                Value::Text(s) => write_str(w, &s, last)?,
            }
        }
    }
    Ok(())
}
