//! Stream reader: rebuilds field boundaries from header bytes alone, with
//! no knowledge of the layout that produced the stream.

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::DecodeError;
use crate::header::FieldHeader;
use crate::value::Value;

fn truncated(step: &'static str, needed: usize, remaining: usize) -> DecodeError {
    DecodeError::Truncated {
        step,
        needed,
        remaining,
    }
}

/// Start decoding an encoded stream.
///
/// Construction never fails: an empty stream decodes to zero records. All
/// parse errors surface through the returned iterator.
pub fn decode(stream: &[u8]) -> Decoder<'_> {
    Decoder::new(stream)
}

/// Lazy reader over an encoded stream.
///
/// Yields each decoded field tagged with its record index, in stream order,
/// and stops permanently at the first error. Fields already yielded before
/// a truncation error stand; the caller decides whether to keep them.
#[derive(Clone, Debug)]
pub struct Decoder<'a> {
    data: &'a [u8],
    count: usize,
    record: usize,
    errored: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(stream: &'a [u8]) -> Decoder<'a> {
        let (count, data) = match stream.split_first() {
            Some((&count, data)) => (count as usize, data),
            None => (0, stream),
        };
        Decoder {
            data,
            count,
            record: 0,
            errored: false,
        }
    }

    /// Number of records the stream's count byte claims.
    pub fn record_count(&self) -> usize {
        self.count
    }

    /// Drain the decoder into per-record groups of values.
    pub fn records(self) -> Result<Vec<Vec<Value>>, DecodeError> {
        let mut groups: Vec<Vec<Value>> = Vec::with_capacity(self.count);
        for item in self {
            let (record, value) = item?;
            while groups.len() <= record {
                groups.push(Vec::new());
            }
            groups[record].push(value);
        }
        Ok(groups)
    }

    // Parse one field body given its header. Doesn't set the errored flag;
    // that's up to the caller.
    fn parse_field(&mut self, header: FieldHeader) -> Result<Value, DecodeError> {
        match header {
            FieldHeader::Str { len, .. } => {
                let len = len as usize;
                if self.data.len() < len {
                    return Err(truncated("string payload", len, self.data.len()));
                }
                let (bytes, rest) = self.data.split_at(len);
                self.data = rest;
                Ok(Value::Text(bytes.to_vec()))
            }
            FieldHeader::Int { signed, len, .. } => {
                if len < 1 || len > 4 {
                    return Err(DecodeError::BadHeader(header.into_u8()));
                }
                let len = len as usize;
                if self.data.len() < len {
                    return Err(truncated("int payload", len, self.data.len()));
                }
                let v = self
                    .data
                    .read_uint::<BigEndian>(len)
                    .map_err(|_| truncated("int payload", len, 0))? as u32;
                if signed {
                    // Sign-extend unless the value already fills 32 bits or
                    // its top payload bit is clear.
                    let v = if len == 4 || v & (1 << (len * 8 - 1)) == 0 {
                        v as i32
                    } else {
                        (v | (!0u32 << (len * 8))) as i32
                    };
                    Ok(Value::Signed(v))
                } else {
                    Ok(Value::Unsigned(v))
                }
            }
        }
    }
}

impl<'a> Iterator for Decoder<'a> {
    type Item = Result<(usize, Value), DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.errored || self.record == self.count {
            return None;
        }
        let (&header, data) = match self.data.split_first() {
            Some(split) => split,
            None => {
                self.errored = true;
                return Some(Err(truncated("field header", 1, 0)));
            }
        };
        self.data = data;
        let header = FieldHeader::from_u8(header);
        match self.parse_field(header) {
            Ok(value) => {
                let record = self.record;
                if header.is_last() {
                    self.record += 1;
                }
                Some(Ok((record, value)))
            }
            Err(e) => {
                self.errored = true;
                Some(Err(e))
            }
        }
    }
}
