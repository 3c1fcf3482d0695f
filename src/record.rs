use crate::error::EncodeError;
use crate::layout::{Field, FieldSpec, Layout};
use crate::value::Value;
use crate::MAX_RECORDS;

/// Read-only typed view over a caller buffer holding records back to back
/// at the layout's stride.
///
/// Bounds are validated once at construction; every field read afterward is
/// a plain offset lookup through the layout. The buffer is never mutated
/// and never outlives the caller's ownership of it.
#[derive(Clone, Copy, Debug)]
pub struct Records<'a> {
    data: &'a [u8],
    layout: &'a Layout,
    count: usize,
}

impl<'a> Records<'a> {
    /// Wrap a raw buffer holding `count` records.
    ///
    /// Fails if `count` exceeds 255 or the buffer is shorter than
    /// `count * stride` bytes.
    pub fn new(data: &'a [u8], layout: &'a Layout, count: usize) -> Result<Records<'a>, EncodeError> {
        if count > MAX_RECORDS {
            return Err(EncodeError::RecordCount(count));
        }
        let expected = count * layout.stride();
        if data.len() < expected {
            return Err(EncodeError::BufferTooShort {
                expected,
                actual: data.len(),
            });
        }
        Ok(Records {
            data,
            layout,
            count,
        })
    }

    /// Number of records in the buffer.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn layout(&self) -> &'a Layout {
        self.layout
    }

    /// View of the record at `index`, or `None` past the end.
    pub fn record(&self, index: usize) -> Option<RecordView<'a>> {
        if index >= self.count {
            return None;
        }
        let stride = self.layout.stride();
        Some(RecordView {
            data: &self.data[index * stride..(index + 1) * stride],
            layout: self.layout,
        })
    }

    /// The records in buffer order.
    pub fn iter(&self) -> impl Iterator<Item = RecordView<'a>> + '_ {
        let stride = self.layout.stride();
        self.data[..self.count * stride]
            .chunks_exact(stride)
            .map(|data| RecordView {
                data,
                layout: self.layout,
            })
    }
}

/// One record viewed through its layout.
#[derive(Clone, Copy, Debug)]
pub struct RecordView<'a> {
    data: &'a [u8],
    layout: &'a Layout,
}

impl<'a> RecordView<'a> {
    /// The logical value of the field at `index`, or `None` past the end.
    ///
    /// String fields stop at the first zero byte inside their capacity
    /// window; the terminator and trailing capacity are not part of the
    /// value. Integer fields are native byte order, as laid down by an
    /// in-memory struct.
    pub fn field(&self, index: usize) -> Option<Value> {
        self.layout.fields().get(index).map(|f| self.read(f))
    }

    /// All field values in layout order.
    pub fn fields(&self) -> impl Iterator<Item = Value> + '_ {
        self.layout.fields().iter().map(|f| self.read(f))
    }

    fn read(&self, field: &Field) -> Value {
        match field.spec {
            FieldSpec::SignedInt => Value::Signed(self.read_u32(field.offset) as i32),
            FieldSpec::UnsignedInt => Value::Unsigned(self.read_u32(field.offset)),
            FieldSpec::FixedString { capacity } => {
                let window = &self.data[field.offset..field.offset + capacity];
                let used = window.iter().position(|&b| b == 0).unwrap_or(capacity);
                Value::Text(window[..used].to_vec())
            }
        }
    }

    fn read_u32(&self, offset: usize) -> u32 {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(&self.data[offset..offset + 4]);
        u32::from_ne_bytes(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::resolve;

    fn buffer(layout: &Layout, records: usize) -> Vec<u8> {
        vec![0u8; layout.stride() * records]
    }

    #[test]
    fn reads_ints_and_strings() {
        let layout = resolve("is4u").unwrap();
        let mut buf = buffer(&layout, 1);
        buf[..4].copy_from_slice(&(-128i32).to_ne_bytes());
        buf[4..7].copy_from_slice(b"abc");
        buf[8..12].copy_from_slice(&256u32.to_ne_bytes());

        let records = Records::new(&buf, &layout, 1).unwrap();
        let rec = records.record(0).unwrap();
        assert_eq!(rec.field(0), Some(Value::Signed(-128)));
        assert_eq!(rec.field(1), Some(Value::Text(b"abc".to_vec())));
        assert_eq!(rec.field(2), Some(Value::Unsigned(256)));
        assert_eq!(rec.field(3), None);
    }

    #[test]
    fn string_without_terminator_fills_capacity() {
        let layout = resolve("s5").unwrap();
        let mut buf = buffer(&layout, 1);
        buf[..5].copy_from_slice(b"ghijk");

        let records = Records::new(&buf, &layout, 1).unwrap();
        let rec = records.record(0).unwrap();
        assert_eq!(rec.field(0), Some(Value::Text(b"ghijk".to_vec())));
    }

    #[test]
    fn second_record_offsets() {
        let layout = resolve("u").unwrap();
        let mut buf = buffer(&layout, 2);
        buf[..4].copy_from_slice(&1u32.to_ne_bytes());
        buf[4..8].copy_from_slice(&2u32.to_ne_bytes());

        let records = Records::new(&buf, &layout, 2).unwrap();
        let values: Vec<Value> = records.iter().flat_map(|r| r.fields().collect::<Vec<_>>()).collect();
        assert_eq!(values, vec![Value::Unsigned(1), Value::Unsigned(2)]);
    }

    #[test]
    fn rejects_short_buffer() {
        let layout = resolve("u").unwrap();
        let buf = buffer(&layout, 1);
        assert!(matches!(
            Records::new(&buf, &layout, 2),
            Err(EncodeError::BufferTooShort {
                expected: 8,
                actual: 4
            })
        ));
    }

    #[test]
    fn rejects_oversize_count() {
        let layout = resolve("u").unwrap();
        let buf = buffer(&layout, 300);
        assert!(matches!(
            Records::new(&buf, &layout, 256),
            Err(EncodeError::RecordCount(256))
        ));
    }
}
