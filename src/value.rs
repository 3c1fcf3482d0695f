use std::fmt;

use serde::{
    de::{Deserialize, Deserializer, SeqAccess, Visitor},
    ser::{Serialize, Serializer},
};

/// A single decoded field value.
///
/// Produced by the decoder with no reference back to any [`Layout`]: the
/// stream is self-describing, so the tag carries everything known about the
/// field. Text fields are raw bytes; the stream makes no UTF-8 promise.
///
/// [`Layout`]: crate::Layout
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Unsigned(u32),
    Signed(i32),
    Text(Vec<u8>),
}

impl Value {
    #[inline]
    pub fn is_unsigned(&self) -> bool {
        matches!(self, Value::Unsigned(_))
    }

    #[inline]
    pub fn is_signed(&self) -> bool {
        matches!(self, Value::Signed(_))
    }

    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// The value as `u32` if it is an integer in `u32` range, or else `None`.
    #[inline]
    pub fn as_u32(&self) -> Option<u32> {
        match *self {
            Value::Unsigned(v) => Some(v),
            Value::Signed(v) => u32::try_from(v).ok(),
            Value::Text(_) => None,
        }
    }

    /// The value as `i32` if it is an integer in `i32` range, or else `None`.
    #[inline]
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Value::Unsigned(v) => i32::try_from(v).ok(),
            Value::Signed(v) => Some(v),
            Value::Text(_) => None,
        }
    }

    /// The raw bytes of a text field, or else `None`.
    #[inline]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match *self {
            Value::Text(ref v) => Some(v),
            _ => None,
        }
    }

    /// The text field as `&str` if it is valid UTF-8, or else `None`.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match *self {
            Value::Text(ref v) => std::str::from_utf8(v).ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Value::Unsigned(v) => fmt::Display::fmt(&v, f),
            Value::Signed(v) => fmt::Display::fmt(&v, f),
            Value::Text(ref v) => fmt::Display::fmt(&String::from_utf8_lossy(v), f),
        }
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Unsigned(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Signed(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Text(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Value::Text(v.to_vec())
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Value::Unsigned(v) => serializer.serialize_u32(v),
            Value::Signed(v) => serializer.serialize_i32(v),
            Value::Text(ref v) => serializer.serialize_bytes(v),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ValueVisitor;
        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, fmt: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
                write!(fmt, "an integer or a byte string")
            }

            fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<Self::Value, E> {
                u32::try_from(v)
                    .map(Value::Unsigned)
                    .map_err(|_| E::custom("integer field out of u32 range"))
            }

            fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<Self::Value, E> {
                if v >= 0 {
                    self.visit_u64(v as u64)
                } else {
                    i32::try_from(v)
                        .map(Value::Signed)
                        .map_err(|_| E::custom("integer field out of i32 range"))
                }
            }

            fn visit_bytes<E: serde::de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                Ok(Value::Text(v.to_vec()))
            }

            fn visit_byte_buf<E: serde::de::Error>(self, v: Vec<u8>) -> Result<Self::Value, E> {
                Ok(Value::Text(v))
            }

            fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(Value::Text(v.as_bytes().to_vec()))
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut bytes = Vec::new();
                while let Some(b) = seq.next_element::<u8>()? {
                    bytes.push(b);
                }
                Ok(Value::Text(bytes))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessors() {
        assert_eq!(Value::Unsigned(300).as_u32(), Some(300));
        assert_eq!(Value::Unsigned(300).as_i32(), Some(300));
        assert_eq!(Value::Unsigned(u32::MAX).as_i32(), None);
        assert_eq!(Value::Signed(-1).as_i32(), Some(-1));
        assert_eq!(Value::Signed(-1).as_u32(), None);
        assert_eq!(Value::Text(b"abc".to_vec()).as_str(), Some("abc"));
        assert_eq!(Value::Text(vec![0xFF]).as_str(), None);
        assert_eq!(
            Value::Text(vec![0xFF]).as_bytes(),
            Some(&[0xFFu8] as &[u8])
        );
        assert_eq!(Value::Signed(-1).as_bytes(), None);
    }

    #[test]
    fn display() {
        assert_eq!(Value::Unsigned(256).to_string(), "256");
        assert_eq!(Value::Signed(-128).to_string(), "-128");
        assert_eq!(Value::Text(b"defg".to_vec()).to_string(), "defg");
    }

    #[test]
    fn serialize_json() {
        let v = serde_json::to_value(Value::Unsigned(256)).unwrap();
        assert_eq!(v, serde_json::json!(256));
        let v = serde_json::to_value(Value::Signed(-128)).unwrap();
        assert_eq!(v, serde_json::json!(-128));
        let v = serde_json::to_value(Value::Text(vec![1, 2, 3])).unwrap();
        assert_eq!(v, serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn deserialize_json() {
        let v: Value = serde_json::from_str("256").unwrap();
        assert_eq!(v, Value::Unsigned(256));
        let v: Value = serde_json::from_str("-128").unwrap();
        assert_eq!(v, Value::Signed(-128));
        let v: Value = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(v, Value::Text(b"abc".to_vec()));
        let v: Value = serde_json::from_str("[1,2,3]").unwrap();
        assert_eq!(v, Value::Text(vec![1, 2, 3]));
    }
}
