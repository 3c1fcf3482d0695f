use std::fmt;
use std::io;

/// Errors from resolving a layout descriptor string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DescriptorError {
    /// The descriptor held no tokens at all.
    Empty,
    /// A character that doesn't start any field token.
    UnknownToken { index: usize, token: char },
    /// An `s` token with no capacity digits after it.
    MissingCapacity { index: usize },
    /// A string capacity outside the allowed 1-64 range.
    BadCapacity { index: usize, capacity: usize },
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DescriptorError::Empty => f.write_str("Descriptor is empty"),
            DescriptorError::UnknownToken { index, token } => {
                write!(f, "Unknown field token '{}' at byte {}", token, index)
            }
            DescriptorError::MissingCapacity { index } => {
                write!(f, "String token at byte {} has no capacity digits", index)
            }
            DescriptorError::BadCapacity { index, capacity } => write!(
                f,
                "String capacity {} at byte {} is outside 1-64",
                capacity, index
            ),
        }
    }
}

impl std::error::Error for DescriptorError {}

/// Errors from encoding a record buffer.
#[derive(Debug)]
pub enum EncodeError {
    /// The record count doesn't fit the stream's single count byte.
    RecordCount(usize),
    /// The buffer is too small for the claimed number of records.
    BufferTooShort { expected: usize, actual: usize },
    /// The layout descriptor failed to resolve.
    Descriptor(DescriptorError),
    /// The underlying writer failed.
    Io(io::Error),
}

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            EncodeError::RecordCount(count) => {
                write!(f, "Record count {} is outside 0-255", count)
            }
            EncodeError::BufferTooShort { expected, actual } => write!(
                f,
                "Record buffer holds {} bytes, but {} are needed",
                actual, expected
            ),
            EncodeError::Descriptor(ref err) => write!(f, "Bad layout descriptor: {}", err),
            EncodeError::Io(ref err) => write!(f, "Write failed: {}", err),
        }
    }
}

impl std::error::Error for EncodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            EncodeError::Descriptor(ref err) => Some(err),
            EncodeError::Io(ref err) => Some(err),
            _ => None,
        }
    }
}

impl From<DescriptorError> for EncodeError {
    fn from(e: DescriptorError) -> Self {
        Self::Descriptor(e)
    }
}

impl From<io::Error> for EncodeError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Errors from decoding an encoded stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The stream ended while more bytes were still expected.
    Truncated {
        step: &'static str,
        needed: usize,
        remaining: usize,
    },
    /// A field header no encoder can produce (integer width of 0 or above 4).
    BadHeader(u8),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DecodeError::Truncated {
                step,
                needed,
                remaining,
            } => write!(
                f,
                "Expected {} bytes but had {} on step [{}]",
                needed, remaining, step
            ),
            DecodeError::BadHeader(byte) => {
                write!(f, "Malformed field header byte 0x{:02x}", byte)
            }
        }
    }
}

impl std::error::Error for DecodeError {}
