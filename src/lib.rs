//! stride-pack is a compact, self-describing binary encoding for arrays of
//! fixed-layout records: homogeneous structs built from signed/unsigned
//! 32-bit integers and fixed-capacity byte strings. Each field is written
//! with the minimum number of payload bytes that still reproduce its value,
//! behind a one-byte header carrying the field's type, payload length, and
//! an end-of-record flag. The resulting stream can be decoded without the
//! record layout that produced it.
//!
//! The write side works from a [`Layout`], resolved once from a short
//! descriptor string (`i` signed int, `u` unsigned int, `s<N>` string of
//! capacity N), over a caller-owned buffer holding the records back to back
//! at the layout's stride. The read side is a lazy [`Decoder`] that rebuilds
//! field boundaries purely from header bytes.
//!
//! ```
//! use stride_pack::{decode, encode, resolve, Value};
//!
//! // One record of layout "us3": an unsigned int followed by a 3-byte string.
//! let layout = resolve("us3")?;
//! assert_eq!(layout.stride(), 8);
//!
//! let mut buf = vec![0u8; layout.stride()];
//! buf[..4].copy_from_slice(&300u32.to_ne_bytes());
//! buf[4..7].copy_from_slice(b"hi\0");
//!
//! let stream = encode(1, &buf, &layout)?;
//! let fields = decode(&stream).collect::<Result<Vec<_>, _>>()?;
//! assert_eq!(
//!     fields,
//!     vec![(0, Value::Unsigned(300)), (0, Value::Text(b"hi".to_vec()))]
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Stream format
//!
//! One count byte, then each record as a run of fields terminated by the
//! field whose header has the last bit set:
//!
//! ```text
//! stream := record_count:u8 , record*
//! record := field+                       -- ends at the field with bit7 set
//! int_field := header:u8 , payload:u8[1..4]  -- bit7=last, bit6=0, bit5=signed, bits4-0=len
//! str_field := header:u8 , payload:u8[0..63] -- bit7=last, bit6=1, bits5-0=len
//! ```
//!
//! Integer payloads are big-endian, the low `len` bytes of the 32-bit value.
//! String payloads are the used bytes of the field, stopping at the first
//! zero byte; the terminator and unused capacity are never written.

mod error;
mod header;
mod layout;
mod record;
mod value;

pub mod decode;
pub mod encode;

pub use self::decode::{decode, Decoder};
pub use self::encode::{encode, encode_into};
pub use self::error::{DecodeError, DescriptorError, EncodeError};
pub use self::layout::{resolve, Field, FieldSpec, Layout};
pub use self::record::{RecordView, Records};
pub use self::value::Value;

/// A single stream holds at most 255 records; the count must fit its one
/// leading byte.
pub const MAX_RECORDS: usize = 255;
/// Maximum capacity a string field may declare in a layout.
pub const MAX_STR_CAPACITY: usize = 64;
/// Maximum string payload length the 6-bit header length field can carry.
pub const MAX_STR_LEN: usize = 63;
/// Integer fields and whole records are aligned to this many bytes.
pub const INT_ALIGN: usize = 4;
