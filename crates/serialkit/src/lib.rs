//! serialkit: declarative binary serialization of typed records.
//!
//! Values live in codecs. A codec holds one typed value, validates every
//! assignment, and knows its byte encoding. Codecs compose: a list holds
//! codecs of one type, a composite holds named codecs in a fixed order, and
//! a union holds exactly one codec out of a declared set.
//!
//! # Quick Start
//!
//! ```rust
//! use serialkit::{
//!     serial_composite, serial_union, Codec, Serializable, SerialList, SerialString,
//!     SerialU16, SerialU32, SerialU8,
//! };
//!
//! serial_union! {
//!     pub struct Payload(PayloadValue) {
//!         Count(count / set_count): SerialU32,
//!         Text(text / set_text): SerialString,
//!     }
//! }
//!
//! serial_composite! {
//!     pub struct Message {
//!         id / set_id: SerialU16,
//!         payload / set_payload: Payload,
//!         flags: SerialList<SerialU8>,
//!     }
//! }
//!
//! let mut message = Message::new();
//! message.set_id(7u16).unwrap();
//! message.payload.set_text("hello").unwrap();
//! message.flags.append_value(1u8).unwrap();
//!
//! // Encode to binary
//! let bytes = message.to_bytes().unwrap();
//!
//! // Decode back
//! let (decoded, _) = Message::from_bytes(&bytes, 0).unwrap();
//! assert_eq!(decoded.id(), 7);
//! assert_eq!(decoded.payload().text().unwrap(), "hello");
//! ```
//!
//! # Modules
//!
//! - [`primitive`]: Integer, float, character, string and byte codecs
//! - [`list`]: Homogeneous ordered list codec
//! - [`composite`]: Ordered records ([`serial_composite!`])
//! - [`union`]: Tagged alternatives ([`serial_union!`])
//! - [`enumeration`]: Closed enum codec ([`serial_enumerable!`])
//! - [`codec`]: Byte order, readers and writers
//! - [`error`]: Error types
//! - [`limits`]: Security limits for decoding
//!
//! # Wire Format
//!
//! There is no header, magic or version: both ends must share the schema.
//! - Integers and floats: fixed width in the codec's byte order
//! - Strings, bytes and lists: u32 length or count prefix, then the payload
//! - Composites: fields concatenated in declared order
//! - Unions: u8 variant index, then the active variant
//!
//! # Security
//!
//! Length prefixes are checked against [`limits`] before allocating, and
//! truncated input is rejected with [`DecodeError::UnexpectedEof`].

pub mod codec;
pub mod composite;
pub mod enumeration;
pub mod error;
pub mod limits;
pub mod list;
pub mod primitive;
pub mod schema;
pub mod serial;
pub mod union;
pub mod value;

// Re-export commonly used types at crate root
pub use codec::Endianness;
pub use composite::Composite;
pub use enumeration::{SerialEnum, SerialEnumerable};
pub use error::{DecodeError, EncodeError, Error, ValidationError};
pub use list::SerialList;
pub use primitive::{
    SerialAsciiString, SerialBytes, SerialChar, SerialDouble, SerialFloat, SerialHalf, SerialS16,
    SerialS32, SerialS64, SerialS8, SerialString, SerialU16, SerialU32, SerialU64, SerialU8,
};
pub use schema::{CompositeSchema, FieldDescriptor, UnionSchema, VariantDescriptor};
pub use serial::{Assign, Codec, Field, Serializable};
pub use union::{Union, UnionKind, UnionMember};
pub use value::{Value, ValueKind};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[doc(hidden)]
pub mod __private {
    pub use lazy_static::lazy_static;
    pub use log;
}
