//! Primitive codecs: integers, floats, characters, strings and byte blobs.

pub mod bytes;
pub mod character;
pub mod float;
pub mod int;
pub mod string;

pub use self::bytes::SerialBytes;
pub use self::character::SerialChar;
pub use self::float::{SerialDouble, SerialFloat, SerialHalf};
pub use self::int::{
    SerialS16, SerialS32, SerialS64, SerialS8, SerialU16, SerialU32, SerialU64, SerialU8,
};
pub use self::string::{Ascii, SerialAsciiString, SerialString, SerialText, TextEncoding, Utf8};
