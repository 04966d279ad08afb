//! Error types for serialkit encoding, decoding and validation.

use thiserror::Error;

/// Error raised when a value is rejected by a codec, a list, a composite
/// or a union.
///
/// Every rejection happens before any state is modified.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    // === Range ===
    #[error("value {value} out of range [{min}, {max}]")]
    OutOfRange { value: i128, min: i128, max: i128 },

    #[error("value {value} overflows {precision} precision (largest finite {max})")]
    FloatOutOfRange {
        precision: &'static str,
        value: f64,
        max: f64,
    },

    // === Kind ===
    #[error("expected {expected}, found {found}")]
    WrongKind {
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected exactly one character, found {len}")]
    NotSingleChar { len: usize },

    #[error("character {ch:?} cannot be encoded as {encoding}")]
    Unencodable { encoding: &'static str, ch: char },

    #[error("invalid element at index {index}: {source}")]
    InvalidElement {
        index: usize,
        #[source]
        source: Box<ValidationError>,
    },

    #[error("{member:?} is not a member of {enumeration}")]
    UnknownMember {
        enumeration: &'static str,
        member: String,
    },

    // === Unions ===
    #[error("{variant:?} is not a declared variant of {union}")]
    UndeclaredVariant {
        union: &'static str,
        variant: String,
    },

    #[error("wrong type for oneof: requested {requested}, active {active}")]
    InactiveVariant {
        requested: &'static str,
        active: &'static str,
    },

    // === Composites ===
    #[error("{field:?} is not a field of {schema}")]
    UnknownField { schema: &'static str, field: String },

    #[error("cannot assign directly to {name}")]
    ReadOnly { name: &'static str },

    #[error("types do not match: expected {expected}")]
    SchemaMismatch { expected: &'static str },
}

/// Error during binary decoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    #[error("unexpected end of input while reading {context}")]
    UnexpectedEof { context: &'static str },

    #[error("invalid UTF-8 in {field}")]
    InvalidUtf8 { field: &'static str },

    #[error("non-ASCII byte 0x{byte:02x} in {field}")]
    InvalidAscii { field: &'static str, byte: u8 },

    #[error("{schema} discriminant {index} out of range (count: {count})")]
    DiscriminantOutOfRange {
        schema: &'static str,
        index: u64,
        count: usize,
    },

    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

/// Error during binary encoding.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },
}

/// Any serialkit error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = ValidationError::OutOfRange {
            value: 256,
            min: 0,
            max: 255,
        };
        assert_eq!(err.to_string(), "value 256 out of range [0, 255]");

        let err = ValidationError::InactiveVariant {
            requested: "b",
            active: "a",
        };
        assert!(err.to_string().starts_with("wrong type for oneof"));
    }

    #[test]
    fn test_umbrella_conversion() {
        let err: Error = DecodeError::UnexpectedEof { context: "u32" }.into();
        assert!(matches!(err, Error::Decode(DecodeError::UnexpectedEof { .. })));
        assert_eq!(
            err.to_string(),
            "unexpected end of input while reading u32"
        );
    }
}
