//! Security limits on length and count prefixes.
//!
//! Length and count prefixes come from untrusted input, so every prefix is
//! checked against these bounds before anything is allocated. Encoding
//! applies the same bounds, so every encoding decodes again.

/// Maximum byte blob payload (64 MiB).
pub const MAX_BYTES_LEN: usize = 64 * 1024 * 1024;

/// Maximum encoded string payload (16 MiB).
pub const MAX_STRING_LEN: usize = 16 * 1024 * 1024;

/// Maximum number of list elements.
pub const MAX_LIST_LEN: usize = 16 * 1024 * 1024;

/// Largest length any prefix can carry on the wire.
pub const MAX_PREFIX_LEN: usize = u32::MAX as usize;
