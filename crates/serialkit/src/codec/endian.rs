//! Byte order selection for fixed-width values.

use std::fmt;

/// Byte order used when writing and reading multi-byte values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endianness {
    /// Byte order of the host platform.
    #[default]
    Native,
    /// Least-significant byte first.
    Little,
    /// Most-significant byte first.
    Big,
}

impl Endianness {
    /// Maps `Native` to the concrete byte order of the host.
    #[inline]
    pub fn resolve(self) -> Self {
        match self {
            Endianness::Native if cfg!(target_endian = "little") => Endianness::Little,
            Endianness::Native => Endianness::Big,
            other => other,
        }
    }

    /// Returns true if values are written least-significant byte first.
    #[inline]
    pub fn is_little(self) -> bool {
        self.resolve() == Endianness::Little
    }
}

impl fmt::Display for Endianness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Endianness::Native => "native",
            Endianness::Little => "little",
            Endianness::Big => "big",
        };
        f.write_str(name)
    }
}

/// A number with a fixed wire width.
pub trait FixedWidth: Copy {
    /// Width in bytes.
    const WIDTH: usize;

    /// Raw byte form.
    type Bytes: AsRef<[u8]> + for<'a> TryFrom<&'a [u8]>;

    /// Converts to bytes in the given order.
    fn to_bytes_with(self, endian: Endianness) -> Self::Bytes;

    /// Converts from bytes in the given order.
    fn from_bytes_with(bytes: Self::Bytes, endian: Endianness) -> Self;
}

macro_rules! impl_fixed_width {
    ($($ty:ty => $width:expr),* $(,)?) => {
        $(
            impl FixedWidth for $ty {
                const WIDTH: usize = $width;
                type Bytes = [u8; $width];

                #[inline]
                fn to_bytes_with(self, endian: Endianness) -> Self::Bytes {
                    if endian.is_little() {
                        self.to_le_bytes()
                    } else {
                        self.to_be_bytes()
                    }
                }

                #[inline]
                fn from_bytes_with(bytes: Self::Bytes, endian: Endianness) -> Self {
                    if endian.is_little() {
                        <$ty>::from_le_bytes(bytes)
                    } else {
                        <$ty>::from_be_bytes(bytes)
                    }
                }
            }
        )*
    };
}

impl_fixed_width! {
    u8 => 1, u16 => 2, u32 => 4, u64 => 8,
    i8 => 1, i16 => 2, i32 => 4, i64 => 8,
    f32 => 4, f64 => 8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_resolves() {
        let resolved = Endianness::Native.resolve();
        assert_ne!(resolved, Endianness::Native);
        assert_eq!(
            resolved == Endianness::Little,
            cfg!(target_endian = "little")
        );
    }

    #[test]
    fn test_byte_order() {
        assert_eq!(0x0102u16.to_bytes_with(Endianness::Big), [0x01, 0x02]);
        assert_eq!(0x0102u16.to_bytes_with(Endianness::Little), [0x02, 0x01]);
        assert_eq!(0x0102u16.to_bytes_with(Endianness::Native), 0x0102u16.to_ne_bytes());
        assert_eq!(u32::from_bytes_with([0, 0, 0, 7], Endianness::Big), 7);
        assert_eq!((-2i16).to_bytes_with(Endianness::Little), [0xfe, 0xff]);
    }
}
