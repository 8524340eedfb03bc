/// An order of bytes, most-significant-first or least-significant-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endianness {
    Big,
    Little,
}

/// Integer construction from a byte slice of any length.
///
/// A slice shorter than the target type is zero-extended and a longer one is
/// truncated before conversion, always on the most significant side for
/// [`Endianness::Big`] (pad or drop leading bytes) and on the least significant
/// side for [`Endianness::Little`] (pad or drop trailing bytes). Implemented
/// for every fixed-width integer type plus `usize`/`isize`.
pub trait FromBytes: Sized {
    fn from_bytes(bytes: &[u8], endianness: Endianness) -> Self;
}

macro_rules! impl_from_bytes {
    ($($int:ty),* $(,)?) => {$(
        impl FromBytes for $int {
            fn from_bytes(bytes: &[u8], endianness: Endianness) -> Self {
                const SIZE: usize = std::mem::size_of::<$int>();
                let mut aligned = [0u8; SIZE];
                match endianness {
                    Endianness::Big => {
                        if bytes.len() >= SIZE {
                            aligned.copy_from_slice(&bytes[bytes.len() - SIZE..]);
                        } else {
                            aligned[SIZE - bytes.len()..].copy_from_slice(bytes);
                        }
                        Self::from_be_bytes(aligned)
                    }
                    Endianness::Little => {
                        if bytes.len() >= SIZE {
                            aligned.copy_from_slice(&bytes[..SIZE]);
                        } else {
                            aligned[..bytes.len()].copy_from_slice(bytes);
                        }
                        Self::from_le_bytes(aligned)
                    }
                }
            }
        }
    )*};
}

impl_from_bytes!(u8, i8, u16, i16, u32, i32, u64, i64, u128, i128, usize, isize);
