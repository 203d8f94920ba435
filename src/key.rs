// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::borrow::Cow;

/// Types that can be hashed as a byte sequence
///
/// This is the only way a [`ChainedTable`](crate::ChainedTable) looks at a key
/// when picking its bucket.
///
/// When a table is queried through a borrowed form of its key type
/// (e.g. `&str` for `String`), both forms must produce the same bytes.
///
/// Text is hashed as its UTF-8 encoding. Characters outside ASCII are
/// therefore multiple bytes (`"£"` is `[0xc2, 0xa3]`), not one byte per
/// character truncated to its low 8 bits. To hash text that way, pass
/// the truncated bytes as a `Vec<u8>` key.
pub trait KeyBytes {
    /// Returns the bytes that get hashed.
    fn key_bytes(&self) -> Cow<'_, [u8]>;
}

impl KeyBytes for [u8] {
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl<const N: usize> KeyBytes for [u8; N] {
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl KeyBytes for Vec<u8> {
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self)
    }
}

impl KeyBytes for str {
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl KeyBytes for String {
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.as_bytes())
    }
}

impl<T: KeyBytes + ?Sized> KeyBytes for &T {
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        (**self).key_bytes()
    }
}

impl<T: KeyBytes + ?Sized> KeyBytes for Box<T> {
    fn key_bytes(&self) -> Cow<'_, [u8]> {
        (**self).key_bytes()
    }
}

// Integers hash as their little-endian bytes
macro_rules! impl_key_bytes_int {
    ($($t:ty),*) => {
        $(
            impl KeyBytes for $t {
                fn key_bytes(&self) -> Cow<'_, [u8]> {
                    Cow::Owned(self.to_le_bytes().to_vec())
                }
            }
        )*
    };
}

impl_key_bytes_int!(u8, u16, u32, u64, u128, usize);
