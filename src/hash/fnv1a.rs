// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::Hash32;

const OFFSET_BASIS: u32 = 0x811c_9dc5;
const PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a
///
/// XORs each byte into the accumulator, then multiplies by the FNV prime.
/// There is no finalization step.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Fnv1a;

impl Hash32 for Fnv1a {
    fn name(&self) -> &'static str {
        "FNV-1a"
    }

    fn hash32(&self, bytes: &[u8]) -> u32 {
        bytes.iter().fold(OFFSET_BASIS, |acc, &byte| {
            (acc ^ u32::from(byte)).wrapping_mul(PRIME)
        })
    }
}

/// Hashes a key with FNV-1a and returns its digest.
///
/// Strings are hashed as their UTF-8 bytes:
///
/// ```
/// use hash_collisions::fnv1a_hash;
///
/// assert_eq!(fnv1a_hash("£"), fnv1a_hash([0xc2_u8, 0xa3]));
/// assert_ne!(fnv1a_hash("£"), fnv1a_hash([0xa3_u8]));
/// ```
///
/// See [`Digest`](super::Digest) for the one value that can come out negative.
#[must_use]
pub fn fnv1a_hash<K: AsRef<[u8]>>(key: K) -> i32 {
    Fnv1a.digest(key.as_ref()).into_i32()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn fnv1a_empty_is_offset_basis() {
        assert_eq!(OFFSET_BASIS, Fnv1a.hash32(b""));
        assert_eq!(0x7ee3_623b, fnv1a_hash(""));
    }

    #[test]
    fn fnv1a_reference_vectors() {
        assert_eq!(0xe40c_292c, Fnv1a.hash32(b"a"));
        assert_eq!(0x1a47_e90b, Fnv1a.hash32(b"abc"));
        assert_eq!(0x4f9f_2cab, Fnv1a.hash32(b"hello"));
    }

    #[test]
    fn fnv1a_golden() {
        assert_eq!(0x3a2b_5d69, fnv1a_hash("He11o"));
        assert_eq!(0x5aec_f734, fnv1a_hash("Hello, World!"));
    }

    #[test]
    fn fnv1a_negative_raw_is_negated() {
        // raw 0x8cbd1f29
        assert_eq!(0x7342_e0d7, fnv1a_hash("skfhwelfhsjfhsklhfkslhfskehf"));
    }

    #[test]
    fn fnv1a_non_ascii_hashes_utf8_bytes() {
        assert_eq!(2_090_908_498, fnv1a_hash("£"));
        assert_eq!(2_090_908_498, fnv1a_hash([0xc2_u8, 0xa3]));

        // Low byte of U+00A3 only
        assert_eq!(1_509_177_454, fnv1a_hash([0xa3_u8]));
    }

    #[test]
    fn fnv1a_min_value_edge_case() {
        assert_eq!(0x8000_0000, Fnv1a.hash32(b"#kQFkY"));
        assert_eq!(i32::MIN, fnv1a_hash("#kQFkY"));
    }
}
