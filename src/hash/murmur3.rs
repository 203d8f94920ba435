// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use super::Hash32;
use byteorder::{LittleEndian, ReadBytesExt};

/// Seed used by [`murmur_hash`] and [`Murmur3::default`]
pub const DEFAULT_SEED: u32 = 256;

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// 32-bit MurmurHash3 (x86 variant)
///
/// Mixes the key in 4-byte little-endian blocks, folds in the 0-3 trailing
/// bytes and the key length, then runs the avalanche finalizer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Murmur3 {
    seed: u32,
}

impl Default for Murmur3 {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl Murmur3 {
    /// Creates a hasher with the given seed.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Returns the seed.
    #[must_use]
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

fn mix_block(k: u32) -> u32 {
    k.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

fn finalize(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}

impl Hash32 for Murmur3 {
    fn name(&self) -> &'static str {
        "MurmurHash3"
    }

    #[expect(
        clippy::expect_used,
        reason = "blocks are exactly 4 bytes, so reading a u32 cannot fail"
    )]
    fn hash32(&self, bytes: &[u8]) -> u32 {
        let blocks = bytes.chunks_exact(4);
        let tail = blocks.remainder();

        let mut h = self.seed;

        for mut block in blocks {
            let k = block.read_u32::<LittleEndian>().expect("should not fail");

            h ^= mix_block(k);
            h = h.rotate_left(13).wrapping_mul(5).wrapping_add(0xe654_6b64);
        }

        // NOTE: Tail only gets the block mix, no rotate/multiply-add
        if !tail.is_empty() {
            let k = tail
                .iter()
                .enumerate()
                .fold(0u32, |k, (idx, &byte)| k | (u32::from(byte) << (8 * idx)));

            h ^= mix_block(k);
        }

        // NOTE: Length is folded in modulo 2^32
        #[expect(clippy::cast_possible_truncation, reason = "length wraps like the hash")]
        let len = bytes.len() as u32;
        h ^= len;

        finalize(h)
    }
}

/// Hashes a key with MurmurHash3 (seed 256) and returns its digest.
///
/// Strings are hashed as their UTF-8 bytes, like [`fnv1a_hash`](super::fnv1a_hash).
///
/// See [`Digest`](super::Digest) for the one value that can come out negative.
#[must_use]
pub fn murmur_hash<K: AsRef<[u8]>>(key: K) -> i32 {
    Murmur3::default().digest(key.as_ref()).into_i32()
}
