// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! 32-bit hash functions used to index [`ChainedTable`](crate::ChainedTable)s

mod digest;
mod fnv1a;
mod murmur3;

pub use digest::Digest;
pub use fnv1a::{fnv1a_hash, Fnv1a};
pub use murmur3::{murmur_hash, Murmur3, DEFAULT_SEED};

use enum_dispatch::enum_dispatch;

/// Calculates a 32-bit hash from a byte slice.
#[enum_dispatch]
pub trait Hash32 {
    /// Gets the readable hash function name (e.g. "FNV-1a")
    fn name(&self) -> &'static str;

    /// Hashes a byte slice to a raw 32-bit value
    fn hash32(&self, bytes: &[u8]) -> u32;

    /// Hashes a byte slice to a [`Digest`]
    fn digest(&self, bytes: &[u8]) -> Digest {
        Digest::from_raw(self.hash32(bytes))
    }
}

/// May be [`Fnv1a`] or [`Murmur3`], picked at runtime.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[enum_dispatch(Hash32)]
pub enum AnyHasher {
    /// See [`Fnv1a`]
    Fnv1a(Fnv1a),

    /// See [`Murmur3`]
    Murmur3(Murmur3),
}
