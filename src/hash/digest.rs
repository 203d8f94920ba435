// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use std::num::NonZeroUsize;

/// A 32-bit hash digest
///
/// Holds the two's-complement absolute value of a raw 32-bit hash,
/// so it is non-negative for every raw value except `0x8000_0000`:
/// that one has no positive counterpart in 32 bits and stays at [`i32::MIN`].
///
/// Bucket selection works on [`Digest::magnitude`], so even that digest
/// maps to a valid bucket index.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Digest(i32);

impl Digest {
    /// Converts a raw 32-bit hash into a digest.
    #[must_use]
    pub fn from_raw(raw: u32) -> Self {
        #[expect(
            clippy::cast_possible_wrap,
            reason = "the raw bits are reinterpreted as a signed integer"
        )]
        let signed = raw as i32;

        Self(signed.wrapping_abs())
    }

    /// Returns the digest as a signed integer.
    #[must_use]
    pub fn into_i32(self) -> i32 {
        self.0
    }

    /// Returns the unsigned magnitude of the digest.
    ///
    /// This is `2^31` for the [`i32::MIN`] digest.
    #[must_use]
    pub fn magnitude(self) -> u32 {
        self.0.unsigned_abs()
    }

    /// Returns `true` for the single digest that stayed negative.
    #[must_use]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Reduces the digest to a bucket index in `[0, bucket_count)`.
    #[must_use]
    pub fn bucket(self, bucket_count: NonZeroUsize) -> usize {
        (self.magnitude() as usize) % bucket_count
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::LowerHex for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::LowerHex::fmt(&self.0, f)
    }
}

impl From<Digest> for i32 {
    fn from(value: Digest) -> Self {
        value.0
    }
}
