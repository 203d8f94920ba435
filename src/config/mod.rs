// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

mod hash_kind;

pub use hash_kind::HashKind;

use crate::{
    hash::{AnyHasher, DEFAULT_SEED},
    ChainedTable, KeyBytes,
};

/// Hash table configuration builder
///
/// # Examples
///
/// ```
/// use hash_collisions::{Config, HashKind};
///
/// let mut table = Config::new(1_024)
///     .hash_kind(HashKind::Murmur3)
///     .build::<String>()?;
///
/// table.add("He11o".into());
/// assert!(table.contains("He11o"));
/// #
/// # Ok::<(), hash_collisions::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Number of buckets
    #[doc(hidden)]
    pub bucket_count: usize,

    /// Hash function
    #[doc(hidden)]
    pub hash_kind: HashKind,

    /// Seed of MurmurHash3
    #[doc(hidden)]
    pub murmur_seed: u32,
}

impl Config {
    /// Initializes a new config with `bucket_count` buckets.
    #[must_use]
    pub fn new(bucket_count: usize) -> Self {
        Self {
            bucket_count,
            hash_kind: HashKind::default(),
            murmur_seed: DEFAULT_SEED,
        }
    }

    /// Sets the hash function.
    ///
    /// Defaults to FNV-1a.
    #[must_use]
    pub fn hash_kind(mut self, kind: HashKind) -> Self {
        self.hash_kind = kind;
        self
    }

    /// Sets the MurmurHash3 seed.
    ///
    /// Has no effect on FNV-1a.
    ///
    /// Defaults to 256.
    #[must_use]
    pub fn murmur_seed(mut self, seed: u32) -> Self {
        self.murmur_seed = seed;
        self
    }

    /// Creates the configured hash function.
    #[must_use]
    pub fn hasher(&self) -> AnyHasher {
        self.hash_kind.hasher(self.murmur_seed)
    }

    /// Builds an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBucketCount`](crate::Error::InvalidBucketCount) if the bucket count is 0.
    pub fn build<K: KeyBytes>(&self) -> crate::Result<ChainedTable<K>> {
        log::debug!(
            "Creating chained table with {} buckets using {}",
            self.bucket_count,
            self.hash_kind,
        );

        ChainedTable::new(self.bucket_count, self.hasher())
    }
}
