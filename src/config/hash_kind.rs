// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::hash::{AnyHasher, Fnv1a, Murmur3};
use crate::Error;

/// Hash function used to index a table
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HashKind {
    /// See [`Fnv1a`]
    #[default]
    Fnv1a,

    /// See [`Murmur3`]
    Murmur3,
}

impl HashKind {
    /// All hash functions, in comparison order
    pub const ALL: [Self; 2] = [Self::Fnv1a, Self::Murmur3];

    /// Creates the hasher; `murmur_seed` is ignored for FNV-1a.
    #[must_use]
    pub fn hasher(self, murmur_seed: u32) -> AnyHasher {
        match self {
            Self::Fnv1a => Fnv1a.into(),
            Self::Murmur3 => Murmur3::new(murmur_seed).into(),
        }
    }

    /// Suffix used when naming distribution files (e.g. `distributionOfDictionaryFNV.txt`)
    #[must_use]
    pub fn file_suffix(self) -> &'static str {
        match self {
            Self::Fnv1a => "FNV",
            Self::Murmur3 => "Murmur",
        }
    }
}

impl std::fmt::Display for HashKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Fnv1a => "fnv1a",
            Self::Murmur3 => "murmur3",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for HashKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fnv1a" | "fnv-1a" | "fnv" => Ok(Self::Fnv1a),
            "murmur3" | "murmurhash3" | "murmur" => Ok(Self::Murmur3),
            _ => Err(Error::UnknownHashKind(s.into())),
        }
    }
}
