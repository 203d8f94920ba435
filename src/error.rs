// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Represents errors that can occur when building or querying hash tables
#[derive(Debug)]
pub enum Error {
    /// I/O error
    Io(std::io::Error),

    /// A table needs at least one bucket
    InvalidBucketCount(usize),

    /// Tried to remove a key that is not in the table
    KeyNotFound,

    /// Distribution file contains a line that is not an unsigned integer (1-based line number)
    InvalidDistribution {
        /// Offending line
        line: usize,
    },

    /// Unknown hash function name
    UnknownHashKind(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HashTableError: {self:?}")
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Hash table result
pub type Result<T> = std::result::Result<T, Error>;
