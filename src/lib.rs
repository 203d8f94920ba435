// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Collision and throughput comparison of FNV-1a and MurmurHash3
//! over fixed-size, separately chained hash tables.
//!
//! ##### About
//!
//! This crate exports two 32-bit hash functions and a `ChainedTable` that can be
//! indexed by either of them.
//!
//! The table has a fixed number of buckets and never rehashes, so two tables with the
//! same bucket count that are fed the same keys differ only in the hash function.
//! That makes their bucket distributions and collision counts directly comparable.
//!
//! Digests are the two's-complement absolute value of the raw 32-bit hash.
//! The raw value `0x8000_0000` has no positive counterpart and stays at `i32::MIN`,
//! see [`hash::Digest`].
//!
//! Around the table, the crate has the pieces needed to run an experiment over
//! a text corpus: deduplicated corpus loading ([`Corpus`]) and collision reports
//! and bucket distribution files ([`report`]).
//!
//! ```
//! use hash_collisions::{fnv1a_hash, murmur_hash, Config, HashKind};
//!
//! assert_eq!(0x3a2b_5d69, fnv1a_hash("He11o"));
//! assert_eq!(0x3c8d_722c, murmur_hash("He11o"));
//!
//! for kind in HashKind::ALL {
//!     let mut table = Config::new(1).hash_kind(kind).build()?;
//!
//!     for key in ["a", "b", "c"] {
//!         table.add(key);
//!     }
//!
//!     // A single bucket means every key but the first one collides
//!     assert_eq!(2, table.collisions());
//! }
//! #
//! # Ok::<(), hash_collisions::Error>(())
//! ```

#![deny(clippy::all, missing_docs, clippy::cargo)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::indexing_slicing)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(clippy::expect_used)]
#![allow(clippy::missing_const_for_fn)]
#![warn(clippy::multiple_crate_versions)]
#![allow(clippy::option_if_let_else)]
#![warn(clippy::redundant_feature_names)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub(crate) type HashSet<K> = std::collections::HashSet<K, rustc_hash::FxBuildHasher>;

/// Configuration
pub mod config;

mod corpus;
mod error;

pub mod hash;

mod key;

pub mod report;

mod table;

pub use {
    config::{Config, HashKind},
    corpus::Corpus,
    error::{Error, Result},
    hash::{fnv1a_hash, murmur_hash, AnyHasher, Hash32},
    key::KeyBytes,
    table::ChainedTable,
};
