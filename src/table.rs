// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::{
    hash::{AnyHasher, Hash32},
    key::KeyBytes,
    Error,
};
use std::{borrow::Borrow, num::NonZeroUsize};

/// A separately chained hash table with a fixed number of buckets
///
/// Each bucket holds its entries in insertion order. Equal keys may be added
/// multiple times, each one taking its own slot.
///
/// The table never resizes or rehashes: the load factor is entirely decided by
/// the bucket count passed at construction, so collision counts of different
/// hash functions are comparable for the same bucket count.
///
/// # Examples
///
/// ```
/// use hash_collisions::{hash::Fnv1a, ChainedTable};
///
/// let mut table = ChainedTable::new(16, Fnv1a)?;
///
/// table.add("apple");
/// table.add("banana");
/// table.add("apple");
///
/// assert!(table.contains("banana"));
/// assert_eq!(3, table.len());
///
/// table.remove("apple")?;
/// assert_eq!(2, table.len());
/// assert_eq!(2, table.distribution().iter().sum::<usize>());
/// #
/// # Ok::<(), hash_collisions::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct ChainedTable<K, H = AnyHasher> {
    /// Chains are allocated on first insert
    buckets: Box<[Option<Vec<K>>]>,

    bucket_count: NonZeroUsize,

    /// Adds minus successful removes
    len: usize,

    hasher: H,
}

impl<K: KeyBytes, H: Hash32> ChainedTable<K, H> {
    /// Creates an empty table with `bucket_count` buckets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBucketCount`] if `bucket_count` is 0.
    pub fn new(bucket_count: usize, hasher: H) -> crate::Result<Self> {
        let Some(non_zero) = NonZeroUsize::new(bucket_count) else {
            return Err(Error::InvalidBucketCount(bucket_count));
        };

        Ok(Self {
            buckets: std::iter::repeat_with(|| None).take(bucket_count).collect(),
            bucket_count: non_zero,
            len: 0,
            hasher,
        })
    }

    /// Returns the bucket index a key maps to.
    pub fn bucket_of<Q: KeyBytes + ?Sized>(&self, key: &Q) -> usize {
        self.hasher
            .digest(&key.key_bytes())
            .bucket(self.bucket_count)
    }

    /// Appends a key to the chain of its bucket.
    ///
    /// Duplicates are kept.
    pub fn add(&mut self, key: K) {
        let idx = self.bucket_of(&key);

        #[expect(
            clippy::indexing_slicing,
            reason = "bucket index is reduced modulo the bucket count"
        )]
        self.buckets[idx].get_or_insert_with(Vec::new).push(key);

        self.len += 1;
    }

    /// Returns `true` if the table holds an entry equal to `key`.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: KeyBytes + PartialEq + ?Sized,
    {
        self.chain(self.bucket_of(key))
            .iter()
            .any(|entry| entry.borrow() == key)
    }

    /// Removes the first entry equal to `key` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if no entry matches, in which case
    /// the table is left untouched.
    pub fn remove<Q>(&mut self, key: &Q) -> crate::Result<K>
    where
        K: Borrow<Q>,
        Q: KeyBytes + PartialEq + ?Sized,
    {
        let idx = self.bucket_of(key);

        let Some(slot) = self.buckets.get_mut(idx) else {
            return Err(Error::KeyNotFound);
        };

        let Some(chain) = slot.as_mut() else {
            log::trace!("Tried to remove key from empty bucket {idx}");
            return Err(Error::KeyNotFound);
        };

        let Some(pos) = chain.iter().position(|entry| entry.borrow() == key) else {
            log::trace!("Key not found in bucket {idx} ({} entries)", chain.len());
            return Err(Error::KeyNotFound);
        };

        let removed = chain.remove(pos);

        if chain.is_empty() {
            *slot = None;
        }

        self.len -= 1;

        Ok(removed)
    }
}

impl<K, H> ChainedTable<K, H> {
    /// Returns the number of buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.bucket_count.get()
    }

    /// Returns the number of entries (not buckets).
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the hash function.
    #[must_use]
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Returns the entries of a bucket in insertion order.
    ///
    /// Untouched and out-of-range buckets are empty.
    #[must_use]
    pub fn chain(&self, idx: usize) -> &[K] {
        self.buckets
            .get(idx)
            .and_then(Option::as_deref)
            .unwrap_or_default()
    }

    /// Returns the number of entries in each bucket, in bucket order.
    #[must_use]
    pub fn distribution(&self) -> Vec<usize> {
        self.buckets
            .iter()
            .map(|chain| chain.as_ref().map_or(0, Vec::len))
            .collect()
    }

    /// Returns the number of entries beyond the first one in each bucket.
    #[must_use]
    pub fn collisions(&self) -> usize {
        self.buckets
            .iter()
            .flatten()
            .map(|chain| chain.len().saturating_sub(1))
            .sum()
    }

    /// Returns the number of buckets holding at least one entry.
    #[must_use]
    pub fn occupied_buckets(&self) -> usize {
        self.buckets
            .iter()
            .flatten()
            .filter(|chain| !chain.is_empty())
            .count()
    }

    /// Returns entries per bucket.
    #[must_use]
    #[expect(
        clippy::cast_precision_loss,
        reason = "only used for reporting"
    )]
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.bucket_count.get() as f64
    }

    /// Iterates over all entries, bucket by bucket.
    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.buckets.iter().flatten().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{Fnv1a, Murmur3};
    use test_log::test;

    /// Sends every key to bucket 0
    struct Constant;

    impl Hash32 for Constant {
        fn name(&self) -> &'static str {
            "Constant"
        }

        fn hash32(&self, _: &[u8]) -> u32 {
            0
        }
    }

    #[test]
    fn table_zero_buckets() {
        let result = ChainedTable::<String, _>::new(0, Fnv1a);
        assert!(matches!(result, Err(Error::InvalidBucketCount(0))));
    }

    #[test]
    fn table_add_contains() -> crate::Result<()> {
        let mut table = ChainedTable::new(8, Murmur3::default())?;
        assert!(table.is_empty());
        assert!(!table.contains("a"));

        table.add(String::from("a"));
        table.add(String::from("b"));

        assert!(table.contains("a"));
        assert!(table.contains("b"));
        assert!(!table.contains("c"));
        assert_eq!(2, table.len());
        assert!(!table.is_empty());

        Ok(())
    }

    #[test]
    fn table_buckets_by_digest_modulo() -> crate::Result<()> {
        let mut table = ChainedTable::new(4, Fnv1a)?;

        // FNV-1a digests: a = 468965076, h = 317966505, ab = 1294271946, abc = 440920331
        table.add("a");
        table.add("h");
        table.add("ab");
        table.add("abc");

        assert_eq!(0, table.bucket_of("a"));
        assert_eq!(1, table.bucket_of("h"));
        assert_eq!(2, table.bucket_of("ab"));
        assert_eq!(3, table.bucket_of("abc"));
        assert_eq!(vec![1, 1, 1, 1], table.distribution());
        assert_eq!(0, table.collisions());
        assert_eq!(4, table.occupied_buckets());

        Ok(())
    }

    #[test]
    fn table_duplicates_take_own_slot() -> crate::Result<()> {
        let mut table = ChainedTable::new(4, Fnv1a)?;

        table.add("x");
        table.add("x");
        table.add("x");

        assert_eq!(3, table.len());
        assert_eq!(3, table.chain(table.bucket_of("x")).len());
        assert_eq!(2, table.collisions());

        table.remove("x")?;
        assert!(table.contains("x"));
        assert_eq!(2, table.len());
        assert_eq!(1, table.collisions());

        Ok(())
    }

    #[test]
    fn table_single_bucket_collisions() -> crate::Result<()> {
        let mut table = ChainedTable::new(1, Murmur3::default())?;

        for x in 0..100u32 {
            table.add(x);
        }

        assert_eq!(vec![100], table.distribution());
        assert_eq!(99, table.collisions());

        Ok(())
    }

    #[test]
    fn table_remove_first_match_keeps_order() -> crate::Result<()> {
        let mut table = ChainedTable::new(16, Constant)?;

        table.add("a");
        table.add("b");
        table.add("a");
        table.add("c");

        assert_eq!(&["a", "b", "a", "c"], table.chain(0));

        assert_eq!("a", table.remove("a")?);
        assert_eq!(&["b", "a", "c"], table.chain(0));

        table.remove("c")?;
        assert_eq!(&["b", "a"], table.chain(0));
        assert_eq!(1, table.collisions());

        Ok(())
    }

    #[test]
    fn table_remove_missing() -> crate::Result<()> {
        let mut table = ChainedTable::new(4, Constant)?;

        assert!(matches!(table.remove("a"), Err(Error::KeyNotFound)));

        table.add("a");
        assert!(matches!(table.remove("b"), Err(Error::KeyNotFound)));
        assert_eq!(1, table.len());
        assert_eq!(vec![1, 0, 0, 0], table.distribution());

        table.remove("a")?;
        assert!(matches!(table.remove("a"), Err(Error::KeyNotFound)));
        assert!(table.is_empty());
        assert_eq!(vec![0, 0, 0, 0], table.distribution());

        Ok(())
    }

    #[test]
    fn table_min_digest_key() -> crate::Result<()> {
        // FNV-1a of this key is 0x8000_0000, so its digest stays i32::MIN
        let mut table = ChainedTable::new(7, Fnv1a)?;

        table.add("#kQFkY");
        assert_eq!(2, table.bucket_of("#kQFkY"));
        assert!(table.contains("#kQFkY"));
        table.remove("#kQFkY")?;

        Ok(())
    }

    #[test]
    fn table_chain_out_of_range() -> crate::Result<()> {
        let table = ChainedTable::<&str, _>::new(2, Fnv1a)?;
        assert!(table.chain(0).is_empty());
        assert!(table.chain(5).is_empty());
        Ok(())
    }

    #[test]
    fn table_iter_and_load_factor() -> crate::Result<()> {
        let mut table = ChainedTable::new(4, Fnv1a)?;

        for key in ["a", "h", "ab", "abc", "a"] {
            table.add(key);
        }

        assert_eq!(5, table.iter().count());
        assert!((table.load_factor() - 1.25).abs() < f64::EPSILON);

        Ok(())
    }
}
