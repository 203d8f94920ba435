// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

//! Collision reports and bucket distribution files

use crate::{hash::Hash32, ChainedTable, Config, Error, HashKind, KeyBytes};
use std::{
    collections::BTreeMap,
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

/// Collision summary of a table
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollisionReport {
    /// Hash function name
    pub hash: &'static str,

    /// Number of entries
    pub entries: usize,

    /// Number of buckets
    pub bucket_count: usize,

    /// Number of buckets holding at least one entry
    pub occupied_buckets: usize,

    /// Entries beyond the first one in each bucket
    pub collisions: usize,
}

impl CollisionReport {
    /// Summarizes a table.
    #[must_use]
    pub fn from_table<K, H: Hash32>(table: &ChainedTable<K, H>) -> Self {
        Self {
            hash: table.hasher().name(),
            entries: table.len(),
            bucket_count: table.bucket_count(),
            occupied_buckets: table.occupied_buckets(),
            collisions: table.collisions(),
        }
    }

    /// Returns collisions per entry, or 0 for an empty table.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "only used for reporting")]
    pub fn rate(&self) -> f64 {
        if self.entries == 0 {
            0.0
        } else {
            self.collisions as f64 / self.entries as f64
        }
    }
}

impl std::fmt::Display for CollisionReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}:", self.hash)?;
        writeln!(f, "Number of collisions: {}", self.collisions)?;
        writeln!(f, "Number of entries: {}", self.entries)?;
        writeln!(
            f,
            "Number of buckets: {} ({} occupied)",
            self.bucket_count, self.occupied_buckets
        )?;
        write!(f, "Collision rate: {:.6}", self.rate())
    }
}

/// Outcome of [`run_collision_test`]
#[derive(Clone, Debug)]
pub struct CollisionRun {
    /// Collision summary
    pub report: CollisionReport,

    /// Entries per bucket
    pub distribution: Vec<usize>,
}

/// Inserts every key into a fresh table built from `config`.
///
/// # Errors
///
/// Returns [`Error::InvalidBucketCount`] if the configured bucket count is 0.
pub fn run_collision_test<I, K>(keys: I, config: &Config) -> crate::Result<CollisionRun>
where
    I: IntoIterator<Item = K>,
    K: KeyBytes,
{
    let mut table = config.build::<K>()?;

    for key in keys {
        table.add(key);
    }

    let report = CollisionReport::from_table(&table);

    log::debug!(
        "{}: {} collisions for {} entries in {} buckets",
        report.hash,
        report.collisions,
        report.entries,
        report.bucket_count,
    );

    Ok(CollisionRun {
        report,
        distribution: table.distribution(),
    })
}

/// Writes a distribution, one bucket size per line.
///
/// # Errors
///
/// Will return `Err` if an IO error occurs.
pub fn write_distribution<W: Write>(mut writer: W, distribution: &[usize]) -> crate::Result<()> {
    for count in distribution {
        writeln!(writer, "{count}")?;
    }
    writer.flush()?;
    Ok(())
}

/// Parses a distribution, one bucket size per line.
///
/// Blank lines are skipped.
///
/// # Errors
///
/// Returns [`Error::InvalidDistribution`] with the 1-based line number
/// if a line is not an unsigned integer, or `Err` if an IO error occurs.
pub fn read_distribution<R: BufRead>(reader: R) -> crate::Result<Vec<usize>> {
    let mut distribution = vec![];

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        let count = line
            .parse::<usize>()
            .map_err(|_| Error::InvalidDistribution { line: idx + 1 })?;

        distribution.push(count);
    }

    Ok(distribution)
}

/// Writes a distribution file.
///
/// # Errors
///
/// Will return `Err` if an IO error occurs.
pub fn save_distribution<P: AsRef<Path>>(path: P, distribution: &[usize]) -> crate::Result<()> {
    let path = path.as_ref();
    log::debug!("Writing {} buckets to {}", distribution.len(), path.display());

    let file = File::create(path)?;
    write_distribution(BufWriter::new(file), distribution)
}

/// Reads a distribution file.
///
/// # Errors
///
/// See [`read_distribution`].
pub fn load_distribution<P: AsRef<Path>>(path: P) -> crate::Result<Vec<usize>> {
    let path = path.as_ref();
    log::debug!("Reading distribution from {}", path.display());

    let file = File::open(path)?;
    read_distribution(BufReader::new(file))
}

/// Counts buckets by occupancy: `histogram[&n]` is the number of buckets holding `n` entries.
///
/// Only occupancies that actually occur are present, so arbitrarily large
/// counts read back from a distribution file cost a single entry.
#[must_use]
pub fn occupancy_histogram(distribution: &[usize]) -> BTreeMap<usize, usize> {
    let mut histogram = BTreeMap::new();

    for &count in distribution {
        *histogram.entry(count).or_insert(0) += 1;
    }

    histogram
}

/// File name of a dataset's distribution, e.g. `distributionOfPasswordsMurmur.txt`
#[must_use]
pub fn distribution_file_name(dataset: &str, kind: HashKind) -> String {
    format!("distributionOf{dataset}{}.txt", kind.file_suffix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Fnv1a;
    use std::io::Cursor;
    use test_log::test;

    #[test]
    fn report_from_table() -> crate::Result<()> {
        let mut table = ChainedTable::new(4, Fnv1a)?;

        for key in ["a", "a", "a", "h"] {
            table.add(key);
        }

        let report = CollisionReport::from_table(&table);
        assert_eq!("FNV-1a", report.hash);
        assert_eq!(4, report.entries);
        assert_eq!(4, report.bucket_count);
        assert_eq!(2, report.occupied_buckets);
        assert_eq!(2, report.collisions);
        assert!((report.rate() - 0.5).abs() < f64::EPSILON);

        let text = report.to_string();
        assert!(text.contains("Number of collisions: 2"));
        assert!(text.contains("Collision rate: 0.500000"));

        Ok(())
    }

    #[test]
    fn report_empty_rate() -> crate::Result<()> {
        let table = ChainedTable::<&str, _>::new(4, Fnv1a)?;
        assert!(CollisionReport::from_table(&table).rate().abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn report_run_collision_test() -> crate::Result<()> {
        let keys = ["a", "h", "ab", "abc"];
        let run = run_collision_test(keys, &Config::new(4))?;

        assert_eq!(vec![1, 1, 1, 1], run.distribution);
        assert_eq!(0, run.report.collisions);

        let run = run_collision_test(keys, &Config::new(1).hash_kind(HashKind::Murmur3))?;
        assert_eq!(vec![4], run.distribution);
        assert_eq!(3, run.report.collisions);
        assert_eq!("MurmurHash3", run.report.hash);

        assert!(matches!(
            run_collision_test(keys, &Config::new(0)),
            Err(Error::InvalidBucketCount(0))
        ));

        Ok(())
    }

    #[test]
    fn distribution_write_read() -> crate::Result<()> {
        let mut buf = vec![];
        write_distribution(&mut buf, &[0, 3, 1, 0])?;
        assert_eq!(b"0\n3\n1\n0\n", &*buf);

        assert_eq!(vec![0, 3, 1, 0], read_distribution(Cursor::new(buf))?);

        Ok(())
    }

    #[test]
    fn distribution_skips_blank_lines() -> crate::Result<()> {
        let distribution = read_distribution(Cursor::new("1\n\n 2 \n\n\n"))?;
        assert_eq!(vec![1, 2], distribution);
        Ok(())
    }

    #[test]
    fn distribution_invalid_line() {
        assert!(matches!(
            read_distribution(Cursor::new("1\n2\n-3\n")),
            Err(Error::InvalidDistribution { line: 3 })
        ));
        assert!(matches!(
            read_distribution(Cursor::new("\nabc\n")),
            Err(Error::InvalidDistribution { line: 2 })
        ));
    }

    #[test]
    fn histogram_counts_buckets() {
        assert_eq!(
            BTreeMap::from([(0, 2), (1, 1), (3, 1)]),
            occupancy_histogram(&[0, 3, 1, 0])
        );
        assert_eq!(BTreeMap::from([(0, 3)]), occupancy_histogram(&[0, 0, 0]));
        assert!(occupancy_histogram(&[]).is_empty());
    }

    #[test]
    fn histogram_huge_counts() -> crate::Result<()> {
        let distribution =
            read_distribution(Cursor::new(format!("1\n{}\n10000000000000\n1\n", usize::MAX)))?;

        assert_eq!(
            BTreeMap::from([(1, 2), (10_000_000_000_000, 1), (usize::MAX, 1)]),
            occupancy_histogram(&distribution)
        );

        Ok(())
    }

    #[test]
    fn file_names() {
        assert_eq!(
            "distributionOfDictionaryFNV.txt",
            distribution_file_name("Dictionary", HashKind::Fnv1a)
        );
        assert_eq!(
            "distributionOfBBCNewsMurmur.txt",
            distribution_file_name("BBCNews", HashKind::Murmur3)
        );
    }
}
