// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

use crate::HashSet;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

/// A deduplicated list of keys, one per input line
///
/// Lines are kept as raw bytes (without the line terminator),
/// in order of their first occurrence.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    keys: Vec<Vec<u8>>,
    duplicates: usize,
}

impl Corpus {
    /// Loads a corpus file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn open<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();

        log::debug!("Loading corpus from {}", path.display());

        let file = File::open(path)?;
        let corpus = Self::from_reader(BufReader::new(file))?;

        log::info!(
            "Loaded {} unique keys from {} ({} duplicates skipped)",
            corpus.len(),
            path.display(),
            corpus.duplicates(),
        );

        Ok(corpus)
    }

    /// Reads a corpus from a buffered reader.
    ///
    /// Lines end at `\n`, `\r\n` or a lone `\r`.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an IO error occurs.
    pub fn from_reader<R: BufRead>(reader: R) -> crate::Result<Self> {
        let mut lines = vec![];

        for chunk in reader.split(b'\n') {
            let mut chunk = chunk?;

            if chunk.last() == Some(&b'\r') {
                chunk.pop();
            }

            if chunk.contains(&b'\r') {
                lines.extend(chunk.split(|&byte| byte == b'\r').map(<[u8]>::to_vec));
            } else {
                lines.push(chunk);
            }
        }

        let line_count = lines.len();
        let keys = dedup_keep_first(lines);

        Ok(Self {
            duplicates: line_count - keys.len(),
            keys,
        })
    }

    /// Returns the keys.
    #[must_use]
    pub fn keys(&self) -> &[Vec<u8>] {
        &self.keys
    }

    /// Returns the number of unique keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if there are no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns how many lines were dropped as duplicates.
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Returns the summed byte length of all keys.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.keys.iter().map(|key| key.len() as u64).sum()
    }

    /// Consumes the corpus, returning its keys.
    #[must_use]
    pub fn into_keys(self) -> Vec<Vec<u8>> {
        self.keys
    }
}

/// Drops every line already seen earlier, without copying any of them.
fn dedup_keep_first(mut lines: Vec<Vec<u8>>) -> Vec<Vec<u8>> {
    let keep = {
        let mut seen = HashSet::default();
        lines
            .iter()
            .map(|line| seen.insert(line.as_slice()))
            .collect::<Vec<_>>()
    };

    let mut keep = keep.into_iter();
    lines.retain(|_| keep.next().unwrap_or(true));
    lines
}
