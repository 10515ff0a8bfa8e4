//! Idiom dataset loading and the per-session pool of unused idioms.
//!
//! The dataset is a CSV file with a header row containing at least the columns
//! `idioms` and `meaning` (extra columns are ignored):
//!
//! ```text
//! idioms,meaning
//! Kick the bucket,To die
//! Take it easy,To relax
//! ```
//!
//! Loading produces an immutable [IdiomBook] which is shared read-only by every
//! session. Each session then calls [IdiomBook::new_pool] to get its own
//! [IdiomPool]; draws from one pool never affect another.

use log::{debug, warn};
use rand::rngs::StdRng;
use rand::Rng;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::errors::DataError;
use super::validity::first_letter;

/// Column holding the idiom text.
pub const IDIOM_COLUMN: &str = "idioms";
/// Column holding the idiom's meaning.
pub const MEANING_COLUMN: &str = "meaning";

#[derive(Debug, Deserialize)]
struct IdiomRow {
    idioms: String,
    meaning: String,
}

/// Normalize a phrase: trim, lower-case and collapse inner whitespace.
pub fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Immutable idiom list and meaning lookup, built once at load time.
#[derive(Debug, Clone, Default)]
pub struct IdiomBook {
    idioms: Vec<String>,
    meanings: HashMap<String, String>,
}

impl IdiomBook {
    /// Load the dataset from a CSV file on disk.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DataError> {
        let path = path.as_ref();
        let label = path.display().to_string();
        let file = File::open(path).map_err(|source| DataError::Io {
            path: label.clone(),
            source,
        })?;
        Self::from_reader(file, &label)
    }

    /// Load the dataset from any reader; `label` names the source in errors and logs.
    pub fn from_reader<R: Read>(reader: R, label: &str) -> Result<Self, DataError> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        for required in [IDIOM_COLUMN, MEANING_COLUMN] {
            if !headers.iter().any(|h| h == required) {
                return Err(DataError::MissingColumn(required));
            }
        }

        let mut book = IdiomBook::default();
        let mut skipped = 0usize;
        for row in rdr.deserialize::<IdiomRow>() {
            let row = row?;
            let text = normalize(&row.idioms);
            if text.is_empty() {
                skipped += 1;
                continue;
            }
            if book.meanings.contains_key(&text) {
                debug!("duplicate idiom '{}' in {} ignored", text, label);
                continue;
            }
            book.meanings.insert(text.clone(), row.meaning.trim().to_string());
            book.idioms.push(text);
        }
        if skipped > 0 {
            warn!("{} blank idiom rows skipped in {}", skipped, label);
        }
        if book.idioms.is_empty() {
            return Err(DataError::Empty(label.to_string()));
        }
        debug!("loaded {} idioms from {}", book.idioms.len(), label);
        Ok(book)
    }

    /// Build a book directly from (idiom, meaning) pairs.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: AsRef<str>,
        T: Into<String>,
    {
        let mut book = IdiomBook::default();
        for (idiom, meaning) in pairs {
            let text = normalize(idiom.as_ref());
            if text.is_empty() || book.meanings.contains_key(&text) {
                continue;
            }
            book.meanings.insert(text.clone(), meaning.into());
            book.idioms.push(text);
        }
        book
    }

    pub fn len(&self) -> usize {
        self.idioms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.idioms.is_empty()
    }

    pub fn idioms(&self) -> &[String] {
        &self.idioms
    }

    pub fn contains(&self, text: &str) -> bool {
        self.meanings.contains_key(&normalize(text))
    }

    /// Look up the meaning of an idiom (input is normalized first).
    pub fn meaning(&self, text: &str) -> Option<&str> {
        self.meanings.get(&normalize(text)).map(String::as_str)
    }

    /// Count idioms per starting letter (first alphanumeric character), in order.
    pub fn letter_counts(&self) -> BTreeMap<char, usize> {
        let mut counts = BTreeMap::new();
        for idiom in &self.idioms {
            if let Some(c) = first_letter(idiom) {
                *counts.entry(c).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Create a fresh pool holding every idiom in the book.
    pub fn new_pool(&self, rng: StdRng) -> IdiomPool {
        let mut buckets: BTreeMap<char, Vec<String>> = BTreeMap::new();
        for idiom in &self.idioms {
            if let Some(c) = first_letter(idiom) {
                buckets.entry(c).or_default().push(idiom.clone());
            }
        }
        IdiomPool {
            buckets,
            len: self.idioms.len(),
            rng,
        }
    }
}

/// Idioms not yet used in one session, bucketed by first letter.
///
/// Only ever shrinks: every successful draw or [IdiomPool::mark_used] removes
/// exactly one idiom, so nothing can come out twice.
#[derive(Debug)]
pub struct IdiomPool {
    buckets: BTreeMap<char, Vec<String>>,
    len: usize,
    rng: StdRng,
}

impl IdiomPool {
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of unused idioms starting with `letter` (case-insensitive).
    pub fn remaining_for(&self, letter: char) -> usize {
        self.buckets.get(&fold(letter)).map_or(0, Vec::len)
    }

    pub fn contains(&self, text: &str) -> bool {
        let text = normalize(text);
        first_letter(&text)
            .and_then(|c| self.buckets.get(&c))
            .is_some_and(|bucket| bucket.contains(&text))
    }

    /// Draw one idiom starting with `letter`, uniformly at random, and remove it.
    ///
    /// Returns `None` when no unused idiom starts with that letter.
    pub fn take_unused(&mut self, letter: char) -> Option<String> {
        let key = fold(letter);
        let bucket = self.buckets.get_mut(&key)?;
        if bucket.is_empty() {
            return None;
        }
        let idx = self.rng.gen_range(0..bucket.len());
        let idiom = bucket.swap_remove(idx);
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }
        self.len -= 1;
        Some(idiom)
    }

    /// Draw one idiom from the whole pool, uniformly at random, and remove it.
    pub fn take_any(&mut self) -> Option<String> {
        if self.len == 0 {
            return None;
        }
        let mut idx = self.rng.gen_range(0..self.len);
        let mut key = None;
        for (c, bucket) in &self.buckets {
            if idx < bucket.len() {
                key = Some(*c);
                break;
            }
            idx -= bucket.len();
        }
        let key = key?;
        let bucket = self.buckets.get_mut(&key)?;
        let idiom = bucket.swap_remove(idx);
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }
        self.len -= 1;
        Some(idiom)
    }

    /// Remove a specific idiom (e.g. one the player just used). Returns false if
    /// it was not in the pool.
    pub fn mark_used(&mut self, text: &str) -> bool {
        let text = normalize(text);
        let Some(key) = first_letter(&text) else {
            return false;
        };
        let Some(bucket) = self.buckets.get_mut(&key) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|i| *i == text) else {
            return false;
        };
        bucket.swap_remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(&key);
        }
        self.len -= 1;
        true
    }
}
