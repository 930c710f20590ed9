//! Name search over a snapshot's people.
//!
//! An n-gram inverted index over diacritic-folded names, so "nguyen van"
//! finds "Nguyễn Văn An". Entries are positions in the person list the
//! index was built from.

use crate::collation::fold_diacritics;
use giapha_core::Person;
use std::collections::{HashMap, HashSet};

/// Minimum n-gram length for indexing.
const MIN_NGRAM_LEN: usize = 2;

/// Maximum n-gram length for indexing.
const MAX_NGRAM_LEN: usize = 4;

/// An inverted index for substring search on person names.
///
/// Each name is folded, broken into overlapping n-grams, and each n-gram
/// points back at the person. A query intersects its n-grams' entries and
/// then confirms the full substring.
#[derive(Debug, Default, Clone)]
pub struct SearchIndex {
    /// Folded full names by position.
    names: Vec<String>,
    /// Folded n-grams to positions.
    ngram_index: HashMap<String, HashSet<usize>>,
}

impl SearchIndex {
    /// Creates a new empty search index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every person's full name, keyed by list position.
    pub fn build(people: &[Person]) -> Self {
        let mut index = Self::new();
        for person in people {
            index.insert(&person.full_name);
        }
        index
    }

    /// Adds a name and returns its position.
    pub fn insert(&mut self, name: &str) -> usize {
        let position = self.names.len();
        let folded = fold_diacritics(name);

        for ngram in generate_ngrams(&folded) {
            self.ngram_index.entry(ngram).or_default().insert(position);
        }
        self.names.push(folded);
        position
    }

    /// Positions whose names contain `query`, ignoring case and
    /// diacritics. Sorted ascending.
    pub fn search(&self, query: &str) -> Vec<usize> {
        let query = fold_diacritics(query.trim());
        if query.is_empty() {
            return Vec::new();
        }

        // Too short for n-grams: prefix match on any word.
        if query.chars().count() < MIN_NGRAM_LEN {
            return self
                .names
                .iter()
                .enumerate()
                .filter(|(_, name)| name.split_whitespace().any(|w| w.starts_with(&query)))
                .map(|(position, _)| position)
                .collect();
        }

        let mut candidates: Option<HashSet<usize>> = None;
        for ngram in generate_ngrams(&query) {
            let Some(positions) = self.ngram_index.get(&ngram) else {
                return Vec::new();
            };
            match &mut candidates {
                None => candidates = Some(positions.clone()),
                Some(c) => c.retain(|p| positions.contains(p)),
            }
        }

        // n-gram intersection can have false positives
        let mut results: Vec<usize> = candidates
            .unwrap_or_default()
            .into_iter()
            .filter(|&p| self.names[p].contains(&query))
            .collect();
        results.sort_unstable();
        results
    }

    /// Positions whose folded name equals `query` exactly.
    pub fn exact(&self, query: &str) -> Vec<usize> {
        let query = fold_diacritics(query.trim());
        self.names
            .iter()
            .enumerate()
            .filter(|(_, name)| **name == query)
            .map(|(position, _)| position)
            .collect()
    }

    /// Returns the number of names indexed.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

fn generate_ngrams(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut ngrams = Vec::new();

    for n in MIN_NGRAM_LEN..=MAX_NGRAM_LEN {
        if chars.len() >= n {
            for i in 0..=(chars.len() - n) {
                ngrams.push(chars[i..i + n].iter().collect());
            }
        }
    }

    ngrams
}
