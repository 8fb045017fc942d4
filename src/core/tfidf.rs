//! Term Weighting (tf-idf)
//!
//! Builds per-corpus term weights from a set of labeled word sequences and
//! scores a query sequence against a specific labeled entry.
//!
//! # Weighting
//!
//! `weight(term) = freq(term) * ln(sequences / sequences_containing(term))`
//!
//! where `freq` is the raw occurrence count across the whole corpus. A term
//! present in every sequence gets `ln(1) = 0`, so ubiquitous words (shared
//! prefixes, most commonly) never dominate a similarity score.
//!
//! # Similarity
//!
//! The similarity of a query sequence against a labeled entry is the sum of
//! this corpus's term weights over the *set* intersection of query words and
//! entry words; duplicated query words contribute once.

use crate::core::words::WordFrequencyIndex;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;
use tracing::error;

/// Term-weight index over a corpus of labeled word sequences.
///
/// Add every sequence with `insert`, call `build` once, then query with
/// `similarity`. Weights are only valid after `build`.
#[derive(Debug, Clone)]
pub struct TermWeightIndex<K> {
    sequences: HashMap<K, Vec<String>>,
    word_freq: WordFrequencyIndex,
    doc_freq: HashMap<String, usize>,
    weights: HashMap<String, f64>,
}

impl<K: Eq + Hash + fmt::Debug> TermWeightIndex<K> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            sequences: HashMap::new(),
            word_freq: WordFrequencyIndex::new(),
            doc_freq: HashMap::new(),
            weights: HashMap::new(),
        }
    }

    /// Add a labeled word sequence to the corpus.
    ///
    /// A duplicate key is logged and replaces the earlier sequence; its
    /// counts remain in the corpus statistics.
    pub fn insert(&mut self, key: K, words: Vec<String>) {
        if self.sequences.contains_key(&key) {
            error!(key = ?key, "Key already exists in the term-weight index");
        }

        self.word_freq.add_words(&words);
        let word_set: HashSet<&String> = words.iter().collect();
        for word in word_set {
            *self.doc_freq.entry(word.clone()).or_insert(0) += 1;
        }
        self.sequences.insert(key, words);
    }

    /// Compute the per-term weights; call after all sequences are inserted.
    pub fn build(&mut self) {
        let corpus_size = self.sequences.len() as f64;
        for (word, freq) in self.word_freq.iter() {
            let doc_freq = self.doc_freq.get(word).copied().unwrap_or(1) as f64;
            let weight = freq as f64 * (corpus_size / doc_freq).ln();
            self.weights.insert(word.to_string(), weight);
        }
    }

    /// Number of sequences in the corpus.
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    /// Whether the corpus is empty.
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    /// Weight of a single term; zero for terms outside the corpus.
    pub fn weight(&self, word: &str) -> f64 {
        self.weights.get(word).copied().unwrap_or(0.0)
    }

    /// Similarity of a query word sequence against the entry labeled `key`.
    ///
    /// Sums this corpus's weights over the set intersection of query and
    /// entry words. An unknown key scores 0.
    pub fn similarity(&self, query: &[String], key: &K) -> f64 {
        let entry_words: HashSet<&str> = match self.sequences.get(key) {
            Some(words) => words.iter().map(String::as_str).collect(),
            None => return 0.0,
        };
        let query_words: HashSet<&str> = query.iter().map(String::as_str).collect();

        query_words
            .intersection(&entry_words)
            .map(|word| self.weight(word))
            .sum()
    }
}

impl<K: Eq + Hash + fmt::Debug> Default for TermWeightIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}
