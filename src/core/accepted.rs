// --- File: src/core/accepted.rs
use std::collections::HashMap;

/// Ordered, duplicate-free list of admitted words.
///
/// Insertion order is admission order: foundation words first, then corpus
/// candidates in frequency-rank order. Membership checks are O(1) through
/// the index.
#[derive(Debug, Clone, Default)]
pub struct AcceptedList {
    words: Vec<String>,
    index: HashMap<String, usize>,
}

impl AcceptedList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            words: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Appends a word, returning its position, or `None` if it was already
    /// present (the list is left untouched).
    pub fn insert(&mut self, word: &str) -> Option<usize> {
        if self.contains(word) {
            return None;
        }
        let position = self.words.len();
        self.words.push(word.to_string());
        self.index.insert(word.to_string(), position);
        Some(position)
    }

    /// Keeps the first `len` words and drops the rest. Returns how many
    /// words were removed.
    pub fn truncate(&mut self, len: usize) -> usize {
        if self.words.len() <= len {
            return 0;
        }
        let removed: Vec<String> = self.words.drain(len..).collect();
        for word in &removed {
            self.index.remove(word);
        }
        removed.len()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    pub fn into_vec(self) -> Vec<String> {
        self.words
    }
}
