// File: src/core/categories.rs
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::types::{normalize, RejectionReason};
use crate::error::WordlistResult;

const BUNDLED_TABLES: &str = include_str!("../../data/categories.json");

/// Raw category tables as they appear in configuration files.
/// Missing tables deserialize as empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryTables {
    pub proper_nouns: Vec<String>,
    pub abbreviations: Vec<String>,
    pub foreign_words: Vec<String>,
    pub archaic_words: Vec<String>,
    pub technical_terms: Vec<String>,
}

impl CategoryTables {
    pub fn from_json(json: &str) -> WordlistResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Closed-set membership tests, compiled from `CategoryTables`.
///
/// Every entry is normalized on load, so lookups are O(1) against the
/// already-normalized candidate.
#[derive(Debug, Clone, Default)]
pub struct CategoryFilters {
    proper_nouns: HashSet<String>,
    abbreviations: HashSet<String>,
    foreign_words: HashSet<String>,
    archaic_words: HashSet<String>,
    technical_terms: HashSet<String>,
}

fn compile(words: &[String]) -> HashSet<String> {
    words
        .iter()
        .map(|w| normalize(w))
        .filter(|w| !w.is_empty())
        .collect()
}

impl CategoryFilters {
    /// Filters that reject nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: &CategoryTables) -> Self {
        Self {
            proper_nouns: compile(&tables.proper_nouns),
            abbreviations: compile(&tables.abbreviations),
            foreign_words: compile(&tables.foreign_words),
            archaic_words: compile(&tables.archaic_words),
            technical_terms: compile(&tables.technical_terms),
        }
    }

    /// The tables shipped in `data/categories.json`.
    pub fn bundled() -> WordlistResult<Self> {
        let tables = CategoryTables::from_json(BUNDLED_TABLES)?;
        Ok(Self::from_tables(&tables))
    }

    pub fn is_proper_noun(&self, word: &str) -> bool {
        self.proper_nouns.contains(word)
    }

    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(word)
    }

    pub fn is_foreign_word(&self, word: &str) -> bool {
        self.foreign_words.contains(word)
    }

    pub fn is_archaic_word(&self, word: &str) -> bool {
        self.archaic_words.contains(word)
    }

    pub fn is_technical_term(&self, word: &str) -> bool {
        self.technical_terms.contains(word)
    }

    /// First matching category, checked in the order proper noun,
    /// abbreviation, foreign, archaic, technical.
    pub fn classify(&self, word: &str) -> Option<RejectionReason> {
        if self.is_proper_noun(word) {
            Some(RejectionReason::ProperNoun)
        } else if self.is_abbreviation(word) {
            Some(RejectionReason::Abbreviation)
        } else if self.is_foreign_word(word) {
            Some(RejectionReason::ForeignWord)
        } else if self.is_archaic_word(word) {
            Some(RejectionReason::ArchaicWord)
        } else if self.is_technical_term(word) {
            Some(RejectionReason::TechnicalTerm)
        } else {
            None
        }
    }

    /// Total number of entries across all tables.
    pub fn len(&self) -> usize {
        self.proper_nouns.len()
            + self.abbreviations.len()
            + self.foreign_words.len()
            + self.archaic_words.len()
            + self.technical_terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
