// File: src/core/foundation.rs
//! Foundation merge and target trimming.

use tracing::warn;

use crate::config::LexicalLimits;
use crate::core::accepted::AcceptedList;
use crate::core::rules::is_legal_shape;
use crate::core::types::normalize;
use crate::error::{WordlistError, WordlistResult};

/// The mandatory base vocabulary, normalized and deduplicated, in its fixed
/// order.
#[derive(Debug, Clone, Default)]
pub struct Foundation {
    words: Vec<String>,
    /// Entries dropped by the shape guard, as given.
    skipped: Vec<String>,
}

impl Foundation {
    /// Builds the foundation from raw entries. Entries that fail the
    /// alphabet or length rules are skipped; repeats keep their first slot.
    pub fn from_words<I, S>(raw: I, limits: &LexicalLimits) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = AcceptedList::new();
        let mut skipped = Vec::new();
        for entry in raw {
            let entry: &str = entry.as_ref();
            let word = normalize(entry);
            if !is_legal_shape(&word, limits) {
                warn!(word = entry, "skipping malformed foundation word");
                skipped.push(entry.to_string());
                continue;
            }
            seen.insert(&word);
        }
        Self { words: seen.into_vec(), skipped }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn skipped(&self) -> &[String] {
        &self.skipped
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Fails fast when the foundation cannot fit in the target list.
    pub fn check_fits(&self, target_size: usize) -> WordlistResult<()> {
        if target_size < self.words.len() {
            return Err(WordlistError::Config(format!(
                "target_size ({}) is smaller than the foundation list ({} words)",
                target_size,
                self.words.len()
            )));
        }
        Ok(())
    }

    /// Appends every foundation word to `list`, returning how many were new.
    pub fn merge_into(&self, list: &mut AcceptedList) -> usize {
        self.words
            .iter()
            .filter(|w| list.insert(w).is_some())
            .count()
    }
}

/// Cuts `list` back to `target_size` entries, keeping admission order.
///
/// `foundation_len` words at the head are protected: trimming below them is
/// a configuration error rather than silent data loss.
pub fn trim_to_target(
    list: &mut AcceptedList,
    target_size: usize,
    foundation_len: usize,
) -> WordlistResult<usize> {
    if target_size < foundation_len {
        return Err(WordlistError::Config(format!(
            "cannot trim to {} words without dropping foundation words ({})",
            target_size, foundation_len
        )));
    }
    let removed = list.truncate(target_size);
    if removed > 0 {
        warn!(removed, target_size, "trimmed accepted list overshoot");
    }
    Ok(removed)
}
