// File: src/stats.rs
//! Batch statistics and the final run report.
//!
//! Everything here is derived from the `ValidationOutcome`s the pipeline
//! emits; it is bookkeeping for reporting, never an input to admission.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

use crate::core::types::{is_vowel, QualityTier, RejectionReason, ValidationOutcome};

/// Counters for one window of consecutively scanned candidates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStatistics {
    /// 1-based batch number.
    pub batch: usize,
    pub processed: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub reasons: BTreeMap<RejectionReason, usize>,
}

impl BatchStatistics {
    fn new(batch: usize) -> Self {
        Self { batch, ..Self::default() }
    }

    fn record(&mut self, outcome: &ValidationOutcome) {
        self.processed += 1;
        if outcome.accepted {
            self.accepted += 1;
        } else {
            self.rejected += 1;
            if let Some(reason) = outcome.reason {
                *self.reasons.entry(reason).or_insert(0) += 1;
            }
        }
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.processed == 0 {
            0.0
        } else {
            self.accepted as f64 / self.processed as f64
        }
    }
}

/// Groups outcomes into fixed-size windows as they are produced.
#[derive(Debug, Clone)]
pub struct BatchTracker {
    batch_size: usize,
    completed: Vec<BatchStatistics>,
    current: BatchStatistics,
}

impl BatchTracker {
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            completed: Vec::new(),
            current: BatchStatistics::new(1),
        }
    }

    pub fn record(&mut self, outcome: &ValidationOutcome) {
        self.current.record(outcome);
        if self.current.processed == self.batch_size {
            let next = BatchStatistics::new(self.current.batch + 1);
            let done = std::mem::replace(&mut self.current, next);
            debug!(
                batch = done.batch,
                accepted = done.accepted,
                rejected = done.rejected,
                "batch complete"
            );
            self.completed.push(done);
        }
    }

    /// All batches, including a trailing partial one if it saw anything.
    pub fn finish(mut self) -> Vec<BatchStatistics> {
        if self.current.processed > 0 {
            self.completed.push(self.current);
        }
        self.completed
    }
}

/// Shape statistics of the final list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListAnalysis {
    pub total_words: usize,
    pub average_length: f64,
    /// Word length -> number of words.
    pub length_distribution: BTreeMap<usize, usize>,
    pub starts_with_vowel: usize,
    pub ends_with_vowel: usize,
    pub contains_double: usize,
    /// Three letters, consonant-vowel-consonant ("cat").
    pub cvc: usize,
    /// Four letters, consonant-vowel-consonant-vowel ("lime").
    pub cvcv: usize,
    /// Mean phonotactic score of the scored (non-foundation) words kept in
    /// the list. `None` when every word came from the foundation.
    pub mean_score: Option<f64>,
}

impl ListAnalysis {
    pub fn analyze(words: &[String], outcomes: &[ValidationOutcome]) -> Self {
        let mut analysis = Self {
            total_words: words.len(),
            ..Self::default()
        };
        let mut letters = 0;
        for word in words {
            let chars: Vec<char> = word.chars().collect();
            letters += chars.len();
            *analysis.length_distribution.entry(chars.len()).or_insert(0) += 1;
            if chars.first().is_some_and(|&c| is_vowel(c)) {
                analysis.starts_with_vowel += 1;
            }
            if chars.last().is_some_and(|&c| is_vowel(c)) {
                analysis.ends_with_vowel += 1;
            }
            if chars.windows(2).any(|pair| pair[0] == pair[1]) {
                analysis.contains_double += 1;
            }
            let shape: Vec<bool> = chars.iter().map(|&c| is_vowel(c)).collect();
            match shape.as_slice() {
                [false, true, false] => analysis.cvc += 1,
                [false, true, false, true] => analysis.cvcv += 1,
                _ => {}
            }
        }
        if !words.is_empty() {
            analysis.average_length = letters as f64 / words.len() as f64;
        }

        let kept: HashSet<&str> = words.iter().map(String::as_str).collect();
        let scores: Vec<f64> = outcomes
            .iter()
            .filter(|o| o.accepted && kept.contains(o.word.as_str()))
            .map(|o| o.score)
            .collect();
        if !scores.is_empty() {
            analysis.mean_score = Some(scores.iter().sum::<f64>() / scores.len() as f64);
        }
        analysis
    }
}

/// The structured report handed to the serialization collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub target_size: usize,
    /// Final list length.
    pub achieved: usize,
    pub foundation_count: usize,
    /// True when the candidate stream ran dry before `target_size`.
    pub under_filled: bool,
    pub total_processed: usize,
    pub total_accepted: usize,
    pub total_rejected: usize,
    pub rejection_histogram: BTreeMap<RejectionReason, usize>,
    pub batches: Vec<BatchStatistics>,
    /// Tier counts among accepted corpus words (foundation words are unscored).
    pub tier_distribution: BTreeMap<QualityTier, usize>,
    pub analysis: ListAnalysis,
}

impl PipelineReport {
    pub fn build(
        target_size: usize,
        words: &[String],
        foundation_count: usize,
        outcomes: &[ValidationOutcome],
        batches: Vec<BatchStatistics>,
    ) -> Self {
        let mut rejection_histogram = BTreeMap::new();
        let mut tier_distribution = BTreeMap::new();
        let mut total_accepted = 0;
        for outcome in outcomes {
            if outcome.accepted {
                total_accepted += 1;
                *tier_distribution.entry(outcome.tier).or_insert(0) += 1;
            } else if let Some(reason) = outcome.reason {
                *rejection_histogram.entry(reason).or_insert(0) += 1;
            }
        }
        Self {
            target_size,
            achieved: words.len(),
            foundation_count,
            under_filled: words.len() < target_size,
            total_processed: outcomes.len(),
            total_accepted,
            total_rejected: outcomes.len() - total_accepted,
            rejection_histogram,
            batches,
            tier_distribution,
            analysis: ListAnalysis::analyze(words, outcomes),
        }
    }

    /// Words still missing to reach the target.
    pub fn shortfall(&self) -> usize {
        self.target_size.saturating_sub(self.achieved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok(word: &str) -> ValidationOutcome {
        ValidationOutcome::accepted(word.to_string(), 0.9, QualityTier::Excellent)
    }

    fn no(word: &str, reason: RejectionReason) -> ValidationOutcome {
        ValidationOutcome::rejected(word.to_string(), reason)
    }

    fn list(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn tracker_windows_outcomes() {
        let mut tracker = BatchTracker::new(2);
        tracker.record(&ok("cat"));
        tracker.record(&no("xyz", RejectionReason::NoVowels));
        tracker.record(&no("cat", RejectionReason::Duplicate));
        let batches = tracker.finish();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].batch, 1);
        assert_eq!(batches[0].accepted, 1);
        assert_eq!(batches[0].reasons[&RejectionReason::NoVowels], 1);
        assert_eq!(batches[1].batch, 2);
        assert_eq!(batches[1].processed, 1);
        assert_eq!(batches[1].acceptance_rate(), 0.0);
    }

    #[test]
    fn empty_tracker_has_no_batches() {
        assert!(BatchTracker::new(1000).finish().is_empty());
    }

    #[test]
    fn report_totals_and_histograms() {
        let outcomes = vec![
            ok("cat"),
            no("xyz", RejectionReason::NoVowels),
            no("qrst", RejectionReason::NoVowels),
            ok("tree"),
        ];
        let words = list(&["abandon", "ability", "cat", "tree"]);
        let report = PipelineReport::build(10, &words, 2, &outcomes, Vec::new());
        assert_eq!(report.total_processed, 4);
        assert_eq!(report.total_accepted, 2);
        assert_eq!(report.total_rejected, 2);
        assert_eq!(report.rejection_histogram[&RejectionReason::NoVowels], 2);
        assert_eq!(report.tier_distribution[&QualityTier::Excellent], 2);
        assert!(report.under_filled);
        assert_eq!(report.shortfall(), 6);
    }

    #[test]
    fn report_serializes_with_snake_case_keys() {
        let outcomes = vec![no("xyz", RejectionReason::NoVowels)];
        let report = PipelineReport::build(1, &list(&["abandon"]), 1, &outcomes, Vec::new());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"no_vowels\":1"));
        assert!(json.contains("\"under_filled\":false"));
    }

    #[test]
    fn analysis_counts_shapes_of_final_list() {
        let words = list(&["abandon", "cat", "lime", "apple", "tree"]);
        let analysis = ListAnalysis::analyze(&words, &[]);
        assert_eq!(analysis.total_words, 5);
        assert_eq!(analysis.length_distribution[&3], 1);
        assert_eq!(analysis.length_distribution[&4], 2);
        assert_eq!(analysis.length_distribution[&5], 1);
        assert_eq!(analysis.length_distribution[&7], 1);
        assert!((analysis.average_length - 23.0 / 5.0).abs() < 1e-9);
        // abandon, apple
        assert_eq!(analysis.starts_with_vowel, 2);
        // lime, apple, tree
        assert_eq!(analysis.ends_with_vowel, 3);
        // apple, tree
        assert_eq!(analysis.contains_double, 2);
        assert_eq!(analysis.cvc, 1);
        assert_eq!(analysis.cvcv, 1);
        assert_eq!(analysis.mean_score, None);
    }

    #[test]
    fn mean_score_covers_only_kept_scored_words() {
        let outcomes = vec![
            ValidationOutcome::accepted("cat".to_string(), 0.9, QualityTier::Excellent),
            ValidationOutcome::accepted("tree".to_string(), 0.7, QualityTier::VeryGood),
            no("xyz", RejectionReason::NoVowels),
            // Admitted but cut by the trimmer.
            ValidationOutcome::accepted("lemon".to_string(), 0.1, QualityTier::Acceptable),
        ];
        let words = list(&["abandon", "cat", "tree"]);
        let analysis = ListAnalysis::analyze(&words, &outcomes);
        let mean = analysis.mean_score.unwrap();
        assert!((mean - 0.8).abs() < 1e-9);
    }

    #[test]
    fn empty_list_analysis_is_zeroed() {
        let analysis = ListAnalysis::analyze(&[], &[]);
        assert_eq!(analysis, ListAnalysis::default());
    }
}
