use tracing::{info, trace, warn};

use crate::config::PipelineConfig;
use crate::core::accepted::AcceptedList;
use crate::core::categories::CategoryFilters;
use crate::core::foundation::{trim_to_target, Foundation};
use crate::core::phonotactics::PhonotacticScorer;
use crate::core::rules::check_lexical;
use crate::core::types::{normalize, RejectionReason, ValidationOutcome};
use crate::error::{WordlistError, WordlistResult};
use crate::stats::{BatchTracker, PipelineReport};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    /// Waiting for the foundation list.
    Seeding,
    /// Consuming the candidate stream.
    Scanning,
    /// Target reached or stream exhausted. The accepted list is frozen.
    Complete,
}

/// Frozen result of a finished pipeline.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    pub words: Vec<String>,
    /// One outcome per scanned candidate, in scan order.
    pub outcomes: Vec<ValidationOutcome>,
    pub report: PipelineReport,
}

/// The candidate admission pipeline.
///
/// Seeds the accepted list with the foundation words, then walks the
/// candidate stream in rank order, admitting every word that passes the
/// lexical rules and category filters until `target_size` is reached.
pub struct AdmissionPipeline {
    config: PipelineConfig,
    filters: CategoryFilters,
    scorer: PhonotacticScorer,
    accepted: AcceptedList,
    outcomes: Vec<ValidationOutcome>,
    batches: BatchTracker,
    foundation_count: usize,
    state: PipelineState,
}

impl AdmissionPipeline {
    pub fn new(config: PipelineConfig, filters: CategoryFilters) -> WordlistResult<Self> {
        config.validate()?;
        Ok(Self {
            scorer: PhonotacticScorer::new(config.weights.clone()),
            accepted: AcceptedList::with_capacity(config.target_size),
            outcomes: Vec::new(),
            batches: BatchTracker::new(config.batch_size),
            foundation_count: 0,
            state: PipelineState::Seeding,
            filters,
            config,
        })
    }

    /// One-shot helper: seed, scan serially, finish.
    pub fn run<F, FS, C, CS>(
        config: PipelineConfig,
        filters: CategoryFilters,
        foundation: F,
        candidates: C,
    ) -> WordlistResult<PipelineRun>
    where
        F: IntoIterator<Item = FS>,
        FS: AsRef<str>,
        C: IntoIterator<Item = CS>,
        CS: AsRef<str>,
    {
        let mut pipeline = Self::new(config, filters)?;
        pipeline.seed(foundation)?;
        pipeline.scan(candidates);
        pipeline.finish()
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == PipelineState::Complete
    }

    pub fn accepted(&self) -> &AcceptedList {
        &self.accepted
    }

    pub fn outcomes(&self) -> &[ValidationOutcome] {
        &self.outcomes
    }

    pub fn foundation_count(&self) -> usize {
        self.foundation_count
    }

    /// Loads the foundation list. Fails before inserting anything when the
    /// foundation does not fit in `target_size`. Returns the number of
    /// foundation words inserted.
    pub fn seed<I, S>(&mut self, foundation: I) -> WordlistResult<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if self.state != PipelineState::Seeding {
            return Err(WordlistError::Config(
                "foundation can only be seeded once, before scanning".to_string(),
            ));
        }
        let foundation = Foundation::from_words(foundation, &self.config.limits);
        if foundation.is_empty() {
            warn!("foundation list is empty; the list is built from candidates only");
        }
        foundation.check_fits(self.config.target_size)?;

        let inserted = foundation.merge_into(&mut self.accepted);
        self.foundation_count = self.accepted.len();
        trim_to_target(&mut self.accepted, self.config.target_size, self.foundation_count)?;

        info!(
            inserted,
            skipped = foundation.skipped().len(),
            target = self.config.target_size,
            "foundation seeded"
        );
        self.state = PipelineState::Scanning;
        self.complete_if_full();
        Ok(inserted)
    }

    /// Decides a single candidate against the current accepted list without
    /// committing anything.
    pub fn evaluate(&self, raw: &str) -> ValidationOutcome {
        let word = normalize(raw);
        if self.accepted.contains(&word) {
            return ValidationOutcome::rejected(word, RejectionReason::Duplicate);
        }
        self.assess(word)
    }

    /// Lexical rules, then category filters, then scoring. Independent of
    /// the accepted list, so it is safe to run concurrently.
    fn assess(&self, word: String) -> ValidationOutcome {
        if let Some(reason) = check_lexical(&word, &self.config.limits) {
            return ValidationOutcome::rejected(word, reason);
        }
        if let Some(reason) = self.filters.classify(&word) {
            return ValidationOutcome::rejected(word, reason);
        }
        let score = self.scorer.score(&word);
        if let Some(floor) = self.config.min_tier {
            if score.tier < floor {
                return ValidationOutcome::rejected(word, RejectionReason::BelowTierFloor);
            }
        }
        ValidationOutcome::accepted(word, score.total, score.tier)
    }

    /// Consumes the candidate stream until the target is reached or the
    /// stream runs out. Candidates after the target is reached are never
    /// pulled from the iterator.
    pub fn scan<I, S>(&mut self, candidates: I) -> PipelineState
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.begin_scanning();
        if self.is_complete() {
            return self.state;
        }
        for candidate in candidates {
            let outcome = self.evaluate(candidate.as_ref());
            self.commit(outcome);
            if self.is_complete() {
                return self.state;
            }
        }
        self.stream_exhausted();
        self.state
    }

    /// Same result as `scan`, but each window of candidates is assessed in
    /// parallel before being committed in order. A window never exceeds
    /// `batch_size` nor the number of free slots, so nothing past the
    /// candidate that fills the list is pulled from the iterator.
    #[cfg(feature = "parallel")]
    pub fn scan_parallel<I, S>(&mut self, candidates: I) -> PipelineState
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.begin_scanning();
        let mut stream = candidates.into_iter();
        while !self.is_complete() {
            let free = self.config.target_size.saturating_sub(self.accepted.len());
            let chunk: Vec<String> = stream
                .by_ref()
                .take(self.config.batch_size.min(free))
                .map(|c| normalize(c.as_ref()))
                .collect();
            if chunk.is_empty() {
                self.stream_exhausted();
                break;
            }

            let assessed: Vec<ValidationOutcome> = {
                let this = &*self;
                chunk.into_par_iter().map(|word| this.assess(word)).collect()
            };

            // Ordered single-threaded merge: duplicates and the halt rule
            // depend on everything committed before.
            for outcome in assessed {
                let outcome = if self.accepted.contains(&outcome.word) {
                    ValidationOutcome::rejected(outcome.word, RejectionReason::Duplicate)
                } else {
                    outcome
                };
                self.commit(outcome);
                if self.is_complete() {
                    break;
                }
            }
        }
        self.state
    }

    fn begin_scanning(&mut self) {
        if self.state == PipelineState::Seeding {
            // No foundation supplied.
            self.state = PipelineState::Scanning;
        }
    }

    fn commit(&mut self, outcome: ValidationOutcome) {
        if outcome.accepted {
            self.accepted.insert(&outcome.word);
        } else if let Some(reason) = outcome.reason {
            trace!(word = %outcome.word, %reason, "rejected");
        }
        self.batches.record(&outcome);
        self.outcomes.push(outcome);
        self.complete_if_full();
    }

    fn complete_if_full(&mut self) {
        if self.state != PipelineState::Complete && self.accepted.len() >= self.config.target_size {
            self.state = PipelineState::Complete;
            info!(
                words = self.accepted.len(),
                scanned = self.outcomes.len(),
                "target size reached"
            );
        }
    }

    fn stream_exhausted(&mut self) {
        if self.state == PipelineState::Complete {
            return;
        }
        self.state = PipelineState::Complete;
        warn!(
            achieved = self.accepted.len(),
            target = self.config.target_size,
            "candidate stream exhausted before reaching target size"
        );
    }

    /// Freezes the accepted list and builds the report.
    pub fn finish(mut self) -> WordlistResult<PipelineRun> {
        trim_to_target(&mut self.accepted, self.config.target_size, self.foundation_count)?;
        let words = self.accepted.into_vec();
        let report = PipelineReport::build(
            self.config.target_size,
            &words,
            self.foundation_count,
            &self.outcomes,
            self.batches.finish(),
        );
        Ok(PipelineRun {
            words,
            outcomes: self.outcomes,
            report,
        })
    }
}
