// File: src/core/phonotactics.rs
//! Phonotactic scorer.
//!
//! Produces a continuous quality score in [0, 1] as a weighted sum of five
//! sub-scores (length, syllables, consonant/vowel alternation, clarity and
//! repetition), and the discrete `QualityTier` derived from it. Scoring never
//! rejects a word on its own; only the optional tier floor in the pipeline
//! does.

use serde::{Deserialize, Serialize};

use crate::config::ScoreWeights;
use crate::core::types::{is_vowel, QualityTier};

const IDEAL_LENGTH: (usize, usize) = (4, 6);
const LENGTH_STEP_PENALTY: f64 = 0.15;
const MAX_IDEAL_SYLLABLES: usize = 2;
const SYLLABLE_STEP_PENALTY: f64 = 0.25;
const PAIR_CLUSTER_PENALTY: f64 = 0.05;
const LONG_CLUSTER_PENALTY: f64 = 0.15;
const SILENT_LETTER_PENALTY: f64 = 0.25;
const SILENT_E_PENALTY: f64 = 0.10;
const DIGRAPH_PENALTY: f64 = 0.20;
const BARE_Q_PENALTY: f64 = 0.20;
const CONFUSABLE_ENDING_PENALTY: f64 = 0.10;
const DOUBLE_LETTER_PENALTY: f64 = 0.30;

/// Openings where the first letter is not pronounced.
const SILENT_OPENINGS: [&str; 4] = ["kn", "wr", "gn", "ps"];
/// Endings where the last letter is not pronounced.
const SILENT_ENDINGS: [&str; 1] = ["mb"];
/// Letter pairs whose sound is hard to guess from spelling.
const LOW_CLARITY_DIGRAPHS: [&str; 3] = ["gh", "ph", "rh"];
/// Endings that are easily misspelled as each other.
const CONFUSABLE_ENDINGS: [(&str, &str); 4] = [
    ("tion", "sion"),
    ("able", "ible"),
    ("ant", "ent"),
    ("ance", "ence"),
];

/// Full breakdown of a word's score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhonotacticScore {
    pub total: f64,
    pub tier: QualityTier,
    pub length: f64,
    pub syllables: f64,
    pub alternation: f64,
    pub clarity: f64,
    pub repetition: f64,
}

#[derive(Debug, Clone, Default)]
pub struct PhonotacticScorer {
    weights: ScoreWeights,
}

impl PhonotacticScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Scores a normalized word. Callers are expected to have run the
    /// lexical rules first, but any input yields a value in [0, 1].
    pub fn score(&self, word: &str) -> PhonotacticScore {
        let chars: Vec<char> = word.chars().collect();

        let length = length_score(chars.len());
        let syllables = syllable_score(estimate_syllables(word));
        let alternation = alternation_score(&chars);
        let clarity = clarity_score(word, &chars);
        let repetition = repetition_score(&chars);

        let w = &self.weights;
        let total = (w.length * length
            + w.syllables * syllables
            + w.alternation * alternation
            + w.clarity * clarity
            + w.repetition * repetition)
            .clamp(0.0, 1.0);

        PhonotacticScore {
            total,
            tier: QualityTier::from_score(total),
            length,
            syllables,
            alternation,
            clarity,
            repetition,
        }
    }
}

fn length_score(len: usize) -> f64 {
    let (low, high) = IDEAL_LENGTH;
    let distance = if len < low {
        low - len
    } else if len > high {
        len - high
    } else {
        0
    };
    (1.0 - LENGTH_STEP_PENALTY * distance as f64).max(0.0)
}

/// Counts vowel groups, discounting a silent final "e" after a consonant
/// ("make" has one syllable; "table" keeps its syllabic "le").
pub fn estimate_syllables(word: &str) -> usize {
    let chars: Vec<char> = word.chars().collect();
    let mut groups = 0;
    let mut in_group = false;
    for &c in &chars {
        if is_vowel(c) {
            if !in_group {
                groups += 1;
            }
            in_group = true;
        } else {
            in_group = false;
        }
    }

    let n = chars.len();
    if groups > 1 && n >= 3 && chars[n - 1] == 'e' && !is_vowel(chars[n - 2]) && chars[n - 2] != 'l' {
        groups -= 1;
    }
    groups
}

fn syllable_score(syllables: usize) -> f64 {
    match syllables {
        0 => 0.0,
        n if n <= MAX_IDEAL_SYLLABLES => 1.0,
        n => (1.0 - SYLLABLE_STEP_PENALTY * (n - MAX_IDEAL_SYLLABLES) as f64).max(0.0),
    }
}

fn alternation_score(chars: &[char]) -> f64 {
    if chars.len() < 2 {
        return 1.0;
    }
    let switches = chars
        .windows(2)
        .filter(|pair| is_vowel(pair[0]) != is_vowel(pair[1]))
        .count();
    let ratio = switches as f64 / (chars.len() - 1) as f64;

    let mut penalty = 0.0;
    let mut run = 0;
    // Trailing sentinel closes the last run.
    for c in chars.iter().copied().map(Some).chain(std::iter::once(None)) {
        match c {
            Some(c) if !is_vowel(c) => run += 1,
            _ => {
                penalty += match run {
                    0 | 1 => 0.0,
                    2 => PAIR_CLUSTER_PENALTY,
                    _ => LONG_CLUSTER_PENALTY,
                };
                run = 0;
            }
        }
    }
    (ratio - penalty).max(0.0)
}

fn clarity_score(word: &str, chars: &[char]) -> f64 {
    let mut penalty = 0.0;

    penalty += SILENT_OPENINGS.iter().filter(|p| word.starts_with(**p)).count() as f64
        * SILENT_LETTER_PENALTY;
    penalty += SILENT_ENDINGS.iter().filter(|p| word.ends_with(**p)).count() as f64
        * SILENT_LETTER_PENALTY;

    let n = chars.len();
    if n >= 3 && chars[n - 1] == 'e' && !is_vowel(chars[n - 2]) && is_vowel(chars[n - 3]) {
        penalty += SILENT_E_PENALTY;
    }

    penalty += LOW_CLARITY_DIGRAPHS
        .iter()
        .map(|d| word.matches(*d).count())
        .sum::<usize>() as f64
        * DIGRAPH_PENALTY;

    let bare_q = chars
        .iter()
        .enumerate()
        .filter(|&(i, &c)| c == 'q' && chars.get(i + 1) != Some(&'u'))
        .count();
    penalty += bare_q as f64 * BARE_Q_PENALTY;

    if CONFUSABLE_ENDINGS
        .iter()
        .any(|(a, b)| word.ends_with(*a) || word.ends_with(*b))
    {
        penalty += CONFUSABLE_ENDING_PENALTY;
    }

    (1.0 - penalty).max(0.0)
}

fn repetition_score(chars: &[char]) -> f64 {
    let doubles = chars.windows(2).filter(|pair| pair[0] == pair[1]).count();
    (1.0 - DOUBLE_LETTER_PENALTY * doubles as f64).max(0.0)
}
