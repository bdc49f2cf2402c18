// src/core/types.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five vowels. `y` is deliberately treated as a consonant everywhere.
pub const VOWELS: [char; 5] = ['a', 'e', 'i', 'o', 'u'];

#[inline]
pub fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Normalizes raw input before any rule sees it: surrounding whitespace is
/// dropped and ASCII letters are lowercased. Nothing else is touched, so
/// inner spaces, punctuation and non-ASCII letters still fail the
/// alphabetic rule.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_ascii_lowercase()
}

/// Why a candidate was turned away. Exactly one reason is recorded per word:
/// the first rule that fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    NonAlphabetic,
    LengthOutOfRange,
    NoVowels,
    NoConsonants,
    TooManyConsecutiveConsonants,
    TooManyConsecutiveVowels,
    TripleLetterPattern,
    UnusualStartingPattern,
    ProperNoun,
    Abbreviation,
    ForeignWord,
    ArchaicWord,
    TechnicalTerm,
    Duplicate,
    /// Only produced when a minimum tier policy is configured.
    BelowTierFloor,
}

impl RejectionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectionReason::NonAlphabetic => "non_alphabetic",
            RejectionReason::LengthOutOfRange => "length_out_of_range",
            RejectionReason::NoVowels => "no_vowels",
            RejectionReason::NoConsonants => "no_consonants",
            RejectionReason::TooManyConsecutiveConsonants => "too_many_consecutive_consonants",
            RejectionReason::TooManyConsecutiveVowels => "too_many_consecutive_vowels",
            RejectionReason::TripleLetterPattern => "triple_letter_pattern",
            RejectionReason::UnusualStartingPattern => "unusual_starting_pattern",
            RejectionReason::ProperNoun => "proper_noun",
            RejectionReason::Abbreviation => "abbreviation",
            RejectionReason::ForeignWord => "foreign_word",
            RejectionReason::ArchaicWord => "archaic_word",
            RejectionReason::TechnicalTerm => "technical_term",
            RejectionReason::Duplicate => "duplicate",
            RejectionReason::BelowTierFloor => "below_tier_floor",
        }
    }
}

impl fmt::Display for RejectionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Discrete quality bucket. Variants are declared worst-first so the derived
/// `Ord` gives `Premium > Excellent > VeryGood > Good > Acceptable > Rejected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    Rejected,
    Acceptable,
    Good,
    VeryGood,
    Excellent,
    Premium,
}

impl QualityTier {
    /// Maps a phonotactic score onto its tier using the fixed thresholds.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.95 {
            QualityTier::Premium
        } else if score >= 0.85 {
            QualityTier::Excellent
        } else if score >= 0.70 {
            QualityTier::VeryGood
        } else if score >= 0.50 {
            QualityTier::Good
        } else {
            QualityTier::Acceptable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Rejected => "rejected",
            QualityTier::Acceptable => "acceptable",
            QualityTier::Good => "good",
            QualityTier::VeryGood => "very_good",
            QualityTier::Excellent => "excellent",
            QualityTier::Premium => "premium",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QualityTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "premium" => Ok(QualityTier::Premium),
            "excellent" => Ok(QualityTier::Excellent),
            "very_good" => Ok(QualityTier::VeryGood),
            "good" => Ok(QualityTier::Good),
            "acceptable" => Ok(QualityTier::Acceptable),
            other => Err(format!("unknown quality tier '{}'", other)),
        }
    }
}

/// The verdict on a single candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    /// The normalized word.
    pub word: String,
    pub accepted: bool,
    pub reason: Option<RejectionReason>,
    /// Phonotactic score in [0, 1]; 0.0 for rejected words.
    pub score: f64,
    pub tier: QualityTier,
}

impl ValidationOutcome {
    pub fn accepted(word: String, score: f64, tier: QualityTier) -> Self {
        Self { word, accepted: true, reason: None, score, tier }
    }

    pub fn rejected(word: String, reason: RejectionReason) -> Self {
        Self { word, accepted: false, reason: Some(reason), score: 0.0, tier: QualityTier::Rejected }
    }
}
