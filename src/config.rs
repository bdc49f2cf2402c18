// File: src/config.rs
use serde::{Deserialize, Serialize};

use crate::core::types::QualityTier;
use crate::error::{WordlistError, WordlistResult};

/// 2^16 words, two bytes of entropy per word.
pub const DEFAULT_TARGET_SIZE: usize = 65_536;

/// Shape limits applied by the lexical rule set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexicalLimits {
    pub min_length: usize,
    pub max_length: usize,
    /// Longest consonant run still allowed (default 4, so 5+ is rejected).
    pub max_consecutive_consonants: usize,
    /// Longest vowel run still allowed (default 3, so 4+ is rejected).
    pub max_consecutive_vowels: usize,
    /// Doubled openings ("ee", "oo", ...) that are NOT unusual. Empty by default.
    pub doubled_opening_allow_list: Vec<String>,
}

impl Default for LexicalLimits {
    fn default() -> Self {
        Self {
            min_length: 3,
            max_length: 12,
            max_consecutive_consonants: 4,
            max_consecutive_vowels: 3,
            doubled_opening_allow_list: Vec::new(),
        }
    }
}

/// Weights of the phonotactic sub-scores. Must sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub length: f64,
    pub syllables: f64,
    pub alternation: f64,
    pub clarity: f64,
    pub repetition: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            length: 0.30,
            syllables: 0.20,
            alternation: 0.25,
            clarity: 0.15,
            repetition: 0.10,
        }
    }
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.length + self.syllables + self.alternation + self.clarity + self.repetition
    }

    fn validate(&self) -> WordlistResult<()> {
        let all = [
            ("length", self.length),
            ("syllables", self.syllables),
            ("alternation", self.alternation),
            ("clarity", self.clarity),
            ("repetition", self.repetition),
        ];
        for (name, w) in all {
            if !w.is_finite() || w < 0.0 {
                return Err(WordlistError::Config(format!(
                    "weight '{}' must be a finite value >= 0, got {}",
                    name, w
                )));
            }
        }
        if (self.total() - 1.0).abs() > 1e-9 {
            return Err(WordlistError::Config(format!(
                "score weights must sum to 1.0, got {}",
                self.total()
            )));
        }
        Ok(())
    }
}

/// Everything the admission pipeline needs besides its input streams and
/// category tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub target_size: usize,
    /// Window size for batch statistics and parallel chunking.
    pub batch_size: usize,
    /// Optional acceptance floor. `None` accepts every scored word.
    pub min_tier: Option<QualityTier>,
    #[serde(flatten)]
    pub limits: LexicalLimits,
    pub weights: ScoreWeights,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_size: DEFAULT_TARGET_SIZE,
            batch_size: 1000,
            min_tier: None,
            limits: LexicalLimits::default(),
            weights: ScoreWeights::default(),
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> WordlistResult<()> {
        if self.target_size == 0 {
            return Err(WordlistError::Config("target_size must be > 0".to_string()));
        }
        if self.batch_size == 0 {
            return Err(WordlistError::Config("batch_size must be > 0".to_string()));
        }
        let limits = &self.limits;
        if limits.min_length == 0 {
            return Err(WordlistError::Config("min_length must be >= 1".to_string()));
        }
        if limits.min_length > limits.max_length {
            return Err(WordlistError::Config(format!(
                "min_length ({}) must not exceed max_length ({})",
                limits.min_length, limits.max_length
            )));
        }
        if limits.max_consecutive_consonants == 0 || limits.max_consecutive_vowels == 0 {
            return Err(WordlistError::Config(
                "consecutive consonant/vowel limits must be >= 1".to_string(),
            ));
        }
        for pair in &limits.doubled_opening_allow_list {
            let mut chars = pair.chars();
            let ok = match (chars.next(), chars.next(), chars.next()) {
                (Some(a), Some(b), None) => a == b && a.is_ascii_lowercase(),
                _ => false,
            };
            if !ok {
                return Err(WordlistError::Config(format!(
                    "allow-list entry '{}' must be a doubled lowercase letter such as \"ee\"",
                    pair
                )));
            }
        }
        if self.min_tier == Some(QualityTier::Rejected) {
            return Err(WordlistError::Config(
                "min_tier cannot be 'rejected'".to_string(),
            ));
        }
        self.weights.validate()
    }

    /// Load from JSON string. Missing fields fall back to their defaults.
    pub fn from_json(json: &str) -> WordlistResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
