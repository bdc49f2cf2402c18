// src/lib.rs

pub mod config;
pub mod core;
pub mod error;
pub mod persistence;
pub mod stats;

pub use crate::config::{LexicalLimits, PipelineConfig, ScoreWeights};
pub use crate::core::categories::{CategoryFilters, CategoryTables};
pub use crate::core::engine::{AdmissionPipeline, PipelineRun, PipelineState};
pub use crate::core::types::{QualityTier, RejectionReason, ValidationOutcome};
pub use crate::error::{WordlistError, WordlistResult};
