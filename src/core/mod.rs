// src/core/mod.rs
pub mod accepted;
pub mod categories;
pub mod engine;
pub mod foundation;
pub mod phonotactics;
pub mod rules;
pub mod types;
