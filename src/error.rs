//! Error taxonomy for the counting engine.
//!
//! Computation errors are returned to the caller. Storage errors never leave
//! `ProgressStore`; they are logged and the session keeps its in-memory state.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid level: target_max {max} is below target_min {min}")]
    InvalidLevel { min: i64, max: i64 },

    #[error("could not collect {needed} distractors for {correct} in [{low}, {high}] after {attempts} draws")]
    DistractorGeneration {
        correct: i64,
        low: i64,
        high: i64,
        needed: usize,
        attempts: u32,
    },

    #[error("import payload not recognised: {0}")]
    ImportFormat(String),

    #[error("level catalog could not be parsed: {0}")]
    Catalog(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("browser storage is unavailable")]
    Unavailable,

    #[error("write to `{key}` failed: {reason}")]
    Write { key: String, reason: String },

    #[error("could not serialize `{key}`: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
