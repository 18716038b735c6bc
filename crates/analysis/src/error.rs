use cultevo_sim::errors::ConfigError;
use thiserror::Error;

/// Error type for analysis operations.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("at least one repetition is required")]
    NoRepetitions,

    #[error("series lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("onset {onset} is outside a series of length {len}")]
    OnsetOutOfRange { onset: usize, len: usize },

    #[error("window of {window} generations exceeds the {available} recorded")]
    WindowTooLong { window: usize, available: usize },

    #[error("posterior column `{0}` is empty")]
    EmptyPosterior(String),

    #[error("expected {expected} posterior phases, found {found}")]
    PhaseCount { expected: usize, found: usize },

    #[error("posterior phase {phase} has {found} draws, expected {expected}")]
    PhaseDraws {
        phase: usize,
        expected: usize,
        found: usize,
    },

    #[error("draw {draw} is out of range for {draws} posterior draws")]
    DrawOutOfRange { draw: usize, draws: usize },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;
