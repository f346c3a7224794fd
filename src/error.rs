//! Errors in the library.
use thiserror::Error;

use crate::{Float, State, UInt};

/// Errors in the library.
#[derive(Error, Debug)]
pub enum TramError {
    /// An action outside the environment's action set.
    #[error("Action must be 'walk' or 'tram', got '{0}'")]
    InvalidAction(String),

    #[error("length should be greater than 1, got {0}")]
    InvalidLength(UInt),

    #[error("fail_prob must lie in [0, 1], got {0}")]
    InvalidFailProb(Float),

    #[error("state {state} is outside 1..={length}")]
    InvalidState { state: State, length: UInt },

    #[error("value table holds no entry for state {0}")]
    UnknownState(State),

    /// A tabular policy was queried for a state it holds no action for.
    #[error("no action assigned to state {0}")]
    MissingPolicyEntry(State),

    #[error("the MDP exposes no actions to choose from")]
    NoActions,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TramError>;
