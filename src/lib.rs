pub mod actions;
pub mod config;
pub mod error;
pub mod mdp;
pub mod policy;
pub mod simulation;
pub mod solvers;

pub use error::{Result, TramError};

pub type UInt = u32;
pub type Float = f64;

/// A position along the tram line, in `1..=length`.
pub type State = UInt;

/// Reward received for every step, whatever the action or its outcome.
pub const STEP_REWARD: Float = -1.0;
