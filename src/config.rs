use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::mdp::TramMdp;
use crate::{Float, Result, State, UInt};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub mdp: MdpConfig,
    pub solver: SolverConfig,
}

/// Construction parameters of the tram problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MdpConfig {
    pub fail_prob: Float,
    pub length: UInt,
    pub init_state: State,
    pub gamma: Float,
    /// Seed for the tram draws; drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl Default for MdpConfig {
    fn default() -> Self {
        MdpConfig {
            fail_prob: TramMdp::DEFAULT_FAIL_PROB,
            length: TramMdp::DEFAULT_LENGTH,
            init_state: TramMdp::DEFAULT_INIT_STATE,
            gamma: TramMdp::DEFAULT_GAMMA,
            seed: None,
        }
    }
}

/// Iteration budgets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub evaluation_sweeps: UInt,
    pub policy_iteration_steps: UInt,
    pub value_iteration_sweeps: UInt,
    /// Longest game played before giving up on reaching the end of the line.
    pub max_time: UInt,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            evaluation_sweeps: 1000,
            policy_iteration_steps: 100,
            value_iteration_sweeps: 1000,
            max_time: 10_000,
        }
    }
}

impl Config {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_toml_str(&std::fs::read_to_string(path)?)
    }

    pub fn build_mdp(&self) -> Result<TramMdp> {
        let MdpConfig {
            fail_prob,
            length,
            init_state,
            gamma,
            seed,
        } = self.mdp;
        match seed {
            Some(seed) => TramMdp::with_seed(fail_prob, length, init_state, gamma, seed),
            None => TramMdp::new(fail_prob, length, init_state, gamma),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TramError;
    use crate::mdp::Mdp;
    use crate::solvers::PolicyIteration;

    #[test]
    fn test_config_serialization_toml() {
        let config = Config {
            mdp: MdpConfig {
                fail_prob: 0.15,
                gamma: 0.9,
                seed: Some(3),
                ..MdpConfig::default()
            },
            solver: SolverConfig::default(),
        };
        let serialized = toml::to_string(&config).unwrap();
        let deserialized = Config::from_toml_str(&serialized).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config = Config::from_toml_str("[mdp]\nlength = 4\n").unwrap();
        assert_eq!(config.mdp.length, 4);
        assert_eq!(config.mdp.fail_prob, 0.5);
        assert_eq!(config.mdp.seed, None);
        assert_eq!(config.solver, SolverConfig::default());
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn test_solver_defaults() {
        let solver = SolverConfig::default();
        assert_eq!(solver.evaluation_sweeps, 1000);
        assert_eq!(solver.policy_iteration_steps, 100);
        assert_eq!(solver.value_iteration_sweeps, 1000);
        assert_eq!(solver.max_time, 10_000);
        assert_eq!(
            solver.evaluation_sweeps,
            PolicyIteration::<TramMdp>::DEFAULT_EVALUATION_SWEEPS
        );
    }

    #[test]
    fn test_build_mdp() {
        let mdp = Config::default().build_mdp().unwrap();
        assert_eq!(mdp.length(), 10);
        assert_eq!(mdp.gamma(), 1.0);

        let config = Config::from_toml_str("[mdp]\nlength = 1\n").unwrap();
        assert!(matches!(config.build_mdp(), Err(TramError::InvalidLength(1))));
    }

    #[test]
    fn test_bad_toml() {
        assert!(matches!(
            Config::from_toml_str("[mdp]\nlength = \"ten\"\n"),
            Err(TramError::ConfigParse(_))
        ));
    }

    #[test]
    fn test_read_from_file() {
        let config = Config::from_file("./tram.toml").expect("Failed to read the file");
        assert_eq!(config.mdp.fail_prob, 0.15);
        assert_eq!(config.mdp.gamma, 0.9);
    }
}
