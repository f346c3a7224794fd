use std::collections::BTreeSet;

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use strum::IntoEnumIterator;

use crate::actions::Action;
use crate::{Float, Result, STEP_REWARD, State, TramError, UInt};

/// Known model of a finite Markov Decision Process - Sutton & Barto 2018.
///
/// Every method is a pure query, so planning code can share one model between
/// several solvers without touching any live simulation state.
pub trait Mdp {
    fn get_states(&self) -> BTreeSet<State>;

    /// Available actions, in the order used to break ties.
    fn get_actions(&self) -> &[Action];

    /// Successor distribution for taking `action` in `state` as `(next_state, probability)`
    /// pairs. Entries are not merged when two outcomes land on the same state.
    fn get_info(&self, state: State, action: Action) -> Result<Vec<(State, Float)>>;

    fn is_terminal(&self, state: State) -> bool;

    fn gamma(&self) -> Float;

    /// Reward for a single transition.
    fn reward(&self) -> Float {
        STEP_REWARD
    }

    /// Fails unless `action` belongs to this model's action set.
    fn check_action(&self, action: Action) -> Result<()> {
        if self.get_actions().contains(&action) {
            Ok(())
        } else {
            Err(TramError::InvalidAction(action.to_string()))
        }
    }
}

/// The tram problem: positions `1..=length`, walk one step or take the tram to double
/// the position, failing with probability `fail_prob`.
///
/// Besides the model, the struct carries a live simulation (`state` and `utility`)
/// driven by [`TramMdp::step`] and [`TramMdp::reset`].
#[derive(Debug, Clone)]
pub struct TramMdp {
    length: UInt,
    fail_prob: Float,
    gamma: Float,
    actions: Vec<Action>,
    state: State,
    utility: Float,
    rng: StdRng,
}

impl TramMdp {
    pub const DEFAULT_FAIL_PROB: Float = 0.5;
    pub const DEFAULT_LENGTH: UInt = 10;
    pub const DEFAULT_INIT_STATE: State = 1;
    pub const DEFAULT_GAMMA: Float = 1.0;

    pub fn new(fail_prob: Float, length: UInt, init_state: State, gamma: Float) -> Result<Self> {
        Self::build(fail_prob, length, init_state, gamma, StdRng::from_os_rng())
    }

    /// As [`TramMdp::new`], with a seeded RNG for reproducible tram draws.
    pub fn with_seed(
        fail_prob: Float,
        length: UInt,
        init_state: State,
        gamma: Float,
        seed: u64,
    ) -> Result<Self> {
        Self::build(
            fail_prob,
            length,
            init_state,
            gamma,
            StdRng::seed_from_u64(seed),
        )
    }

    fn build(
        fail_prob: Float,
        length: UInt,
        init_state: State,
        gamma: Float,
        rng: StdRng,
    ) -> Result<Self> {
        if length <= 1 {
            return Err(TramError::InvalidLength(length));
        }
        if !(0.0..=1.0).contains(&fail_prob) {
            return Err(TramError::InvalidFailProb(fail_prob));
        }
        if !(1..=length).contains(&init_state) {
            return Err(TramError::InvalidState {
                state: init_state,
                length,
            });
        }
        Ok(TramMdp {
            length,
            fail_prob,
            gamma,
            actions: Action::iter().collect(),
            state: init_state,
            utility: 0.0,
            rng,
        })
    }

    pub fn length(&self) -> UInt {
        self.length
    }

    pub fn fail_prob(&self) -> Float {
        self.fail_prob
    }

    /// Current position of the live simulation.
    pub fn get_state(&self) -> State {
        self.state
    }

    /// Rewards accumulated since the last reset, as `reward + gamma * utility` per step.
    pub fn utility(&self) -> Float {
        self.utility
    }

    /// Take one step of the live simulation and return the new position and the reward.
    pub fn step(&mut self, action: Action) -> Result<(State, Float)> {
        self.check_action(action)?;
        let previous = self.state;
        self.state = match action {
            Action::Walk => self.walk_target(self.state),
            Action::Tram => {
                let sample: Float = self.rng.random();
                if sample >= self.fail_prob {
                    self.tram_target(self.state)
                } else {
                    self.state
                }
            }
        };
        let reward = self.reward();
        self.utility = reward + self.gamma * self.utility;
        trace!(
            "step: {} --{}--> {} (utility {})",
            previous, action, self.state, self.utility
        );
        Ok((self.state, reward))
    }

    fn walk_target(&self, state: State) -> State {
        state.saturating_add(1).min(self.length)
    }

    fn tram_target(&self, state: State) -> State {
        state.saturating_mul(2).min(self.length)
    }

    /// Restart the live simulation from position 1, whatever `init_state` was given.
    pub fn reset(&mut self) {
        self.state = 1;
        self.utility = 0.0;
    }
}

impl Mdp for TramMdp {
    fn get_states(&self) -> BTreeSet<State> {
        (1..=self.length).collect()
    }

    fn get_actions(&self) -> &[Action] {
        &self.actions
    }

    fn get_info(&self, state: State, action: Action) -> Result<Vec<(State, Float)>> {
        self.check_action(action)?;
        if !(1..=self.length).contains(&state) {
            return Err(TramError::InvalidState {
                state,
                length: self.length,
            });
        }
        Ok(match action {
            Action::Walk => vec![(self.walk_target(state), 1.0)],
            Action::Tram => vec![
                (self.tram_target(state), 1.0 - self.fail_prob),
                (state, self.fail_prob),
            ],
        })
    }

    fn is_terminal(&self, state: State) -> bool {
        state == self.length
    }

    fn gamma(&self) -> Float {
        self.gamma
    }
}
