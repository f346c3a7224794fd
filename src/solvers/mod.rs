//! Dynamic-programming solvers over a known [`Mdp`] model.
//!
//! All solvers sweep synchronously: every backup in a sweep reads the table produced by
//! the previous sweep, and the new table replaces it only once the sweep is complete.
pub mod evaluation;
pub mod policy_iteration;
pub mod value_iteration;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::mdp::Mdp;
use crate::policy::DeterministicPolicy;
use crate::{Float, Result, State, TramError};

pub use evaluation::{PolicyEvaluation, policy_value};
pub use policy_iteration::PolicyIteration;
pub use value_iteration::ValueIteration;

/// Estimated value of every state, terminal states included.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    values: BTreeMap<State, Float>,
}

impl ValueTable {
    /// A table holding 0 for each of `states`.
    pub fn zeros(states: impl IntoIterator<Item = State>) -> Self {
        ValueTable {
            values: states.into_iter().map(|s| (s, 0.0)).collect(),
        }
    }

    pub fn get(&self, state: State) -> Option<Float> {
        self.values.get(&state).copied()
    }

    /// Like [`ValueTable::get`], failing for states the table does not cover.
    pub fn value(&self, state: State) -> Result<Float> {
        self.get(state).ok_or(TramError::UnknownState(state))
    }

    pub fn set(&mut self, state: State, value: Float) {
        self.values.insert(state, value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (State, Float)> + '_ {
        self.values.iter().map(|(s, v)| (*s, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Set every entry back to 0.
    pub fn reset(&mut self) {
        self.values.values_mut().for_each(|v| *v = 0.0);
    }

    /// Largest absolute per-state difference from `other` (states missing from `other`
    /// are ignored).
    pub fn max_abs_diff(&self, other: &ValueTable) -> Float {
        self.iter()
            .filter_map(|(s, v)| other.get(s).map(|w| (v - w).abs()))
            .fold(0.0, Float::max)
    }
}

/// One-step lookahead: `sum_{s'} P(s'|s,a) * (reward + gamma * V(s'))`.
pub fn q_value<M: Mdp + ?Sized>(
    mdp: &M,
    values: &ValueTable,
    state: State,
    action: Action,
) -> Result<Float> {
    let reward = mdp.reward();
    let gamma = mdp.gamma();
    mdp.get_info(state, action)?
        .into_iter()
        .map(|(next, p)| -> Result<Float> { Ok(p * (reward + gamma * values.value(next)?)) })
        .sum()
}

/// The action with the highest lookahead value at `state`, with that value.
/// Ties go to the action listed first by the model.
pub fn greedy_action<M: Mdp + ?Sized>(
    mdp: &M,
    values: &ValueTable,
    state: State,
) -> Result<(Action, Float)> {
    let mut best: Option<(Action, Float)> = None;
    for &action in mdp.get_actions() {
        let q = q_value(mdp, values, state, action)?;
        match best {
            Some((_, best_q)) if q <= best_q => {}
            _ => best = Some((action, q)),
        }
    }
    best.ok_or(TramError::NoActions)
}

/// Tabular policy acting greedily with respect to `values` at every non-terminal state.
pub fn greedy_policy<M: Mdp + ?Sized>(
    mdp: &M,
    values: &ValueTable,
) -> Result<DeterministicPolicy> {
    mdp.get_states()
        .into_iter()
        .filter(|&s| !mdp.is_terminal(s))
        .map(|s| greedy_action(mdp, values, s).map(|(a, _)| (s, a)))
        .collect()
}

/// Compute a fresh table from `values` by applying `backup` to every non-terminal state.
/// Terminal entries are copied unchanged.
pub(crate) fn synchronous_sweep<M, F>(
    mdp: &M,
    values: &ValueTable,
    mut backup: F,
) -> Result<ValueTable>
where
    M: Mdp + ?Sized,
    F: FnMut(State) -> Result<Float>,
{
    let mut next = values.clone();
    for state in mdp.get_states() {
        if mdp.is_terminal(state) {
            continue;
        }
        next.set(state, backup(state)?);
    }
    Ok(next)
}
