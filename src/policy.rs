use std::collections::BTreeMap;

use enum_dispatch::enum_dispatch;
use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::{Result, State, TramError};

#[enum_dispatch]
pub trait Policy {
    /// The action to take at `state`.
    fn act(&self, state: State) -> Result<Action>;
}

/// Takes the same action everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstantPolicy {
    pub action: Action,
}

impl ConstantPolicy {
    pub fn new(action: Action) -> Self {
        ConstantPolicy { action }
    }
}

impl Policy for ConstantPolicy {
    fn act(&self, _state: State) -> Result<Action> {
        Ok(self.action)
    }
}

/// Explicit state to action table. Querying a state with no entry is an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeterministicPolicy {
    actions: BTreeMap<State, Action>,
}

impl DeterministicPolicy {
    pub fn new(actions: BTreeMap<State, Action>) -> Self {
        DeterministicPolicy { actions }
    }

    /// Assign `action` to `state`, returning the action it replaces.
    pub fn set(&mut self, state: State, action: Action) -> Option<Action> {
        self.actions.insert(state, action)
    }

    pub fn get(&self, state: State) -> Option<Action> {
        self.actions.get(&state).copied()
    }

    pub fn actions(&self) -> &BTreeMap<State, Action> {
        &self.actions
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl FromIterator<(State, Action)> for DeterministicPolicy {
    fn from_iter<I: IntoIterator<Item = (State, Action)>>(iter: I) -> Self {
        DeterministicPolicy::new(iter.into_iter().collect())
    }
}

impl Policy for DeterministicPolicy {
    fn act(&self, state: State) -> Result<Action> {
        self.get(state).ok_or(TramError::MissingPolicyEntry(state))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[enum_dispatch(Policy)]
pub enum PolicyType {
    Constant(ConstantPolicy),
    Deterministic(DeterministicPolicy),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_policy_ignores_state() {
        let policy = ConstantPolicy::new(Action::Tram);
        for s in [1, 5, 10, 1000] {
            assert_eq!(policy.act(s).unwrap(), Action::Tram);
        }
    }

    #[test]
    fn test_deterministic_policy_lookup() {
        let policy: DeterministicPolicy = [(1, Action::Tram), (2, Action::Walk)]
            .into_iter()
            .collect();
        assert_eq!(policy.act(1).unwrap(), Action::Tram);
        assert_eq!(policy.act(2).unwrap(), Action::Walk);
        assert_eq!(policy.len(), 2);
    }

    #[test]
    fn test_deterministic_policy_missing_entry() {
        let mut policy = DeterministicPolicy::default();
        assert!(policy.is_empty());
        assert!(matches!(
            policy.act(3),
            Err(TramError::MissingPolicyEntry(3))
        ));
        assert_eq!(policy.set(3, Action::Walk), None);
        assert_eq!(policy.set(3, Action::Tram), Some(Action::Walk));
        assert_eq!(policy.act(3).unwrap(), Action::Tram);
    }

    #[test]
    fn test_policy_type_dispatch() {
        let constant: PolicyType = ConstantPolicy::new(Action::Walk).into();
        assert_eq!(constant.act(7).unwrap(), Action::Walk);

        let table: PolicyType = DeterministicPolicy::from_iter([(7, Action::Tram)]).into();
        assert_eq!(table.act(7).unwrap(), Action::Tram);
        assert!(table.act(8).is_err());
    }

    #[test]
    fn test_policy_serialization_json() {
        let policy: DeterministicPolicy = [(1, Action::Tram), (2, Action::Walk)]
            .into_iter()
            .collect();
        let serialized = serde_json::to_string(&policy).unwrap();
        assert_eq!(serialized, r#"{"actions":{"1":"tram","2":"walk"}}"#);
        let deserialized: DeterministicPolicy = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, policy);
    }
}
