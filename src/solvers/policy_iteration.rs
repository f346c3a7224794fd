use log::debug;

use super::{PolicyEvaluation, ValueTable, greedy_policy};
use crate::mdp::Mdp;
use crate::policy::{Policy, PolicyType};
use crate::{Result, TramError, UInt};

/// Policy iteration: alternate policy evaluation and greedy improvement.
///
/// The value table carries over between steps, so each evaluation starts from the
/// previous policy's values.
pub struct PolicyIteration<'a, M: Mdp + ?Sized> {
    mdp: &'a M,
    evaluator: PolicyEvaluation<'a, M, PolicyType>,
    evaluation_sweeps: UInt,
}

impl<'a, M: Mdp + ?Sized> PolicyIteration<'a, M> {
    /// Evaluation sweeps per step unless overridden.
    pub const DEFAULT_EVALUATION_SWEEPS: UInt = 1000;

    pub fn new(mdp: &'a M, policy: impl Into<PolicyType>) -> Result<Self> {
        if mdp.get_actions().is_empty() {
            return Err(TramError::NoActions);
        }
        Ok(PolicyIteration {
            mdp,
            evaluator: PolicyEvaluation::new(mdp, policy.into()),
            evaluation_sweeps: Self::DEFAULT_EVALUATION_SWEEPS,
        })
    }

    pub fn with_evaluation_sweeps(mut self, evaluation_sweeps: UInt) -> Self {
        self.evaluation_sweeps = evaluation_sweeps;
        self
    }

    /// Evaluate the current policy, then replace it with the greedy policy for the
    /// resulting values.
    pub fn step(&mut self) -> Result<()> {
        self.evaluator.evaluate(self.evaluation_sweeps)?;
        let improved = greedy_policy(self.mdp, self.evaluator.values())?;
        let changed = improved
            .actions()
            .iter()
            .filter(|&(&s, &a)| self.evaluator.policy().act(s).ok() != Some(a))
            .count();
        debug!("policy improvement changed {} state(s)", changed);
        self.evaluator.set_policy(improved.into());
        Ok(())
    }

    /// Apply exactly `num_iter` steps and return the resulting policy.
    pub fn run(&mut self, num_iter: UInt) -> Result<&PolicyType> {
        for _ in 0..num_iter {
            self.step()?;
        }
        Ok(self.policy())
    }

    pub fn policy(&self) -> &PolicyType {
        self.evaluator.policy()
    }

    /// Values of the policy evaluated in the last step.
    pub fn values(&self) -> &ValueTable {
        self.evaluator.values()
    }

    pub fn into_policy(self) -> PolicyType {
        self.evaluator.into_policy()
    }
}
