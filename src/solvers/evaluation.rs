use log::{debug, trace};

use super::{ValueTable, q_value, synchronous_sweep};
use crate::mdp::Mdp;
use crate::policy::Policy;
use crate::{Result, UInt};

/// Iterative policy evaluation: Bellman expectation backups for a fixed policy.
pub struct PolicyEvaluation<'a, M: Mdp + ?Sized, P: Policy> {
    mdp: &'a M,
    policy: P,
    values: ValueTable,
}

impl<'a, M: Mdp + ?Sized, P: Policy> PolicyEvaluation<'a, M, P> {
    pub fn new(mdp: &'a M, policy: P) -> Self {
        PolicyEvaluation {
            mdp,
            policy,
            values: ValueTable::zeros(mdp.get_states()),
        }
    }

    /// Run exactly `num_iter` synchronous sweeps, continuing from the current table.
    pub fn evaluate(&mut self, num_iter: UInt) -> Result<&ValueTable> {
        for sweep in 0..num_iter {
            let next = synchronous_sweep(self.mdp, &self.values, |state| {
                let action = self.policy.act(state)?;
                q_value(self.mdp, &self.values, state, action)
            })?;
            trace!(
                "evaluation sweep {}: max change {}",
                sweep,
                next.max_abs_diff(&self.values)
            );
            self.values = next;
        }
        debug!("evaluated policy with {} sweeps", num_iter);
        Ok(&self.values)
    }

    /// Zero every value without rebuilding the solver.
    pub fn reset(&mut self) {
        self.values.reset();
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Swap in a new policy. The value table is kept as a starting point.
    pub fn set_policy(&mut self, policy: P) {
        self.policy = policy;
    }

    pub fn into_policy(self) -> P {
        self.policy
    }
}

/// Value of `policy` after `sweeps` evaluation sweeps from a zero table.
pub fn policy_value<M, P>(mdp: &M, policy: &P, sweeps: UInt) -> Result<ValueTable>
where
    M: Mdp + ?Sized,
    P: Policy + Clone,
{
    let mut evaluator = PolicyEvaluation::new(mdp, policy.clone());
    evaluator.evaluate(sweeps).cloned()
}
