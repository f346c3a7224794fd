use log::{debug, trace};

use super::{ValueTable, greedy_action, greedy_policy, synchronous_sweep};
use crate::mdp::Mdp;
use crate::policy::DeterministicPolicy;
use crate::{Result, TramError, UInt};

/// Value iteration: Bellman optimality backups, independent of any policy.
pub struct ValueIteration<'a, M: Mdp + ?Sized> {
    mdp: &'a M,
    values: ValueTable,
}

impl<'a, M: Mdp + ?Sized> ValueIteration<'a, M> {
    pub fn new(mdp: &'a M) -> Result<Self> {
        if mdp.get_actions().is_empty() {
            return Err(TramError::NoActions);
        }
        Ok(ValueIteration {
            mdp,
            values: ValueTable::zeros(mdp.get_states()),
        })
    }

    /// One synchronous sweep of `V(s) <- max_a Q(s, a)` over non-terminal states.
    pub fn step(&mut self) -> Result<()> {
        let next = synchronous_sweep(self.mdp, &self.values, |state| {
            greedy_action(self.mdp, &self.values, state).map(|(_, q)| q)
        })?;
        trace!(
            "value iteration sweep: max change {}",
            next.max_abs_diff(&self.values)
        );
        self.values = next;
        Ok(())
    }

    pub fn run(&mut self, num_iter: UInt) -> Result<&ValueTable> {
        for _ in 0..num_iter {
            self.step()?;
        }
        debug!("ran {} value iteration sweeps", num_iter);
        Ok(&self.values)
    }

    /// Greedy tabular policy for the current values.
    pub fn get_policy(&self) -> Result<DeterministicPolicy> {
        greedy_policy(self.mdp, &self.values)
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    pub fn reset(&mut self) {
        self.values.reset();
    }
}
