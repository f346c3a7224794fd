use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::actions::Action;
use crate::mdp::{Mdp, TramMdp};
use crate::policy::Policy;
use crate::{Float, Result, State, UInt};

/// One step of a played game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub state: State,
    pub action: Action,
    pub next_state: State,
    pub reward: Float,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Trace {
    pub transitions: Vec<Transition>,
    /// The environment's accumulated utility when the game stopped.
    pub utility: Float,
    /// Whether the end of the line was reached within the time limit.
    pub finished: bool,
}

/// Play `policy` on the live simulation from its current position until the terminal
/// state, or until `max_time` steps have been taken.
pub fn play_game<P: Policy>(mdp: &mut TramMdp, policy: &P, max_time: UInt) -> Result<Trace> {
    let mut trace = Trace::default();
    debug!("State = {}", mdp.get_state());
    while !mdp.is_terminal(mdp.get_state()) {
        if trace.transitions.len() >= max_time as usize {
            info!("Gave up after {} steps at state {}", max_time, mdp.get_state());
            trace.utility = mdp.utility();
            return Ok(trace);
        }
        let state = mdp.get_state();
        let action = policy.act(state)?;
        let (next_state, reward) = mdp.step(action)?;
        debug!("{} -> State = {}", action, next_state);
        trace.transitions.push(Transition {
            state,
            action,
            next_state,
            reward,
        });
    }
    trace.utility = mdp.utility();
    trace.finished = true;
    info!(
        "Terminal state after {} steps. Utility = {}",
        trace.transitions.len(),
        trace.utility
    );
    Ok(trace)
}
