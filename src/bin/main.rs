use itertools::Itertools;
use log::info;
use tram::{
    Result,
    actions::Action,
    config::Config,
    mdp::Mdp,
    policy::DeterministicPolicy,
    simulation::play_game,
    solvers::{PolicyEvaluation, PolicyIteration, ValueIteration},
};

fn main() -> Result<()> {
    env_logger::init();
    let config = match std::env::args().nth(1) {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    info!("{:?}", config);
    let mut mdp = config.build_mdp()?;

    // Always take the tram.
    let policy: DeterministicPolicy = mdp
        .get_states()
        .into_iter()
        .map(|s| (s, Action::Tram))
        .collect();
    let trace = play_game(&mut mdp, &policy, config.solver.max_time)?;
    for t in &trace.transitions {
        println!("State = {} | {} | State = {}", t.state, t.action, t.next_state);
    }
    println!(
        "Path: {}",
        trace
            .transitions
            .iter()
            .map(|t| t.state)
            .chain(trace.transitions.last().map(|t| t.next_state))
            .dedup()
            .join(" -> ")
    );
    println!("Terminal state. Utility = {}", trace.utility);

    let mut evaluator = PolicyEvaluation::new(&mdp, policy.clone());
    let values = evaluator.evaluate(config.solver.evaluation_sweeps)?;
    println!("Tram policy values: {}", serde_json::to_string(values)?);

    let mut policy_iter = PolicyIteration::new(&mdp, policy)?
        .with_evaluation_sweeps(config.solver.evaluation_sweeps);
    let final_policy = policy_iter.run(config.solver.policy_iteration_steps)?;
    println!("Policy iteration: {}", serde_json::to_string(final_policy)?);

    let mut value_iter = ValueIteration::new(&mdp)?;
    value_iter.run(config.solver.value_iteration_sweeps)?;
    let vpolicy = value_iter.get_policy()?;
    println!("Value iteration: {}", serde_json::to_string(&vpolicy)?);
    println!(
        "Optimal values: {}",
        serde_json::to_string(value_iter.values())?
    );
    Ok(())
}
