pub mod agent;
pub mod random;
pub mod heuristic;

#[cfg(test)]
mod tests;

pub use agent::{Agent, AgentKind, IdleAgent};
pub use random::RandomAgent;
pub use heuristic::HeuristicAgent;
