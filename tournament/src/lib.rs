pub mod error;
pub mod runner;
pub mod database;

#[cfg(test)]
mod tests;

pub use database::{Database, LeaderboardRow};
pub use error::TournamentError;
pub use runner::{run_batch, run_match, BatchPlan, MatchResult};
