use conquest_engine::{ConfigError, MapError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TournamentError {
    #[error("map generation failed: {0}")]
    Map(#[from] MapError),

    #[error("bad match settings: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("could not encode match result: {0}")]
    Encode(#[from] serde_json::Error),
}
