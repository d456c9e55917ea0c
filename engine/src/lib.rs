pub mod types;
pub mod error;
pub mod config;
pub mod placement;
pub mod adjacency;
pub mod combat;
pub mod planner;
pub mod map;
pub mod snapshot;
pub mod session;


pub use types::*;
pub use config::{Difficulty, GameConfig, MapConfig, SessionConfig};
pub use error::{ConfigError, MapError};
pub use map::Map;
pub use session::{Outcome, Session, SessionEvent};
pub use snapshot::MapSnapshot;
