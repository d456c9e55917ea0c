use thiserror::Error;

/// Failures while generating a map. All of them are fatal to the
/// generation step; retrying with another seed or smaller region count
/// is up to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    #[error("could not find a center for region {region} after {attempts} attempts")]
    PlacementExhausted { region: usize, attempts: u32 },

    #[error("viewport {width}x{height} has no room inside a {border}px border")]
    ViewportTooSmall { width: u32, height: u32, border: u32 },

    #[error("a map needs at least {min} regions, got {requested}")]
    TooFewRegions { requested: usize, min: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
