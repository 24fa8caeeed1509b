use thiserror::Error;

/// Rejected tuning, reported when a game is constructed
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("World dimensions must be positive, got {width}x{height}")]
    InvalidWorld { width: f32, height: f32 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },

    #[error("Spawn interval scale range {min}..{max} is empty or non-positive")]
    InvalidSpawnRange { min: f32, max: f32 },

    #[error("Gap of {gap} with margin {margin} does not fit a world {height} high")]
    GapDoesNotFit { gap: f32, margin: f32, height: f32 },

    #[error("{what} ({size}) does not fit inside the world ({limit})")]
    DoesNotFit {
        what: &'static str,
        size: f32,
        limit: f32,
    },

    #[error("Spawn point ({x}, {y}) is outside the world")]
    SpawnOutOfWorld { x: f32, y: f32 },

    #[error("Unknown variant: {0}")]
    UnknownVariant(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

/// A single frame that failed; the driver keeps running after it
#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Render error: {0}")]
    Render(String),

    #[error("Tick panicked: {0}")]
    TickPanicked(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
