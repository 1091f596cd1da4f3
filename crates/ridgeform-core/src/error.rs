use thiserror::Error;

/// Reasons a terrain configuration is rejected before any generation work runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("divisions must be a positive power of two, got {0}")]
    DivisionsNotPowerOfTwo(u32),

    #[error("divisions {value} exceeds the maximum of {max}")]
    DivisionsTooLarge { value: u32, max: u32 },

    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("base_amplitude {value} exceeds the maximum of {max}")]
    AmplitudeTooLarge { value: f32, max: f32 },

    #[error("color ramp needs at least one stop")]
    EmptyColorRamp,

    #[error("color ramp stop {index} has position {position} outside [0, 1]")]
    RampStopOutOfRange { index: usize, position: f32 },

    #[error("color ramp stop {index} at {position} is not after the previous stop")]
    RampStopsUnordered { index: usize, position: f32 },

    #[error("heightline color channel {channel} must be within 0..=255, got {value}")]
    HeightlineChannelOutOfRange { channel: char, value: i32 },
}

/// Errors surfaced by terrain construction and editing.
#[derive(Debug, Error)]
pub enum TerrainError {
    #[error("invalid terrain configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("failed to parse terrain config RON: {0}")]
    ConfigParse(String),

    #[error("vertex index {index} out of range for {count} vertices")]
    VertexOutOfRange { index: u32, count: u32 },

    #[error("height field of {divisions} divisions needs {expected} heights, got {actual}")]
    HeightCountMismatch {
        divisions: u32,
        expected: usize,
        actual: usize,
    },
}
