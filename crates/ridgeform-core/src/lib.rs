pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod types;

pub use color::{Color, ColorRamp, ColorStop};
pub use config::{load_config_from_str, HeightlineSettings, TerrainConfig};
pub use error::{ConfigError, TerrainError};
pub use types::{GridCoord, Ray, VertexIndex};
