pub mod report;
pub mod runner;
pub mod scenes;

/// Terrain parameters shipped with the workspace.
pub const DEFAULT_CONFIG_RON: &str = include_str!("../../../data/terrain.ron");
