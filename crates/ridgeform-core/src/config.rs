use serde::{Deserialize, Serialize};

use crate::color::{Color, ColorRamp};
use crate::constants::{COLOR_CHANNEL_MAX, DOUBLE_PRESS_WINDOW_MS, MAX_AMPLITUDE, MAX_DIVISIONS};
use crate::error::{ConfigError, TerrainError};

/// Contour-line overlay settings handed to a shading collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightlineSettings {
    pub enabled: bool,
    /// 8-bit RGB. Kept signed so out-of-range input is reported rather than wrapped.
    pub color: [i32; 3],
}

impl Default for HeightlineSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            color: [0, 0, 0],
        }
    }
}

impl HeightlineSettings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (channel, &value) in ['r', 'g', 'b'].into_iter().zip(self.color.iter()) {
            if !(0..=COLOR_CHANNEL_MAX).contains(&value) {
                return Err(ConfigError::HeightlineChannelOutOfRange { channel, value });
            }
        }
        Ok(())
    }

    /// Heightline color as a normalized color. Channels are clamped to 0..=255.
    pub fn color(&self) -> Color {
        let [r, g, b] = self.color.map(|c| c.clamp(0, COLOR_CHANNEL_MAX) as u8);
        Color::from_rgb8(r, g, b)
    }
}

/// Immutable terrain parameters, validated once before generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// World-space side length of the square mesh.
    pub mesh_size: f32,
    /// Grid cells per side. Must be a power of two.
    pub divisions: u32,
    /// Initial corner displacement range, also the first subdivision offset.
    pub base_amplitude: f32,
    /// Variance (sigma squared) of the brush Gaussian.
    pub gaussian_variance: f32,
    /// World-space brush radius in the XZ plane.
    pub brush_radius: f32,
    /// Multiplier from raw scroll/drag delta to stroke strength.
    pub mouse_scale: f32,
    /// Seed for reproducible generation. None draws a fresh seed.
    pub random_seed: Option<u64>,
    pub color_ramp: ColorRamp,
    /// Color for vertices sitting at sea level. None colors them from the ramp.
    pub water_color: Option<Color>,
    pub heightline: HeightlineSettings,
    /// Maximum gap between the two presses of the edit-mode gesture.
    pub double_press_ms: u64,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            mesh_size: 100.0,
            divisions: 128,
            base_amplitude: 10.0,
            gaussian_variance: 20.0,
            brush_radius: 10.0,
            mouse_scale: 50.0,
            random_seed: None,
            color_ramp: ColorRamp::default(),
            water_color: Some(Color::WATER),
            heightline: HeightlineSettings::default(),
            double_press_ms: DOUBLE_PRESS_WINDOW_MS,
        }
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

impl TerrainConfig {
    /// Default parameters with a fixed seed.
    pub fn seeded(seed: u64) -> Self {
        Self {
            random_seed: Some(seed),
            ..Default::default()
        }
    }

    /// Reject anything generation or editing cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.divisions == 0 || !self.divisions.is_power_of_two() {
            return Err(ConfigError::DivisionsNotPowerOfTwo(self.divisions));
        }
        if self.divisions > MAX_DIVISIONS {
            return Err(ConfigError::DivisionsTooLarge {
                value: self.divisions,
                max: MAX_DIVISIONS,
            });
        }
        require_positive("mesh_size", self.mesh_size)?;
        require_positive("base_amplitude", self.base_amplitude)?;
        if self.base_amplitude > MAX_AMPLITUDE {
            return Err(ConfigError::AmplitudeTooLarge {
                value: self.base_amplitude,
                max: MAX_AMPLITUDE,
            });
        }
        require_positive("gaussian_variance", self.gaussian_variance)?;
        require_positive("brush_radius", self.brush_radius)?;
        require_positive("mouse_scale", self.mouse_scale)?;
        self.color_ramp.validate()?;
        self.heightline.validate()?;
        Ok(())
    }

    /// World-space distance between neighboring grid vertices.
    pub fn cell_size(&self) -> f32 {
        self.mesh_size / self.divisions as f32
    }
}

/// Parse and validate a terrain configuration from RON.
pub fn load_config_from_str(ron_str: &str) -> Result<TerrainConfig, TerrainError> {
    let options = ron::Options::default();
    let config: TerrainConfig = options
        .from_str(ron_str)
        .map_err(|e| TerrainError::ConfigParse(e.to_string()))?;
    config.validate()?;
    log::debug!(
        "Loaded terrain config: {} divisions over {} units",
        config.divisions,
        config.mesh_size
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        TerrainConfig::default()
            .validate()
            .expect("default config should validate");
    }

    #[test]
    fn test_non_power_of_two_divisions_rejected() {
        let config = TerrainConfig {
            divisions: 6,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DivisionsNotPowerOfTwo(6))
        );
    }

    #[test]
    fn test_zero_divisions_rejected() {
        let config = TerrainConfig {
            divisions: 0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::DivisionsNotPowerOfTwo(0))
        );
    }

    #[test]
    fn test_oversized_divisions_rejected() {
        let config = TerrainConfig {
            divisions: MAX_DIVISIONS * 2,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DivisionsTooLarge { .. })
        ));
    }

    #[test]
    fn test_non_positive_fields_rejected() {
        let cases = [
            TerrainConfig {
                gaussian_variance: 0.0,
                ..Default::default()
            },
            TerrainConfig {
                brush_radius: -1.0,
                ..Default::default()
            },
            TerrainConfig {
                base_amplitude: f32::NAN,
                ..Default::default()
            },
            TerrainConfig {
                mesh_size: f32::INFINITY,
                ..Default::default()
            },
        ];
        for config in &cases {
            assert!(
                matches!(config.validate(), Err(ConfigError::NotPositive { .. })),
                "expected rejection for {config:?}"
            );
        }
    }

    #[test]
    fn test_oversized_amplitude_rejected() {
        let config = TerrainConfig {
            divisions: 4,
            base_amplitude: f32::MAX,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::AmplitudeTooLarge {
                value: f32::MAX,
                max: MAX_AMPLITUDE
            })
        );
        let at_limit = TerrainConfig {
            base_amplitude: MAX_AMPLITUDE,
            ..Default::default()
        };
        at_limit.validate().expect("limit itself is accepted");
    }

    #[test]
    fn test_heightline_channel_range() {
        let config = TerrainConfig {
            heightline: HeightlineSettings {
                enabled: true,
                color: [0, 256, 0],
            },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::HeightlineChannelOutOfRange {
                channel: 'g',
                value: 256
            })
        );
    }

    #[test]
    fn test_heightline_color_normalized() {
        let settings = HeightlineSettings {
            enabled: true,
            color: [255, 0, 0],
        };
        assert_eq!(settings.color(), Color::RED);
    }

    #[test]
    fn test_load_config_from_ron() {
        let ron = r#"(
            mesh_size: 4.0,
            divisions: 4,
            base_amplitude: 1.0,
            gaussian_variance: 1.0,
            brush_radius: 1.5,
            mouse_scale: 1.0,
            random_seed: Some(7),
        )"#;
        let config = load_config_from_str(ron).expect("config should parse");
        assert_eq!(config.divisions, 4);
        assert_eq!(config.random_seed, Some(7));
        assert_eq!(config.color_ramp, ColorRamp::default());
        assert_eq!(config.double_press_ms, DOUBLE_PRESS_WINDOW_MS);
    }

    #[test]
    fn test_load_config_with_ramp() {
        let ron = r#"(
            divisions: 8,
            color_ramp: [
                (position: 0.0, color: (r: 0.0, g: 0.0, b: 1.0)),
                (position: 1.0, color: (r: 1.0, g: 1.0, b: 1.0, a: 0.5)),
            ],
            water_color: None,
        )"#;
        let config = load_config_from_str(ron).expect("config should parse");
        assert_eq!(config.color_ramp.stops().len(), 2);
        assert_eq!(config.color_ramp.stops()[0].color.a, 1.0);
        assert_eq!(config.color_ramp.stops()[1].color.a, 0.5);
        assert!(config.water_color.is_none());
    }

    #[test]
    fn test_load_config_with_heightline() {
        let ron = r#"(
            heightline: (enabled: false, color: (12, 34, 56)),
        )"#;
        let config = load_config_from_str(ron).expect("config should parse");
        assert!(!config.heightline.enabled);
        assert_eq!(config.heightline.color, [12, 34, 56]);
    }

    #[test]
    fn test_load_config_rejects_heightline_sequence() {
        let result = load_config_from_str("(heightline: (enabled: true, color: [1, 2, 3]))");
        assert!(matches!(result, Err(TerrainError::ConfigParse(_))));
    }

    #[test]
    fn test_load_config_rejects_invalid_divisions() {
        let result = load_config_from_str("(divisions: 6)");
        assert!(matches!(
            result,
            Err(TerrainError::InvalidConfig(ConfigError::DivisionsNotPowerOfTwo(6)))
        ));
    }

    #[test]
    fn test_load_config_parse_error() {
        let result = load_config_from_str("(divisions: \"many\")");
        assert!(matches!(result, Err(TerrainError::ConfigParse(_))));
    }
}
