use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::math::lerp;

fn opaque() -> f32 {
    1.0
}

/// Linear RGBA color, 0.0–1.0 per channel. `repr(C)` so color buffers can be
/// handed to a renderer as raw bytes.
#[repr(C)]
#[derive(
    Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, bytemuck::Pod, bytemuck::Zeroable,
)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default = "opaque")]
    pub a: f32,
}

impl Color {
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WATER: Color = Color::rgb(0.1, 0.3, 0.8);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Build from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Channel-wise interpolation, alpha included.
    pub fn lerp(self, other: Color, t: f32) -> Color {
        Color {
            r: lerp(self.r, other.r, t),
            g: lerp(self.g, other.g, t),
            b: lerp(self.b, other.b, t),
            a: lerp(self.a, other.a, t),
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// One key of a color ramp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Normalized height in [0, 1].
    pub position: f32,
    pub color: Color,
}

impl ColorStop {
    pub fn new(position: f32, color: Color) -> Self {
        Self { position, color }
    }
}

/// Piecewise-linear gradient from normalized height to color.
/// Values before the first stop take its color, values past the last take the last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorRamp {
    stops: Vec<ColorStop>,
}

impl Default for ColorRamp {
    /// Green lowlands, yellow midlands, red peaks.
    fn default() -> Self {
        Self {
            stops: vec![
                ColorStop::new(0.0, Color::GREEN),
                ColorStop::new(0.5, Color::YELLOW),
                ColorStop::new(1.0, Color::RED),
            ],
        }
    }
}

impl ColorRamp {
    /// Build a ramp, rejecting empty, unordered or out-of-range stops.
    pub fn new(stops: Vec<ColorStop>) -> Result<Self, ConfigError> {
        let ramp = Self { stops };
        ramp.validate()?;
        Ok(ramp)
    }

    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    /// Check stop positions are within [0, 1] and strictly increasing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stops.is_empty() {
            return Err(ConfigError::EmptyColorRamp);
        }
        let mut previous: Option<f32> = None;
        for (index, stop) in self.stops.iter().enumerate() {
            if !(0.0..=1.0).contains(&stop.position) {
                return Err(ConfigError::RampStopOutOfRange {
                    index,
                    position: stop.position,
                });
            }
            if let Some(prev) = previous {
                if stop.position <= prev {
                    return Err(ConfigError::RampStopsUnordered {
                        index,
                        position: stop.position,
                    });
                }
            }
            previous = Some(stop.position);
        }
        Ok(())
    }

    /// Color at normalized position `t`.
    pub fn evaluate(&self, t: f32) -> Color {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Color::BLACK,
        };
        if t <= first.position {
            return first.color;
        }
        if t >= last.position {
            return last.color;
        }
        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t <= hi.position {
                let span = hi.position - lo.position;
                let local = (t - lo.position) / span;
                return lo.color.lerp(hi.color, local);
            }
        }
        last.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-6
            && (a.g - b.g).abs() < 1e-6
            && (a.b - b.b).abs() < 1e-6
            && (a.a - b.a).abs() < 1e-6
    }

    #[test]
    fn test_default_ramp_stops() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.evaluate(0.0), Color::GREEN);
        assert_eq!(ramp.evaluate(0.5), Color::YELLOW);
        assert_eq!(ramp.evaluate(1.0), Color::RED);
    }

    #[test]
    fn test_default_ramp_interpolates() {
        let ramp = ColorRamp::default();
        assert!(close(ramp.evaluate(0.25), Color::rgb(0.5, 1.0, 0.0)));
        assert!(close(ramp.evaluate(0.75), Color::rgb(1.0, 0.5, 0.0)));
    }

    #[test]
    fn test_ramp_clamps_outside_stops() {
        let ramp = ColorRamp::new(vec![
            ColorStop::new(0.2, Color::GREEN),
            ColorStop::new(0.8, Color::RED),
        ])
        .expect("valid ramp");
        assert_eq!(ramp.evaluate(0.0), Color::GREEN);
        assert_eq!(ramp.evaluate(1.0), Color::RED);
    }

    #[test]
    fn test_single_stop_ramp_is_constant() {
        let ramp = ColorRamp::new(vec![ColorStop::new(0.5, Color::YELLOW)]).expect("valid ramp");
        assert_eq!(ramp.evaluate(0.0), Color::YELLOW);
        assert_eq!(ramp.evaluate(0.9), Color::YELLOW);
    }

    #[test]
    fn test_ramp_validation() {
        assert_eq!(ColorRamp::new(vec![]), Err(ConfigError::EmptyColorRamp));
        assert!(matches!(
            ColorRamp::new(vec![ColorStop::new(1.5, Color::RED)]),
            Err(ConfigError::RampStopOutOfRange { index: 0, .. })
        ));
        assert!(matches!(
            ColorRamp::new(vec![
                ColorStop::new(0.5, Color::RED),
                ColorStop::new(0.5, Color::GREEN),
            ]),
            Err(ConfigError::RampStopsUnordered { index: 1, .. })
        ));
    }

    #[test]
    fn test_from_rgb8() {
        let c = Color::from_rgb8(255, 0, 51);
        assert!(close(c, Color::rgb(1.0, 0.0, 0.2)));
    }

    #[test]
    fn test_color_pod_layout() {
        assert_eq!(std::mem::size_of::<Color>(), 16);
        let colors = [Color::RED, Color::GREEN];
        let bytes: &[u8] = bytemuck::cast_slice(&colors);
        assert_eq!(bytes.len(), 32);
    }
}
