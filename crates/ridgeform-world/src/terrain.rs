use rand::Rng;
use ridgeform_core::constants::{DISPLACEMENT_DECAY, MAX_AMPLITUDE, MAX_DIVISIONS};
use ridgeform_core::math::{grid_side, subdivision_levels, vertex_count};
use ridgeform_core::{ConfigError, TerrainConfig, TerrainError};

use crate::heightfield::HeightField;

/// Diamond-square midpoint displacement over a square grid.
///
/// Corners are seeded first, then each level visits its squares row by row:
/// the center gets the mean of the four corners plus noise, then the top,
/// left, right and bottom edge midpoints each get the mean of their two
/// corners and the new center plus noise. Edges shared between neighboring
/// squares are written by both; the later square wins. The noise range halves
/// after every level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiamondSquare {
    divisions: u32,
    mesh_size: f32,
    amplitude: f32,
    levels: u32,
}

impl DiamondSquare {
    pub fn new(divisions: u32, mesh_size: f32, amplitude: f32) -> Result<Self, TerrainError> {
        let levels =
            subdivision_levels(divisions).ok_or(ConfigError::DivisionsNotPowerOfTwo(divisions))?;
        if divisions > MAX_DIVISIONS {
            return Err(ConfigError::DivisionsTooLarge {
                value: divisions,
                max: MAX_DIVISIONS,
            }
            .into());
        }
        if !(mesh_size.is_finite() && mesh_size > 0.0) {
            return Err(ConfigError::NotPositive {
                field: "mesh_size",
                value: mesh_size,
            }
            .into());
        }
        if !(amplitude.is_finite() && amplitude > 0.0) {
            return Err(ConfigError::NotPositive {
                field: "base_amplitude",
                value: amplitude,
            }
            .into());
        }
        if amplitude > MAX_AMPLITUDE {
            return Err(ConfigError::AmplitudeTooLarge {
                value: amplitude,
                max: MAX_AMPLITUDE,
            }
            .into());
        }
        Ok(Self {
            divisions,
            mesh_size,
            amplitude,
            levels,
        })
    }

    pub fn from_config(config: &TerrainConfig) -> Result<Self, TerrainError> {
        Self::new(config.divisions, config.mesh_size, config.base_amplitude)
    }

    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    /// Subdivision passes after the corner seeding.
    pub fn levels(&self) -> u32 {
        self.levels
    }

    /// Run the displacement and return raw heights, negatives included.
    pub fn displace<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f32> {
        let d = self.divisions as usize;
        let side = grid_side(self.divisions) as usize;
        let last = vertex_count(self.divisions) as usize - 1;
        let mut h = vec![0.0f32; last + 1];
        let mut offset = self.amplitude;

        for corner in [0, d, last, last - d] {
            h[corner] = sample(rng, offset);
        }

        let mut step = d;
        while step > 1 {
            let half = step / 2;
            for row in (0..d).step_by(step) {
                for col in (0..d).step_by(step) {
                    let tl = row * side + col;
                    let tr = tl + step;
                    let bl = tl + step * side;
                    let br = bl + step;
                    let center = tl + half * side + half;

                    h[center] = (h[tl] + h[tr] + h[bl] + h[br]) * 0.25 + sample(rng, offset);
                    let c = h[center];

                    h[tl + half] = (h[tl] + h[tr] + c) / 3.0 + sample(rng, offset);
                    h[center - half] = (h[tl] + h[bl] + c) / 3.0 + sample(rng, offset);
                    h[center + half] = (h[tr] + h[br] + c) / 3.0 + sample(rng, offset);
                    h[bl + half] = (h[bl] + h[br] + c) / 3.0 + sample(rng, offset);
                }
            }
            offset *= DISPLACEMENT_DECAY;
            step = half;
        }
        h
    }

    /// Displace, floor at sea level and locate the peak.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> HeightField {
        let raw = self.displace(rng);
        let mut field = HeightField::from_raw(self.divisions, self.mesh_size, raw);
        let clamped = field.clamp_to_sea_level();
        let peak = field.peak();
        log::debug!(
            "Diamond-square {}x{}: {} vertices below sea level, peak {:.3} at {}",
            self.divisions,
            self.divisions,
            clamped,
            peak.height,
            peak.index
        );
        field
    }
}

/// Generate a clamped height field in one call.
pub fn generate<R: Rng + ?Sized>(
    divisions: u32,
    mesh_size: f32,
    amplitude: f32,
    rng: &mut R,
) -> Result<HeightField, TerrainError> {
    Ok(DiamondSquare::new(divisions, mesh_size, amplitude)?.generate(rng))
}

/// Uniform draw from `[-offset, offset)`.
fn sample<R: Rng + ?Sized>(rng: &mut R, offset: f32) -> f32 {
    if offset > 0.0 {
        rng.gen_range(-offset..offset)
    } else {
        0.0
    }
}
