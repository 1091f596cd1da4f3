use ridgeform_core::constants::{MASK_LAND, MASK_WATER, SEA_LEVEL};
use ridgeform_core::math::inverse_lerp;
use ridgeform_core::{Color, ColorRamp, HeightlineSettings, TerrainConfig, VertexIndex};

use crate::heightfield::HeightField;

/// Height range the ramp is stretched over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorRange {
    pub low: f32,
    pub high: f32,
}

impl ColorRange {
    /// `[0, max]`, widened downward only when the field holds negative heights.
    pub fn of(field: &HeightField) -> Self {
        Self {
            low: field.min_height().min(SEA_LEVEL),
            high: field.peak().height,
        }
    }
}

/// Uniforms for a shader that colors from height itself.
#[derive(Debug, Clone, PartialEq)]
pub struct DeferredShading {
    pub max_height: f32,
    /// One byte per vertex: `MASK_WATER` at sea level, `MASK_LAND` elsewhere.
    pub water_mask: Vec<u8>,
    /// 1.0 when contour lines are drawn.
    pub heightline_enabled: f32,
    pub heightline_color: [f32; 3],
}

/// Maps elevations to vertex colors through a ramp.
#[derive(Debug, Clone)]
pub struct TerrainColorizer {
    ramp: ColorRamp,
    water: Option<Color>,
    heightline: HeightlineSettings,
}

impl TerrainColorizer {
    pub fn new(ramp: ColorRamp, water: Option<Color>, heightline: HeightlineSettings) -> Self {
        Self {
            ramp,
            water,
            heightline,
        }
    }

    pub fn from_config(config: &TerrainConfig) -> Self {
        Self::new(
            config.color_ramp.clone(),
            config.water_color,
            config.heightline.clone(),
        )
    }

    pub fn color_for(&self, height: f32, range: ColorRange) -> Color {
        match self.water {
            Some(water) if height == SEA_LEVEL => water,
            _ => self.ramp.evaluate(inverse_lerp(range.low, range.high, height)),
        }
    }

    /// Color every vertex.
    pub fn colorize(&self, field: &HeightField) -> Vec<Color> {
        let range = ColorRange::of(field);
        field
            .heights()
            .iter()
            .map(|&h| self.color_for(h, range))
            .collect()
    }

    /// Recolor only `touched`. Valid while the range is the one `colors` was built with.
    pub fn recolor(
        &self,
        field: &HeightField,
        range: ColorRange,
        colors: &mut [Color],
        touched: &[VertexIndex],
    ) {
        for &i in touched {
            colors[i as usize] = self.color_for(field.height(i), range);
        }
    }

    pub fn deferred(&self, field: &HeightField) -> DeferredShading {
        let c = self.heightline.color();
        DeferredShading {
            max_height: field.peak().height,
            water_mask: field.heights().iter().map(|&h| water_bit(h)).collect(),
            heightline_enabled: if self.heightline.enabled { 1.0 } else { 0.0 },
            heightline_color: [c.r, c.g, c.b],
        }
    }

    /// Refresh the mask bits for `touched` and the max height.
    pub fn update_deferred(
        &self,
        field: &HeightField,
        shading: &mut DeferredShading,
        touched: &[VertexIndex],
    ) {
        shading.max_height = field.peak().height;
        for &i in touched {
            shading.water_mask[i as usize] = water_bit(field.height(i));
        }
    }
}

fn water_bit(height: f32) -> u8 {
    if height == SEA_LEVEL {
        MASK_WATER
    } else {
        MASK_LAND
    }
}
