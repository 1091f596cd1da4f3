use ridgeform_core::math::gaussian;
use ridgeform_core::{TerrainConfig, TerrainError, VertexIndex};
use ridgeform_world::heightfield::HeightField;
use ridgeform_world::{EditSummary, Terrain};

/// One Gaussian push or pull centered on a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushStroke {
    pub center: VertexIndex,
    /// XZ radius in world units.
    pub radius: f32,
    /// Signed strength. Positive raises.
    pub delta: f32,
    pub variance: f32,
}

impl BrushStroke {
    pub fn new(center: VertexIndex, radius: f32, delta: f32, variance: f32) -> Self {
        Self {
            center,
            radius,
            delta,
            variance,
        }
    }

    /// Stroke with the configured radius and variance.
    pub fn from_config(center: VertexIndex, delta: f32, config: &TerrainConfig) -> Self {
        Self::new(center, config.brush_radius, delta, config.gaussian_variance)
    }

    /// Same stroke, opposite direction.
    pub fn inverse(self) -> Self {
        Self {
            delta: -self.delta,
            ..self
        }
    }

    /// Per-vertex offsets `delta * scale * gaussian(d, variance)` for every vertex within the radius.
    pub fn displacements(
        &self,
        field: &HeightField,
        scale: f32,
    ) -> Result<Vec<(VertexIndex, f32)>, TerrainError> {
        let count = field.len() as u32;
        if self.center >= count {
            return Err(TerrainError::VertexOutOfRange {
                index: self.center,
                count,
            });
        }
        let strength = self.delta * scale;
        let center = field.world_xz(self.center);
        Ok(field
            .vertices_within(center, self.radius)
            .into_iter()
            .map(|(index, d)| (index, strength * gaussian(d, self.variance)))
            .collect())
    }

    /// Apply to the terrain, refreshing its mesh and colors.
    pub fn apply(&self, terrain: &mut Terrain, scale: f32) -> Result<EditSummary, TerrainError> {
        let displacements = self.displacements(terrain.height_field(), scale)?;
        terrain.apply_displacements(&displacements)
    }
}
