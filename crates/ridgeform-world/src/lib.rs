pub mod colorize;
pub mod heightfield;
pub mod mesh;
pub mod terrain;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ridgeform_core::{Color, TerrainConfig, TerrainError, VertexIndex};

use colorize::{ColorRange, DeferredShading, TerrainColorizer};
use heightfield::{GridRect, HeightField, Peak};
use mesh::{MeshBuilder, TerrainMesh};
use terrain::DiamondSquare;

/// What a single edit changed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditSummary {
    /// Vertices the edit wrote to.
    pub touched: usize,
    /// Grid rectangle covering the touched vertices. None for an empty edit.
    pub region: Option<GridRect>,
    pub peak_before: Peak,
    pub peak_after: Peak,
    /// True when every vertex color was rebuilt because the height range moved.
    pub full_recolor: bool,
}

impl EditSummary {
    pub fn peak_changed(&self) -> bool {
        self.peak_before != self.peak_after
    }
}

/// A generated terrain: height field, mesh and colors kept in step.
///
/// Every mutation goes through `&mut self`; the mesh and colors never
/// disagree with the field between calls.
pub struct Terrain {
    config: TerrainConfig,
    seed: Option<u64>,
    field: HeightField,
    builder: MeshBuilder,
    mesh: TerrainMesh,
    colorizer: TerrainColorizer,
    colors: Vec<Color>,
    color_range: ColorRange,
    shading: DeferredShading,
    stroke_count: u64,
}

impl Terrain {
    /// Validate the config and generate from its seed, or a fresh one.
    pub fn new(config: TerrainConfig) -> Result<Self, TerrainError> {
        config.validate()?;
        let seed = config.random_seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut terrain = Self::from_rng(config, &mut rng)?;
        terrain.seed = Some(seed);
        log::info!(
            "Generated terrain: {} divisions, seed {}, max height {:.3}",
            terrain.config.divisions,
            seed,
            terrain.field.peak().height
        );
        Ok(terrain)
    }

    /// Generate with a caller-supplied random source.
    pub fn from_rng<R: Rng + ?Sized>(
        config: TerrainConfig,
        rng: &mut R,
    ) -> Result<Self, TerrainError> {
        config.validate()?;
        let field = DiamondSquare::from_config(&config)?.generate(rng);
        Ok(Self::assemble(config, None, field))
    }

    /// Wrap an existing height field, e.g. one restored from a snapshot.
    pub fn from_height_field(
        config: TerrainConfig,
        seed: Option<u64>,
        field: HeightField,
    ) -> Result<Self, TerrainError> {
        config.validate()?;
        let expected = ridgeform_core::math::vertex_count(config.divisions) as usize;
        if field.divisions() != config.divisions || field.len() != expected {
            return Err(TerrainError::HeightCountMismatch {
                divisions: config.divisions,
                expected,
                actual: field.len(),
            });
        }
        Ok(Self::assemble(config, seed, field))
    }

    fn assemble(config: TerrainConfig, seed: Option<u64>, field: HeightField) -> Self {
        let mut builder = MeshBuilder::new();
        let mesh = builder.build(&field);
        let colorizer = TerrainColorizer::from_config(&config);
        let colors = colorizer.colorize(&field);
        let shading = colorizer.deferred(&field);
        Self {
            color_range: ColorRange::of(&field),
            config,
            seed,
            field,
            builder,
            mesh,
            colorizer,
            colors,
            shading,
            stroke_count: 0,
        }
    }

    /// Replace the surface with a fresh one from `seed`. The grid topology is reused.
    pub fn regenerate(&mut self, seed: u64) -> Result<(), TerrainError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.field = DiamondSquare::from_config(&self.config)?.generate(&mut rng);
        self.mesh = self.builder.build(&self.field);
        self.colors = self.colorizer.colorize(&self.field);
        self.color_range = ColorRange::of(&self.field);
        self.shading = self.colorizer.deferred(&self.field);
        self.seed = Some(seed);
        self.stroke_count = 0;
        log::info!(
            "Regenerated terrain with seed {}, max height {:.3}",
            seed,
            self.field.peak().height
        );
        Ok(())
    }

    /// Apply height offsets and refresh the mesh, colors and shading around them.
    ///
    /// Heights are floored at sea level. Out-of-range indices reject the whole
    /// edit before anything changes.
    pub fn apply_displacements(
        &mut self,
        displacements: &[(VertexIndex, f32)],
    ) -> Result<EditSummary, TerrainError> {
        let peak_before = self.field.peak();
        self.field.apply_displacements(displacements)?;

        let touched: Vec<VertexIndex> = displacements.iter().map(|&(i, _)| i).collect();
        let region = GridRect::covering(touched.iter().copied(), self.field.side());
        let Some(rect) = region else {
            return Ok(EditSummary {
                touched: 0,
                region: None,
                peak_before,
                peak_after: peak_before,
                full_recolor: false,
            });
        };

        self.mesh.refresh_region(&self.field, rect);

        let range = ColorRange::of(&self.field);
        let full_recolor = range != self.color_range;
        if full_recolor {
            self.colors = self.colorizer.colorize(&self.field);
            self.color_range = range;
        } else {
            self.colorizer
                .recolor(&self.field, range, &mut self.colors, &touched);
        }
        self.colorizer
            .update_deferred(&self.field, &mut self.shading, &touched);
        self.stroke_count += 1;

        let peak_after = self.field.peak();
        log::debug!(
            "Edit #{} touched {} vertices, peak {:.3} at {}",
            self.stroke_count,
            touched.len(),
            peak_after.height,
            peak_after.index
        );
        Ok(EditSummary {
            touched: touched.len(),
            region,
            peak_before,
            peak_after,
            full_recolor,
        })
    }

    pub fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Seed the surface was generated from, when known.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn height_field(&self) -> &HeightField {
        &self.field
    }

    pub fn mesh(&self) -> &TerrainMesh {
        &self.mesh
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn deferred_shading(&self) -> &DeferredShading {
        &self.shading
    }

    pub fn peak(&self) -> Peak {
        self.field.peak()
    }

    /// World position of the highest vertex, for a peak marker.
    pub fn peak_position(&self) -> Vec3 {
        self.field.world_position(self.field.peak().index)
    }

    /// Edits applied since generation or load.
    pub fn stroke_count(&self) -> u64 {
        self.stroke_count
    }

    pub fn set_stroke_count(&mut self, count: u64) {
        self.stroke_count = count;
    }
}
