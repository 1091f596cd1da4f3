use std::time::Instant;

use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ridgeform_core::{Ray, TerrainConfig, TerrainError};
use ridgeform_edit::{BrushStroke, MeshRaycaster, PickingIndex};
use ridgeform_world::colorize::TerrainColorizer;
use ridgeform_world::mesh::MeshBuilder;
use ridgeform_world::terrain::DiamondSquare;
use ridgeform_world::Terrain;

use crate::scenes::{scene_terrain_config, stroke_script, SceneConfig};

/// Picks are brute force over every triangle, so only a few are timed per scene.
const MAX_TIMED_PICKS: usize = 8;

/// Timing data for a repeated operation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub divisions: u32,
    pub vertex_count: u32,
    pub generate_ms: f64,
    pub mesh_ms: f64,
    pub colorize_ms: f64,
    pub pick_hits: u32,
    pub picks: TimingSeries,
    pub stroke_count: u32,
    pub strokes: TimingSeries,
    pub max_height: f32,
}

impl BenchmarkResult {
    /// Generation, mesh build and colorization together.
    pub fn build_ms(&self) -> f64 {
        self.generate_ms + self.mesh_ms + self.colorize_ms
    }
}

/// Runs the headless terrain pipeline and times each stage.
pub struct BenchmarkRunner {
    base: TerrainConfig,
    seed: u64,
}

impl BenchmarkRunner {
    pub fn new(base: TerrainConfig) -> Self {
        let seed = base.random_seed.unwrap_or(0);
        Self { base, seed }
    }

    /// Run a single benchmark scene. The edited terrain is returned for snapshotting.
    pub fn run_scene(
        &self,
        scene: &SceneConfig,
    ) -> Result<(BenchmarkResult, Terrain), TerrainError> {
        log::info!(
            "Running scene '{}' ({} divisions, {} strokes)...",
            scene.name,
            scene.divisions,
            scene.strokes
        );
        let config = scene_terrain_config(&self.base, scene);

        let start = Instant::now();
        let generator = DiamondSquare::from_config(&config)?;
        let field = generator.generate(&mut ChaCha8Rng::seed_from_u64(self.seed));
        let generate_ms = elapsed_ms(start);

        let start = Instant::now();
        let mesh = MeshBuilder::new().build(&field);
        let mesh_ms = elapsed_ms(start);

        let start = Instant::now();
        let colors = TerrainColorizer::from_config(&config).colorize(&field);
        let colorize_ms = elapsed_ms(start);
        log::debug!(
            "  {} vertices, {} triangles, {} colors",
            mesh.vertex_count(),
            mesh.triangle_count(),
            colors.len()
        );

        let mut terrain = Terrain::from_height_field(config.clone(), Some(self.seed), field)?;
        let script = stroke_script(scene.divisions, scene.strokes, self.seed);

        let picker = PickingIndex::new(MeshRaycaster);
        let mut pick_times = Vec::new();
        let mut pick_hits = 0u32;
        for &(center, _) in script.iter().take(MAX_TIMED_PICKS) {
            // Aim slightly inside a cell so the ray never grazes shared edges.
            let field = terrain.height_field();
            let p = field.world_position(center);
            let cell = field.cell_size();
            let x = p.x - p.x.signum() * cell * 0.25;
            let z = p.z - p.z.signum() * cell * 0.35;
            let ray = Ray::new(Vec3::new(x, p.y + 100.0, z), Vec3::NEG_Y);
            let start = Instant::now();
            let hit = picker.pick(&ray, terrain.mesh());
            pick_times.push(elapsed_ms(start));
            if hit.is_some() {
                pick_hits += 1;
            }
        }

        let mut stroke_times = Vec::with_capacity(script.len());
        for &(center, delta) in &script {
            let stroke = BrushStroke::from_config(center, delta, &config);
            let start = Instant::now();
            stroke.apply(&mut terrain, config.mouse_scale)?;
            stroke_times.push(elapsed_ms(start));
        }

        let strokes = compute_timings(&stroke_times);
        log::info!(
            "  Done: build={:.2}ms, stroke mean={:.3}ms, p95={:.3}ms",
            generate_ms + mesh_ms + colorize_ms,
            strokes.mean_ms,
            strokes.p95_ms
        );

        let result = BenchmarkResult {
            scene_name: scene.name.to_string(),
            divisions: scene.divisions,
            vertex_count: terrain.height_field().len() as u32,
            generate_ms,
            mesh_ms,
            colorize_ms,
            pick_hits,
            picks: compute_timings(&pick_times),
            stroke_count: script.len() as u32,
            strokes,
            max_height: terrain.peak().height,
        };
        Ok((result, terrain))
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

/// Compute timing statistics from a list of durations in milliseconds.
pub fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
