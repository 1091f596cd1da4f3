use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use ridgeform_core::math::vertex_count;
use ridgeform_core::{TerrainConfig, VertexIndex};

/// Configuration for a single benchmark scene.
pub struct SceneConfig {
    pub name: &'static str,
    pub divisions: u32,
    pub strokes: u32,
}

/// Return the standard suite of benchmark scenes (64 to 1024 divisions).
pub fn standard_scenes(strokes: u32) -> Vec<SceneConfig> {
    [("64", 64), ("128", 128), ("256", 256), ("512", 512), ("1024", 1024)]
        .into_iter()
        .map(|(name, divisions)| SceneConfig {
            name,
            divisions,
            strokes,
        })
        .collect()
}

/// The base config resized for a scene. Cell size stays constant so the brush
/// covers a comparable number of vertices at every size.
pub fn scene_terrain_config(base: &TerrainConfig, scene: &SceneConfig) -> TerrainConfig {
    let cell = base.cell_size();
    TerrainConfig {
        divisions: scene.divisions,
        mesh_size: cell * scene.divisions as f32,
        ..base.clone()
    }
}

/// Deterministic stroke script: random centers, alternating raise and lower.
pub fn stroke_script(divisions: u32, strokes: u32, seed: u64) -> Vec<(VertexIndex, f32)> {
    let count = vertex_count(divisions);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..strokes)
        .map(|i| {
            let center = rng.gen_range(0..count);
            let delta = if i % 2 == 0 { 1.0 } else { -0.5 };
            (center, delta)
        })
        .collect()
}
