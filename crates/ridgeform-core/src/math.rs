use crate::types::GridCoord;

/// Isotropic 2D Gaussian evaluated at distance `d` from its center.
///
/// `variance` is sigma squared: `1 / (2 pi variance) * exp(-d^2 / (2 variance))`.
pub fn gaussian(d: f32, variance: f32) -> f32 {
    let norm = 1.0 / (2.0 * std::f32::consts::PI * variance);
    norm * (-(d * d) / (2.0 * variance)).exp()
}

/// Position of `value` between `a` and `b`, clamped to [0, 1].
/// Returns 0 when the range is degenerate.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}

/// Linear interpolation between `a` and `b` by `t`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Number of diamond-square subdivision levels for `divisions`, if it is a
/// positive power of two.
pub fn subdivision_levels(divisions: u32) -> Option<u32> {
    if divisions.is_power_of_two() {
        Some(divisions.trailing_zeros())
    } else {
        None
    }
}

/// Vertices along one side of a grid with `divisions` cells.
pub fn grid_side(divisions: u32) -> u32 {
    divisions + 1
}

/// Total vertex count of a square grid with `divisions` cells per side.
pub fn vertex_count(divisions: u32) -> u32 {
    let side = grid_side(divisions);
    side * side
}

/// World-space (x, z) of a grid cell on a mesh of `mesh_size` centered on the origin.
///
/// Row 0 is the far (+z) edge, column 0 the left (-x) edge.
pub fn grid_to_world_xz(coord: GridCoord, divisions: u32, mesh_size: f32) -> (f32, f32) {
    let half = mesh_size * 0.5;
    let cell = mesh_size / divisions as f32;
    let x = -half + coord.col as f32 * cell;
    let z = half - coord.row as f32 * cell;
    (x, z)
}

/// Nearest grid cell to a world-space (x, z), clamped to the grid.
pub fn world_xz_to_grid(x: f32, z: f32, divisions: u32, mesh_size: f32) -> GridCoord {
    let half = mesh_size * 0.5;
    let cell = mesh_size / divisions as f32;
    let col = ((x + half) / cell).round().clamp(0.0, divisions as f32) as u32;
    let row = ((half - z) / cell).round().clamp(0.0, divisions as f32) as u32;
    GridCoord::new(row, col)
}
