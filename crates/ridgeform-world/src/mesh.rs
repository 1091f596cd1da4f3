use std::sync::Arc;

use glam::{Vec2, Vec3, Vec4};
use ridgeform_core::math::{grid_side, vertex_count};
use ridgeform_core::{GridCoord, VertexIndex};

use crate::heightfield::{GridRect, HeightField};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn from_points(points: &[Vec3]) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        for &p in points {
            min = min.min(p);
            max = max.max(p);
        }
        if points.is_empty() {
            min = Vec3::ZERO;
            max = Vec3::ZERO;
        }
        Self { min, max }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Index buffer and texture coordinates for a grid. Depends only on `divisions`.
///
/// Cell (row, col) is split into triangles (TL, TR, BR) and (TL, BR, BL),
/// counter-clockwise seen from +Y, stored at triangle `2 * (row * D + col)`.
#[derive(Debug, Clone, PartialEq)]
pub struct GridTopology {
    divisions: u32,
    indices: Vec<u32>,
    uvs: Vec<Vec2>,
}

impl GridTopology {
    pub fn new(divisions: u32) -> Self {
        let side = grid_side(divisions);
        let d = divisions as f32;

        let mut uvs = Vec::with_capacity(vertex_count(divisions) as usize);
        for row in 0..side {
            for col in 0..side {
                uvs.push(Vec2::new(col as f32 / d, 1.0 - row as f32 / d));
            }
        }

        let mut indices = Vec::with_capacity((divisions * divisions * 6) as usize);
        for row in 0..divisions {
            for col in 0..divisions {
                let tl = row * side + col;
                let tr = tl + 1;
                let bl = tl + side;
                let br = bl + 1;
                indices.extend_from_slice(&[tl, tr, br, tl, br, bl]);
            }
        }

        log::debug!(
            "Built grid topology: {} vertices, {} triangles",
            uvs.len(),
            indices.len() / 3
        );
        Self {
            divisions,
            indices,
            uvs,
        }
    }

    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangle(&self, triangle: usize) -> [VertexIndex; 3] {
        let i = triangle * 3;
        [self.indices[i], self.indices[i + 1], self.indices[i + 2]]
    }

    /// Triangles of every cell touching the vertex at `coord`.
    fn triangles_around(&self, coord: GridCoord) -> impl Iterator<Item = usize> + '_ {
        let d = self.divisions;
        let rows = coord.row.saturating_sub(1)..=coord.row.min(d - 1);
        rows.flat_map(move |row| {
            (coord.col.saturating_sub(1)..=coord.col.min(d - 1)).flat_map(move |col| {
                let first = 2 * (row * d + col) as usize;
                [first, first + 1]
            })
        })
    }
}

/// Keeps the last built topology so regenerating at the same size skips the index rebuild.
#[derive(Debug, Default)]
pub struct MeshBuilder {
    topology: Option<Arc<GridTopology>>,
}

impl MeshBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn topology(&mut self, divisions: u32) -> Arc<GridTopology> {
        match &self.topology {
            Some(t) if t.divisions() == divisions => Arc::clone(t),
            _ => {
                let t = Arc::new(GridTopology::new(divisions));
                self.topology = Some(Arc::clone(&t));
                t
            }
        }
    }

    /// Full mesh for a height field: positions, normals, tangents and bounds.
    pub fn build(&mut self, field: &HeightField) -> TerrainMesh {
        let topology = self.topology(field.divisions());
        let positions = (0..field.len() as VertexIndex)
            .map(|i| field.world_position(i))
            .collect();
        let mut mesh = TerrainMesh {
            topology,
            positions,
            normals: vec![Vec3::Y; field.len()],
            tangents: vec![Vec4::new(1.0, 0.0, 0.0, 1.0); field.len()],
            bounds: Aabb::from_points(&[]),
        };
        mesh.recalculate_normals();
        mesh.recalculate_tangents();
        mesh.recalculate_bounds();
        mesh
    }
}

/// Renderable terrain surface.
#[derive(Debug, Clone)]
pub struct TerrainMesh {
    topology: Arc<GridTopology>,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    tangents: Vec<Vec4>,
    bounds: Aabb,
}

impl TerrainMesh {
    pub fn topology(&self) -> &GridTopology {
        &self.topology
    }

    pub fn divisions(&self) -> u32 {
        self.topology.divisions()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn tangents(&self) -> &[Vec4] {
        &self.tangents
    }

    pub fn uvs(&self) -> &[Vec2] {
        self.topology.uvs()
    }

    pub fn indices(&self) -> &[u32] {
        self.topology.indices()
    }

    pub fn bounds(&self) -> Aabb {
        self.bounds
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.topology.triangle_count()
    }

    /// World-space corners of a triangle.
    pub fn triangle_positions(&self, triangle: usize) -> [Vec3; 3] {
        let [a, b, c] = self.topology.triangle(triangle);
        [
            self.positions[a as usize],
            self.positions[b as usize],
            self.positions[c as usize],
        ]
    }

    /// Copy elevations for every vertex in `rect` from the field.
    pub fn sync_heights(&mut self, field: &HeightField, rect: GridRect) {
        let side = grid_side(self.divisions());
        for coord in rect.coords() {
            let i = coord.to_index(side) as usize;
            self.positions[i].y = field.heights()[i];
        }
    }

    /// Pull edited heights for `rect` and refresh shading data around it.
    pub fn refresh_region(&mut self, field: &HeightField, rect: GridRect) {
        self.sync_heights(field, rect);
        let ring = rect.expanded(1, grid_side(self.divisions()));
        self.recalculate_normals_region(ring);
        self.recalculate_tangents_region(ring);
        self.recalculate_bounds();
    }

    pub fn recalculate_normals(&mut self) {
        let side = grid_side(self.divisions());
        for i in 0..self.positions.len() {
            self.normals[i] = self.vertex_normal(GridCoord::from_index(i as VertexIndex, side));
        }
    }

    pub fn recalculate_normals_region(&mut self, rect: GridRect) {
        let side = grid_side(self.divisions());
        for coord in rect.coords() {
            self.normals[coord.to_index(side) as usize] = self.vertex_normal(coord);
        }
    }

    pub fn recalculate_tangents(&mut self) {
        let side = grid_side(self.divisions());
        for i in 0..self.positions.len() {
            self.tangents[i] = self.vertex_tangent(GridCoord::from_index(i as VertexIndex, side));
        }
    }

    pub fn recalculate_tangents_region(&mut self, rect: GridRect) {
        let side = grid_side(self.divisions());
        for coord in rect.coords() {
            self.tangents[coord.to_index(side) as usize] = self.vertex_tangent(coord);
        }
    }

    pub fn recalculate_bounds(&mut self) {
        self.bounds = Aabb::from_points(&self.positions);
    }

    /// Area-weighted sum of the face normals around a vertex.
    fn vertex_normal(&self, coord: GridCoord) -> Vec3 {
        let index = coord.to_index(grid_side(self.divisions()));
        let mut sum = Vec3::ZERO;
        for triangle in self.topology.triangles_around(coord) {
            let tri = self.topology.triangle(triangle);
            if !tri.contains(&index) {
                continue;
            }
            let [a, b, c] = self.triangle_positions(triangle);
            // Unnormalized cross product: length is twice the face area.
            sum += (b - a).cross(c - a);
        }
        sum.try_normalize().unwrap_or(Vec3::Y)
    }

    /// Row direction by central difference, made orthogonal to the normal.
    fn vertex_tangent(&self, coord: GridCoord) -> Vec4 {
        let side = grid_side(self.divisions());
        let left = GridCoord::new(coord.row, coord.col.saturating_sub(1));
        let right = GridCoord::new(coord.row, (coord.col + 1).min(side - 1));
        let along = self.positions[right.to_index(side) as usize]
            - self.positions[left.to_index(side) as usize];
        let n = self.normals[coord.to_index(side) as usize];
        let t = (along - n * n.dot(along)).try_normalize().unwrap_or(Vec3::X);
        t.extend(1.0)
    }
}
