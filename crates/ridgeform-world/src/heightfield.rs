use glam::{Vec2, Vec3};
use ridgeform_core::constants::SEA_LEVEL;
use ridgeform_core::math::{grid_side, grid_to_world_xz, vertex_count};
use ridgeform_core::{GridCoord, TerrainError, VertexIndex};

/// Highest elevation in the field and the vertex holding it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Peak {
    pub height: f32,
    pub index: VertexIndex,
}

/// Inclusive rectangle of grid rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridRect {
    pub row_min: u32,
    pub row_max: u32,
    pub col_min: u32,
    pub col_max: u32,
}

impl GridRect {
    /// Smallest rectangle containing every index, or None for an empty set.
    pub fn covering(indices: impl IntoIterator<Item = VertexIndex>, side: u32) -> Option<Self> {
        let mut rect: Option<GridRect> = None;
        for index in indices {
            let c = GridCoord::from_index(index, side);
            rect = Some(match rect {
                None => GridRect {
                    row_min: c.row,
                    row_max: c.row,
                    col_min: c.col,
                    col_max: c.col,
                },
                Some(r) => GridRect {
                    row_min: r.row_min.min(c.row),
                    row_max: r.row_max.max(c.row),
                    col_min: r.col_min.min(c.col),
                    col_max: r.col_max.max(c.col),
                },
            });
        }
        rect
    }

    /// Grow by `ring` cells on every side, clamped to a grid of `side` vertices.
    pub fn expanded(self, ring: u32, side: u32) -> Self {
        let last = side - 1;
        GridRect {
            row_min: self.row_min.saturating_sub(ring),
            row_max: (self.row_max + ring).min(last),
            col_min: self.col_min.saturating_sub(ring),
            col_max: (self.col_max + ring).min(last),
        }
    }

    pub fn contains(&self, coord: GridCoord) -> bool {
        (self.row_min..=self.row_max).contains(&coord.row)
            && (self.col_min..=self.col_max).contains(&coord.col)
    }

    /// Every grid coordinate in the rectangle, row by row.
    pub fn coords(self) -> impl Iterator<Item = GridCoord> {
        (self.row_min..=self.row_max)
            .flat_map(move |row| (self.col_min..=self.col_max).map(move |col| GridCoord::new(row, col)))
    }
}

/// Square grid of elevations over a mesh of `mesh_size` world units.
///
/// Vertex (row, col) sits at `x = -S/2 + col * S/D`, `z = S/2 - row * S/D`.
/// Heights are stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    divisions: u32,
    mesh_size: f32,
    heights: Vec<f32>,
    peak: Peak,
}

impl HeightField {
    /// A field with every vertex at sea level.
    pub fn flat(divisions: u32, mesh_size: f32) -> Self {
        Self::from_raw(divisions, mesh_size, vec![SEA_LEVEL; vertex_count(divisions) as usize])
    }

    /// Wrap existing heights, checking the count matches the grid.
    /// Heights are taken as-is: no clamping is applied.
    pub fn from_heights(
        divisions: u32,
        mesh_size: f32,
        heights: Vec<f32>,
    ) -> Result<Self, TerrainError> {
        let expected = vertex_count(divisions) as usize;
        if heights.len() != expected {
            return Err(TerrainError::HeightCountMismatch {
                divisions,
                expected,
                actual: heights.len(),
            });
        }
        Ok(Self::from_raw(divisions, mesh_size, heights))
    }

    pub(crate) fn from_raw(divisions: u32, mesh_size: f32, heights: Vec<f32>) -> Self {
        debug_assert_eq!(heights.len(), vertex_count(divisions) as usize);
        let mut field = Self {
            divisions,
            mesh_size,
            heights,
            peak: Peak::default(),
        };
        field.recompute_peak();
        field
    }

    pub fn divisions(&self) -> u32 {
        self.divisions
    }

    pub fn mesh_size(&self) -> f32 {
        self.mesh_size
    }

    /// Vertices per row.
    pub fn side(&self) -> u32 {
        grid_side(self.divisions)
    }

    /// Distance between neighboring vertices.
    pub fn cell_size(&self) -> f32 {
        self.mesh_size / self.divisions as f32
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn height(&self, index: VertexIndex) -> f32 {
        self.heights[index as usize]
    }

    pub fn height_at(&self, coord: GridCoord) -> f32 {
        self.height(coord.to_index(self.side()))
    }

    pub fn peak(&self) -> Peak {
        self.peak
    }

    pub fn min_height(&self) -> f32 {
        self.heights.iter().copied().fold(f32::MAX, f32::min)
    }

    pub fn coord(&self, index: VertexIndex) -> GridCoord {
        GridCoord::from_index(index, self.side())
    }

    /// World-space (x, z) of a vertex.
    pub fn world_xz(&self, index: VertexIndex) -> Vec2 {
        let (x, z) = grid_to_world_xz(self.coord(index), self.divisions, self.mesh_size);
        Vec2::new(x, z)
    }

    /// World-space position of a vertex, elevation included.
    pub fn world_position(&self, index: VertexIndex) -> Vec3 {
        let xz = self.world_xz(index);
        Vec3::new(xz.x, self.height(index), xz.y)
    }

    /// Vertices whose XZ distance to `center` is at most `radius`, with that distance.
    ///
    /// Only the grid square bounding the circle is visited.
    pub fn vertices_within(&self, center: Vec2, radius: f32) -> Vec<(VertexIndex, f32)> {
        let side = self.side();
        let half = self.mesh_size * 0.5;
        let cell = self.cell_size();
        let last = self.divisions as f32;

        let col_lo = ((center.x - radius + half) / cell).floor().clamp(0.0, last) as u32;
        let col_hi = ((center.x + radius + half) / cell).ceil().clamp(0.0, last) as u32;
        let row_lo = ((half - center.y - radius) / cell).floor().clamp(0.0, last) as u32;
        let row_hi = ((half - center.y + radius) / cell).ceil().clamp(0.0, last) as u32;

        let mut found = Vec::new();
        for row in row_lo..=row_hi {
            for col in col_lo..=col_hi {
                let index = GridCoord::new(row, col).to_index(side);
                let distance = self.world_xz(index).distance(center);
                if distance <= radius {
                    found.push((index, distance));
                }
            }
        }
        found
    }

    /// Floor every elevation at sea level. Returns how many vertices were raised.
    pub fn clamp_to_sea_level(&mut self) -> usize {
        let mut clamped = 0;
        for h in &mut self.heights {
            if *h < SEA_LEVEL {
                *h = SEA_LEVEL;
                clamped += 1;
            }
        }
        self.recompute_peak();
        clamped
    }

    /// Rescan for the highest vertex. Ties resolve to the lowest index.
    pub fn recompute_peak(&mut self) {
        let mut peak = Peak {
            height: f32::MIN,
            index: 0,
        };
        for (i, &h) in self.heights.iter().enumerate() {
            if h > peak.height {
                peak = Peak {
                    height: h,
                    index: i as VertexIndex,
                };
            }
        }
        if self.heights.is_empty() {
            peak.height = SEA_LEVEL;
        }
        self.peak = peak;
    }

    /// Add each displacement to its vertex and floor the result at sea level.
    ///
    /// All indices are checked before anything is written. The peak follows new
    /// maxima directly; lowering the current peak vertex triggers one rescan.
    pub fn apply_displacements(
        &mut self,
        displacements: &[(VertexIndex, f32)],
    ) -> Result<(), TerrainError> {
        let count = self.heights.len() as u32;
        if let Some(&(index, _)) = displacements.iter().find(|(index, _)| *index >= count) {
            return Err(TerrainError::VertexOutOfRange { index, count });
        }

        let mut peak_lowered = false;
        for &(index, amount) in displacements {
            let slot = &mut self.heights[index as usize];
            let value = (*slot + amount).max(SEA_LEVEL);
            *slot = value;
            if value > self.peak.height {
                self.peak = Peak {
                    height: value,
                    index,
                };
            } else if index == self.peak.index && value < self.peak.height {
                peak_lowered = true;
            }
        }
        if peak_lowered {
            self.recompute_peak();
        }
        Ok(())
    }
}
