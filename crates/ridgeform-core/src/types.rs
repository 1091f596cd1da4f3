use glam::Vec3;

/// Row-major index of a vertex in a (D+1) x (D+1) grid.
pub type VertexIndex = u32;

/// Grid cell coordinate: `row` runs along -z, `col` along +x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridCoord {
    pub row: u32,
    pub col: u32,
}

impl GridCoord {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Row-major vertex index for a grid with `side` vertices per row.
    pub fn to_index(self, side: u32) -> VertexIndex {
        self.row * side + self.col
    }

    /// Inverse of [`GridCoord::to_index`].
    pub fn from_index(index: VertexIndex, side: u32) -> Self {
        Self {
            row: index / side,
            col: index % side,
        }
    }
}

/// A half-line in world space. `direction` is kept normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
