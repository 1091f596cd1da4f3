use glam::Vec3;
use ridgeform_core::{Ray, VertexIndex};
use ridgeform_world::mesh::{Aabb, TerrainMesh};

const EPSILON: f32 = 1e-8;

/// Closest triangle a ray struck.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    pub triangle: usize,
    /// Distance along the ray.
    pub t: f32,
    pub point: Vec3,
}

/// Ray-surface intersection, supplied by whoever owns collision.
pub trait SurfaceIntersector {
    fn intersect(&self, ray: &Ray, mesh: &TerrainMesh) -> Option<TriangleHit>;
}

/// Tests every triangle; fine for headless use and modest grids.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeshRaycaster;

impl SurfaceIntersector for MeshRaycaster {
    fn intersect(&self, ray: &Ray, mesh: &TerrainMesh) -> Option<TriangleHit> {
        if !ray_hits_aabb(ray, &mesh.bounds()) {
            return None;
        }
        let mut best: Option<TriangleHit> = None;
        for triangle in 0..mesh.triangle_count() {
            let [v0, v1, v2] = mesh.triangle_positions(triangle);
            if let Some(t) = ray_triangle_intersection(ray.origin, ray.direction, v0, v1, v2) {
                if best.map_or(true, |b| t < b.t) {
                    best = Some(TriangleHit {
                        triangle,
                        t,
                        point: ray.at(t),
                    });
                }
            }
        }
        best
    }
}

/// Möller-Trumbore. Returns the ray parameter of the hit, double-sided.
pub fn ray_triangle_intersection(
    origin: Vec3,
    dir: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = dir.cross(edge2);
    let a = edge1.dot(h);
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = origin - v0;
    let u = f * s.dot(h);
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * dir.dot(q);
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);
    (t > EPSILON).then_some(t)
}

/// Slab test, used to skip the triangle loop for rays that miss the terrain.
fn ray_hits_aabb(ray: &Ray, bounds: &Aabb) -> bool {
    let mut t_min = 0.0f32;
    let mut t_max = f32::MAX;
    for axis in 0..3 {
        let o = ray.origin[axis];
        let d = ray.direction[axis];
        let (lo, hi) = (bounds.min[axis], bounds.max[axis]);
        if d.abs() < EPSILON {
            if o < lo || o > hi {
                return false;
            }
            continue;
        }
        let (mut t0, mut t1) = ((lo - o) / d, (hi - o) / d);
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return false;
        }
    }
    true
}

/// A picked surface point and the vertex a brush should center on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub point: Vec3,
    pub triangle: [VertexIndex; 3],
    pub nearest_vertex: VertexIndex,
}

/// Resolves pointer rays to mesh vertices.
#[derive(Debug, Clone, Default)]
pub struct PickingIndex<I = MeshRaycaster> {
    intersector: I,
}

impl<I: SurfaceIntersector> PickingIndex<I> {
    pub fn new(intersector: I) -> Self {
        Self { intersector }
    }

    /// Nearest of the struck triangle's three corners. None on a miss or
    /// when the intersector reports a triangle the mesh does not have.
    pub fn pick(&self, ray: &Ray, mesh: &TerrainMesh) -> Option<PickHit> {
        let hit = self.intersector.intersect(ray, mesh)?;
        if hit.triangle >= mesh.triangle_count() {
            log::warn!(
                "Intersector reported triangle {} of {}, ignoring",
                hit.triangle,
                mesh.triangle_count()
            );
            return None;
        }
        let triangle = mesh.topology().triangle(hit.triangle);
        let positions = mesh.positions();
        let nearest_vertex = triangle
            .iter()
            .copied()
            .min_by(|&a, &b| {
                let da = positions[a as usize].distance_squared(hit.point);
                let db = positions[b as usize].distance_squared(hit.point);
                da.total_cmp(&db)
            })
            .unwrap_or(triangle[0]);
        Some(PickHit {
            point: hit.point,
            triangle,
            nearest_vertex,
        })
    }
}
