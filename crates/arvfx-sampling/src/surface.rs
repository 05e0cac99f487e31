//! Stochastic point sampling over the triangles of a mesh.
//!
//! Each triangle receives a number of samples proportional to its area,
//! drawn uniformly over the triangle by folding a random point of the unit
//! square back into the unit triangle. The total is capped by a point budget.

pub use arvfx_core::mesh::triangle_area;
use arvfx_core::{Mesh, SamplerOptions};
use glam::Vec3;
use rand::Rng;

use crate::color::VertexColor;

/// One sampled surface point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    /// Position in mesh-local space.
    pub position: Vec3,
    /// Interpolated normal (not renormalized).
    pub normal: Vec3,
    /// Interpolated linear RGB color.
    pub color: Vec3,
}

/// The result of sampling a mesh: three parallel attribute lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceSamples {
    /// Sample positions, in emission order.
    pub positions: Vec<Vec3>,
    /// Sample normals, parallel to `positions`.
    pub normals: Vec<Vec3>,
    /// Sample colors, parallel to `positions`.
    pub colors: Vec<Vec3>,
    /// Number of triangles the sampler looked at before stopping.
    pub triangles_visited: usize,
}

impl SurfaceSamples {
    /// Number of emitted samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if nothing was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Returns sample `i`.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<SamplePoint> {
        Some(SamplePoint {
            position: *self.positions.get(i)?,
            normal: *self.normals.get(i)?,
            color: *self.colors.get(i)?,
        })
    }

    fn push(&mut self, point: SamplePoint) {
        self.positions.push(point.position);
        self.normals.push(point.normal);
        self.colors.push(point.color);
    }
}

/// Samples requested for a triangle of the given area, before the budget clamp.
///
/// Non-positive or NaN products request nothing.
#[must_use]
pub fn desired_point_count(area: f32, point_per_area: f32) -> usize {
    let n = (area * point_per_area).ceil();
    if n.is_nan() || n <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = n as usize;
    count
}

/// Folds two uniform values in [0, 1] into barycentric weights uniform over
/// the triangle.
///
/// Points of the unit square above the diagonal are reflected back below
/// it. The third weight is clamped at zero against rounding.
#[must_use]
pub fn fold_barycentric(mut w0: f32, mut w1: f32) -> [f32; 3] {
    if w0 + w1 > 1.0 {
        w0 = 1.0 - w0;
        w1 = 1.0 - w1;
    }
    let w2 = (1.0 - w0 - w1).max(0.0);
    [w0, w1, w2]
}

/// Draws barycentric weights uniformly over a triangle.
pub fn random_barycentric<R: Rng + ?Sized>(rng: &mut R) -> [f32; 3] {
    let w0: f32 = rng.gen();
    let w1: f32 = rng.gen();
    fold_barycentric(w0, w1)
}

fn interpolate(values: [Vec3; 3], [w0, w1, w2]: [f32; 3]) -> Vec3 {
    values[0] * w0 + values[1] * w1 + values[2] * w2
}

/// Samples points over every triangle of `mesh`, in triangle order.
///
/// A triangle of area `A` asks for `ceil(A * point_per_area)` samples,
/// clamped to the remaining budget. Once the budget is used up the
/// remaining triangles are not visited at all, so the result never holds
/// more than `max_points` samples.
///
/// Meshes without vertex normals get the face normal of each triangle.
pub fn sample_surface<R: Rng + ?Sized>(
    mesh: &Mesh,
    colors: &dyn VertexColor,
    options: &SamplerOptions,
    rng: &mut R,
) -> SurfaceSamples {
    let max_points = options.max_points as usize;
    let mut samples = SurfaceSamples::default();

    for (i, &[a, b, c]) in mesh.triangles().iter().enumerate() {
        samples.triangles_visited += 1;

        let positions = mesh.triangle(i);
        let area = triangle_area(positions[0], positions[1], positions[2]);
        let point_num = desired_point_count(area, options.point_per_area)
            .min(max_points - samples.len());

        if point_num > 0 {
            let normals = if mesh.has_normals() {
                let n = mesh.normals();
                [n[a as usize], n[b as usize], n[c as usize]]
            } else {
                [mesh.face_normal(i); 3]
            };
            let corner_colors = positions.map(|p| colors.vertex_color(p));

            for _ in 0..point_num {
                let weights = random_barycentric(rng);
                samples.push(SamplePoint {
                    position: interpolate(positions, weights),
                    normal: interpolate(normals, weights),
                    color: interpolate(corner_colors, weights),
                });
            }
        }

        if samples.len() >= max_points {
            break;
        }
    }

    log::trace!(
        "sampled {} points over {}/{} triangles",
        samples.len(),
        samples.triangles_visited,
        mesh.num_triangles()
    );
    samples
}


#[cfg(test)]
mod proptests {
    use super::tests::barycentric;
    use super::*;
    use crate::color::NoColor;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn vec3() -> impl Strategy<Value = Vec3> {
        (-10.0f32..10.0, -10.0f32..10.0, -10.0f32..10.0).prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    fn mesh_strategy() -> impl Strategy<Value = Mesh> {
        (3usize..12)
            .prop_flat_map(|n| {
                (
                    prop::collection::vec(vec3(), n),
                    prop::collection::vec(prop::array::uniform3(0..n as u32), 1..20),
                )
            })
            .prop_map(|(positions, triangles)| Mesh::new(positions, Vec::new(), triangles).unwrap())
    }

    proptest! {
        #[test]
        fn never_exceeds_budget(
            mesh in mesh_strategy(),
            max_points in 0u32..300,
            density in 0.0f32..50.0,
            seed in any::<u64>(),
        ) {
            let options = SamplerOptions { max_points, point_per_area: density };
            let samples = sample_surface(&mesh, &NoColor, &options, &mut StdRng::seed_from_u64(seed));
            prop_assert!(samples.len() <= max_points as usize);
            prop_assert_eq!(samples.normals.len(), samples.len());
            prop_assert_eq!(samples.colors.len(), samples.len());
        }

        #[test]
        fn folded_weights_are_barycentric(w0 in 0.0f32..=1.0, w1 in 0.0f32..=1.0) {
            let [a, b, c] = fold_barycentric(w0, w1);
            prop_assert!(a >= 0.0 && b >= 0.0 && c >= 0.0);
            prop_assert!(a + b <= 1.0);
            prop_assert!((a + b + c - 1.0).abs() < 1e-6);
        }

        #[test]
        fn desired_count_is_ceiling(area in 0.0f32..100.0, density in 0.0f32..100.0) {
            let expected = (area * density).ceil();
            prop_assert_eq!(desired_point_count(area, density) as f32, expected);
        }

        #[test]
        fn samples_are_convex_combinations(
            a in vec3(),
            b in vec3(),
            c in vec3(),
            seed in any::<u64>(),
        ) {
            let corners = [a, b, c];
            prop_assume!(triangle_area(a, b, c) > 1.0);
            let mesh = Mesh::new(corners.to_vec(), Vec::new(), vec![[0, 1, 2]]).unwrap();
            let options = SamplerOptions { max_points: 64, point_per_area: 10.0 };
            let samples = sample_surface(&mesh, &NoColor, &options, &mut StdRng::seed_from_u64(seed));
            for p in &samples.positions {
                let weights = barycentric(*p, corners);
                for w in weights {
                    prop_assert!(w >= -1e-2 && w <= 1.0 + 1e-2, "weights {:?}", weights);
                }
            }
        }
    }
}
