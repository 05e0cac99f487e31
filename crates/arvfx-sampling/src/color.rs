//! Per-vertex color sources for surface sampling.

use arvfx_core::{CameraFeedImage, DeviceOrientation, Transform, ViewportCamera};
use glam::Vec3;

/// Produces a color for a mesh-local vertex position.
///
/// Colors are looked up once per triangle corner and interpolated across
/// the samples, so implementations are called three times per triangle.
pub trait VertexColor {
    /// Linear RGB color for the vertex at `local` (mesh space).
    fn vertex_color(&self, local: Vec3) -> Vec3;
}

/// Always black.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoColor;

impl VertexColor for NoColor {
    fn vertex_color(&self, _local: Vec3) -> Vec3 {
        Vec3::ZERO
    }
}

/// A single fixed color for every vertex.
#[derive(Debug, Clone, Copy)]
pub struct ConstantColor(pub Vec3);

impl VertexColor for ConstantColor {
    fn vertex_color(&self, _local: Vec3) -> Vec3 {
        self.0
    }
}

/// Colors vertices by projecting them into the live camera feed.
#[derive(Debug, Clone, Copy)]
pub struct CameraFeedColor<'a> {
    /// Latest camera frame; `None` until the first frame arrives.
    pub feed: Option<&'a CameraFeedImage>,
    /// AR camera pose for this frame.
    pub camera: ViewportCamera,
    /// Local-to-world transform of the mesh owner.
    pub owner: Transform,
    /// Device orientation, used to rotate the feed coordinates.
    pub orientation: DeviceOrientation,
}

impl CameraFeedColor<'_> {
    /// Feed coordinates (x, y in [0, 1], z = eye distance) for a mesh-local point.
    #[must_use]
    pub fn feed_coordinates(&self, local: Vec3) -> Vec3 {
        let world = self.owner.transform_point(local);
        let viewport = self.camera.world_to_viewport(world);
        self.orientation.remap_viewport(viewport)
    }
}

impl VertexColor for CameraFeedColor<'_> {
    fn vertex_color(&self, local: Vec3) -> Vec3 {
        let Some(feed) = self.feed else {
            return Vec3::ZERO;
        };
        let p = self.feed_coordinates(local);
        // Points on the eye plane have no projection.
        if !(p.x.is_finite() && p.y.is_finite()) {
            return Vec3::ZERO;
        }
        feed.bilinear(p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arvfx_core::images::srgb_to_linear;
    use glam::Mat4;

    fn camera() -> ViewportCamera {
        ViewportCamera::new(
            Mat4::look_at_rh(Vec3::ZERO, Vec3::NEG_Z, Vec3::Y),
            Mat4::perspective_rh(90f32.to_radians(), 1.0, 0.1, 100.0),
        )
    }

    /// 2x2 feed: bottom row red | green, top row blue | white.
    fn feed() -> CameraFeedImage {
        CameraFeedImage::from_rgba8(
            2,
            2,
            vec![
                255, 0, 0, 255, 0, 255, 0, 255, //
                0, 0, 255, 255, 255, 255, 255, 255,
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_missing_feed_is_black() {
        let source = CameraFeedColor {
            feed: None,
            camera: camera(),
            owner: Transform::identity(),
            orientation: DeviceOrientation::Portrait,
        };
        assert_eq!(source.vertex_color(Vec3::new(0.0, 0.0, -1.0)), Vec3::ZERO);
    }

    #[test]
    fn test_center_samples_average_color() {
        let image = feed();
        let source = CameraFeedColor {
            feed: Some(&image),
            camera: camera(),
            owner: Transform::identity(),
            orientation: DeviceOrientation::LandscapeLeft,
        };
        let c = source.vertex_color(Vec3::new(0.0, 0.0, -2.0));
        // Mean of the four corners in sRGB is (0.5, 0.5, 0.5).
        let expected = srgb_to_linear(0.5);
        assert!((c - Vec3::splat(expected)).length() < 1e-4);
    }

    #[test]
    fn test_owner_transform_moves_lookup() {
        let image = feed();
        let source = CameraFeedColor {
            feed: Some(&image),
            camera: camera(),
            owner: Transform::from_translation(Vec3::new(0.0, 0.0, -4.0)),
            orientation: DeviceOrientation::Unknown,
        };
        let p = source.feed_coordinates(Vec3::ZERO);
        assert!((p - Vec3::new(0.5, 0.5, 4.0)).length() < 1e-5);
    }

    #[test]
    fn test_portrait_rotates_lookup() {
        let image = feed();
        let source = CameraFeedColor {
            feed: Some(&image),
            camera: camera(),
            owner: Transform::identity(),
            orientation: DeviceOrientation::Portrait,
        };
        // Point at the lower-left of the viewport: (x, y) = (0.25, 0.25).
        // Portrait remaps that to (0.75, 0.25), the green texel.
        let local = Vec3::new(-0.5, -0.5, -1.0);
        let p = source.feed_coordinates(local);
        assert!((p.x - 0.75).abs() < 1e-5);
        assert!((p.y - 0.25).abs() < 1e-5);
        let c = source.vertex_color(local);
        assert!((c - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_vertex_on_eye_plane_is_black() {
        let image = feed();
        let source = CameraFeedColor {
            feed: Some(&image),
            camera: camera(),
            owner: Transform::identity(),
            orientation: DeviceOrientation::Unknown,
        };
        // Beside the camera, in its eye plane: w = 0.
        let local = Vec3::new(1.0, 0.0, 0.0);
        assert!(!source.feed_coordinates(local).x.is_finite());
        assert_eq!(source.vertex_color(local), Vec3::ZERO);

        let portrait = CameraFeedColor {
            orientation: DeviceOrientation::Portrait,
            ..source
        };
        assert_eq!(portrait.vertex_color(local), Vec3::ZERO);
    }

    #[test]
    fn test_constant_and_none() {
        assert_eq!(ConstantColor(Vec3::ONE).vertex_color(Vec3::X), Vec3::ONE);
        assert_eq!(NoColor.vertex_color(Vec3::X), Vec3::ZERO);
    }
}
