//! Camera math: world-to-viewport projection, orientation remapping, and the
//! matrices used for depth unprojection.

use glam::{Mat4, Vec3};

/// Physical orientation of the device holding the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeviceOrientation {
    /// Upright, home button at the bottom.
    Portrait,
    /// Upside down.
    PortraitUpsideDown,
    /// Rotated counter-clockwise.
    LandscapeLeft,
    /// Rotated clockwise.
    LandscapeRight,
    /// Lying flat, screen up.
    FaceUp,
    /// Lying flat, screen down.
    FaceDown,
    /// Orientation not reported.
    #[default]
    Unknown,
}

impl DeviceOrientation {
    /// Maps a viewport point into camera-feed coordinates.
    ///
    /// The feed is delivered in landscape, so portrait orientations rotate
    /// the sampling axes by 90 degrees. Depth (z) passes through.
    #[must_use]
    pub fn remap_viewport(self, p: Vec3) -> Vec3 {
        match self {
            DeviceOrientation::Portrait => Vec3::new(1.0 - p.y, p.x, p.z),
            DeviceOrientation::PortraitUpsideDown => Vec3::new(p.y, 1.0 - p.x, p.z),
            _ => p,
        }
    }
}

/// View and projection of the AR camera for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportCamera {
    /// World-to-camera matrix (camera looks down -Z).
    pub view: Mat4,
    /// Camera-to-clip matrix.
    pub projection: Mat4,
}

impl ViewportCamera {
    /// Creates a camera from its view and projection matrices.
    #[must_use]
    pub fn new(view: Mat4, projection: Mat4) -> Self {
        Self { view, projection }
    }

    /// Combined view-projection matrix.
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Projects a world point into viewport space.
    ///
    /// x and y are normalized to [0, 1] across the visible area (origin
    /// bottom-left); z is the distance in front of the camera in world units.
    #[must_use]
    pub fn world_to_viewport(&self, world: Vec3) -> Vec3 {
        let ndc = self.view_projection().project_point3(world);
        let eye = self.view.transform_point3(world);
        Vec3::new(ndc.x * 0.5 + 0.5, ndc.y * 0.5 + 0.5, -eye.z)
    }
}

/// Matrices needed to turn a pixel and its depth back into a world position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraMatrices {
    /// Camera-to-clip matrix.
    pub projection: Mat4,
    /// Inverse of `projection * view`.
    pub inverse_view_projection: Mat4,
}

impl CameraMatrices {
    /// Wraps matrices supplied directly by the sensor collaborator.
    #[must_use]
    pub fn new(projection: Mat4, inverse_view_projection: Mat4) -> Self {
        Self {
            projection,
            inverse_view_projection,
        }
    }

    /// Builds the matrices from a projection and a world-to-camera view.
    #[must_use]
    pub fn from_view_projection(projection: Mat4, view: Mat4) -> Self {
        Self {
            projection,
            inverse_view_projection: (projection * view).inverse(),
        }
    }
}

impl From<ViewportCamera> for CameraMatrices {
    fn from(camera: ViewportCamera) -> Self {
        Self::from_view_projection(camera.projection, camera.view)
    }
}
