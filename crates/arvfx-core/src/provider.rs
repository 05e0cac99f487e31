//! Input side: collaborators that supply meshes, cameras, and sensor frames.
//!
//! Every accessor may come back empty; pipelines skip work instead of failing.

use std::sync::Arc;

use crate::camera::{CameraMatrices, DeviceOrientation, ViewportCamera};
use crate::images::{CameraFeedImage, DepthImage, StencilImage};
use crate::mesh::Mesh;
use crate::transform::Transform;

/// Supplies the latest scanned mesh and the transform that owns it.
pub trait MeshSource {
    /// Snapshot of the current mesh, or `None` if nothing has been scanned.
    fn mesh(&self) -> Option<Mesh>;

    /// Local-to-world transform of the mesh owner.
    fn transform(&self) -> Transform {
        Transform::identity()
    }
}

/// Supplies the AR camera pose for color lookups.
pub trait CameraSource {
    /// Current camera, or `None` before tracking starts.
    fn viewport_camera(&self) -> Option<ViewportCamera>;

    /// Current device orientation.
    fn orientation(&self) -> DeviceOrientation {
        DeviceOrientation::Unknown
    }
}

/// One frame's worth of sensor output. Any part may be missing.
#[derive(Debug, Clone, Default)]
pub struct SensorFrame {
    /// Camera matrices for unprojection.
    pub matrices: Option<CameraMatrices>,
    /// Per-pixel depth.
    pub depth: Option<DepthImage>,
    /// Subject stencil.
    pub stencil: Option<Arc<StencilImage>>,
    /// Camera color image.
    pub color: Option<Arc<CameraFeedImage>>,
}

/// Supplies depth/stencil/color frames.
pub trait SensorSource {
    /// The most recent frame.
    fn latest_frame(&self) -> SensorFrame;
}
