//! Sampling algorithms for arvfx-rs.
//!
//! - [`surface`]: stochastic point sampling over mesh triangles
//! - [`color`]: per-vertex color sources (camera feed, constant)
//! - [`packing`]: attribute-texture packing of the samples
//! - [`depth`]: parallel world-position reconstruction from depth images

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]

pub mod color;
pub mod depth;
pub mod packing;
pub mod surface;

pub use color::{CameraFeedColor, ConstantColor, NoColor, VertexColor};
pub use depth::{dispatch_groups, reconstruct_positions, unproject_pixel};
pub use packing::AttributeMaps;
pub use surface::{
    desired_point_count, fold_barycentric, random_barycentric, sample_surface, triangle_area,
    SamplePoint, SurfaceSamples,
};
