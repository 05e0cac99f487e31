//! arvfx: AR particle effects from scanned meshes and depth maps.
//!
//! The crate turns sensor output into the attribute textures a GPU particle
//! system reads. Two pipelines are provided:
//!
//! - [`MeshParticles`] samples points over a scanned mesh (position, normal,
//!   camera-feed color) and packs them into square RGBA32F maps.
//! - [`DepthParticles`] reconstructs a world position per depth pixel and
//!   forwards the stencil and color images next to it.
//!
//! Both pipelines are driven by an external trigger through `tick()` and talk
//! to the outside world only through the collaborator traits
//! ([`MeshSource`], [`CameraSource`], [`SensorSource`], [`VfxSink`]).
//!
//! # Quick Start
//!
//! ```no_run
//! use arvfx::*;
//! use rand::SeedableRng;
//!
//! struct Scan(Mesh);
//! impl MeshSource for Scan {
//!     fn mesh(&self) -> Option<Mesh> {
//!         Some(self.0.clone())
//!     }
//! }
//!
//! struct NoCamera;
//! impl CameraSource for NoCamera {
//!     fn viewport_camera(&self) -> Option<ViewportCamera> {
//!         None
//!     }
//! }
//!
//! struct Renderer;
//! impl VfxSink for Renderer {
//!     fn set_texture(&mut self, name: &str, _texture: VfxTexture) {
//!         println!("bound {name}");
//!     }
//!     fn set_vector3(&mut self, _name: &str, _value: Vec3) {}
//! }
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!     let mesh = Mesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y], Vec::new(), vec![[0, 1, 2]])?;
//!     let mut particles = MeshParticles::new(Scan(mesh), NoCamera, Renderer, SamplerOptions::default());
//!     particles.start();
//!     particles.tick(&mut rand::rngs::StdRng::seed_from_u64(0));
//!     Ok(())
//! }
//! ```

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod depth_particles;
pub mod feed;
pub mod mesh_particles;

pub use depth_particles::DepthParticles;
pub use feed::convert_camera_frame;
pub use mesh_particles::{ColorMode, MeshChannels, MeshParticles};

// Re-export core types
pub use arvfx_core::{
    bindings, ArVfxError, AttributeKind, CameraFeedImage, CameraMatrices, CameraSource,
    DepthEncoding, DepthImage, DepthOptions, DeviceOrientation, FloatTexture, Mat4, Mesh,
    MeshSource, Options, Quat, Result, SamplerOptions, SensorFrame, SensorSource, StencilBinding,
    StencilImage, Texel, Transform, UVec2, Vec2, Vec3, Vec4, VfxSink, VfxTexture, ViewportCamera,
};

// Re-export sampling entry points
pub use arvfx_sampling::{
    reconstruct_positions, sample_surface, AttributeMaps, SurfaceSamples, VertexColor,
};

/// Initializes `env_logger` once; later calls are ignored.
///
/// Libraries embedding arvfx with their own logger should skip this.
pub fn init_logging() {
    let _ = env_logger::try_init();
    log::debug!("arvfx logging initialized");
}
