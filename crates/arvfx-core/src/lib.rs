//! Core data model for arvfx-rs.
//!
//! This crate provides the types shared by the particle pipelines:
//! - [`Mesh`] snapshots and the images delivered by AR sensors
//! - [`FloatTexture`] attribute textures and their texel layout
//! - Camera math for viewport projection and depth unprojection
//! - Collaborator traits ([`MeshSource`], [`SensorSource`], [`VfxSink`])
//! - Configuration options and the crate error type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod camera;
pub mod error;
pub mod images;
pub mod mesh;
pub mod options;
pub mod provider;
pub mod sink;
pub mod texture;
pub mod transform;

pub use camera::{CameraMatrices, DeviceOrientation, ViewportCamera};
pub use error::{ArVfxError, Result};
pub use images::{CameraFeedImage, DepthImage, StencilImage};
pub use mesh::Mesh;
pub use options::{DepthEncoding, DepthOptions, Options, SamplerOptions, StencilBinding};
pub use provider::{CameraSource, MeshSource, SensorFrame, SensorSource};
pub use sink::{bindings, VfxSink, VfxTexture};
pub use texture::{square_side, AttributeKind, FloatTexture, Texel};
pub use transform::Transform;

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, UVec2, Vec2, Vec3, Vec4};
