//! Output side: what the particle renderer receives.
//!
//! Binding names and texel layout are the contract with the renderer's
//! effect graph and must not change.

use std::sync::Arc;

use glam::Vec3;

use crate::images::{CameraFeedImage, StencilImage};
use crate::options::StencilBinding;
use crate::texture::FloatTexture;

/// Renderer binding names.
pub mod bindings {
    /// Per-particle positions (alpha 1.0).
    pub const POSITION_MAP: &str = "Position Map";
    /// Per-particle normals (alpha 0.0).
    pub const NORMAL_MAP: &str = "Normal Map";
    /// Per-particle colors, or the camera color image for depth effects.
    pub const COLOR_MAP: &str = "Color Map";
    /// Person-segmentation stencil.
    pub const HUMAN_STENCIL_MAP: &str = "Human Stencil Map";
    /// Generic stencil.
    pub const STENCIL_MAP: &str = "Stencil Map";
    /// Owner transform translation.
    pub const TRANSFORM_POSITION: &str = "Transform_position";
    /// Owner transform rotation as Euler angles in degrees.
    pub const TRANSFORM_ANGLES: &str = "Transform_angles";
    /// Owner transform scale.
    pub const TRANSFORM_SCALE: &str = "Transform_scale";
}

impl StencilBinding {
    /// The binding name the stencil image is published under.
    #[must_use]
    pub fn binding_name(self) -> &'static str {
        match self {
            StencilBinding::Human => bindings::HUMAN_STENCIL_MAP,
            StencilBinding::Plain => bindings::STENCIL_MAP,
        }
    }
}

/// A texture reference handed to the renderer.
///
/// Handles are shared; the producer never writes into a texture the
/// renderer may still hold.
#[derive(Debug, Clone)]
pub enum VfxTexture {
    /// RGBA32F attribute or position texture.
    Float(Arc<FloatTexture>),
    /// RGBA8 camera color image.
    Color(Arc<CameraFeedImage>),
    /// Subject stencil.
    Stencil(Arc<StencilImage>),
}

impl VfxTexture {
    /// Returns the float texture, if this is one.
    #[must_use]
    pub fn as_float(&self) -> Option<&Arc<FloatTexture>> {
        match self {
            VfxTexture::Float(t) => Some(t),
            _ => None,
        }
    }
}

/// The particle renderer, as seen from a pipeline.
pub trait VfxSink {
    /// Binds a texture to a named effect property.
    fn set_texture(&mut self, name: &str, texture: VfxTexture);

    /// Sets a named vector property.
    fn set_vector3(&mut self, name: &str, value: Vec3);

    /// Called when the owning pipeline stops. Drop any effect instance state.
    fn release(&mut self) {}
}
