//! Floating-point textures used as attribute transport for the renderer.
//!
//! A texture here is not an image for display: each RGBA32F texel carries
//! one particle attribute, xyz in RGB and a sentinel in alpha.

use glam::{Vec3, Vec4};

/// Which attribute a texel carries. Decides the alpha sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Sample position (alpha 1.0).
    Position,
    /// Sample normal (alpha 0.0).
    Normal,
    /// Sample color (alpha 0.0).
    Color,
}

impl AttributeKind {
    /// The alpha value written next to this attribute.
    #[must_use]
    pub fn sentinel(self) -> f32 {
        match self {
            AttributeKind::Position => 1.0,
            AttributeKind::Normal | AttributeKind::Color => 0.0,
        }
    }
}

/// One RGBA32F texel, laid out exactly as uploaded.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Texel(pub [f32; 4]);

impl Texel {
    /// All channels zero.
    pub const ZERO: Self = Self([0.0; 4]);

    /// Packs an attribute vector with its sentinel alpha.
    #[must_use]
    pub fn pack(value: Vec3, kind: AttributeKind) -> Self {
        Self([value.x, value.y, value.z, kind.sentinel()])
    }

    /// Returns the RGB channels.
    #[must_use]
    pub fn rgb(self) -> Vec3 {
        Vec3::new(self.0[0], self.0[1], self.0[2])
    }

    /// Returns the alpha channel.
    #[must_use]
    pub fn alpha(self) -> f32 {
        self.0[3]
    }
}

impl From<Vec4> for Texel {
    fn from(v: Vec4) -> Self {
        Self(v.to_array())
    }
}

/// Side length of the smallest square grid holding `capacity` texels.
#[must_use]
pub fn square_side(capacity: usize) -> u32 {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let mut side = (capacity as f64).sqrt().ceil() as usize;
    // Guard the float estimate in both directions.
    while side * side < capacity {
        side += 1;
    }
    while side > 0 && (side - 1) * (side - 1) >= capacity {
        side -= 1;
    }
    u32::try_from(side).unwrap_or(u32::MAX)
}

/// A width x height grid of RGBA32F texels, row-major, row 0 first.
///
/// Sampling is point-filtered with clamped addressing.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatTexture {
    width: u32,
    height: u32,
    texels: Vec<Texel>,
}

impl FloatTexture {
    /// Creates a zero-filled texture.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            texels: vec![Texel::ZERO; width as usize * height as usize],
        }
    }

    /// Creates the smallest zero-filled square texture with at least `capacity` texels.
    #[must_use]
    pub fn square_for_capacity(capacity: usize) -> Self {
        let side = square_side(capacity);
        Self::new(side, side)
    }

    /// Returns the texture width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the texture height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the number of texels.
    #[must_use]
    pub fn texel_count(&self) -> usize {
        self.texels.len()
    }

    /// Returns the texels in row-major order.
    #[must_use]
    pub fn texels(&self) -> &[Texel] {
        &self.texels
    }

    /// Returns the texels for writing.
    pub fn texels_mut(&mut self) -> &mut [Texel] {
        &mut self.texels
    }

    /// Returns the texel at (x, y), clamping out-of-range coordinates to the edge.
    ///
    /// # Panics
    ///
    /// Panics if the texture is empty.
    #[must_use]
    pub fn texel(&self, x: i64, y: i64) -> Texel {
        assert!(!self.texels.is_empty(), "sampling an empty texture");
        let x = x.clamp(0, i64::from(self.width) - 1);
        let y = y.clamp(0, i64::from(self.height) - 1);
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let index = y as usize * self.width as usize + x as usize;
        self.texels[index]
    }

    /// Resizes to the given dimensions, zero-filling. Keeps the allocation
    /// when the dimensions already match.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        self.texels.clear();
        self.texels
            .resize(width as usize * height as usize, Texel::ZERO);
    }

    /// Raw RGBA32F bytes, ready for upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.texels)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn square_side_is_minimal(capacity in 1usize..1_000_000) {
            let side = square_side(capacity) as usize;
            prop_assert!(side * side >= capacity);
            prop_assert!((side - 1) * (side - 1) < capacity);
        }
    }
}
