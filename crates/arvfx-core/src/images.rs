//! CPU-side images supplied by the camera/sensor collaborator.
//!
//! All images share one convention: row 0 is the bottom row, so the
//! normalized coordinate `v = 0` addresses the first row in memory.

use glam::Vec3;

use crate::error::{ArVfxError, Result};

fn check_len(width: u32, height: u32, channels: usize, actual: usize) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ArVfxError::ImageSize { width, height });
    }
    let expected = width as usize * height as usize * channels;
    if expected != actual {
        return Err(ArVfxError::SizeMismatch { expected, actual });
    }
    Ok(())
}

/// Converts an sRGB-encoded channel in [0, 1] to linear space.
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// An RGBA8 camera frame, sRGB-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraFeedImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl CameraFeedImage {
    /// Wraps raw RGBA8 pixel data.
    pub fn from_rgba8(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        check_len(width, height, 4, pixels.len())?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wraps an `image` buffer as-is (its first row becomes row 0).
    pub fn from_image(image: image::RgbaImage) -> Result<Self> {
        let (width, height) = image.dimensions();
        Self::from_rgba8(width, height, image.into_raw())
    }

    /// Loads an image file from disk.
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let image = image::open(path)?.to_rgba8();
        Self::from_image(image)
    }

    /// Returns the image width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the raw RGBA8 bytes.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the sRGB color at pixel (x, y) in [0, 1], clamped to the edges.
    #[must_use]
    pub fn pixel(&self, x: i64, y: i64) -> Vec3 {
        let x = x.clamp(0, i64::from(self.width) - 1);
        let y = y.clamp(0, i64::from(self.height) - 1);
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.pixels[offset..offset + 3];
        Vec3::new(f32::from(p[0]), f32::from(p[1]), f32::from(p[2])) / 255.0
    }

    /// Bilinearly filtered sRGB color at normalized coordinates (u, v).
    ///
    /// Coordinates outside the image read the edge pixels; NaN reads the
    /// bottom-left pixel.
    #[must_use]
    pub fn bilinear_srgb(&self, u: f32, v: f32) -> Vec3 {
        #[allow(clippy::cast_precision_loss)]
        let (w, h) = (self.width as f32, self.height as f32);
        let x = clamp_texel_coord(u * w - 0.5, w);
        let y = clamp_texel_coord(v * h - 0.5, h);
        let (x0, y0) = (x.floor(), y.floor());
        let (tx, ty) = (x - x0, y - y0);
        #[allow(clippy::cast_possible_truncation)]
        let (x0, y0) = (x0 as i64, y0 as i64);

        let bottom = self.pixel(x0, y0).lerp(self.pixel(x0 + 1, y0), tx);
        let top = self.pixel(x0, y0 + 1).lerp(self.pixel(x0 + 1, y0 + 1), tx);
        bottom.lerp(top, ty)
    }

    /// Bilinearly filtered color at (u, v), converted to linear space.
    #[must_use]
    pub fn bilinear(&self, u: f32, v: f32) -> Vec3 {
        let c = self.bilinear_srgb(u, v);
        Vec3::new(srgb_to_linear(c.x), srgb_to_linear(c.y), srgb_to_linear(c.z))
    }
}

/// Keeps a texel coordinate within one pixel of the image so the integer
/// neighbor lookups cannot overflow.
fn clamp_texel_coord(c: f32, extent: f32) -> f32 {
    if c.is_nan() {
        return 0.0;
    }
    c.clamp(-1.0, extent)
}

/// Per-pixel depth values.
#[derive(Debug, Clone, PartialEq)]
pub struct DepthImage {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl DepthImage {
    /// Wraps depth values, one per pixel.
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Result<Self> {
        check_len(width, height, 1, values.len())?;
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Creates an image where every pixel has depth `depth`.
    pub fn uniform(width: u32, height: u32, depth: f32) -> Result<Self> {
        Self::new(width, height, vec![depth; width as usize * height as usize])
    }

    /// Returns the image width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the depth values in row-major order.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns the depth at pixel (x, y).
    #[must_use]
    pub fn depth(&self, x: u32, y: u32) -> f32 {
        self.values[y as usize * self.width as usize + x as usize]
    }
}

/// Per-pixel subject mask (0 = background).
#[derive(Debug, Clone, PartialEq)]
pub struct StencilImage {
    width: u32,
    height: u32,
    mask: Vec<u8>,
}

impl StencilImage {
    /// Wraps mask values, one per pixel.
    pub fn new(width: u32, height: u32, mask: Vec<u8>) -> Result<Self> {
        check_len(width, height, 1, mask.len())?;
        Ok(Self {
            width,
            height,
            mask,
        })
    }

    /// Returns the image width.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the mask values in row-major order.
    #[must_use]
    pub fn mask(&self) -> &[u8] {
        &self.mask
    }
}
