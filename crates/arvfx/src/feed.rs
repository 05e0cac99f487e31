//! Camera frame ingestion.

use arvfx_core::{ArVfxError, CameraFeedImage, Result};
use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Converts a raw camera frame into the feed used for vertex color lookups.
///
/// The frame is downscaled to half resolution and mirrored vertically, so
/// the first row of the camera image (its top) ends up at `v = 1`.
pub fn convert_camera_frame(frame: &RgbaImage) -> Result<CameraFeedImage> {
    let (width, height) = frame.dimensions();
    if width == 0 || height == 0 {
        return Err(ArVfxError::ImageSize { width, height });
    }

    let mut half = imageops::resize(
        frame,
        (width / 2).max(1),
        (height / 2).max(1),
        FilterType::Triangle,
    );
    imageops::flip_vertical_in_place(&mut half);
    CameraFeedImage::from_image(half)
}
