//! World-space position reconstruction from a depth image.
//!
//! Every pixel is independent: its depth is unprojected through the inverse
//! view-projection matrix. The work is split into bands of work-group rows
//! and mapped in parallel with rayon.

use arvfx_core::{CameraMatrices, DepthEncoding, DepthImage, DepthOptions, FloatTexture, Texel};
use glam::{Mat4, UVec2, Vec3};
use rayon::prelude::*;

/// Number of work groups needed to cover a `width` x `height` grid.
///
/// Partial groups at the right and top edges count as full groups.
/// Zero-sized group dimensions are treated as 1.
#[must_use]
pub fn dispatch_groups(width: u32, height: u32, group_size: UVec2) -> UVec2 {
    let group = group_size.max(UVec2::ONE);
    UVec2::new(width.div_ceil(group.x), height.div_ceil(group.y))
}

/// Converts a raw depth sample to NDC depth.
#[must_use]
pub fn encode_depth(sample: f32, encoding: DepthEncoding, projection: &Mat4) -> f32 {
    match encoding {
        DepthEncoding::Ndc => sample,
        DepthEncoding::Linear => projection.project_point3(Vec3::new(0.0, 0.0, -sample)).z,
    }
}

/// NDC coordinate of the center of pixel (x, y). Row 0 is the bottom row.
#[must_use]
pub fn pixel_to_ndc(x: u32, y: u32, width: u32, height: u32, ndc_depth: f32) -> Vec3 {
    #[allow(clippy::cast_precision_loss)]
    let u = (x as f32 + 0.5) / width as f32;
    #[allow(clippy::cast_precision_loss)]
    let v = (y as f32 + 0.5) / height as f32;
    Vec3::new(u * 2.0 - 1.0, v * 2.0 - 1.0, ndc_depth)
}

/// Reconstructs the world position of a single pixel.
#[must_use]
pub fn unproject_pixel(
    x: u32,
    y: u32,
    depth: &DepthImage,
    matrices: &CameraMatrices,
    encoding: DepthEncoding,
) -> Vec3 {
    let z = encode_depth(depth.depth(x, y), encoding, &matrices.projection);
    let ndc = pixel_to_ndc(x, y, depth.width(), depth.height(), z);
    matrices.inverse_view_projection.project_point3(ndc)
}

/// Fills `target` with one world position per depth pixel (alpha 1.0).
///
/// `target` is resized to the depth image when the dimensions differ.
/// Returns the number of work groups the grid was split into.
pub fn reconstruct_positions(
    depth: &DepthImage,
    matrices: &CameraMatrices,
    options: &DepthOptions,
    target: &mut FloatTexture,
) -> UVec2 {
    let (width, height) = (depth.width(), depth.height());
    target.resize(width, height);

    let group = UVec2::from_array(options.group_size).max(UVec2::ONE);
    let groups = dispatch_groups(width, height, group);
    let row_len = width as usize;
    let band_len = row_len * group.y as usize;
    let encoding = options.encoding;

    target
        .texels_mut()
        .par_chunks_mut(band_len)
        .enumerate()
        .for_each(|(band, texels)| {
            let first_row = band * group.y as usize;
            for (i, texel) in texels.iter_mut().enumerate() {
                #[allow(clippy::cast_possible_truncation)]
                let (x, y) = ((i % row_len) as u32, (first_row + i / row_len) as u32);
                let world = unproject_pixel(x, y, depth, matrices, encoding);
                *texel = Texel(world.extend(1.0).to_array());
            }
        });

    log::trace!(
        "reconstructed {}x{} positions in {}x{} groups",
        width,
        height,
        groups.x,
        groups.y
    );
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity() -> CameraMatrices {
        CameraMatrices::new(Mat4::IDENTITY, Mat4::IDENTITY)
    }

    #[test]
    fn test_dispatch_groups_cover_edges() {
        assert_eq!(dispatch_groups(16, 16, UVec2::new(8, 8)), UVec2::new(2, 2));
        assert_eq!(dispatch_groups(17, 9, UVec2::new(8, 8)), UVec2::new(3, 2));
        assert_eq!(dispatch_groups(1, 1, UVec2::new(8, 8)), UVec2::new(1, 1));
        assert_eq!(dispatch_groups(5, 5, UVec2::ZERO), UVec2::new(5, 5));
    }

    #[test]
    fn test_identity_unprojection() {
        let d = 0.3;
        let depth = DepthImage::uniform(4, 3, d).unwrap();
        let mut target = FloatTexture::new(1, 1);
        let groups = reconstruct_positions(&depth, &identity(), &DepthOptions::default(), &mut target);

        assert_eq!(groups, UVec2::new(1, 1));
        assert_eq!((target.width(), target.height()), (4, 3));
        for y in 0..3 {
            for x in 0..4 {
                let expected = pixel_to_ndc(x, y, 4, 3, d);
                let texel = target.texel(i64::from(x), i64::from(y));
                assert!((texel.rgb() - expected).length() < 1e-6);
                assert!((texel.alpha() - 1.0).abs() < f32::EPSILON);
            }
        }
    }

    #[test]
    fn test_partial_bands_are_covered() {
        // 5 rows with 2-row groups leaves a 1-row band at the top.
        let depth = DepthImage::uniform(3, 5, 0.5).unwrap();
        let options = DepthOptions {
            group_size: [2, 2],
            ..Default::default()
        };
        let mut target = FloatTexture::new(3, 5);
        let groups = reconstruct_positions(&depth, &identity(), &options, &mut target);
        assert_eq!(groups, UVec2::new(2, 3));
        let top = target.texel(2, 4).rgb();
        assert!((top - pixel_to_ndc(2, 4, 3, 5, 0.5)).length() < 1e-6);
        assert!(target.texels().iter().all(|t| (t.alpha() - 1.0).abs() < f32::EPSILON));
    }

    #[test]
    fn test_reconstructs_world_points() {
        let view = Mat4::look_at_rh(Vec3::new(0.0, 1.0, 3.0), Vec3::new(0.0, 1.0, 0.0), Vec3::Y);
        let projection = Mat4::perspective_rh(60f32.to_radians(), 1.0, 0.1, 50.0);
        let matrices = CameraMatrices::from_view_projection(projection, view);

        // Render a known point into a 1x1 "image" at the center of the view.
        let world = Vec3::new(0.0, 1.0, -2.0);
        let ndc = (projection * view).project_point3(world);
        let depth = DepthImage::uniform(1, 1, ndc.z).unwrap();

        let mut target = FloatTexture::new(1, 1);
        reconstruct_positions(&depth, &matrices, &DepthOptions::default(), &mut target);
        assert!((target.texel(0, 0).rgb() - world).length() < 1e-3);
    }

    #[test]
    fn test_linear_depth_encoding() {
        let projection = Mat4::perspective_rh(60f32.to_radians(), 1.0, 0.1, 50.0);
        let matrices = CameraMatrices::from_view_projection(projection, Mat4::IDENTITY);
        let depth = DepthImage::uniform(1, 1, 4.0).unwrap();
        let options = DepthOptions {
            encoding: DepthEncoding::Linear,
            ..Default::default()
        };

        let mut target = FloatTexture::new(1, 1);
        reconstruct_positions(&depth, &matrices, &options, &mut target);
        // Camera at the origin looking down -Z: the center pixel lands 4 units ahead.
        assert!((target.texel(0, 0).rgb() - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-3);
    }
}
