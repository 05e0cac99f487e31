//! Packs surface samples into square attribute textures.

use std::sync::Arc;

use arvfx_core::{AttributeKind, FloatTexture, Texel};
use glam::Vec3;

use crate::surface::SurfaceSamples;

/// Position, normal, and color textures for one sampled mesh.
///
/// The three textures always share the same square size. They are
/// reallocated only when the sample count outgrows them; a smaller refresh
/// reuses them and zeroes every texel past the live count.
#[derive(Debug, Default)]
pub struct AttributeMaps {
    position: Option<Arc<FloatTexture>>,
    normal: Option<Arc<FloatTexture>>,
    color: Option<Arc<FloatTexture>>,
    live_count: usize,
    reallocations: usize,
}

impl AttributeMaps {
    /// Creates an empty set; textures are allocated on the first refresh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `samples` into the textures, growing them if needed.
    ///
    /// Textures still held by a renderer are copied before writing, so a
    /// previously published set is never modified.
    pub fn refresh(&mut self, samples: &SurfaceSamples) {
        let count = samples.len();
        if self.capacity() < count || self.position.is_none() {
            let fresh = FloatTexture::square_for_capacity(count);
            log::debug!(
                "allocating {}x{} attribute maps for {} samples",
                fresh.width(),
                fresh.height(),
                count
            );
            self.normal = Some(Arc::new(fresh.clone()));
            self.color = Some(Arc::new(fresh.clone()));
            self.position = Some(Arc::new(fresh));
            self.reallocations += 1;
        }

        write_channel(&mut self.position, &samples.positions, AttributeKind::Position);
        write_channel(&mut self.normal, &samples.normals, AttributeKind::Normal);
        write_channel(&mut self.color, &samples.colors, AttributeKind::Color);
        self.live_count = count;
    }

    /// Drops all textures.
    pub fn clear(&mut self) {
        self.position = None;
        self.normal = None;
        self.color = None;
        self.live_count = 0;
    }

    /// Texels per texture (0 before the first refresh).
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.position.as_ref().map_or(0, |t| t.texel_count())
    }

    /// Side length of the square textures (0 before the first refresh).
    #[must_use]
    pub fn side(&self) -> u32 {
        self.position.as_ref().map_or(0, |t| t.width())
    }

    /// Number of texels holding live samples.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live_count
    }

    /// How many times the textures have been (re)allocated.
    #[must_use]
    pub fn reallocations(&self) -> usize {
        self.reallocations
    }

    /// The position texture.
    #[must_use]
    pub fn position(&self) -> Option<&Arc<FloatTexture>> {
        self.position.as_ref()
    }

    /// The normal texture.
    #[must_use]
    pub fn normal(&self) -> Option<&Arc<FloatTexture>> {
        self.normal.as_ref()
    }

    /// The color texture.
    #[must_use]
    pub fn color(&self) -> Option<&Arc<FloatTexture>> {
        self.color.as_ref()
    }
}

fn write_channel(slot: &mut Option<Arc<FloatTexture>>, values: &[Vec3], kind: AttributeKind) {
    let Some(texture) = slot.as_mut() else {
        return;
    };
    let texels = Arc::make_mut(texture).texels_mut();
    let (live, rest) = texels.split_at_mut(values.len());
    for (texel, value) in live.iter_mut().zip(values) {
        *texel = Texel::pack(*value, kind);
    }
    rest.fill(Texel::ZERO);
}
