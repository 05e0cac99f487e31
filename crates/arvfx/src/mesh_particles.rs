//! Particles spawned over a scanned mesh.

use std::sync::Arc;

use arvfx_core::{
    bindings, CameraFeedImage, CameraSource, MeshSource, Result, SamplerOptions, VfxSink,
    VfxTexture,
};
use arvfx_sampling::{
    sample_surface, AttributeMaps, CameraFeedColor, ConstantColor, NoColor, VertexColor,
};
use glam::Vec3;
use image::RgbaImage;
use rand::Rng;

use crate::feed::convert_camera_frame;

/// Where sample colors come from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ColorMode {
    /// Project vertices into the live camera feed.
    #[default]
    CameraFeed,
    /// One fixed color for every sample.
    Constant(Vec3),
    /// No color map is published.
    Disabled,
}

/// Which attribute maps a [`MeshParticles`] pipeline publishes.
///
/// Positions are always published.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeshChannels {
    /// Publish `"Normal Map"`.
    pub normals: bool,
    /// Source of `"Color Map"`.
    pub color: ColorMode,
}

impl Default for MeshChannels {
    fn default() -> Self {
        Self {
            normals: true,
            color: ColorMode::CameraFeed,
        }
    }
}

impl MeshChannels {
    /// Positions and a plain white color map, no normals.
    #[must_use]
    pub fn positions_only() -> Self {
        Self {
            normals: false,
            color: ColorMode::Constant(Vec3::ONE),
        }
    }
}

/// Samples a mesh into attribute maps on every tick and hands them to the
/// particle renderer.
pub struct MeshParticles<M, C, S> {
    mesh_source: M,
    camera_source: C,
    sink: S,
    options: SamplerOptions,
    channels: MeshChannels,
    maps: AttributeMaps,
    feed: Option<CameraFeedImage>,
    running: bool,
}

impl<M, C, S> MeshParticles<M, C, S>
where
    M: MeshSource,
    C: CameraSource,
    S: VfxSink,
{
    /// Creates a stopped pipeline with default channels.
    pub fn new(mesh_source: M, camera_source: C, sink: S, options: SamplerOptions) -> Self {
        Self {
            mesh_source,
            camera_source,
            sink,
            options,
            channels: MeshChannels::default(),
            maps: AttributeMaps::new(),
            feed: None,
            running: false,
        }
    }

    /// Sets which maps are published.
    #[must_use]
    pub fn with_channels(mut self, channels: MeshChannels) -> Self {
        self.channels = channels;
        self
    }

    /// Starts reacting to ticks.
    pub fn start(&mut self) {
        self.running = true;
        log::info!(
            "mesh particles started (max_points = {}, point_per_area = {})",
            self.options.max_points,
            self.options.point_per_area
        );
    }

    /// Stops the pipeline, drops its textures, and releases the renderer.
    pub fn stop(&mut self) {
        self.running = false;
        self.maps.clear();
        self.sink.release();
        log::info!("mesh particles stopped");
    }

    /// Returns whether the pipeline is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ingests a new camera frame, replacing the previous feed.
    ///
    /// A frame that cannot be converted leaves the previous feed in place.
    pub fn on_camera_frame(&mut self, frame: &RgbaImage) -> Result<()> {
        match convert_camera_frame(frame) {
            Ok(feed) => {
                self.feed = Some(feed);
                Ok(())
            }
            Err(err) => {
                log::warn!("dropping camera frame: {err}");
                Err(err)
            }
        }
    }

    /// Replaces the camera feed with an already converted image.
    pub fn set_camera_feed(&mut self, feed: CameraFeedImage) {
        self.feed = Some(feed);
    }

    /// Resamples the current mesh and publishes fresh attribute maps.
    ///
    /// Returns the number of samples, or `None` when stopped or when no mesh
    /// is available (nothing is published in that case).
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if !self.running {
            return None;
        }
        let Some(mesh) = self.mesh_source.mesh() else {
            log::trace!("no mesh yet, skipping");
            return None;
        };

        let owner = self.mesh_source.transform();
        self.sink
            .set_vector3(bindings::TRANSFORM_POSITION, owner.translation);
        self.sink
            .set_vector3(bindings::TRANSFORM_ANGLES, owner.euler_angles_degrees());
        self.sink.set_vector3(bindings::TRANSFORM_SCALE, owner.scale);

        let feed_color;
        let constant_color;
        let color: &dyn VertexColor = match self.channels.color {
            ColorMode::CameraFeed => match self.camera_source.viewport_camera() {
                Some(camera) => {
                    feed_color = CameraFeedColor {
                        feed: self.feed.as_ref(),
                        camera,
                        owner,
                        orientation: self.camera_source.orientation(),
                    };
                    &feed_color
                }
                None => &NoColor,
            },
            ColorMode::Constant(c) => {
                constant_color = ConstantColor(c);
                &constant_color
            }
            ColorMode::Disabled => &NoColor,
        };

        let samples = sample_surface(&mesh, color, &self.options, rng);
        self.maps.refresh(&samples);
        self.publish();
        Some(samples.len())
    }

    /// Hands the complete, fully written set of maps to the renderer.
    fn publish(&mut self) {
        if let Some(position) = self.maps.position() {
            self.sink.set_texture(
                bindings::POSITION_MAP,
                VfxTexture::Float(Arc::clone(position)),
            );
        }
        if self.channels.normals {
            if let Some(normal) = self.maps.normal() {
                self.sink
                    .set_texture(bindings::NORMAL_MAP, VfxTexture::Float(Arc::clone(normal)));
            }
        }
        if self.channels.color != ColorMode::Disabled {
            if let Some(color) = self.maps.color() {
                self.sink
                    .set_texture(bindings::COLOR_MAP, VfxTexture::Float(Arc::clone(color)));
            }
        }
    }

    /// The current attribute maps.
    #[must_use]
    pub fn maps(&self) -> &AttributeMaps {
        &self.maps
    }

    /// The sampling options.
    #[must_use]
    pub fn options(&self) -> &SamplerOptions {
        &self.options
    }

    /// Updates the sampling options for subsequent ticks.
    pub fn set_options(&mut self, options: SamplerOptions) {
        self.options = options;
    }

    /// The renderer sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The renderer sink, mutably.
    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
