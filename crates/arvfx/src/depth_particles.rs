//! Particles spawned from a depth map (people occlusion, scene depth).

use std::sync::Arc;

use arvfx_core::{
    bindings, DepthOptions, FloatTexture, SensorFrame, SensorSource, VfxSink, VfxTexture,
};
use arvfx_sampling::reconstruct_positions;

/// Reconstructs a world-position map from each sensor frame and forwards
/// the stencil and color images alongside it.
pub struct DepthParticles<K, S> {
    source: K,
    sink: S,
    options: DepthOptions,
    position: Option<Arc<FloatTexture>>,
    frames: u64,
    running: bool,
}

impl<K, S> DepthParticles<K, S>
where
    K: SensorSource,
    S: VfxSink,
{
    /// Creates a stopped pipeline.
    pub fn new(source: K, sink: S, options: DepthOptions) -> Self {
        Self {
            source,
            sink,
            options,
            position: None,
            frames: 0,
            running: false,
        }
    }

    /// Starts reacting to ticks.
    pub fn start(&mut self) {
        self.running = true;
        log::info!(
            "depth particles started ({:?} depth, stencil bound to {:?})",
            self.options.encoding,
            self.options.stencil_binding.binding_name()
        );
    }

    /// Stops the pipeline, drops its position map, and releases the renderer.
    pub fn stop(&mut self) {
        self.running = false;
        self.position = None;
        self.sink.release();
        log::info!("depth particles stopped after {} frames", self.frames);
    }

    /// Returns whether the pipeline is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Processes the latest sensor frame.
    ///
    /// Returns `false` when the frame was skipped: stopped, or depth,
    /// stencil, or camera matrices missing. A skipped frame publishes
    /// nothing, so the renderer keeps the previous maps.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        let SensorFrame {
            matrices,
            depth,
            stencil,
            color,
        } = self.source.latest_frame();
        let (Some(depth), Some(stencil), Some(matrices)) = (depth, stencil, matrices) else {
            log::trace!("sensor frame incomplete, keeping previous maps");
            return false;
        };

        let texture = self
            .position
            .get_or_insert_with(|| Arc::new(FloatTexture::new(depth.width(), depth.height())));
        reconstruct_positions(&depth, &matrices, &self.options, Arc::make_mut(texture));
        self.frames += 1;

        self.sink.set_texture(
            bindings::POSITION_MAP,
            VfxTexture::Float(Arc::clone(texture)),
        );
        if let Some(color) = color {
            self.sink
                .set_texture(bindings::COLOR_MAP, VfxTexture::Color(color));
        }
        self.sink.set_texture(
            self.options.stencil_binding.binding_name(),
            VfxTexture::Stencil(stencil),
        );
        true
    }

    /// The most recent position map.
    #[must_use]
    pub fn position_map(&self) -> Option<&Arc<FloatTexture>> {
        self.position.as_ref()
    }

    /// Number of frames reconstructed since creation.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The depth options.
    #[must_use]
    pub fn options(&self) -> &DepthOptions {
        &self.options
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
