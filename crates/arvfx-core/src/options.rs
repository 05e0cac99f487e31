//! Configuration options for the particle pipelines.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options shared by every pipeline in a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Mesh sampling options.
    pub sampler: SamplerOptions,

    /// Depth reconstruction options.
    pub depth: DepthOptions,
}

impl Options {
    /// Parses options from a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Serializes the options as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Knobs for stochastic surface sampling.
///
/// Neither value is validated: a density of zero or below simply
/// produces no samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerOptions {
    /// Hard cap on the number of emitted sample points.
    pub max_points: u32,

    /// Requested samples per unit of surface area.
    pub point_per_area: f32,
}

impl Default for SamplerOptions {
    fn default() -> Self {
        Self {
            max_points: 4096,
            point_per_area: 100.0,
        }
    }
}

impl SamplerOptions {
    /// Sets the point budget.
    #[must_use]
    pub fn with_max_points(mut self, max_points: u32) -> Self {
        self.max_points = max_points;
        self
    }

    /// Sets the sampling density.
    #[must_use]
    pub fn with_point_per_area(mut self, point_per_area: f32) -> Self {
        self.point_per_area = point_per_area;
        self
    }
}

/// How a raw depth sample is interpreted before unprojection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DepthEncoding {
    /// The sample already is a normalized-device-coordinate depth.
    #[default]
    Ndc,
    /// The sample is a metric distance along the view axis and is encoded
    /// with the projection matrix first.
    Linear,
}

/// Which binding name the forwarded stencil texture is published under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StencilBinding {
    /// `"Human Stencil Map"`.
    #[default]
    Human,
    /// `"Stencil Map"`.
    Plain,
}

/// Knobs for depth-based position reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DepthOptions {
    /// Interpretation of the depth samples.
    pub encoding: DepthEncoding,

    /// Binding name for the forwarded stencil image.
    pub stencil_binding: StencilBinding,

    /// Work-group size (x, y) used to partition the per-pixel work.
    pub group_size: [u32; 2],
}

impl Default for DepthOptions {
    fn default() -> Self {
        Self {
            encoding: DepthEncoding::Ndc,
            stencil_binding: StencilBinding::Human,
            group_size: [8, 8],
        }
    }
}
