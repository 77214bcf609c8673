//! Caller-supplied layout tuning.

use serde::{Deserialize, Serialize};

use crate::graph::NodeId;

/// Node spacing: a single distance, or separate horizontal and vertical
/// distances for layered layouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Spacing {
    Uniform(f64),
    Axes { x: f64, y: f64 },
}

impl Spacing {
    pub fn horizontal(&self) -> f64 {
        match *self {
            Spacing::Uniform(v) => v,
            Spacing::Axes { x, .. } => x,
        }
    }

    pub fn vertical(&self) -> Option<f64> {
        match *self {
            Spacing::Uniform(_) => None,
            Spacing::Axes { y, .. } => Some(y),
        }
    }
}

/// Options map accepted by every strategy. Each strategy reads only the
/// keys it understands; unset keys take the strategy default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutOptions {
    pub spacing: Option<Spacing>,
    pub vertical_spacing: Option<f64>,
    pub radius: Option<f64>,
    pub iterations: Option<usize>,
    pub repulsion: Option<f64>,
    pub attraction: Option<f64>,
    pub damping: Option<f64>,
    /// Seed for force-directed initial placement
    pub seed: Option<u64>,
    /// Hub for star layouts; the first node when unset or unknown
    pub hub: Option<NodeId>,
}

/// Upper bound on force-directed rounds; the simulation is quadratic per round.
pub const MAX_ITERATIONS: usize = 5_000;

/// Zero, negative and non-finite values are treated as unset.
fn usable(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

impl LayoutOptions {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }

    pub fn spacing_or(&self, default: f64) -> f64 {
        usable(self.spacing.map(|s| s.horizontal())).unwrap_or(default)
    }

    pub fn vertical_spacing_or(&self, default: f64) -> f64 {
        usable(self.vertical_spacing)
            .or_else(|| usable(self.spacing.and_then(|s| s.vertical())))
            .unwrap_or(default)
    }

    pub fn radius_or(&self, default: f64) -> f64 {
        usable(self.radius).unwrap_or(default)
    }

    pub fn repulsion_or(&self, default: f64) -> f64 {
        usable(self.repulsion).unwrap_or(default)
    }

    pub fn attraction_or(&self, default: f64) -> f64 {
        usable(self.attraction).unwrap_or(default)
    }

    pub fn damping_or(&self, default: f64) -> f64 {
        usable(self.damping).unwrap_or(default)
    }

    pub fn iterations_or(&self, default: usize) -> usize {
        let requested = self.iterations.unwrap_or(default);
        if requested > MAX_ITERATIONS {
            tracing::warn!(requested, max = MAX_ITERATIONS, "clamping force iterations");
        }
        requested.min(MAX_ITERATIONS)
    }
}
