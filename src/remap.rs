//! # Remap
//! Two-point linear remap used to tune the activation curve of a corrective.
//!
//! A `RemapRange` maps an input at `from_x` to `to_x` and an input at
//! `from_y` to `to_y`, linearly in between and clamped at the ends. The
//! divisor carries a small guard so a zero-width `from` range stays finite
//! instead of producing NaN/Inf. A `from_x > from_y` range flips the mapping
//! direction via the signed divisor; that behavior is kept as-is.

use serde::{Deserialize, Serialize};

/// Guard added to the remap divisor; keeps a zero-width range finite.
const DIV_GUARD: f32 = 1e-6;

fn default_from_x() -> f32 {
    0.5
}
fn default_from_y() -> f32 {
    1.0
}
fn default_to_x() -> f32 {
    0.0
}
fn default_to_y() -> f32 {
    1.0
}

/// Remap endpoints. Host defaults: `(0.5, 1.0) -> (0.0, 1.0)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemapRange {
    #[serde(default = "default_from_x")]
    pub from_x: f32,
    #[serde(default = "default_from_y")]
    pub from_y: f32,
    #[serde(default = "default_to_x")]
    pub to_x: f32,
    #[serde(default = "default_to_y")]
    pub to_y: f32,
}

impl Default for RemapRange {
    fn default() -> Self {
        Self {
            from_x: default_from_x(),
            from_y: default_from_y(),
            to_x: default_to_x(),
            to_y: default_to_y(),
        }
    }
}

impl RemapRange {
    pub fn new(from_x: f32, from_y: f32, to_x: f32, to_y: f32) -> Self {
        Self {
            from_x,
            from_y,
            to_x,
            to_y,
        }
    }

    /// Remap `x` from the `from` span onto the `to` span.
    pub fn apply(&self, x: f32) -> f32 {
        lerp(linear_step(x, self.from_x, self.from_y), self.to_x, self.to_y)
    }
}

/// Position of `x` inside `[edge0, edge1]`, clamped to `[0, 1]`.
pub fn linear_step(x: f32, edge0: f32, edge1: f32) -> f32 {
    ((x - edge0) / (edge1 - edge0 + DIV_GUARD)).clamp(0.0, 1.0)
}

/// Linear interpolation between `a` and `b`.
pub fn lerp(t: f32, a: f32, b: f32) -> f32 {
    (1.0 - t) * a + t * b
}
