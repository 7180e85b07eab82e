//! # Trigger Evaluator
//! Pure, testable logic that maps `(pose weights, remap range)` → corrective
//! trigger weight. No I/O, no state, suitable for unit tests and offline
//! evaluation.
//!
//! A corrective is fully triggered when every tracked pose sits exactly at
//! its trigger weight: the summed absolute deviation is 0 and the raw
//! activation is 1.0. As poses drift away the activation falls, below zero
//! for large deviations. Clamping is the remap step's job, never done here.

use serde::{Deserialize, Serialize};

use crate::remap::RemapRange;

/// One tracked pose: the weight it must reach for the corrective to fire,
/// and the weight it currently has. The name is carried for diagnostics
/// only; it plays no part in the arithmetic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PoseWeight {
    pub name: String,
    #[serde(default)]
    pub trigger_weight: f32,
    #[serde(default)]
    pub current_weight: f32,
}

impl PoseWeight {
    pub fn new(name: impl Into<String>, trigger_weight: f32, current_weight: f32) -> Self {
        Self {
            name: name.into(),
            trigger_weight,
            current_weight,
        }
    }

    /// Signed distance of the pose from its trigger weight.
    #[inline]
    pub fn offset(&self) -> f32 {
        self.current_weight - self.trigger_weight
    }
}

/// Evaluation output including the intermediate terms, so callers can
/// surface them for diagnostics. `weight` is the final remapped value fed
/// to the corrective shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerEvaluation {
    /// Sum of absolute per-pose deviations from the trigger configuration.
    pub total_offset: f32,
    /// Raw activation `1.0 - total_offset`, unclamped.
    pub activation: f32,
    /// Activation passed through the remap range.
    pub weight: f32,
}

/// Main function: aggregate how far the current pose weights sit from the
/// trigger configuration and remap the inverted deviation into the
/// corrective activation weight. Order of `poses` does not matter; an empty
/// slice counts as zero deviation.
pub fn evaluate(poses: &[PoseWeight], remap: &RemapRange) -> TriggerEvaluation {
    let total_offset: f32 = poses.iter().map(|p| p.offset().abs()).sum();

    let activation = 1.0 - total_offset;
    let weight = remap.apply(activation);

    TriggerEvaluation {
        total_offset,
        activation,
        weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_remap() -> RemapRange {
        RemapRange::new(0.0, 1.0, 0.0, 1.0)
    }

    #[test]
    fn matching_weights_fully_activate() {
        let poses = vec![
            PoseWeight::new("browRaise", 1.0, 1.0),
            PoseWeight::new("eyesClosed", 0.5, 0.5),
        ];
        let eval = evaluate(&poses, &unit_remap());
        assert_eq!(eval.total_offset, 0.0);
        assert_eq!(eval.activation, 1.0);
    }

    #[test]
    fn empty_input_counts_as_zero_deviation() {
        let eval = evaluate(&[], &unit_remap());
        assert_eq!(eval.total_offset, 0.0);
        assert_eq!(eval.activation, 1.0);
    }

    #[test]
    fn deviation_direction_does_not_matter() {
        let over = vec![PoseWeight::new("jawOpen", 0.5, 0.8)];
        let under = vec![PoseWeight::new("jawOpen", 0.5, 0.2)];
        let a = evaluate(&over, &unit_remap());
        let b = evaluate(&under, &unit_remap());
        assert!((a.total_offset - b.total_offset).abs() < f32::EPSILON);
        assert!((a.total_offset - 0.3).abs() < 1e-6);
    }

    #[test]
    fn deviations_accumulate_across_poses() {
        let poses = vec![
            PoseWeight::new("browRaise", 1.0, 0.6),
            PoseWeight::new("eyesClosed", 1.0, 0.9),
        ];
        let eval = evaluate(&poses, &unit_remap());
        assert!((eval.total_offset - 0.5).abs() < 1e-6);
        assert!((eval.activation - 0.5).abs() < 1e-6);
    }

    #[test]
    fn activation_can_go_negative_before_remap() {
        let poses = vec![PoseWeight::new("browRaise", 1.0, -1.0)];
        let eval = evaluate(&poses, &unit_remap());
        assert!((eval.activation - (-1.0)).abs() < 1e-6);
        // The unit remap clamps the final weight at its low end.
        assert!((eval.weight - 0.0).abs() < 1e-4);
    }
}
