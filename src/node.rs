//! # Trigger Node
//! Host-graph adapter around the pure evaluator.
//!
//! Rig hosts hand pose entries over as an array keyed by logical index,
//! where index order carries no meaning, indices may be sparse, and unset
//! fields fall back to defaults (empty name, 0.0 weights). The node follows
//! the host's pull model: every input change marks it dirty, and the output
//! is re-derived in full on the next pull and served from cache until the
//! next change. The evaluator itself stays stateless; caching lives here.

use std::collections::BTreeMap;

use crate::remap::RemapRange;
use crate::trigger::{evaluate, PoseWeight, TriggerEvaluation};

#[derive(Debug, Clone, Default)]
pub struct TriggerNode {
    poses: BTreeMap<u32, PoseWeight>,
    remap: RemapRange,
    cached: Option<TriggerEvaluation>,
}

impl TriggerNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry at `index`, created with host defaults if unset.
    fn entry_mut(&mut self, index: u32) -> &mut PoseWeight {
        self.cached = None;
        self.poses.entry(index).or_default()
    }

    pub fn set_pose_name(&mut self, index: u32, name: impl Into<String>) {
        self.entry_mut(index).name = name.into();
    }

    pub fn set_trigger_weight(&mut self, index: u32, weight: f32) {
        self.entry_mut(index).trigger_weight = weight;
    }

    pub fn set_current_weight(&mut self, index: u32, weight: f32) {
        self.entry_mut(index).current_weight = weight;
    }

    pub fn remove_pose(&mut self, index: u32) {
        self.cached = None;
        self.poses.remove(&index);
    }

    pub fn set_remap(&mut self, remap: RemapRange) {
        self.cached = None;
        self.remap = remap;
    }

    pub fn pose_count(&self) -> usize {
        self.poses.len()
    }

    /// True until the next `pull()` recomputes the output.
    pub fn is_dirty(&self) -> bool {
        self.cached.is_none()
    }

    /// Pull the full evaluation, recomputing only if an input changed since
    /// the last pull.
    pub fn pull(&mut self) -> TriggerEvaluation {
        if let Some(eval) = self.cached {
            return eval;
        }
        let poses: Vec<PoseWeight> = self.poses.values().cloned().collect();
        let eval = evaluate(&poses, &self.remap);
        tracing::debug!(
            total_offset = eval.total_offset,
            weight = eval.weight,
            "trigger node recompute"
        );
        self.cached = Some(eval);
        eval
    }

    /// Pull just the output scalar.
    pub fn output(&mut self) -> f32 {
        self.pull().weight
    }
}
