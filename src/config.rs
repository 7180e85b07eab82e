//! # Corrective Sets
//!
//! Configurable mapping from corrective-shape names to the trigger poses
//! that drive them, loaded from JSON.
//!
//! JSON shape:
//! {
//!   "default_remap": { "from_x": 0.5, "from_y": 1.0, "to_x": 0.0, "to_y": 1.0 },
//!   "correctives": [
//!     {
//!       "name": "browRaise_eyesClosed_cor",
//!       "poses": [
//!         { "name": "browRaise", "trigger_weight": 1.0 },
//!         { "name": "eyesClosed", "trigger_weight": 1.0 }
//!       ],
//!       "remap": { "from_x": 0.7 }
//!     }
//!   ]
//! }
//!
//! - Per-corrective `remap` is optional and falls back to `default_remap`.
//! - A pose missing from the supplied current weights counts as 0.0, the
//!   host default for an unconnected input.
//! - Falls back to a built-in `default_seed()` when the file is missing or
//!   invalid.

use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path};

use crate::remap::RemapRange;
use crate::trigger::{evaluate, PoseWeight, TriggerEvaluation};

/// One pose a corrective listens to, and the weight that pose must reach.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoseTarget {
    pub name: String,
    #[serde(default)]
    pub trigger_weight: f32,
}

/// A corrective shape and its trigger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Corrective {
    pub name: String,
    #[serde(default)]
    pub poses: Vec<PoseTarget>,
    /// Optional per-corrective remap; `None` uses the set-wide default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remap: Option<RemapRange>,
}

/// The full corrective set, loaded from JSON or seeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectiveSetConfig {
    #[serde(default)]
    pub default_remap: RemapRange,
    #[serde(default)]
    pub correctives: Vec<Corrective>,
}

/// Per-corrective result row returned by `evaluate_all`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectiveOutput {
    pub corrective: String,
    pub total_offset: f32,
    pub activation: f32,
    pub weight: f32,
}

impl CorrectiveSetConfig {
    /// Load configuration from a JSON file.
    /// Falls back to `default_seed()` on error.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(path) {
            Ok(s) => serde_json::from_str(&s).unwrap_or_else(|_| Self::default_seed()),
            Err(_) => Self::default_seed(),
        }
    }

    /// Look up one corrective by name.
    pub fn corrective(&self, name: &str) -> Option<&Corrective> {
        self.correctives.iter().find(|c| c.name == name)
    }

    /// Evaluate one corrective against the supplied current pose weights.
    pub fn evaluate_one(
        &self,
        corrective: &Corrective,
        current: &HashMap<String, f32>,
    ) -> TriggerEvaluation {
        let poses: Vec<PoseWeight> = corrective
            .poses
            .iter()
            .map(|p| {
                let now = current.get(&p.name).copied().unwrap_or(0.0);
                PoseWeight::new(&p.name, p.trigger_weight, now)
            })
            .collect();
        let remap = corrective.remap.unwrap_or(self.default_remap);
        evaluate(&poses, &remap)
    }

    /// Evaluate every configured corrective against the supplied current
    /// pose weights.
    pub fn evaluate_all(&self, current: &HashMap<String, f32>) -> Vec<CorrectiveOutput> {
        self.correctives
            .iter()
            .map(|c| {
                let eval = self.evaluate_one(c, current);
                CorrectiveOutput {
                    corrective: c.name.clone(),
                    total_offset: eval.total_offset,
                    activation: eval.activation,
                    weight: eval.weight,
                }
            })
            .collect()
    }

    /// Built-in seed with common facial combination correctives.
    /// Used as fallback if no config is found.
    pub(crate) fn default_seed() -> Self {
        let correctives = vec![
            Corrective {
                name: "browRaise_eyesClosed_cor".to_string(),
                poses: vec![
                    PoseTarget {
                        name: "browRaise".to_string(),
                        trigger_weight: 1.0,
                    },
                    PoseTarget {
                        name: "eyesClosed".to_string(),
                        trigger_weight: 1.0,
                    },
                ],
                remap: None,
            },
            Corrective {
                name: "jawOpen_mouthSmile_cor".to_string(),
                poses: vec![
                    PoseTarget {
                        name: "jawOpen".to_string(),
                        trigger_weight: 1.0,
                    },
                    PoseTarget {
                        name: "mouthSmile".to_string(),
                        trigger_weight: 1.0,
                    },
                ],
                remap: Some(RemapRange::new(0.7, 1.0, 0.0, 1.0)),
            },
            Corrective {
                name: "mouthPucker_cor".to_string(),
                poses: vec![PoseTarget {
                    name: "mouthPucker".to_string(),
                    trigger_weight: 1.0,
                }],
                remap: None,
            },
        ];

        Self {
            default_remap: RemapRange::default(),
            correctives,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    const TOL: f32 = 1e-4;

    /// Create a unique temporary directory in std::env::temp_dir().
    fn unique_tmp_dir() -> PathBuf {
        let mut dir = std::env::temp_dir();
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        dir.push(format!("corrective_sets_test_{}", nanos));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_falls_back_to_seed() {
        let cfg = CorrectiveSetConfig::load_from_file("definitely/not/here.json");
        assert!(!cfg.correctives.is_empty());
        assert!(cfg.corrective("browRaise_eyesClosed_cor").is_some());
    }

    #[test]
    fn loads_from_file() {
        let tmpdir = unique_tmp_dir();
        let path = tmpdir.join("corrective_sets.json");
        {
            let mut f = fs::File::create(&path).unwrap();
            write!(
                f,
                r#"{{
                    "correctives": [
                        {{ "name": "squint_cor",
                           "poses": [ {{ "name": "squint", "trigger_weight": 1.0 }} ] }}
                    ]
                }}"#
            )
            .unwrap();
            f.sync_all().unwrap();
        }

        let cfg = CorrectiveSetConfig::load_from_file(&path);
        assert_eq!(cfg.correctives.len(), 1);
        assert!(cfg.corrective("squint_cor").is_some());
        // Omitted default_remap deserializes to the host defaults.
        assert_eq!(cfg.default_remap, RemapRange::default());

        let _ = fs::remove_file(&path);
        let _ = fs::remove_dir_all(&tmpdir);
    }

    #[test]
    fn missing_pose_weight_counts_as_zero() {
        let cfg = CorrectiveSetConfig::default_seed();
        // No current weights at all: every pose sits at 0.0, far from its
        // 1.0 trigger, so every corrective stays off.
        let out = cfg.evaluate_all(&HashMap::new());
        assert_eq!(out.len(), cfg.correctives.len());
        for row in &out {
            assert!((row.weight - 0.0).abs() < TOL, "{} should be off", row.corrective);
        }
    }

    #[test]
    fn matching_weights_trigger_their_corrective() {
        let cfg = CorrectiveSetConfig::default_seed();
        let mut current = HashMap::new();
        current.insert("browRaise".to_string(), 1.0);
        current.insert("eyesClosed".to_string(), 1.0);

        let out = cfg.evaluate_all(&current);
        let brow = out
            .iter()
            .find(|o| o.corrective == "browRaise_eyesClosed_cor")
            .unwrap();
        assert!((brow.weight - 1.0).abs() < TOL);

        // The jaw corrective saw none of its poses move.
        let jaw = out
            .iter()
            .find(|o| o.corrective == "jawOpen_mouthSmile_cor")
            .unwrap();
        assert!((jaw.weight - 0.0).abs() < TOL);
    }

    #[test]
    fn per_corrective_remap_overrides_default() {
        let cfg = CorrectiveSetConfig::default_seed();
        let jaw = cfg.corrective("jawOpen_mouthSmile_cor").unwrap();

        // Halfway into both poses: total offset 1.0, activation 0.0.
        let mut current = HashMap::new();
        current.insert("jawOpen".to_string(), 0.5);
        current.insert("mouthSmile".to_string(), 0.5);

        let eval = cfg.evaluate_one(jaw, &current);
        assert!((eval.activation - 0.0).abs() < 1e-6);
        // Below the 0.7 remap floor, so still fully off.
        assert!((eval.weight - 0.0).abs() < TOL);
    }
}
