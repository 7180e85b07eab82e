use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::config::{CorrectiveOutput, CorrectiveSetConfig};
use crate::history::History;
use crate::metrics;
use crate::remap::RemapRange;
use crate::trigger::{self, PoseWeight, TriggerEvaluation};

/// Config file read from the working directory, like the rest of the rig
/// tooling expects.
pub const DEFAULT_CONFIG_PATH: &str = "corrective_sets.json";

#[derive(Clone)]
pub struct AppState {
    correctives: Arc<RwLock<CorrectiveSetConfig>>,
    history: Arc<History>,
}

pub fn create_router() -> Router {
    let cfg = CorrectiveSetConfig::load_from_file(DEFAULT_CONFIG_PATH);

    let state = AppState {
        correctives: Arc::new(RwLock::new(cfg)),
        history: Arc::new(History::with_capacity(2000)),
    };

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/evaluate", post(evaluate_single))
        .route("/rig/evaluate", post(evaluate_rig))
        .route("/debug/history", get(debug_history))
        .route("/debug/corrective", get(debug_corrective))
        .route("/admin/reload-correctives", get(admin_reload_correctives))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct EvaluateReq {
    #[serde(default)]
    poses: Vec<PoseWeight>,
    /// Missing remap means host defaults.
    #[serde(default)]
    remap: Option<RemapRange>,
}

async fn evaluate_single(
    State(state): State<AppState>,
    Json(body): Json<EvaluateReq>,
) -> Json<TriggerEvaluation> {
    metrics::record_evaluation("single");

    let remap = body.remap.unwrap_or_default();
    let eval = trigger::evaluate(&body.poses, &remap);
    state.history.push("adhoc", &eval);
    Json(eval)
}

#[derive(serde::Deserialize)]
struct RigEvaluateReq {
    /// Current weight per pose control; poses not listed count as 0.0.
    #[serde(default)]
    weights: HashMap<String, f32>,
}

async fn evaluate_rig(
    State(state): State<AppState>,
    Json(body): Json<RigEvaluateReq>,
) -> Json<Vec<CorrectiveOutput>> {
    metrics::record_evaluation("rig");

    let outputs = {
        let guard = state.correctives.read().expect("rwlock poisoned");
        guard.evaluate_all(&body.weights)
    };

    for out in &outputs {
        state.history.push(
            &out.corrective,
            &TriggerEvaluation {
                total_offset: out.total_offset,
                activation: out.activation,
                weight: out.weight,
            },
        );
    }

    Json(outputs)
}

#[derive(serde::Serialize)]
struct HistoryOut {
    ts_unix: u64,
    corrective: String,
    total_offset: f32,
    weight: f32,
}

async fn debug_history(State(state): State<AppState>) -> Json<Vec<HistoryOut>> {
    let rows = state.history.snapshot_last_n(10);
    let out = rows
        .into_iter()
        .map(|h| HistoryOut {
            ts_unix: h.ts_unix,
            corrective: h.corrective,
            total_offset: h.total_offset,
            weight: h.weight,
        })
        .collect::<Vec<_>>();
    Json(out)
}

async fn debug_corrective(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> String {
    let name = q.get("name").cloned().unwrap_or_default();
    let guard = state.correctives.read().expect("rwlock poisoned");
    match guard.corrective(&name) {
        Some(c) => {
            let poses = c
                .poses
                .iter()
                .map(|p| format!("{}={:.2}", p.name, p.trigger_weight))
                .collect::<Vec<_>>()
                .join(", ");
            let remap = c.remap.unwrap_or(guard.default_remap);
            format!(
                "corrective='{}' -> poses [{}], remap ({:.2}, {:.2}) -> ({:.2}, {:.2})",
                c.name, poses, remap.from_x, remap.from_y, remap.to_x, remap.to_y
            )
        }
        None => format!("corrective='{}' not configured", name),
    }
}

async fn admin_reload_correctives(State(state): State<AppState>) -> String {
    let fresh = CorrectiveSetConfig::load_from_file(DEFAULT_CONFIG_PATH);
    match state.correctives.write() {
        Ok(mut c) => {
            tracing::info!(correctives = fresh.correctives.len(), "corrective set reloaded");
            *c = fresh;
            "reloaded".to_string()
        }
        Err(_) => "failed: lock poisoned".to_string(),
    }
}
