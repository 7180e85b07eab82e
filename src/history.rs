//! history.rs — simple in-memory log of recent evaluations for the debug
//! endpoints. Bounded; oldest entries are dropped first.

use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::trigger::TriggerEvaluation;

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub ts_unix: u64,
    /// Corrective name, or "adhoc" for direct /evaluate calls.
    pub corrective: String,
    pub total_offset: f32,
    pub weight: f32,
}

#[derive(Debug)]
pub struct History {
    inner: Mutex<Vec<HistoryEntry>>,
    cap: usize,
}

impl History {
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(cap.min(10_000))),
            cap: cap.min(10_000),
        }
    }

    pub fn push(&self, corrective: &str, eval: &TriggerEvaluation) {
        let entry = HistoryEntry {
            ts_unix: now_unix(),
            corrective: corrective.to_string(),
            total_offset: eval.total_offset,
            weight: eval.weight,
        };

        let mut v = self.inner.lock().expect("history mutex poisoned");
        v.push(entry);
        if v.len() > self.cap {
            let excess = v.len() - self.cap;
            v.drain(0..excess);
        }
    }

    pub fn snapshot_last_n(&self, n: usize) -> Vec<HistoryEntry> {
        let v = self.inner.lock().expect("history mutex poisoned");
        let len = v.len();
        let start = len.saturating_sub(n);
        v[start..].to_vec()
    }
}

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
