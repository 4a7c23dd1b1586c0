use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::categories::FPS_KEY;

// ── Entry model ─────────────────────────────────────────────────────────────

/// Wire shape of one record in the results file. `Final-Score` is kept
/// optional here so its absence surfaces as a validation error naming
/// the entry instead of a bare serde error.
#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(rename = "LLM")]
    llm: String,
    #[serde(rename = "Final-Score")]
    final_score: Option<f64>,
    #[serde(flatten)]
    points: serde_json::Map<String, Value>,
}

/// One model's benchmark record: identifier, validated total, and the
/// per-category score fields.
#[derive(Debug, Clone)]
pub struct Entry {
    pub llm: String,
    pub final_score: f64,
    points: serde_json::Map<String, Value>,
}

impl Entry {
    /// Category value with get-or-default semantics: an absent or
    /// non-numeric `point_N` field reads as 0.
    pub fn point(&self, key: &str) -> f64 {
        self.points.get(key).and_then(Value::as_f64).unwrap_or(0.0)
    }

    fn has_point(&self, key: &str) -> bool {
        self.points.contains_key(key)
    }
}

// ── Loading ─────────────────────────────────────────────────────────────────

pub fn load_entries(path: &Path) -> Result<Vec<Entry>, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("reading {}: {}", path.display(), e))?;
    parse_entries(&content).map_err(|e| format!("{}: {}", path.display(), e))
}

pub(crate) fn parse_entries(json: &str) -> Result<Vec<Entry>, String> {
    let raw: Vec<RawEntry> = serde_json::from_str(json).map_err(|e| format!("parsing: {}", e))?;
    raw.into_iter()
        .map(|r| match r.final_score {
            Some(final_score) => Ok(Entry {
                llm: r.llm,
                final_score,
                points: r.points,
            }),
            None => Err(format!("entry '{}' is missing Final-Score", r.llm)),
        })
        .collect()
}

// ── Transforms ──────────────────────────────────────────────────────────────

/// Fold the FPS category out of the totals: every entry that has a
/// `point_17` field has that value subtracted from `Final-Score`.
/// Entries without the field are unchanged.
pub fn strip_fps_scores(entries: &mut [Entry]) {
    for entry in entries.iter_mut() {
        if entry.has_point(FPS_KEY) {
            entry.final_score -= entry.point(FPS_KEY);
        }
    }
}

/// Stable descending order by total score; equal totals keep their
/// relative input order.
pub fn sort_by_final_score(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));
}
