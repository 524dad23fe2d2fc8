use std::collections::HashMap;

use crate::model::snapshot::Snapshot;

const TOP_WORDS: usize = 5;

/// One entry of the most-contributed-words ranking.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
    pub percentage: f64,
}

/// Aggregate figures over a snapshot.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct SnapshotStats {
    pub total: usize,
    pub unique: usize,
    pub connections: usize,
    pub span_minutes: u64,
    pub top: Vec<WordCount>,
}

impl SnapshotStats {
    pub fn from_snapshot(snapshot: &Snapshot) -> Self {
        let total = snapshot.len();
        if total == 0 {
            return Self::default();
        }

        // Keep first-seen order so ties rank deterministically.
        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for w in snapshot.chronological() {
            let key = w.text.trim().to_lowercase();
            let slot = counts.entry(key.clone()).or_insert(0);
            if *slot == 0 {
                order.push(key);
            }
            *slot += 1;
        }

        let mut ranked: Vec<(String, usize)> = order
            .into_iter()
            .map(|k| {
                let c = counts.get(&k).copied().unwrap_or(0);
                (k, c)
            })
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));

        let timestamps = snapshot.iter().filter_map(|w| w.timestamp);
        let span_minutes = match (timestamps.clone().min(), timestamps.max()) {
            (Some(lo), Some(hi)) => (hi - lo) / 1000 / 60,
            _ => 0,
        };

        Self {
            total,
            unique: ranked.len(),
            connections: total.saturating_sub(1),
            span_minutes,
            top: ranked
                .into_iter()
                .take(TOP_WORDS)
                .map(|(word, count)| WordCount {
                    word,
                    count,
                    percentage: count as f64 / total as f64 * 100.0,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/stats.rs"]
mod tests;
