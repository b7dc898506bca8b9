use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One group of a categorical breakdown (payer, client, status).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentTotal {
    pub name: String,
    pub total: f64,
}

/// Group records by a categorical key and sum a numeric field per group.
///
/// Blank or whitespace-only keys normalize to "Unknown". Output preserves
/// first-seen order; callers sort or truncate per use case.
pub fn aggregate_sum<T, K, V>(records: &[&T], key_fn: K, value_fn: V) -> Vec<SegmentTotal>
where
    K: Fn(&T) -> &str,
    V: Fn(&T) -> f64,
{
    let mut order: Vec<SegmentTotal> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let raw = key_fn(record).trim();
        let key = if raw.is_empty() { "Unknown" } else { raw };

        match index.get(key) {
            Some(&i) => order[i].total += value_fn(record),
            None => {
                index.insert(key.to_string(), order.len());
                order.push(SegmentTotal {
                    name: key.to_string(),
                    total: value_fn(record),
                });
            }
        }
    }

    order
}

/// Descending-by-total view truncated to the `n` largest groups. The sort
/// is stable, so equal totals keep their first-seen order.
pub fn top_by_total(mut segments: Vec<SegmentTotal>, n: usize) -> Vec<SegmentTotal> {
    segments.sort_by(|a, b| b.total.total_cmp(&a.total));
    segments.truncate(n);
    segments
}

/// Drop groups whose sum is not positive (the payer-breakdown chart hides
/// zero bars).
pub fn with_positive_totals(segments: Vec<SegmentTotal>) -> Vec<SegmentTotal> {
    segments.into_iter().filter(|s| s.total > 0.0).collect()
}

/// One page of a segment list, 1-based. Out-of-range pages are empty.
pub fn page(segments: &[SegmentTotal], page: usize, per_page: usize) -> &[SegmentTotal] {
    if page == 0 || per_page == 0 {
        return &[];
    }
    let start = (page - 1) * per_page;
    if start >= segments.len() {
        return &[];
    }
    let end = (start + per_page).min(segments.len());
    &segments[start..end]
}
