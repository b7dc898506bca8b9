use crate::schema::AgingRecord;
use serde::{Deserialize, Serialize};

/// Days-outstanding buckets for the AR aging breakdown.
///
/// Boundary semantics: 90 days falls in `Days61To90`; the last bucket
/// starts at 91. Values between the integer edges (e.g. 90.5) are skipped,
/// matching the integer-interval membership checks of the data feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgingBucket {
    Days0To30,
    Days31To60,
    Days61To90,
    Days90Plus,
}

impl AgingBucket {
    pub const ALL: [AgingBucket; 4] = [
        AgingBucket::Days0To30,
        AgingBucket::Days31To60,
        AgingBucket::Days61To90,
        AgingBucket::Days90Plus,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgingBucket::Days0To30 => "0-30 Days",
            AgingBucket::Days31To60 => "31-60 Days",
            AgingBucket::Days61To90 => "61-90 Days",
            AgingBucket::Days90Plus => "90+ Days",
        }
    }

    /// Bucket for a days-outstanding value; `None` for negative,
    /// non-finite, or between-edge values.
    pub fn for_days(days: f64) -> Option<AgingBucket> {
        if !days.is_finite() || days < 0.0 {
            return None;
        }
        if days <= 30.0 {
            Some(AgingBucket::Days0To30)
        } else if (31.0..=60.0).contains(&days) {
            Some(AgingBucket::Days31To60)
        } else if (61.0..=90.0).contains(&days) {
            Some(AgingBucket::Days61To90)
        } else if days >= 91.0 {
            Some(AgingBucket::Days90Plus)
        } else {
            None
        }
    }
}

/// One slice of the aging breakdown: the bucket's summed amount and its
/// share of the overall total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgingSlice {
    pub bucket: AgingBucket,
    pub name: String,
    pub amount: f64,
    pub share_pct: f64,
}

/// Sum aging amounts into the four fixed buckets and express each as a
/// percentage of the total. All four buckets are always present,
/// zero-filled, so a chart legend never loses a slice.
pub fn aging_breakdown(records: &[&AgingRecord]) -> Vec<AgingSlice> {
    let mut amounts = [0.0_f64; 4];

    for record in records {
        if !record.aging_amount.is_finite() {
            continue;
        }
        if let Some(bucket) = AgingBucket::for_days(record.aging_days) {
            let idx = AgingBucket::ALL.iter().position(|b| *b == bucket).unwrap();
            amounts[idx] += record.aging_amount;
        }
    }

    let total: f64 = amounts.iter().sum();

    AgingBucket::ALL
        .iter()
        .zip(amounts)
        .map(|(bucket, amount)| AgingSlice {
            bucket: *bucket,
            name: bucket.label().to_string(),
            amount,
            share_pct: if total > 0.0 {
                amount / total * 100.0
            } else {
                0.0
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(days: f64, amount: f64) -> AgingRecord {
        AgingRecord {
            aging_days: days,
            aging_amount: amount,
            ..Default::default()
        }
    }

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(AgingBucket::for_days(0.0), Some(AgingBucket::Days0To30));
        assert_eq!(AgingBucket::for_days(30.0), Some(AgingBucket::Days0To30));
        assert_eq!(AgingBucket::for_days(31.0), Some(AgingBucket::Days31To60));
        assert_eq!(AgingBucket::for_days(60.0), Some(AgingBucket::Days31To60));
        assert_eq!(AgingBucket::for_days(61.0), Some(AgingBucket::Days61To90));
        // 90 exactly belongs to the third bucket, not the fourth
        assert_eq!(AgingBucket::for_days(90.0), Some(AgingBucket::Days61To90));
        assert_eq!(AgingBucket::for_days(91.0), Some(AgingBucket::Days90Plus));
        assert_eq!(AgingBucket::for_days(365.0), Some(AgingBucket::Days90Plus));
        assert_eq!(AgingBucket::for_days(-1.0), None);
        assert_eq!(AgingBucket::for_days(90.5), None);
    }

    #[test]
    fn test_breakdown_shares() {
        let rows = [
            record(10.0, 100.0),
            record(45.0, 300.0),
            record(90.0, 100.0),
            record(120.0, 500.0),
        ];
        let refs: Vec<&AgingRecord> = rows.iter().collect();
        let slices = aging_breakdown(&refs);

        assert_eq!(slices.len(), 4);
        assert_eq!(slices[0].amount, 100.0);
        assert_eq!(slices[1].amount, 300.0);
        assert_eq!(slices[2].amount, 100.0);
        assert_eq!(slices[3].amount, 500.0);
        assert!((slices[3].share_pct - 50.0).abs() < 1e-9);
        assert!((slices[0].share_pct - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_input_keeps_all_buckets() {
        let slices = aging_breakdown(&[]);
        assert_eq!(slices.len(), 4);
        for slice in slices {
            assert_eq!(slice.amount, 0.0);
            assert_eq!(slice.share_pct, 0.0);
        }
    }

    #[test]
    fn test_zero_total_yields_zero_shares() {
        let rows = [record(10.0, 0.0)];
        let refs: Vec<&AgingRecord> = rows.iter().collect();
        let slices = aging_breakdown(&refs);
        assert!(slices.iter().all(|s| s.share_pct == 0.0));
    }
}
