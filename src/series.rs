use crate::schema::{ChargeRecord, DenialRecord, OpenArRecord};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const MONTH_ABBREVS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Calendar-month bucket key behind the "Jul 24" display labels.
///
/// Labels are not lexicographically sortable across year boundaries, so the
/// key orders by (year, month) and the 2-digit label year is reconstructed
/// into the 2000s when parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthLabel {
    year: i32,
    month: u32,
}

impl MonthLabel {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Parse an abbreviated-month label ("Jul 24", "Jul 2024"). Returns
    /// `None` for anything else.
    pub fn parse(label: &str) -> Option<Self> {
        let mut parts = label.split_whitespace();
        let name = parts.next()?;
        let year_part = parts.next()?;
        if parts.next().is_some() {
            return None;
        }

        let month = MONTH_ABBREVS
            .iter()
            .position(|m| m.eq_ignore_ascii_case(name))? as u32
            + 1;
        let raw_year: i32 = year_part.parse().ok()?;
        let year = if (0..100).contains(&raw_year) {
            2000 + raw_year
        } else {
            raw_year
        };

        Some(Self { year, month })
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }
}

impl fmt::Display for MonthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:02}",
            MONTH_ABBREVS[(self.month - 1) as usize],
            self.year.rem_euclid(100)
        )
    }
}

/// One point of a monthly trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthPoint {
    pub month: String,
    pub value: f64,
}

/// Bucket records by month and apply a metric per bucket, in chronological
/// order.
///
/// The builder is metric-agnostic: `month_fn` names the bucket (records
/// yielding `None` are skipped) and `metric_fn` reduces one bucket to a
/// value. Months with zero records are absent from the output, never
/// interpolated.
pub fn build_series<T, M, F>(records: &[&T], month_fn: M, metric_fn: F) -> Vec<MonthPoint>
where
    M: Fn(&T) -> Option<MonthLabel>,
    F: Fn(&[&T]) -> f64,
{
    let mut buckets: BTreeMap<MonthLabel, Vec<&T>> = BTreeMap::new();
    for record in records {
        if let Some(label) = month_fn(record) {
            buckets.entry(label).or_default().push(record);
        }
    }

    buckets
        .into_iter()
        .map(|(label, rows)| MonthPoint {
            month: label.to_string(),
            value: metric_fn(&rows),
        })
        .collect()
}

// Standard per-bucket metrics for the KPI sparklines. Each mirrors the
// full-period formula restricted to one month's rows.

pub fn monthly_gcr(rows: &[&ChargeRecord]) -> f64 {
    let paid: f64 = rows.iter().map(|r| r.paid_amount).sum();
    let billed: f64 = rows.iter().map(|r| r.billed_amount).sum();
    if billed > 0.0 {
        paid / billed * 100.0
    } else {
        0.0
    }
}

pub fn monthly_ncr(rows: &[&ChargeRecord]) -> f64 {
    let paid: f64 = rows.iter().map(|r| r.paid_amount).sum();
    let allowed: f64 = rows
        .iter()
        .map(|r| r.billed_amount - r.adjustment_amount)
        .sum();
    if allowed > 0.0 {
        paid / allowed * 100.0
    } else {
        0.0
    }
}

pub fn monthly_clean_claim_rate(rows: &[&ChargeRecord]) -> f64 {
    let values: Vec<f64> = rows
        .iter()
        .filter_map(|r| r.clean_claim_score)
        .filter(|v| (0.0..=100.0).contains(v))
        .collect();
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

pub fn monthly_claim_volume(rows: &[&ChargeRecord]) -> f64 {
    rows.iter().map(|r| r.visit_count as f64).sum()
}

pub fn monthly_denial_rate(rows: &[&DenialRecord]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let denied = rows.iter().filter(|r| r.is_denied()).count();
    denied as f64 / rows.len() as f64 * 100.0
}

pub fn monthly_first_pass_rate(rows: &[&DenialRecord]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    let passed = rows.iter().filter(|r| r.first_pass_resolution).count();
    passed as f64 / rows.len() as f64 * 100.0
}

/// Average AR days for one month's rows, rounded to whole days. Negative
/// values are excluded rather than dragging the mean below zero.
pub fn monthly_avg_ar_days(rows: &[&OpenArRecord]) -> f64 {
    let values: Vec<f64> = rows
        .iter()
        .map(|r| r.ar_days)
        .filter(|v| v.is_finite() && *v >= 0.0)
        .collect();
    if values.is_empty() {
        0.0
    } else {
        (values.iter().sum::<f64>() / values.len() as f64).round()
    }
}
