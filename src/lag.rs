use crate::schema::{ChargeRecord, DenialRecord};
use chrono::NaiveDate;

/// Average day difference between two per-record dates, rounded to whole
/// days. Rows missing either date are ignored; no valid pairs means 0.
pub fn average_lag<T, F, G>(records: &[&T], from_fn: F, to_fn: G) -> i64
where
    F: Fn(&T) -> Option<NaiveDate>,
    G: Fn(&T) -> Option<NaiveDate>,
{
    let diffs: Vec<i64> = records
        .iter()
        .filter_map(|r| match (from_fn(r), to_fn(r)) {
            (Some(from), Some(to)) => Some((to - from).num_days()),
            _ => None,
        })
        .collect();

    if diffs.is_empty() {
        0
    } else {
        (diffs.iter().sum::<i64>() as f64 / diffs.len() as f64).round() as i64
    }
}

/// Days from service to charge posting.
pub fn charge_lag(charges: &[&ChargeRecord]) -> i64 {
    average_lag(charges, |r| r.date_of_service, |r| r.charge_entry_date)
}

/// Days from service to claim submission, taken from the denial-tracking
/// rows (the charges export has no submission date).
pub fn billing_lag(denials: &[&DenialRecord]) -> i64 {
    average_lag(denials, |r| r.date_of_service, |r| r.claim_submission_date)
}
