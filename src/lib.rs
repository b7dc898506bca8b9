//! # RCM KPI Engine
//!
//! Period-comparison KPI aggregation for healthcare revenue-cycle
//! dashboards: takes normalized claim / denial / open-AR / aging records,
//! splits them into a user-selected current period and a derived
//! equal-length previous period, and produces the ratio metrics, trend
//! classifications, monthly series, and categorical breakdowns the
//! dashboard renders.
//!
//! ## Core Concepts
//!
//! - **Period**: a contiguous inclusive date range. "Current" is
//!   user-selected; "previous" is the immediately preceding range of
//!   identical length, derived with zero gap and zero overlap.
//! - **KPI set**: the fixed ratio metrics (GCR, NCR, denial rate,
//!   first-pass rate, clean-claim rate, claim volume, open AR) for one
//!   period's filtered subsets. Every denominator is guarded; empty input
//!   yields all zeros, never an error.
//! - **Trend**: current vs. previous as an absolute difference with a
//!   per-metric "good direction", plus a separate percent-change variant
//!   for the detail views.
//! - **Monthly series**: records bucketed by calendar month ("Jul 24"
//!   labels) in true chronological order; missing months stay absent.
//!
//! The whole engine is a pure function of its inputs: no I/O, no shared
//! state, safe to re-run on every parameter change and discard stale
//! results.
//!
//! ## Example
//!
//! ```rust,ignore
//! use rcm_kpi_engine::*;
//! use chrono::NaiveDate;
//!
//! let dataset = ClientDataset::load_from_dir("data/entfw".as_ref());
//! let snapshot = DashboardSnapshot::compute(
//!     &dataset,
//!     NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2024, 9, 30).unwrap(),
//! );
//!
//! println!("GCR {:.2}% ({:?})", snapshot.current.gcr, snapshot.trends.gcr.color);
//! for point in &snapshot.sparklines.gcr {
//!     println!("{}: {:.1}", point.month, point.value);
//! }
//! ```

pub mod aging;
pub mod dataset;
pub mod error;
pub mod filter;
pub mod ingest;
pub mod kpi;
pub mod lag;
pub mod period;
pub mod schema;
pub mod segment;
pub mod series;
pub mod trend;
pub mod utils;

#[cfg(feature = "chatbot")]
pub mod chat;

pub use aging::{aging_breakdown, AgingBucket, AgingSlice};
pub use dataset::{ClientDataset, RecordKind};
pub use error::{RcmEngineError, Result};
pub use filter::{filter_by_date, partition_periods};
pub use ingest::*;
pub use kpi::KpiSet;
pub use lag::{average_lag, billing_lag, charge_lag};
pub use period::{resolve_periods, PeriodBounds, QuickFilter};
pub use schema::{AgingRecord, ChargeRecord, DenialRecord, OpenArRecord};
pub use segment::{aggregate_sum, top_by_total, with_positive_totals, SegmentTotal};
pub use series::{build_series, MonthLabel, MonthPoint};
pub use trend::{
    absolute_trend, percent_trend, PercentDirection, PercentTrend, Trend, TrendColor,
    TrendDirection,
};

#[cfg(feature = "chatbot")]
pub use chat::ChatClient;

use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Per-card trend classifications, each with its metric's polarity baked
/// in (a falling denial rate or lag is good; everything else is good when
/// rising).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiTrends {
    pub gcr: Trend,
    pub ncr: Trend,
    pub denial_rate: Trend,
    pub first_pass_rate: Trend,
    pub clean_claim_rate: Trend,
    pub total_claims: Trend,
    pub total_payments: Trend,
    pub charge_lag: Trend,
    pub billing_lag: Trend,
}

/// Monthly series backing each KPI card's sparkline, built from the
/// current-period subsets only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSparklines {
    pub gcr: Vec<MonthPoint>,
    pub ncr: Vec<MonthPoint>,
    pub denial_rate: Vec<MonthPoint>,
    pub first_pass_rate: Vec<MonthPoint>,
    pub clean_claim_rate: Vec<MonthPoint>,
    pub total_claims: Vec<MonthPoint>,
    pub ar_days: Vec<MonthPoint>,
}

/// One fully-computed dashboard view: everything the cards, trend lines,
/// and breakdown charts need for a single (dataset, date range)
/// invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub bounds: PeriodBounds,
    pub current: KpiSet,
    pub previous: KpiSet,
    pub trends: KpiTrends,
    pub sparklines: KpiSparklines,
    /// Payments summed per payer over the current period, first-seen order.
    pub payer_payments: Vec<SegmentTotal>,
    pub aging: Vec<AgingSlice>,
    pub charge_lag_days: i64,
    pub billing_lag_days: i64,
    pub avg_ar_days: i64,
}

impl DashboardSnapshot {
    /// Run the full pipeline for one inclusive `(start, end)` selection.
    ///
    /// Charges partition on their entry date; denials, open AR, and aging
    /// rows on their service date. Undated records match nothing.
    pub fn compute(dataset: &ClientDataset, start: NaiveDate, end: NaiveDate) -> Self {
        info!("Computing dashboard snapshot for {}..{}", start, end);

        let bounds = resolve_periods(start, end);

        let (cur_charges, prev_charges) =
            partition_periods(&dataset.charges, ChargeRecord::period_date, &bounds);
        let (cur_denials, prev_denials) =
            partition_periods(&dataset.denials, DenialRecord::period_date, &bounds);
        let (cur_ar, prev_ar) =
            partition_periods(&dataset.open_ar, OpenArRecord::period_date, &bounds);
        let (cur_aging, _prev_aging) =
            partition_periods(&dataset.aging, AgingRecord::period_date, &bounds);

        debug!(
            "Current counts: charges={}, denials={}, open_ar={}, aging={}",
            cur_charges.len(),
            cur_denials.len(),
            cur_ar.len(),
            cur_aging.len()
        );

        let current = KpiSet::calculate(&cur_charges, &cur_denials, &cur_ar);
        let previous = KpiSet::calculate(&prev_charges, &prev_denials, &prev_ar);

        let charge_lag_days = charge_lag(&cur_charges);
        let billing_lag_days = billing_lag(&cur_denials);
        let prev_charge_lag = charge_lag(&prev_charges);
        let prev_billing_lag = billing_lag(&prev_denials);

        let trends = KpiTrends {
            gcr: absolute_trend(current.gcr, previous.gcr, true),
            ncr: absolute_trend(current.ncr, previous.ncr, true),
            denial_rate: absolute_trend(current.denial_rate, previous.denial_rate, false),
            first_pass_rate: absolute_trend(
                current.first_pass_rate,
                previous.first_pass_rate,
                true,
            ),
            clean_claim_rate: absolute_trend(
                current.clean_claim_rate,
                previous.clean_claim_rate,
                true,
            ),
            total_claims: absolute_trend(
                current.total_claims as f64,
                previous.total_claims as f64,
                true,
            ),
            total_payments: absolute_trend(current.total_payments, previous.total_payments, true),
            charge_lag: absolute_trend(charge_lag_days as f64, prev_charge_lag as f64, false),
            billing_lag: absolute_trend(billing_lag_days as f64, prev_billing_lag as f64, false),
        };

        let sparklines = KpiSparklines {
            gcr: build_series(&cur_charges, |r| r.month_label(), series::monthly_gcr),
            ncr: build_series(&cur_charges, |r| r.month_label(), series::monthly_ncr),
            denial_rate: build_series(
                &cur_denials,
                |r| r.month_label(),
                series::monthly_denial_rate,
            ),
            first_pass_rate: build_series(
                &cur_denials,
                |r| r.month_label(),
                series::monthly_first_pass_rate,
            ),
            clean_claim_rate: build_series(
                &cur_charges,
                |r| r.month_label(),
                series::monthly_clean_claim_rate,
            ),
            total_claims: build_series(
                &cur_charges,
                |r| r.month_label(),
                series::monthly_claim_volume,
            ),
            ar_days: build_series(&cur_ar, |r| r.month_label(), series::monthly_avg_ar_days),
        };

        let payer_payments =
            aggregate_sum(&cur_charges, |r| r.payer_name.as_str(), |r| r.paid_amount);
        let aging = aging_breakdown(&cur_aging);
        let avg_ar_days = series::monthly_avg_ar_days(&cur_ar) as i64;

        DashboardSnapshot {
            bounds,
            current,
            previous,
            trends,
            sparklines,
            payer_payments,
            aging,
            charge_lag_days,
            billing_lag_days,
            avg_ar_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn charge(entry: NaiveDate, billed: f64, paid: f64, payer: &str) -> ChargeRecord {
        ChargeRecord {
            billed_amount: billed,
            paid_amount: paid,
            visit_count: 1,
            clean_claim_score: Some(90.0),
            payer_name: payer.to_string(),
            date_of_service: entry.checked_sub_days(chrono::Days::new(3)),
            charge_entry_date: Some(entry),
            ..Default::default()
        }
    }

    fn sample_dataset() -> ClientDataset {
        let mut dataset = ClientDataset::new();
        // Current period: July 2024
        dataset
            .charges
            .push(charge(ymd(2024, 7, 5), 1000.0, 800.0, "Aetna"));
        dataset
            .charges
            .push(charge(ymd(2024, 7, 20), 500.0, 300.0, "BCBS"));
        // Previous period: June 2024
        dataset
            .charges
            .push(charge(ymd(2024, 6, 10), 1000.0, 500.0, "Aetna"));
        // Outside both periods
        dataset
            .charges
            .push(charge(ymd(2024, 3, 1), 9999.0, 9999.0, "Cigna"));

        dataset.denials.push(DenialRecord {
            claim_status: "Denied".to_string(),
            first_pass_resolution: false,
            date_of_service: Some(ymd(2024, 7, 8)),
            claim_submission_date: Some(ymd(2024, 7, 18)),
            ..Default::default()
        });
        dataset.denials.push(DenialRecord {
            claim_status: "Paid".to_string(),
            first_pass_resolution: true,
            date_of_service: Some(ymd(2024, 7, 12)),
            claim_submission_date: Some(ymd(2024, 7, 20)),
            ..Default::default()
        });

        dataset.open_ar.push(OpenArRecord {
            open_ar_amount: 1500.0,
            ar_days: 42.0,
            date_of_service: Some(ymd(2024, 7, 3)),
            ..Default::default()
        });

        dataset.aging.push(AgingRecord {
            aging_days: 45.0,
            aging_amount: 700.0,
            date_of_service: Some(ymd(2024, 7, 3)),
            ..Default::default()
        });

        dataset
    }

    #[test]
    fn test_snapshot_partitions_isolate_periods() {
        let dataset = sample_dataset();
        let snapshot = DashboardSnapshot::compute(&dataset, ymd(2024, 7, 1), ymd(2024, 7, 31));

        // Current KPIs see only July rows: 1100 paid / 1500 billed
        assert!((snapshot.current.total_payments - 1100.0).abs() < 1e-9);
        assert!((snapshot.current.gcr - 1100.0 / 1500.0 * 100.0).abs() < 1e-9);
        assert_eq!(snapshot.current.total_claims, 2);

        // Previous KPIs see only June rows
        assert!((snapshot.previous.total_payments - 500.0).abs() < 1e-9);
        assert!((snapshot.previous.gcr - 50.0).abs() < 1e-9);

        // The March outlier reaches neither period
        assert!(snapshot.current.total_billed < 9000.0);
        assert!(snapshot.previous.total_billed < 9000.0);
    }

    #[test]
    fn test_snapshot_trend_polarities() {
        let dataset = sample_dataset();
        let snapshot = DashboardSnapshot::compute(&dataset, ymd(2024, 7, 1), ymd(2024, 7, 31));

        // GCR rose from 50% to ~73%: up and good
        assert_eq!(snapshot.trends.gcr.direction, TrendDirection::Up);
        assert_eq!(snapshot.trends.gcr.color, TrendColor::Good);

        // No previous-period denials: denial-rate trend has no baseline
        assert_eq!(snapshot.trends.denial_rate.color, TrendColor::Neutral);
    }

    #[test]
    fn test_snapshot_aggregates() {
        let dataset = sample_dataset();
        let snapshot = DashboardSnapshot::compute(&dataset, ymd(2024, 7, 1), ymd(2024, 7, 31));

        assert_eq!(snapshot.payer_payments.len(), 2);
        assert_eq!(snapshot.payer_payments[0].name, "Aetna");
        assert_eq!(snapshot.payer_payments[0].total, 800.0);

        assert_eq!(snapshot.aging.len(), 4);
        assert_eq!(snapshot.aging[1].amount, 700.0);

        assert_eq!(snapshot.charge_lag_days, 3);
        assert_eq!(snapshot.billing_lag_days, 9);
        assert_eq!(snapshot.avg_ar_days, 42);

        // One month of data: each charge sparkline has a single point
        assert_eq!(snapshot.sparklines.gcr.len(), 1);
        assert_eq!(snapshot.sparklines.gcr[0].month, "Jul 24");
    }

    #[test]
    fn test_snapshot_on_empty_dataset_is_all_zero() {
        let dataset = ClientDataset::new();
        let snapshot = DashboardSnapshot::compute(&dataset, ymd(2024, 7, 1), ymd(2024, 7, 31));

        assert_eq!(snapshot.current, KpiSet::default());
        assert_eq!(snapshot.previous, KpiSet::default());
        assert!(snapshot.sparklines.gcr.is_empty());
        assert!(snapshot.payer_payments.is_empty());
        assert_eq!(snapshot.aging.len(), 4);
        assert_eq!(snapshot.trends.gcr.color, TrendColor::Neutral);
    }
}
