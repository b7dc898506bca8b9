use crate::schema::{ChargeRecord, DenialRecord, OpenArRecord};
use serde::{Deserialize, Serialize};

/// The fixed ratio-metric set for one period's filtered subsets.
///
/// Every rate is a percentage in `[0, 100+)`; every division guards its
/// denominator and substitutes 0, so no field is ever NaN or infinite.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSet {
    pub total_payments: f64,
    pub total_billed: f64,
    pub total_adjustments: f64,
    /// Claim volume: the sum of per-row visit counts, NOT the row count.
    pub total_claims: u64,
    /// Denial rows whose status equals "denied" (lower-cased, trimmed).
    pub denied_count: usize,
    pub denial_rate: f64,
    pub first_pass_count: usize,
    /// First-pass share over ALL denial rows. The denominator deliberately
    /// includes non-denied rows; see DESIGN.md before changing it.
    pub first_pass_rate: f64,
    /// Gross collection rate: payments / billed.
    pub gcr: f64,
    /// Net collection rate: payments / (billed - adjustments); 0 when the
    /// net is zero or negative.
    pub ncr: f64,
    /// Mean clean-claim score over values inside [0, 100].
    pub clean_claim_rate: f64,
    pub total_open_ar: f64,
}

impl KpiSet {
    /// Compute the KPI set for one period.
    ///
    /// When both charges and denials are empty the result is all zeros,
    /// unconditionally, the open-AR total included. The short-circuit
    /// keeps the percentage formulas from resolving 0/0 differently across
    /// branches.
    pub fn calculate(
        charges: &[&ChargeRecord],
        denials: &[&DenialRecord],
        open_ar: &[&OpenArRecord],
    ) -> Self {
        if charges.is_empty() && denials.is_empty() {
            return Self::default();
        }

        let total_payments: f64 = charges.iter().map(|r| r.paid_amount).sum();
        let total_billed: f64 = charges.iter().map(|r| r.billed_amount).sum();
        let total_adjustments: f64 = charges.iter().map(|r| r.adjustment_amount).sum();
        let total_claims: u64 = charges.iter().map(|r| r.visit_count as u64).sum();

        let denied_count = denials.iter().filter(|r| r.is_denied()).count();
        let denial_rate = if denials.is_empty() {
            0.0
        } else {
            denied_count as f64 / denials.len() as f64 * 100.0
        };

        let first_pass_count = denials.iter().filter(|r| r.first_pass_resolution).count();
        let first_pass_rate = if denials.is_empty() {
            0.0
        } else {
            first_pass_count as f64 / denials.len() as f64 * 100.0
        };

        let gcr = if total_billed == 0.0 {
            0.0
        } else {
            total_payments / total_billed * 100.0
        };

        let net_billed = total_billed - total_adjustments;
        let ncr = if net_billed <= 0.0 {
            0.0
        } else {
            total_payments / net_billed * 100.0
        };

        let clean_values: Vec<f64> = charges
            .iter()
            .filter_map(|r| r.clean_claim_score)
            .filter(|v| (0.0..=100.0).contains(v))
            .collect();
        let clean_claim_rate = if clean_values.is_empty() {
            0.0
        } else {
            clean_values.iter().sum::<f64>() / clean_values.len() as f64
        };

        let total_open_ar: f64 = open_ar.iter().map(|r| r.open_ar_amount).sum();

        Self {
            total_payments,
            total_billed,
            total_adjustments,
            total_claims,
            denied_count,
            denial_rate,
            first_pass_count,
            first_pass_rate,
            gcr,
            ncr,
            clean_claim_rate,
            total_open_ar,
        }
    }
}
