use crate::series::MonthLabel;
use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

fn unknown_payer() -> String {
    "Unknown".to_string()
}

/// One billed claim line from a charges export.
///
/// The period-membership key for charges is `charge_entry_date`: the KPI
/// window is the posting window, not the service window.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ChargeRecord {
    #[serde(default)]
    #[schemars(description = "Claim identifier as exported; not guaranteed unique across rows")]
    pub claim_id: String,

    #[serde(default)]
    #[schemars(description = "Gross billed amount for the line, non-negative")]
    pub billed_amount: f64,

    #[serde(default)]
    #[schemars(description = "Amount collected against the line, non-negative")]
    pub paid_amount: f64,

    #[serde(default)]
    #[schemars(description = "Contractual adjustment; may be negative for reversals")]
    pub adjustment_amount: f64,

    #[serde(default)]
    #[schemars(
        description = "Visit count for the line. Claim volume is the SUM of this field, not the row count"
    )]
    pub visit_count: u32,

    #[serde(default)]
    #[schemars(
        description = "Percentage-style clean-claim score in [0, 100]. Averaged, never summed; out-of-range or unparsable values are excluded from the average"
    )]
    pub clean_claim_score: Option<f64>,

    #[serde(default = "unknown_payer")]
    #[schemars(description = "Payer name; blank values normalize to 'Unknown'")]
    pub payer_name: String,

    #[serde(default)]
    pub date_of_service: Option<NaiveDate>,

    #[serde(default)]
    #[schemars(description = "Posting date; the period-membership key for charges")]
    pub charge_entry_date: Option<NaiveDate>,

    #[serde(default)]
    #[schemars(description = "Derived month label ('Jul 24'), informational")]
    pub month: String,
}

impl ChargeRecord {
    pub fn period_date(&self) -> Option<NaiveDate> {
        self.charge_entry_date
    }

    /// Month bucket for trend series: the stored label when present,
    /// otherwise derived from the entry date.
    pub fn month_label(&self) -> Option<MonthLabel> {
        MonthLabel::parse(&self.month).or_else(|| self.charge_entry_date.map(MonthLabel::from_date))
    }
}

/// One row from a denial-tracking export.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DenialRecord {
    #[serde(default)]
    pub claim_id: String,

    #[serde(default)]
    #[schemars(
        description = "Raw claim status text. The KPI denied count matches 'denied' exactly after lowercasing and trimming; the denied-subset helper matches by substring"
    )]
    pub claim_status: String,

    #[serde(default)]
    #[schemars(description = "Denied amount, non-negative")]
    pub denial_amount: f64,

    #[serde(default)]
    #[schemars(
        description = "Whether the claim resolved on first pass. Coerced from boolean true, string 'true', or numeric 1"
    )]
    pub first_pass_resolution: bool,

    #[serde(default = "unknown_payer")]
    pub payer_name: String,

    #[serde(default)]
    #[schemars(description = "Service date; the period-membership key for denials")]
    pub date_of_service: Option<NaiveDate>,

    #[serde(default)]
    #[schemars(description = "Submission date, used for the billing-lag metric")]
    pub claim_submission_date: Option<NaiveDate>,

    #[serde(default)]
    pub month: String,
}

impl DenialRecord {
    pub fn period_date(&self) -> Option<NaiveDate> {
        self.date_of_service
    }

    pub fn month_label(&self) -> Option<MonthLabel> {
        self.date_of_service.map(MonthLabel::from_date)
    }

    /// Exact-match denied test used by the KPI denied count.
    pub fn is_denied(&self) -> bool {
        self.claim_status.trim().to_lowercase() == "denied"
    }

    /// Substring denied test used when carving out the denied subset for
    /// breakdowns. Looser than `is_denied` on purpose; statuses like
    /// "Denied - Auth" count here.
    pub fn is_denied_like(&self) -> bool {
        self.claim_status.to_lowercase().contains("denied")
    }
}

/// One open-receivable snapshot row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct OpenArRecord {
    #[serde(default)]
    #[schemars(description = "Outstanding receivable amount, non-negative")]
    pub open_ar_amount: f64,

    #[serde(default)]
    #[schemars(description = "Days the receivable has been outstanding")]
    pub ar_days: f64,

    #[serde(default)]
    #[schemars(description = "Service date; the period-membership key for open AR")]
    pub date_of_service: Option<NaiveDate>,

    #[serde(default)]
    pub month: String,
}

impl OpenArRecord {
    pub fn period_date(&self) -> Option<NaiveDate> {
        self.date_of_service
    }

    pub fn month_label(&self) -> Option<MonthLabel> {
        self.date_of_service.map(MonthLabel::from_date)
    }
}

/// One aging-bucket snapshot row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct AgingRecord {
    #[serde(default)]
    #[schemars(description = "Days outstanding; selects the aging bucket")]
    pub aging_days: f64,

    #[serde(default)]
    #[schemars(description = "Amount attributed to this row's bucket")]
    pub aging_amount: f64,

    #[serde(default)]
    #[schemars(description = "Service date; the period-membership key for aging rows")]
    pub date_of_service: Option<NaiveDate>,

    #[serde(default)]
    pub month: String,
}

impl AgingRecord {
    pub fn period_date(&self) -> Option<NaiveDate> {
        self.date_of_service
    }
}
