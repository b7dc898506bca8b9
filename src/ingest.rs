//! CSV record normalizer.
//!
//! Client exports arrive with inconsistent headers (legacy feeds rename
//! columns, one feed ships a misspelled AR header), currency strings with
//! thousands separators, and several encodings of boolean flags. Each
//! logical field resolves through an ordered candidate table: the first
//! candidate column holding a non-empty value wins, and coercion failures
//! fall back per field (0 for amounts, `None` for dates) rather than
//! erroring.

use crate::error::Result;
use crate::schema::{AgingRecord, ChargeRecord, DenialRecord, OpenArRecord};
use crate::series::MonthLabel;
use crate::utils::parse_date;
use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use log::warn;

// Ordered header candidates per logical field. Matching is trimmed and
// case-insensitive; order is priority.
const CLAIM_ID: &[&str] = &["Claim_ID", "ClaimId"];
const BILLED_AMOUNT: &[&str] = &["Billed_Amount", "billed", "amount"];
const PAID_AMOUNT: &[&str] = &["Paid_Amount", "paid"];
const ADJUSTMENT_AMOUNT: &[&str] = &["Adjustment_Amount", "adjustment"];
// "apenaramount" is a real header in one client's AR feed
const OPEN_AR_AMOUNT: &[&str] = &["Open_AR_Amount", "apenaramount", "open_ar"];
const FIRST_PASS: &[&str] = &["First_Pass", "Is_First_Pass_Resolution"];
const CLEAN_CLAIM: &[&str] = &["Is_Clean_Claim"];
const PAYER_NAME: &[&str] = &["Payer_Name", "Payer_Name_1", "Payer", "Payer Name"];
const CLAIM_STATUS: &[&str] = &["Claim_Status", "Status"];
const DENIAL_AMOUNT: &[&str] = &["Denial_Amount"];
const DATE_OF_SERVICE: &[&str] = &["Date_of_Service", "date"];
const CHARGE_ENTRY_DATE: &[&str] = &["Charge_Entry_Date", "entry_date"];
const CLAIM_SUBMISSION_DATE: &[&str] = &["Claim_Submission_Date"];
const AGING_DAYS: &[&str] = &["aging", "aging_days"];
const AGING_AMOUNT: &[&str] = &["Aging_Amount"];
const AR_DAYS: &[&str] = &["ar_days"];
const VISIT_COUNT: &[&str] = &["visit", "visit_count"];
const MONTH: &[&str] = &["month"];

struct RowView<'a> {
    headers: &'a StringRecord,
    row: &'a StringRecord,
}

impl RowView<'_> {
    /// Ordered-candidate lookup: the first candidate whose column exists
    /// and holds a non-empty value wins.
    fn field(&self, candidates: &[&str]) -> Option<&str> {
        for candidate in candidates {
            let found = self
                .headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(candidate))
                .and_then(|idx| self.row.get(idx))
                .map(str::trim)
                .filter(|v| !v.is_empty());
            if found.is_some() {
                return found;
            }
        }
        None
    }

    fn amount(&self, candidates: &[&str]) -> f64 {
        self.field(candidates).map(parse_amount).unwrap_or(0.0)
    }

    fn flag(&self, candidates: &[&str]) -> bool {
        self.field(candidates).map(parse_flag).unwrap_or(false)
    }

    fn date(&self, candidates: &[&str]) -> Option<NaiveDate> {
        self.field(candidates).and_then(parse_date)
    }

    fn text(&self, candidates: &[&str]) -> String {
        self.field(candidates).unwrap_or_default().to_string()
    }

    fn payer(&self) -> String {
        self.field(PAYER_NAME).unwrap_or("Unknown").to_string()
    }

    /// Month label fallback order: explicit column, service date, entry
    /// date, else empty.
    fn month_label(&self) -> String {
        if let Some(label) = self.field(MONTH) {
            return label.to_string();
        }
        self.date(DATE_OF_SERVICE)
            .or_else(|| self.date(CHARGE_ENTRY_DATE))
            .map(|d| MonthLabel::from_date(d).to_string())
            .unwrap_or_default()
    }
}

/// Currency-style coercion: strip thousands separators and stray quote
/// characters, default 0 for anything non-numeric.
fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '"')
        .collect();
    if cleaned.is_empty() {
        return 0.0;
    }
    cleaned.parse().unwrap_or(0.0)
}

/// Truthy coercion for flag columns: boolean-style "true", or numeric 1.
fn parse_flag(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.eq_ignore_ascii_case("true")
        || trimmed.parse::<f64>().map(|v| v == 1.0).unwrap_or(false)
}

/// Clean-claim score coercion. Absent/empty is a literal 0 score (counted
/// in the average); a non-empty non-numeric value is `None` and excluded.
fn parse_clean_score(value: Option<&str>) -> Option<f64> {
    match value {
        None => Some(0.0),
        Some(raw) => raw.trim().parse::<f64>().ok(),
    }
}

fn read_rows<T>(text: &str, build: impl Fn(&RowView) -> T) -> Result<Vec<T>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());
    let headers = reader.headers()?.clone();

    let mut out = Vec::new();
    for (i, result) in reader.records().enumerate() {
        match result {
            Ok(row) => {
                if row.iter().all(|f| f.trim().is_empty()) {
                    continue;
                }
                out.push(build(&RowView {
                    headers: &headers,
                    row: &row,
                }));
            }
            Err(err) => warn!("Skipping unreadable CSV row {}: {}", i + 2, err),
        }
    }
    Ok(out)
}

pub fn parse_charges_csv(text: &str) -> Result<Vec<ChargeRecord>> {
    read_rows(text, |row| ChargeRecord {
        claim_id: row.text(CLAIM_ID),
        billed_amount: row.amount(BILLED_AMOUNT),
        paid_amount: row.amount(PAID_AMOUNT),
        adjustment_amount: row.amount(ADJUSTMENT_AMOUNT),
        visit_count: row.amount(VISIT_COUNT).max(0.0) as u32,
        clean_claim_score: parse_clean_score(row.field(CLEAN_CLAIM)),
        payer_name: row.payer(),
        date_of_service: row.date(DATE_OF_SERVICE),
        charge_entry_date: row.date(CHARGE_ENTRY_DATE),
        month: row.month_label(),
    })
}

pub fn parse_denials_csv(text: &str) -> Result<Vec<DenialRecord>> {
    read_rows(text, |row| DenialRecord {
        claim_id: row.text(CLAIM_ID),
        claim_status: row.text(CLAIM_STATUS),
        denial_amount: row.amount(DENIAL_AMOUNT),
        first_pass_resolution: row.flag(FIRST_PASS),
        payer_name: row.payer(),
        date_of_service: row.date(DATE_OF_SERVICE),
        claim_submission_date: row.date(CLAIM_SUBMISSION_DATE),
        month: row.month_label(),
    })
}

pub fn parse_open_ar_csv(text: &str) -> Result<Vec<OpenArRecord>> {
    read_rows(text, |row| OpenArRecord {
        open_ar_amount: row.amount(OPEN_AR_AMOUNT),
        ar_days: row.amount(AR_DAYS),
        date_of_service: row.date(DATE_OF_SERVICE),
        month: row.month_label(),
    })
}

pub fn parse_aging_csv(text: &str) -> Result<Vec<AgingRecord>> {
    read_rows(text, |row| AgingRecord {
        aging_days: row.amount(AGING_DAYS),
        aging_amount: row.amount(AGING_AMOUNT),
        date_of_service: row.date(DATE_OF_SERVICE),
        month: row.month_label(),
    })
}
