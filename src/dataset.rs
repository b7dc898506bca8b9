use crate::error::{RcmEngineError, Result};
use crate::ingest;
use crate::schema::{AgingRecord, ChargeRecord, DenialRecord, OpenArRecord};
use log::{info, warn};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub const CHARGES_FILE: &str = "charges.csv";
pub const DENIALS_FILE: &str = "denial.csv";
pub const OPEN_AR_FILE: &str = "openar.csv";
pub const AGING_FILE: &str = "aging.csv";

/// Which collection an upload or file feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Charges,
    Denials,
    OpenAr,
    Aging,
}

/// The in-memory record set for the currently selected client(s).
///
/// Built once per client selection and discarded wholesale on switch; the
/// only incremental path is `append_upload`, which concatenates new rows
/// into the live set without a reload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ClientDataset {
    pub charges: Vec<ChargeRecord>,
    pub denials: Vec<DenialRecord>,
    pub open_ar: Vec<OpenArRecord>,
    pub aging: Vec<AgingRecord>,
}

impl ClientDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load one client folder (`charges.csv`, `denial.csv`, `openar.csv`,
    /// `aging.csv`).
    ///
    /// A missing or unreadable file is logged and treated as an empty
    /// collection; one absent export must not blank the whole view.
    pub fn load_from_dir(dir: &Path) -> Self {
        let dataset = Self {
            charges: load_file(dir, CHARGES_FILE, ingest::parse_charges_csv),
            denials: load_file(dir, DENIALS_FILE, ingest::parse_denials_csv),
            open_ar: load_file(dir, OPEN_AR_FILE, ingest::parse_open_ar_csv),
            aging: load_file(dir, AGING_FILE, ingest::parse_aging_csv),
        };
        info!(
            "Loaded client data from {}: charges={}, denials={}, open_ar={}, aging={}",
            dir.display(),
            dataset.charges.len(),
            dataset.denials.len(),
            dataset.open_ar.len(),
            dataset.aging.len()
        );
        dataset
    }

    /// Concatenate another client's records, for multi-client selections.
    pub fn merge(&mut self, other: ClientDataset) {
        self.charges.extend(other.charges);
        self.denials.extend(other.denials);
        self.open_ar.extend(other.open_ar);
        self.aging.extend(other.aging);
    }

    /// Append the rows of an uploaded file to the collection named by
    /// `kind`, without reloading anything else.
    ///
    /// Non-CSV file names are rejected outright; no partial processing
    /// occurs. Returns the number of appended rows.
    pub fn append_upload(
        &mut self,
        file_name: &str,
        content: &str,
        kind: RecordKind,
    ) -> Result<usize> {
        let is_csv = Path::new(file_name)
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);
        if !is_csv {
            return Err(RcmEngineError::UnsupportedUpload(file_name.to_string()));
        }

        let appended = match kind {
            RecordKind::Charges => {
                let rows = ingest::parse_charges_csv(content)?;
                let n = rows.len();
                self.charges.extend(rows);
                n
            }
            RecordKind::Denials => {
                let rows = ingest::parse_denials_csv(content)?;
                let n = rows.len();
                self.denials.extend(rows);
                n
            }
            RecordKind::OpenAr => {
                let rows = ingest::parse_open_ar_csv(content)?;
                let n = rows.len();
                self.open_ar.extend(rows);
                n
            }
            RecordKind::Aging => {
                let rows = ingest::parse_aging_csv(content)?;
                let n = rows.len();
                self.aging.extend(rows);
                n
            }
        };

        info!("Appended {} uploaded rows from '{}'", appended, file_name);
        Ok(appended)
    }

    pub fn is_empty(&self) -> bool {
        self.charges.is_empty()
            && self.denials.is_empty()
            && self.open_ar.is_empty()
            && self.aging.is_empty()
    }

    /// JSON Schema of the normalized record shape, for integrators that
    /// supply pre-parsed data instead of CSV exports.
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(ClientDataset)
    }

    pub fn schema_as_json() -> Result<String> {
        let schema = Self::generate_json_schema();
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

fn load_file<T>(dir: &Path, name: &str, parse: fn(&str) -> Result<Vec<T>>) -> Vec<T> {
    let path = dir.join(name);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) => {
            warn!("Skipping {}: {}", path.display(), err);
            return Vec::new();
        }
    };
    match parse(&text) {
        Ok(rows) => rows,
        Err(err) => {
            warn!("Skipping {}: {}", path.display(), err);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_rejects_non_csv() {
        let mut dataset = ClientDataset::new();
        let err = dataset
            .append_upload("charges.txt", "Billed_Amount\n100\n", RecordKind::Charges)
            .unwrap_err();
        assert!(matches!(err, RcmEngineError::UnsupportedUpload(_)));
        // No partial processing
        assert!(dataset.charges.is_empty());
    }

    #[test]
    fn test_upload_appends_without_reload() {
        let mut dataset = ClientDataset::new();
        dataset.charges.push(ChargeRecord {
            billed_amount: 100.0,
            ..Default::default()
        });

        let appended = dataset
            .append_upload(
                "extra.csv",
                "Billed_Amount,Paid_Amount\n200,150\n300,250\n",
                RecordKind::Charges,
            )
            .unwrap();
        assert_eq!(appended, 2);
        assert_eq!(dataset.charges.len(), 3);
        // Existing rows are untouched
        assert_eq!(dataset.charges[0].billed_amount, 100.0);
    }

    #[test]
    fn test_upload_extension_is_case_insensitive() {
        let mut dataset = ClientDataset::new();
        let appended = dataset
            .append_upload("EXPORT.CSV", "aging,Aging_Amount\n45,100\n", RecordKind::Aging)
            .unwrap();
        assert_eq!(appended, 1);
    }

    #[test]
    fn test_merge_concatenates_all_collections() {
        let mut a = ClientDataset::new();
        a.charges.push(ChargeRecord::default());
        let mut b = ClientDataset::new();
        b.charges.push(ChargeRecord::default());
        b.denials.push(DenialRecord::default());

        a.merge(b);
        assert_eq!(a.charges.len(), 2);
        assert_eq!(a.denials.len(), 1);
        assert!(!a.is_empty());
    }

    #[test]
    fn test_load_from_dir_tolerates_missing_files() {
        let dir = std::env::temp_dir().join(format!("rcm-kpi-test-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(CHARGES_FILE),
            "Billed_Amount,Paid_Amount,Charge_Entry_Date\n100,80,2024-07-01\n",
        )
        .unwrap();
        // denial.csv, openar.csv, aging.csv intentionally absent

        let dataset = ClientDataset::load_from_dir(&dir);
        assert_eq!(dataset.charges.len(), 1);
        assert!(dataset.denials.is_empty());
        assert!(dataset.open_ar.is_empty());
        assert!(dataset.aging.is_empty());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_schema_mentions_every_collection() {
        let schema = ClientDataset::schema_as_json().unwrap();
        assert!(schema.contains("charges"));
        assert!(schema.contains("denials"));
        assert!(schema.contains("open_ar"));
        assert!(schema.contains("aging"));
    }
}
