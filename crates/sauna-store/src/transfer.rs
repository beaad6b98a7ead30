//! Backup export and import

use chrono::{DateTime, Local, NaiveDate};
use sauna_api::{ExportDocument, ImportDocument};
use sauna_util::DeskError;
use tracing::debug;

use crate::{StateSnapshot, StoreResult};

/// Build the export document for the current state
pub fn export_document(snapshot: &StateSnapshot, now: DateTime<Local>) -> ExportDocument {
    ExportDocument {
        customers: snapshot.customers.clone(),
        package_sales: snapshot.package_sales.clone(),
        lockers: snapshot.lockers.clone(),
        export_date: now,
    }
}

/// Render an export document as pretty-printed JSON
pub fn to_bytes(doc: &ExportDocument) -> StoreResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(doc)?)
}

/// Download file name for an export taken on `date`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("sauna-data-{}.json", sauna_util::format_date(date))
}

/// Parse an import file. The top level must be a JSON object; collections
/// that are absent stay `None`.
pub fn parse_import(bytes: &[u8]) -> Result<ImportDocument, DeskError> {
    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| DeskError::import(e.to_string()))?;

    if !value.is_object() {
        return Err(DeskError::import("expected a JSON object at the top level"));
    }

    let doc: ImportDocument =
        serde_json::from_value(value).map_err(|e| DeskError::import(e.to_string()))?;

    debug!(
        customers = doc.customers.as_ref().map(Vec::len),
        packages = doc.package_sales.as_ref().map(Vec::len),
        lockers = doc.lockers.as_ref().map(Vec::len),
        "Import file parsed"
    );
    Ok(doc)
}
