//! Export/import document exchanged as a downloadable JSON file

use chrono::{DateTime, Local};
use sauna_util::CustomerId;
use serde::{Deserialize, Serialize};

use crate::{Customer, PackageSale};

/// Full backup of the desk state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub customers: Vec<Customer>,
    pub package_sales: Vec<PackageSale>,
    pub lockers: Vec<Option<CustomerId>>,
    pub export_date: DateTime<Local>,
}

/// Parsed import file. Each collection that is present replaces the
/// corresponding collection wholesale; absent (or `null`) ones are kept.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDocument {
    #[serde(default)]
    pub customers: Option<Vec<Customer>>,
    #[serde(default)]
    pub package_sales: Option<Vec<PackageSale>>,
    #[serde(default)]
    pub lockers: Option<Vec<Option<CustomerId>>>,
}

impl ImportDocument {
    pub fn is_empty(&self) -> bool {
        self.customers.is_none() && self.package_sales.is_none() && self.lockers.is_none()
    }
}

impl From<ExportDocument> for ImportDocument {
    fn from(doc: ExportDocument) -> Self {
        Self {
            customers: Some(doc.customers),
            package_sales: Some(doc.package_sales),
            lockers: Some(doc.lockers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_missing_collections() {
        let doc: ImportDocument =
            serde_json::from_str(r#"{"lockers": [null, 17, null], "customers": null}"#).unwrap();

        assert!(doc.customers.is_none());
        assert!(doc.package_sales.is_none());
        assert_eq!(
            doc.lockers,
            Some(vec![None, Some(CustomerId::new(17)), None])
        );
        assert!(!doc.is_empty());
    }

    #[test]
    fn unrelated_document_is_empty() {
        let doc: ImportDocument = serde_json::from_str(r#"{"something": 1}"#).unwrap();
        assert!(doc.is_empty());
    }
}
