//! Record types for the sauna front desk
//!
//! This crate defines the data shared between the ledgers, the store and the
//! command line:
//! - Visit and package records, in the JSON shape the browser front desk used
//! - Billing, locker and usage views
//! - Report summaries
//! - The export/import document

mod report;
mod transfer;
mod types;

pub use report::*;
pub use transfer::*;
pub use types::*;
