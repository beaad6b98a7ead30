//! Front desk core for the sauna
//!
//! This crate holds the business rules, containing:
//! - Locker registry (one customer per slot)
//! - Visit ledger (Active -> Closed, overtime billing)
//! - Package ledger (prepaid tickets, indexed by ticket number)
//! - Report aggregation
//! - The `FrontDesk` controller that ties them to a store

mod desk;
mod lockers;
mod packages;
mod report;
mod visits;

pub use desk::*;
pub use lockers::*;
pub use packages::*;
pub use report::*;
pub use visits::*;
