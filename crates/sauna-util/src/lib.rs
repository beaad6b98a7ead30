//! Shared utilities for the sauna front desk
//!
//! This crate provides:
//! - ID types (CustomerId, PackageId, LockerNumber, TicketNumber) and the id sequence
//! - Time utilities (mockable wall clock, day bounds, display helpers)
//! - Error types
//! - Lenient serde helpers for data exported by the browser front desk
//! - Default paths for config and data directories

mod error;
mod ids;
pub mod lenient;
mod paths;
mod time;

pub use error::*;
pub use ids::*;
pub use paths::*;
pub use time::*;
