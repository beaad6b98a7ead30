//! Error types for the front desk

use thiserror::Error;

use crate::{CustomerId, LockerNumber, PackageId, TicketNumber};

/// Core error type for front desk operations.
///
/// Every variant is reported to the operator as-is; none of them leaves the
/// ledgers partially updated.
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Cash payment requires an amount")]
    MissingPayment,

    #[error("Locker {0} is already in use")]
    SlotOccupied(LockerNumber),

    #[error("Locker {locker} is out of range (1-{capacity})")]
    InvalidSlot {
        locker: LockerNumber,
        capacity: usize,
    },

    #[error("Customer not found: {0}")]
    CustomerNotFound(CustomerId),

    #[error("Package not found: {0}")]
    PackageNotFound(PackageId),

    #[error("Customer {0} has already checked out")]
    AlreadyClosed(CustomerId),

    #[error("Ticket {ticket} already belongs to package {package}")]
    DuplicateTicket {
        ticket: TicketNumber,
        package: PackageId,
    },

    #[error("Import failed: {0}")]
    ImportParseError(String),

    #[error("Store error: {0}")]
    StoreError(String),
}

impl DeskError {
    pub fn import(msg: impl Into<String>) -> Self {
        Self::ImportParseError(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::StoreError(msg.into())
    }

    /// Short machine-readable name of the error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField(_) => "missing_field",
            Self::MissingPayment => "missing_payment",
            Self::SlotOccupied(_) => "slot_occupied",
            Self::InvalidSlot { .. } => "invalid_slot",
            Self::CustomerNotFound(_) | Self::PackageNotFound(_) => "not_found",
            Self::AlreadyClosed(_) => "already_closed",
            Self::DuplicateTicket { .. } => "duplicate_ticket",
            Self::ImportParseError(_) => "import_parse_error",
            Self::StoreError(_) => "store_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, DeskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_locker() {
        let err = DeskError::SlotOccupied(LockerNumber::new(7));
        assert_eq!(err.to_string(), "Locker 7 is already in use");

        let err = DeskError::InvalidSlot {
            locker: LockerNumber::new(51),
            capacity: 50,
        };
        assert_eq!(err.to_string(), "Locker 51 is out of range (1-50)");
    }

    #[test]
    fn not_found_kinds_share_a_name() {
        assert_eq!(DeskError::CustomerNotFound(CustomerId::new(1)).kind(), "not_found");
        assert_eq!(DeskError::PackageNotFound(PackageId::new(1)).kind(), "not_found");
        assert_eq!(DeskError::import("bad json").kind(), "import_parse_error");
    }
}
