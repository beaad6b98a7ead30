//! Configuration validation

use crate::policy::{MAX_AMOUNT, MAX_GRACE_MINUTES, MAX_LOCKER_CAPACITY};
use crate::schema::{RawConfig, RawTariff};
use thiserror::Error;

/// Validation error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("desk.locker_capacity must be between 1 and {max}, got {value}")]
    LockerCapacity { value: i64, max: usize },

    #[error("desk.data_dir cannot be empty")]
    EmptyDataDir,

    #[error("tariff.{field} cannot be negative, got {value}")]
    NegativeAmount { field: &'static str, value: i64 },

    #[error("tariff.{field} cannot exceed {max}, got {value}")]
    AmountTooLarge {
        field: &'static str,
        value: i64,
        max: i64,
    },

    #[error("tariff.grace_minutes must be between 1 and {max}, got {value}")]
    GracePeriod { value: i64, max: i64 },
}

/// Validate a raw configuration
pub fn validate_config(config: &RawConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(capacity) = config.desk.locker_capacity
        && (capacity < 1 || capacity > MAX_LOCKER_CAPACITY as i64)
    {
        errors.push(ValidationError::LockerCapacity {
            value: capacity,
            max: MAX_LOCKER_CAPACITY,
        });
    }

    if let Some(dir) = &config.desk.data_dir
        && dir.as_os_str().is_empty()
    {
        errors.push(ValidationError::EmptyDataDir);
    }

    errors.extend(validate_tariff(&config.tariff));

    errors
}

fn validate_tariff(tariff: &RawTariff) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let amounts = [
        ("regular_price", tariff.regular_price),
        ("morning_price", tariff.morning_price),
        ("overtime_rate", tariff.overtime_rate),
    ];
    for (field, value) in amounts {
        match value {
            Some(value) if value < 0 => {
                errors.push(ValidationError::NegativeAmount { field, value });
            }
            Some(value) if value > MAX_AMOUNT => {
                errors.push(ValidationError::AmountTooLarge {
                    field,
                    value,
                    max: MAX_AMOUNT,
                });
            }
            _ => {}
        }
    }

    if let Some(minutes) = tariff.grace_minutes
        && !(1..=MAX_GRACE_MINUTES).contains(&minutes)
    {
        errors.push(ValidationError::GracePeriod {
            value: minutes,
            max: MAX_GRACE_MINUTES,
        });
    }

    errors
}
