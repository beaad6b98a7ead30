//! Validated policy structures

use crate::schema::{RawConfig, RawDeskConfig, RawTariff};
use chrono::Duration;
use sauna_api::{Amount, TicketType};
use std::path::PathBuf;

/// Lockers at a standard front desk
pub const DEFAULT_LOCKER_CAPACITY: usize = 50;

/// Upper bound accepted for `desk.locker_capacity`
pub const MAX_LOCKER_CAPACITY: usize = 999;

pub const DEFAULT_REGULAR_PRICE: Amount = 500;
pub const DEFAULT_MORNING_PRICE: Amount = 350;
pub const DEFAULT_GRACE_MINUTES: i64 = 180;
pub const DEFAULT_OVERTIME_RATE: Amount = 100;

/// Longest grace period accepted for `tariff.grace_minutes`: one day
pub const MAX_GRACE_MINUTES: i64 = 24 * 60;

/// Largest price or rate accepted in `[tariff]`
pub const MAX_AMOUNT: Amount = 1_000_000_000;

/// Validated policy ready for use by the front desk
#[derive(Debug, Clone, Default)]
pub struct DeskPolicy {
    pub desk: DeskConfig,
    pub tariff: Tariff,
}

impl DeskPolicy {
    /// Convert from raw config (after validation)
    pub fn from_raw(raw: RawConfig) -> Self {
        Self {
            desk: DeskConfig::from_raw(raw.desk),
            tariff: Tariff::from_raw(raw.tariff),
        }
    }
}

/// Front desk configuration
#[derive(Debug, Clone)]
pub struct DeskConfig {
    pub locker_capacity: usize,
    pub require_ticket_number: bool,
    pub data_dir: PathBuf,
}

impl DeskConfig {
    fn from_raw(raw: RawDeskConfig) -> Self {
        Self {
            locker_capacity: raw
                .locker_capacity
                .map(|c| c as usize)
                .unwrap_or(DEFAULT_LOCKER_CAPACITY),
            require_ticket_number: raw.require_ticket_number.unwrap_or(true),
            data_dir: raw
                .data_dir
                .unwrap_or_else(sauna_util::default_data_dir),
        }
    }
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            locker_capacity: DEFAULT_LOCKER_CAPACITY,
            require_ticket_number: true,
            data_dir: sauna_util::default_data_dir(),
        }
    }
}

/// Prices and overtime billing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tariff {
    pub regular_price: Amount,
    pub morning_price: Amount,
    /// Time on site included in the admission
    pub grace_period: Duration,
    /// Charge per started hour past the grace period
    pub overtime_rate: Amount,
}

impl Tariff {
    fn from_raw(raw: RawTariff) -> Self {
        Self {
            regular_price: raw.regular_price.unwrap_or(DEFAULT_REGULAR_PRICE),
            morning_price: raw.morning_price.unwrap_or(DEFAULT_MORNING_PRICE),
            grace_period: Duration::minutes(
                raw.grace_minutes
                    .unwrap_or(DEFAULT_GRACE_MINUTES)
                    .clamp(1, MAX_GRACE_MINUTES),
            ),
            overtime_rate: raw.overtime_rate.unwrap_or(DEFAULT_OVERTIME_RATE),
        }
    }

    /// Counter price of a ticket type. Only a suggestion: the cash actually
    /// taken is whatever the operator enters.
    pub fn list_price(&self, ticket_type: TicketType) -> Amount {
        match ticket_type {
            TicketType::Regular => self.regular_price,
            TicketType::Morning => self.morning_price,
        }
    }
}

impl Default for Tariff {
    fn default() -> Self {
        Self {
            regular_price: DEFAULT_REGULAR_PRICE,
            morning_price: DEFAULT_MORNING_PRICE,
            grace_period: Duration::minutes(DEFAULT_GRACE_MINUTES),
            overtime_rate: DEFAULT_OVERTIME_RATE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_counter_board() {
        let tariff = Tariff::default();
        assert_eq!(tariff.list_price(TicketType::Regular), 500);
        assert_eq!(tariff.list_price(TicketType::Morning), 350);
        assert_eq!(tariff.grace_period, Duration::hours(3));
        assert_eq!(tariff.overtime_rate, 100);

        let desk = DeskConfig::default();
        assert_eq!(desk.locker_capacity, 50);
        assert!(desk.require_ticket_number);
    }

    #[test]
    fn raw_values_override_defaults() {
        let raw = RawConfig {
            config_version: 1,
            desk: RawDeskConfig {
                locker_capacity: Some(20),
                require_ticket_number: Some(false),
                data_dir: Some(PathBuf::from("/srv/sauna")),
            },
            tariff: RawTariff {
                morning_price: Some(300),
                grace_minutes: Some(120),
                ..Default::default()
            },
        };

        let policy = DeskPolicy::from_raw(raw);
        assert_eq!(policy.desk.locker_capacity, 20);
        assert!(!policy.desk.require_ticket_number);
        assert_eq!(policy.desk.data_dir, PathBuf::from("/srv/sauna"));
        assert_eq!(policy.tariff.regular_price, 500);
        assert_eq!(policy.tariff.morning_price, 300);
        assert_eq!(policy.tariff.grace_period, Duration::hours(2));
    }
}
