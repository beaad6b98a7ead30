//! Raw configuration schema (as parsed from TOML)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as parsed from TOML
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RawConfig {
    /// Config schema version
    pub config_version: u32,

    /// Front desk settings
    #[serde(default)]
    pub desk: RawDeskConfig,

    /// Prices and overtime billing
    #[serde(default)]
    pub tariff: RawTariff,
}

/// Front desk settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDeskConfig {
    /// Number of lockers (default: 50)
    pub locker_capacity: Option<i64>,

    /// Ticket payments must name the ticket used (default: true)
    pub require_ticket_number: Option<bool>,

    /// Data directory for the store
    pub data_dir: Option<PathBuf>,
}

/// Prices and overtime billing, in whole currency units
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawTariff {
    /// List price of a regular ticket (default: 500)
    pub regular_price: Option<i64>,

    /// List price of a morning ticket (default: 350)
    pub morning_price: Option<i64>,

    /// Minutes on site before overtime starts (default: 180)
    pub grace_minutes: Option<i64>,

    /// Charge per started hour past the grace period (default: 100)
    pub overtime_rate: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let toml_str = r#"
            config_version = 1

            [desk]
            locker_capacity = 80
            require_ticket_number = false
            data_dir = "/srv/sauna"

            [tariff]
            regular_price = 550
            morning_price = 400
            grace_minutes = 150
            overtime_rate = 120
        "#;

        let config: RawConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.desk.locker_capacity, Some(80));
        assert_eq!(config.desk.require_ticket_number, Some(false));
        assert_eq!(config.desk.data_dir, Some(PathBuf::from("/srv/sauna")));
        assert_eq!(config.tariff.grace_minutes, Some(150));
        assert_eq!(config.tariff.overtime_rate, Some(120));
    }

    #[test]
    fn sections_are_optional() {
        let config: RawConfig = toml::from_str("config_version = 1").unwrap();
        assert!(config.desk.locker_capacity.is_none());
        assert!(config.tariff.regular_price.is_none());
    }
}
