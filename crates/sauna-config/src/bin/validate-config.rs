//! Config validation CLI tool
//!
//! Validates a sauna front desk configuration file and reports any errors.

use sauna_util::default_config_path;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let config_path = match args.get(1) {
        Some(path) => PathBuf::from(path),
        None => {
            let default_path = default_config_path();
            eprintln!("Usage: validate-config [config-file]");
            eprintln!();
            eprintln!("Validates a sauna front desk configuration file.");
            eprintln!();
            eprintln!("If no path is provided, uses: {}", default_path.display());
            eprintln!();
            eprintln!("Example:");
            eprintln!("  validate-config {}", default_path.display());
            eprintln!("  validate-config config.example.toml");
            return ExitCode::from(2);
        }
    };

    // Check file exists
    if !config_path.exists() {
        eprintln!("Error: Configuration file not found: {}", config_path.display());
        return ExitCode::from(1);
    }

    match sauna_config::load_config(&config_path) {
        Ok(policy) => {
            let tariff = &policy.tariff;
            println!("✓ Configuration is valid");
            println!();
            println!("Summary:");
            println!("  Config version: {}", sauna_config::CURRENT_CONFIG_VERSION);
            println!("  Lockers: {}", policy.desk.locker_capacity);
            println!(
                "  Ticket number required: {}",
                if policy.desk.require_ticket_number { "yes" } else { "no" }
            );
            println!("  Data directory: {}", policy.desk.data_dir.display());
            println!();
            println!("Tariff:");
            println!("  Regular ticket: {}", tariff.regular_price);
            println!("  Morning ticket: {}", tariff.morning_price);
            println!(
                "  Overtime: {} per started hour after {} minutes",
                tariff.overtime_rate,
                tariff.grace_period.num_minutes()
            );

            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Configuration validation failed");
            eprintln!();
            match &e {
                sauna_config::ConfigError::ReadError(io_err) => {
                    eprintln!("Failed to read file: {}", io_err);
                }
                sauna_config::ConfigError::ParseError(parse_err) => {
                    eprintln!("TOML parse error:");
                    eprintln!("  {}", parse_err);
                }
                sauna_config::ConfigError::ValidationFailed { errors } => {
                    eprintln!("Validation errors ({}):", errors.len());
                    for err in errors {
                        eprintln!("  - {}", err);
                    }
                }
                sauna_config::ConfigError::UnsupportedVersion(ver) => {
                    eprintln!(
                        "Unsupported config version: {} (expected {})",
                        ver,
                        sauna_config::CURRENT_CONFIG_VERSION
                    );
                }
            }
            ExitCode::from(1)
        }
    }
}
