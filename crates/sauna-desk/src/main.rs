//! sauna-desk - the sauna front desk on the command line
//!
//! This is the main entry point. It wires together:
//! - Configuration loading
//! - Store initialization
//! - The front desk controller
//! - Text or JSON output

mod cli;
mod render;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::Parser;
use sauna_config::{DeskPolicy, load_config_or_default};
use sauna_core::{CheckInRequest, FrontDesk, SaleRequest};
use sauna_store::{SqliteStore, Store};
use sauna_util::{CustomerId, LockerNumber, PackageId};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Args, CheckInCmd, Command, SellPackageCmd};

/// Open the desk named by the arguments
fn open_desk(args: &Args) -> Result<FrontDesk> {
    let policy = load_config_or_default(&args.config)
        .with_context(|| format!("Failed to load config from {:?}", args.config))?;

    let data_dir = args
        .data_dir
        .clone()
        .unwrap_or_else(|| policy.desk.data_dir.clone());

    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;

    let db_path = sauna_util::store_path(&data_dir);
    let store: Arc<dyn Store> = Arc::new(
        SqliteStore::open(&db_path)
            .with_context(|| format!("Failed to open database {:?}", db_path))?,
    );
    debug!(db_path = %db_path.display(), "Store initialized");

    FrontDesk::open(policy, store).context("Failed to load front desk data")
}

fn check_in_request(cmd: CheckInCmd, policy: &DeskPolicy) -> CheckInRequest {
    let ticket_type = cmd.ticket_type.into();
    let cash_amount = if cmd.list_price {
        Some(policy.tariff.list_price(ticket_type))
    } else {
        cmd.cash
    };

    CheckInRequest {
        locker_number: cmd.locker.map(LockerNumber::new),
        customer_name: cmd.name,
        ticket_type,
        payment: cmd.payment.into(),
        cash_amount,
        ticket_number: cmd.ticket,
        notes: cmd.notes,
    }
}

fn sale_request(cmd: SellPackageCmd) -> SaleRequest {
    SaleRequest {
        customer_name: cmd.name,
        amount: cmd.amount,
        quantity: cmd.quantity,
        ticket_numbers: cmd.tickets,
        notes: cmd.notes,
    }
}

/// Where an export goes: the given file, a dated file inside the given
/// directory, or a dated file in the working directory
fn export_path(out: Option<PathBuf>, file_name: &str) -> PathBuf {
    match out {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path,
        None => PathBuf::from(file_name),
    }
}

/// Print either the JSON form of `value` or the rendered text
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", text());
    }
    Ok(())
}

fn run(args: Args) -> Result<()> {
    let mut desk = open_desk(&args)?;
    let now = sauna_util::now();
    let json = args.json;

    match args.command {
        Command::CheckIn(cmd) => {
            let request = check_in_request(cmd, desk.policy());
            let customer = desk.check_in(request, now)?;
            emit(json, &customer, || render::checked_in(&customer))
        }
        Command::CheckOut { id } => {
            let receipt = desk.check_out(CustomerId::new(id), now)?;
            let customer = desk.customer(receipt.customer_id);
            emit(json, &receipt, || render::receipt(&receipt, customer))
        }
        Command::SellPackage(cmd) => {
            let sale = desk.sell_package(sale_request(cmd), now)?;
            emit(json, &sale, || render::package_sold(&sale))
        }
        Command::Active => {
            let active = desk.active_customers();
            emit(json, &active, || render::active(&active, now))
        }
        Command::Lockers => {
            let views = desk.lockers();
            emit(json, &views, || render::lockers(&views))
        }
        Command::Packages => {
            let summaries = desk.package_summaries();
            emit(json, &summaries, || render::packages(&summaries))
        }
        Command::Usage { package_id } => {
            let history = desk.usage_history(PackageId::new(package_id))?;
            emit(json, &history, || render::usage(&history))
        }
        Command::Report { from, to } => {
            let today = now.date_naive();
            let end = to.unwrap_or(today);
            let start = from.unwrap_or_else(|| sauna_util::first_of_month(end));
            let report = desk.report(start, end);
            emit(json, &report, || render::report(&report))
        }
        Command::Today => {
            let overview = desk.daily_overview(now.date_naive());
            emit(json, &overview, || render::overview(&overview))
        }
        Command::Export { out } => {
            let file_name = sauna_store::export_file_name(now.date_naive());
            let path = export_path(out, &file_name);
            write_export(&desk, &path, now)?;
            info!(path = %path.display(), "Data exported");
            emit(json, &path, || format!("Exported to {}\n", path.display()))
        }
        Command::Import { path } => {
            let bytes = std::fs::read(&path)
                .with_context(|| format!("Failed to read import file {:?}", path))?;
            let outcome = desk.import_bytes(&bytes)?;
            emit(json, &outcome, || render::imported(&outcome))
        }
    }
}

fn write_export(desk: &FrontDesk, path: &Path, now: DateTime<Local>) -> Result<()> {
    let bytes = sauna_store::to_bytes(&desk.export(now)).context("Failed to encode export")?;
    std::fs::write(path, bytes).with_context(|| format!("Failed to write export to {:?}", path))
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so --json output stays clean
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    debug!(version = env!("CARGO_PKG_VERSION"), "sauna-desk starting");

    if sauna_util::is_mock_time_active() {
        info!(now = %sauna_util::now(), "Mock time is active");
    }

    run(args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_path_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let name = "sauna-data-2024-01-31.json";

        assert_eq!(export_path(None, name), PathBuf::from(name));
        assert_eq!(
            export_path(Some(dir.path().to_path_buf()), name),
            dir.path().join(name)
        );
        let file = dir.path().join("backup.json");
        assert_eq!(export_path(Some(file.clone()), name), file);
    }

    #[test]
    fn list_price_fills_cash() {
        let args = Args::try_parse_from([
            "sauna-desk",
            "check-in",
            "--locker",
            "2",
            "--ticket-type",
            "morning",
            "--list-price",
        ])
        .unwrap();

        let Command::CheckIn(cmd) = args.command else {
            panic!("expected check-in");
        };
        let request = check_in_request(cmd, &DeskPolicy::default());
        assert_eq!(request.cash_amount, Some(350));
        assert_eq!(request.locker_number, Some(LockerNumber::new(2)));
    }
}
