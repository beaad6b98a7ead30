//! Command-line arguments

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use sauna_api::{PaymentMethod, TicketType};
use sauna_util::default_config_path;
use std::path::PathBuf;

/// sauna-desk - front desk for a sauna: lockers, visits and ticket packages
#[derive(Parser, Debug)]
#[command(name = "sauna-desk")]
#[command(about = "Front desk for a sauna: lockers, visits and ticket packages", long_about = None)]
#[command(version)]
pub struct Args {
    /// Configuration file path (default: ~/.config/sauna-desk/config.toml)
    #[arg(short, long, default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Data directory override (or set SAUNA_DATA_DIR env var)
    #[arg(short, long, env = "SAUNA_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "warn")]
    pub log_level: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a customer in and assign a locker
    CheckIn(CheckInCmd),

    /// Check a customer out and print the bill
    CheckOut {
        /// Customer id shown at check-in
        id: i64,
    },

    /// Sell a prepaid ticket package
    SellPackage(SellPackageCmd),

    /// List customers currently on site
    Active,

    /// Show the locker grid
    Lockers,

    /// List package sales with their usage
    Packages,

    /// Show every visit made on a package's tickets
    Usage {
        /// Package id
        package_id: i64,
    },

    /// Sales report over a date range (default: this month)
    Report {
        /// First day, YYYY-MM-DD
        #[arg(long, value_parser = parse_day)]
        from: Option<NaiveDate>,

        /// Last day, YYYY-MM-DD (default: today)
        #[arg(long, value_parser = parse_day)]
        to: Option<NaiveDate>,
    },

    /// Today's income and attendance
    Today,

    /// Write a JSON backup of all data
    Export {
        /// Output file or directory (default: ./sauna-data-<date>.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Replace data from a JSON backup
    Import {
        /// Backup file to read
        path: PathBuf,
    },
}

#[derive(ClapArgs, Debug)]
pub struct CheckInCmd {
    /// Locker number (1-based)
    #[arg(short = 'k', long)]
    pub locker: Option<u32>,

    /// Customer name
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Admission ticket type
    #[arg(short = 't', long, value_enum, default_value_t = TicketTypeArg::Regular)]
    pub ticket_type: TicketTypeArg,

    /// How the admission is paid
    #[arg(short, long, value_enum, default_value_t = PaymentArg::Cash)]
    pub payment: PaymentArg,

    /// Cash taken
    #[arg(long)]
    pub cash: Option<i64>,

    /// Take the list price of the ticket type as the cash amount
    #[arg(long, conflicts_with = "cash")]
    pub list_price: bool,

    /// Prepaid ticket number
    #[arg(long)]
    pub ticket: Option<String>,

    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(ClapArgs, Debug)]
pub struct SellPackageCmd {
    /// Buyer's name
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Total price of the package
    #[arg(short, long)]
    pub amount: Option<i64>,

    /// Number of admissions in the package
    #[arg(short, long)]
    pub quantity: Option<u32>,

    /// Ticket numbers, comma separated
    #[arg(short, long, default_value = "")]
    pub tickets: String,

    #[arg(long, default_value = "")]
    pub notes: String,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum TicketTypeArg {
    Regular,
    Morning,
}

impl From<TicketTypeArg> for TicketType {
    fn from(arg: TicketTypeArg) -> Self {
        match arg {
            TicketTypeArg::Regular => TicketType::Regular,
            TicketTypeArg::Morning => TicketType::Morning,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum PaymentArg {
    Cash,
    Ticket,
}

impl From<PaymentArg> for PaymentMethod {
    fn from(arg: PaymentArg) -> Self {
        match arg {
            PaymentArg::Cash => PaymentMethod::Cash,
            PaymentArg::Ticket => PaymentMethod::Ticket,
        }
    }
}

fn parse_day(s: &str) -> Result<NaiveDate, String> {
    sauna_util::parse_date(s).ok_or_else(|| format!("expected YYYY-MM-DD, got {s:?}"))
}
