//! Shared record types for the front desk

use chrono::{DateTime, Duration, Local};
use sauna_util::{CustomerId, LockerNumber, PackageId, TicketNumber, lenient};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whole currency units
pub type Amount = i64;

/// Admission ticket kind chosen at the counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    #[default]
    Regular,
    Morning,
}

impl TicketType {
    pub fn label(&self) -> &'static str {
        match self {
            TicketType::Regular => "regular",
            TicketType::Morning => "morning",
        }
    }
}

impl fmt::Display for TicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How the admission was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Ticket,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => f.write_str("cash"),
            PaymentMethod::Ticket => f.write_str("ticket"),
        }
    }
}

/// An on-site purchase added to a visit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(deserialize_with = "lenient::amount")]
    pub amount: Amount,
    #[serde(default, deserialize_with = "lenient::text", skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// Lifecycle of a visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VisitState {
    /// Checked in, locker held
    Active,
    /// Checked out and billed
    Closed,
}

/// One sauna visit, from check-in to checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub locker_number: LockerNumber,
    #[serde(default, deserialize_with = "lenient::text")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub notes: String,
    #[serde(default)]
    pub ticket_type: TicketType,
    pub payment: PaymentMethod,
    #[serde(
        default,
        deserialize_with = "lenient::optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub cash_amount: Option<Amount>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_ticket",
        skip_serializing_if = "Option::is_none"
    )]
    pub ticket_number: Option<TicketNumber>,
    pub check_in_time: DateTime<Local>,
    #[serde(default)]
    pub is_checked_out: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_out_time: Option<DateTime<Local>>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub overtime_charge: Option<Amount>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub final_bill: Option<Amount>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
}

impl Customer {
    pub fn state(&self) -> VisitState {
        if self.is_checked_out {
            VisitState::Closed
        } else {
            VisitState::Active
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == VisitState::Active
    }

    pub fn total_expenses(&self) -> Amount {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    /// Cash taken at the counter (0 for ticket visits)
    pub fn cash_income(&self) -> Amount {
        match self.payment {
            PaymentMethod::Cash => self.cash_amount.unwrap_or(0),
            PaymentMethod::Ticket => 0,
        }
    }

    /// Ticket used for admission, if this was a ticket visit
    pub fn admission_ticket(&self) -> Option<&TicketNumber> {
        match self.payment {
            PaymentMethod::Ticket => self.ticket_number.as_ref(),
            PaymentMethod::Cash => None,
        }
    }

    /// Time spent on site so far, or in total once checked out
    pub fn stay(&self, now: DateTime<Local>) -> Duration {
        self.check_out_time.unwrap_or(now) - self.check_in_time
    }
}

/// Exact set of ticket numbers belonging to one package.
///
/// The external form is comma-separated text (`"A1,A2,A3"`); a JSON list is
/// accepted on input too. Order of first appearance is kept for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketSet(Vec<TicketNumber>);

impl TicketSet {
    /// Parse comma-separated text; blanks and repeats are dropped
    pub fn parse(text: &str) -> Self {
        Self::from_iter(text.split([',', '，']).filter_map(TicketNumber::new))
    }

    pub fn contains(&self, ticket: &TicketNumber) -> bool {
        self.0.contains(ticket)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TicketNumber> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_text(&self) -> String {
        self.0
            .iter()
            .map(TicketNumber::as_str)
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromIterator<TicketNumber> for TicketSet {
    fn from_iter<I: IntoIterator<Item = TicketNumber>>(iter: I) -> Self {
        let mut tickets = Vec::new();
        for ticket in iter {
            if !tickets.contains(&ticket) {
                tickets.push(ticket);
            }
        }
        Self(tickets)
    }
}

impl fmt::Display for TicketSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl Serialize for TicketSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_text())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTickets {
    Text(String),
    List(Vec<String>),
}

impl<'de> Deserialize<'de> for TicketSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<RawTickets>::deserialize(deserializer)? {
            Some(RawTickets::Text(text)) => TicketSet::parse(&text),
            Some(RawTickets::List(list)) => list.iter().filter_map(TicketNumber::new).collect(),
            None => TicketSet::default(),
        })
    }
}

/// A prepaid batch of admission tickets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredPackageSale")]
pub struct PackageSale {
    pub id: PackageId,
    pub customer_name: String,
    pub notes: String,
    pub sale_date: DateTime<Local>,
    /// Total price paid for the batch
    pub amount: Amount,
    pub quantity: u32,
    pub ticket_numbers: TicketSet,
    /// Uses left; decremented at checkout, never below zero
    pub remaining: u32,
}

impl PackageSale {
    /// Uses recorded against the counter
    pub fn consumed(&self) -> u32 {
        self.quantity.saturating_sub(self.remaining)
    }
}

/// Package record as found in stored or imported data. Older browser
/// exports have no `remaining` counter; those start from the full quantity.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredPackageSale {
    id: PackageId,
    #[serde(default, deserialize_with = "lenient::text")]
    customer_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    notes: String,
    sale_date: DateTime<Local>,
    #[serde(deserialize_with = "lenient::amount")]
    amount: Amount,
    #[serde(deserialize_with = "lenient::count")]
    quantity: u32,
    #[serde(default)]
    ticket_numbers: TicketSet,
    #[serde(default, deserialize_with = "optional_count")]
    remaining: Option<u32>,
}

fn optional_count<'de, D: serde::Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(lenient::optional_amount(d)?.map(|n| n.clamp(0, u32::MAX as i64) as u32))
}

impl From<StoredPackageSale> for PackageSale {
    fn from(raw: StoredPackageSale) -> Self {
        Self {
            id: raw.id,
            customer_name: raw.customer_name,
            notes: raw.notes,
            sale_date: raw.sale_date,
            amount: raw.amount,
            quantity: raw.quantity,
            ticket_numbers: raw.ticket_numbers,
            remaining: raw.remaining.unwrap_or(raw.quantity),
        }
    }
}

/// Billing breakdown computed at checkout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub total_expenses: Amount,
    pub overtime_charge: Amount,
    pub final_bill: Amount,
}

/// Effect of a ticket checkout on its package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageConsumption {
    pub package_id: PackageId,
    pub remaining: u32,
    /// The package had no uses left; the counter stayed at zero
    pub overconsumed: bool,
}

/// Everything the counter needs to print after a checkout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutReceipt {
    pub customer_id: CustomerId,
    pub locker_number: LockerNumber,
    pub check_out_time: DateTime<Local>,
    pub bill: Bill,
    pub package: Option<PackageConsumption>,
}

/// One cell of the locker status grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockerView {
    pub number: LockerNumber,
    pub occupant: Option<CustomerId>,
}

impl LockerView {
    pub fn is_free(&self) -> bool {
        self.occupant.is_none()
    }
}

/// A package with its derived usage count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    pub sale: PackageSale,
    /// Ticket visits recorded against the package's tickets
    pub used: u64,
}

/// One ticket visit in a package's usage history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageRecord {
    pub customer_id: CustomerId,
    pub check_in_time: DateTime<Local>,
    pub customer_name: String,
    pub ticket_number: TicketNumber,
}
