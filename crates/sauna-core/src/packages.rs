//! Package ledger: prepaid ticket batches

use chrono::{DateTime, Local};
use sauna_api::{Amount, PackageConsumption, PackageSale, PackageSummary, TicketSet, UsageRecord};
use sauna_util::{DeskError, PackageId, Result, TicketNumber};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::CustomerLedger;

/// Package sale form as entered at the counter
#[derive(Debug, Clone, Default)]
pub struct SaleRequest {
    pub customer_name: String,
    pub amount: Option<Amount>,
    pub quantity: Option<u32>,
    /// Comma-separated ticket numbers
    pub ticket_numbers: String,
    pub notes: String,
}

/// Package sales with an index from ticket number to sale
#[derive(Debug, Clone, Default)]
pub struct PackageLedger {
    sales: Vec<PackageSale>,
    /// Positions in `sales`, earliest first
    by_ticket: HashMap<TicketNumber, Vec<usize>>,
}

impl PackageLedger {
    pub fn new(sales: Vec<PackageSale>) -> Self {
        let mut ledger = Self {
            sales,
            by_ticket: HashMap::new(),
        };
        ledger.reindex();
        ledger
    }

    fn reindex(&mut self) {
        self.by_ticket.clear();
        for (pos, sale) in self.sales.iter().enumerate() {
            for ticket in sale.ticket_numbers.iter() {
                let positions = self.by_ticket.entry(ticket.clone()).or_default();
                if let Some(&first) = positions.first() {
                    warn!(
                        ticket = %ticket,
                        first = %self.sales[first].id,
                        duplicate = %sale.id,
                        "Ticket listed in several packages; checkouts use the first"
                    );
                }
                positions.push(pos);
            }
        }
    }

    pub fn all(&self) -> &[PackageSale] {
        &self.sales
    }

    pub fn get(&self, id: PackageId) -> Option<&PackageSale> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// Earliest package holding `ticket`
    pub fn find_by_ticket(&self, ticket: &TicketNumber) -> Option<&PackageSale> {
        let pos = *self.by_ticket.get(ticket)?.first()?;
        self.sales.get(pos)
    }

    /// Validate a sale form and record the package with all uses remaining
    pub fn sell(
        &mut self,
        request: SaleRequest,
        id: PackageId,
        now: DateTime<Local>,
    ) -> Result<&PackageSale> {
        let amount = request.amount.ok_or(DeskError::MissingField("amount"))?;
        let customer_name = request.customer_name.trim();
        if customer_name.is_empty() {
            return Err(DeskError::MissingField("customerName"));
        }
        let quantity = request.quantity.ok_or(DeskError::MissingField("quantity"))?;

        let ticket_numbers = TicketSet::parse(&request.ticket_numbers);
        if ticket_numbers.is_empty() {
            return Err(DeskError::MissingField("ticketNumbers"));
        }
        for ticket in ticket_numbers.iter() {
            if let Some(existing) = self.find_by_ticket(ticket) {
                return Err(DeskError::DuplicateTicket {
                    ticket: ticket.clone(),
                    package: existing.id,
                });
            }
        }

        let pos = self.sales.len();
        for ticket in ticket_numbers.iter() {
            self.by_ticket.entry(ticket.clone()).or_default().push(pos);
        }
        self.sales.push(PackageSale {
            id,
            customer_name: customer_name.to_string(),
            notes: request.notes.trim().to_string(),
            sale_date: now,
            amount,
            quantity,
            ticket_numbers,
            remaining: quantity,
        });

        debug!(package_id = %id, quantity, "Package sold");
        Ok(&self.sales[pos])
    }

    /// Record one use of `ticket` against its package. `None` when no
    /// package holds the ticket.
    pub fn consume(&mut self, ticket: &TicketNumber) -> Option<PackageConsumption> {
        let pos = *self.by_ticket.get(ticket)?.first()?;
        let sale = self.sales.get_mut(pos)?;

        let overconsumed = sale.remaining == 0;
        if overconsumed {
            warn!(
                package_id = %sale.id,
                ticket = %ticket,
                "Package has no uses left; counter stays at zero"
            );
        } else {
            sale.remaining -= 1;
        }

        Some(PackageConsumption {
            package_id: sale.id,
            remaining: sale.remaining,
            overconsumed,
        })
    }

    /// Every ticket visit against a package, in check-in order
    pub fn usage_history(
        &self,
        id: PackageId,
        customers: &CustomerLedger,
    ) -> Result<Vec<UsageRecord>> {
        let sale = self.get(id).ok_or(DeskError::PackageNotFound(id))?;

        let mut history: Vec<UsageRecord> = customers
            .ticket_visits(&sale.ticket_numbers)
            .filter_map(|c| {
                let ticket = c.admission_ticket()?;
                Some(UsageRecord {
                    customer_id: c.id,
                    check_in_time: c.check_in_time,
                    customer_name: c.customer_name.clone(),
                    ticket_number: ticket.clone(),
                })
            })
            .collect();
        history.sort_by_key(|r| r.check_in_time);

        Ok(history)
    }

    /// Each sale with the number of visits made on its tickets
    pub fn summaries(&self, customers: &CustomerLedger) -> Vec<PackageSummary> {
        self.sales
            .iter()
            .map(|sale| PackageSummary {
                sale: sale.clone(),
                used: customers.used_count(&sale.ticket_numbers),
            })
            .collect()
    }
}
