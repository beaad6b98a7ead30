//! Visit ledger: check-in, checkout and overtime billing

use chrono::{DateTime, Local};
use sauna_api::{Amount, Bill, Customer, PaymentMethod, TicketSet, TicketType};
use sauna_config::Tariff;
use sauna_util::{CustomerId, DeskError, LockerNumber, Result, TicketNumber};
use tracing::debug;

use crate::LockerRegistry;

const HOUR_MILLIS: i64 = 3_600_000;

/// Check-in form as entered at the counter
#[derive(Debug, Clone)]
pub struct CheckInRequest {
    pub locker_number: Option<LockerNumber>,
    pub customer_name: String,
    pub ticket_type: TicketType,
    pub payment: PaymentMethod,
    pub cash_amount: Option<Amount>,
    pub ticket_number: Option<String>,
    pub notes: String,
}

impl CheckInRequest {
    /// Cash admission at the list price of `ticket_type`
    pub fn cash(locker: LockerNumber, ticket_type: TicketType, amount: Amount) -> Self {
        Self {
            locker_number: Some(locker),
            customer_name: String::new(),
            ticket_type,
            payment: PaymentMethod::Cash,
            cash_amount: Some(amount),
            ticket_number: None,
            notes: String::new(),
        }
    }

    /// Admission with a prepaid ticket
    pub fn ticket(locker: LockerNumber, ticket_number: impl Into<String>) -> Self {
        Self {
            locker_number: Some(locker),
            customer_name: String::new(),
            ticket_type: TicketType::Regular,
            payment: PaymentMethod::Ticket,
            cash_amount: None,
            ticket_number: Some(ticket_number.into()),
            notes: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.customer_name = name.into();
        self
    }
}

/// Overtime owed after a stay from `check_in` to `now`.
///
/// Every started hour beyond the grace period is billed at the full rate.
/// Clock skew (checkout before check-in) bills nothing.
pub fn overtime_charge(check_in: DateTime<Local>, now: DateTime<Local>, tariff: &Tariff) -> Amount {
    let elapsed = (now - check_in).num_milliseconds();
    let over = elapsed - tariff.grace_period.num_milliseconds();
    if over <= 0 {
        return 0;
    }

    let started_hours = (over + HOUR_MILLIS - 1) / HOUR_MILLIS;
    started_hours.saturating_mul(tariff.overtime_rate)
}

/// All visits, in check-in order
#[derive(Debug, Clone, Default)]
pub struct CustomerLedger {
    customers: Vec<Customer>,
}

impl CustomerLedger {
    pub fn new(customers: Vec<Customer>) -> Self {
        Self { customers }
    }

    pub fn all(&self) -> &[Customer] {
        &self.customers
    }

    pub fn get(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Customers on site, ordered by locker
    pub fn active(&self) -> Vec<&Customer> {
        let mut active: Vec<_> = self.customers.iter().filter(|c| c.is_active()).collect();
        active.sort_by_key(|c| c.locker_number);
        active
    }

    /// Validate a check-in form and open the visit, claiming its locker.
    /// Nothing changes when validation fails.
    pub fn check_in(
        &mut self,
        request: CheckInRequest,
        id: CustomerId,
        lockers: &mut LockerRegistry,
        require_ticket_number: bool,
        now: DateTime<Local>,
    ) -> Result<&Customer> {
        let locker = request
            .locker_number
            .ok_or(DeskError::MissingField("lockerNumber"))?;
        lockers.index_of(locker)?;

        let (cash_amount, ticket_number) = match request.payment {
            PaymentMethod::Cash => {
                let amount = request.cash_amount.ok_or(DeskError::MissingPayment)?;
                (Some(amount), None)
            }
            PaymentMethod::Ticket => {
                let ticket = request.ticket_number.as_deref().and_then(TicketNumber::new);
                if ticket.is_none() && require_ticket_number {
                    return Err(DeskError::MissingField("ticketNumber"));
                }
                (None, ticket)
            }
        };

        lockers.allocate(locker, id)?;

        self.customers.push(Customer {
            id,
            locker_number: locker,
            customer_name: request.customer_name.trim().to_string(),
            notes: request.notes.trim().to_string(),
            ticket_type: request.ticket_type,
            payment: request.payment,
            cash_amount,
            ticket_number,
            check_in_time: now,
            is_checked_out: false,
            check_out_time: None,
            overtime_charge: None,
            final_bill: None,
            expenses: Vec::new(),
        });

        debug!(customer_id = %id, locker = %locker, "Visit opened");
        Ok(&self.customers[self.customers.len() - 1])
    }

    /// Close an active visit and bill it. The locker and package are left
    /// to the caller.
    pub fn close(
        &mut self,
        id: CustomerId,
        tariff: &Tariff,
        now: DateTime<Local>,
    ) -> Result<(&Customer, Bill)> {
        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(DeskError::CustomerNotFound(id))?;

        if !customer.is_active() {
            return Err(DeskError::AlreadyClosed(id));
        }

        let total_expenses = customer.total_expenses();
        let overtime = overtime_charge(customer.check_in_time, now, tariff);
        let bill = Bill {
            total_expenses,
            overtime_charge: overtime,
            final_bill: total_expenses + overtime,
        };

        customer.is_checked_out = true;
        customer.check_out_time = Some(now);
        customer.overtime_charge = Some(bill.overtime_charge);
        customer.final_bill = Some(bill.final_bill);

        Ok((&*customer, bill))
    }

    /// Ticket visits whose ticket belongs to `tickets`
    pub fn ticket_visits<'a>(
        &'a self,
        tickets: &'a TicketSet,
    ) -> impl Iterator<Item = &'a Customer> + 'a {
        self.customers
            .iter()
            .filter(move |c| c.admission_ticket().is_some_and(|t| tickets.contains(t)))
    }

    /// Number of ticket visits recorded against `tickets`, open or closed
    pub fn used_count(&self, tickets: &TicketSet) -> u64 {
        self.ticket_visits(tickets).count() as u64
    }
}
