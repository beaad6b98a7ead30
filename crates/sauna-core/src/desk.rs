//! Front desk controller

use chrono::{DateTime, Local, NaiveDate};
use sauna_api::{
    CheckoutReceipt, Customer, DailyOverview, ExportDocument, ImportDocument, LockerView,
    PackageSale, PackageSummary, Report, UsageRecord,
};
use sauna_config::DeskPolicy;
use sauna_store::{StateSnapshot, Store};
use sauna_util::{CustomerId, DeskError, IdSequence, MAX_RECORD_ID, PackageId, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{CheckInRequest, CustomerLedger, LockerRegistry, PackageLedger, SaleRequest};

/// What an import replaced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOutcome {
    pub customers: Option<usize>,
    pub package_sales: Option<usize>,
    pub lockers: Option<usize>,
}

/// The front desk: lockers, visits and packages backed by a store.
///
/// Every mutation validates first, then updates memory, then saves the full
/// state. A failed save is logged and does not fail the operation.
pub struct FrontDesk {
    policy: DeskPolicy,
    store: Arc<dyn Store>,
    lockers: LockerRegistry,
    customers: CustomerLedger,
    packages: PackageLedger,
    ids: IdSequence,
}

impl FrontDesk {
    /// Load the desk state from the store
    pub fn open(policy: DeskPolicy, store: Arc<dyn Store>) -> Result<Self> {
        if !store.is_healthy() {
            warn!("Store reports unhealthy at open");
        }

        let snapshot = store.load_snapshot(policy.desk.locker_capacity)?;
        let desk = Self::from_snapshot(policy, store, snapshot);

        info!(
            customers = desk.customers.all().len(),
            on_site = desk.customers.active().len(),
            packages = desk.packages.all().len(),
            lockers = desk.lockers.capacity(),
            "Front desk opened"
        );
        Ok(desk)
    }

    fn from_snapshot(policy: DeskPolicy, store: Arc<dyn Store>, snapshot: StateSnapshot) -> Self {
        let lockers = LockerRegistry::from_slots(snapshot.lockers, policy.desk.locker_capacity);
        let mut desk = Self {
            policy,
            store,
            lockers,
            customers: CustomerLedger::new(snapshot.customers),
            packages: PackageLedger::new(snapshot.package_sales),
            ids: IdSequence::new(),
        };
        desk.observe_ids();
        desk
    }

    fn observe_ids(&mut self) {
        for customer in self.customers.all() {
            self.ids.observe(customer.id.as_i64());
        }
        for sale in self.packages.all() {
            self.ids.observe(sale.id.as_i64());
        }
    }

    pub fn policy(&self) -> &DeskPolicy {
        &self.policy
    }

    /// Check a customer in and claim their locker
    pub fn check_in(&mut self, request: CheckInRequest, now: DateTime<Local>) -> Result<Customer> {
        let id = CustomerId::new(self.ids.next(now));
        let customer = self
            .customers
            .check_in(
                request,
                id,
                &mut self.lockers,
                self.policy.desk.require_ticket_number,
                now,
            )?
            .clone();

        if let Some(ticket) = &customer.ticket_number
            && self.packages.find_by_ticket(ticket).is_none()
        {
            warn!(ticket = %ticket, "Ticket does not belong to any package");
        }

        info!(
            customer_id = %customer.id,
            locker = %customer.locker_number,
            payment = %customer.payment,
            "Customer checked in"
        );

        self.persist();
        Ok(customer)
    }

    /// Check a customer out: bill overtime, free the locker and use up the
    /// admission ticket
    pub fn check_out(&mut self, id: CustomerId, now: DateTime<Local>) -> Result<CheckoutReceipt> {
        let (customer, bill) = self.customers.close(id, &self.policy.tariff, now)?;
        let locker = customer.locker_number;
        let ticket = customer.admission_ticket().cloned();

        match self.lockers.release(locker) {
            Ok(Some(occupant)) if occupant != id => {
                warn!(
                    locker = %locker,
                    occupant = %occupant,
                    "Locker held by another customer was cleared"
                );
            }
            Ok(_) => {}
            Err(e) => warn!(locker = %locker, error = %e, "Visit locker is outside the registry"),
        }

        let package = ticket.as_ref().and_then(|t| self.packages.consume(t));
        if let Some(ticket) = &ticket
            && package.is_none()
        {
            warn!(ticket = %ticket, "No package holds this ticket; nothing consumed");
        }

        info!(
            customer_id = %id,
            locker = %locker,
            overtime = bill.overtime_charge,
            final_bill = bill.final_bill,
            "Customer checked out"
        );

        self.persist();
        Ok(CheckoutReceipt {
            customer_id: id,
            locker_number: locker,
            check_out_time: now,
            bill,
            package,
        })
    }

    /// Sell a prepaid ticket package
    pub fn sell_package(&mut self, request: SaleRequest, now: DateTime<Local>) -> Result<PackageSale> {
        let id = PackageId::new(self.ids.next(now));
        let sale = self.packages.sell(request, id, now)?.clone();

        info!(
            package_id = %sale.id,
            quantity = sale.quantity,
            amount = sale.amount,
            "Package sold"
        );

        self.persist();
        Ok(sale)
    }

    /// Replace each collection present in the document. A rejected document
    /// leaves state untouched.
    pub fn import(&mut self, doc: ImportDocument) -> Result<ImportOutcome> {
        check_import_ids(&doc)?;

        let mut outcome = ImportOutcome::default();

        if let Some(customers) = doc.customers {
            outcome.customers = Some(customers.len());
            self.customers = CustomerLedger::new(customers);
        }
        if let Some(sales) = doc.package_sales {
            outcome.package_sales = Some(sales.len());
            self.packages = PackageLedger::new(sales);
        }
        if let Some(slots) = doc.lockers {
            outcome.lockers = Some(slots.len());
            self.lockers = LockerRegistry::from_slots(slots, self.policy.desk.locker_capacity);
        }
        self.observe_ids();

        info!(
            customers = ?outcome.customers,
            packages = ?outcome.package_sales,
            lockers = ?outcome.lockers,
            "Data imported"
        );

        self.persist();
        Ok(outcome)
    }

    /// Parse an import file and apply it
    pub fn import_bytes(&mut self, bytes: &[u8]) -> Result<ImportOutcome> {
        let doc = sauna_store::parse_import(bytes)?;
        self.import(doc)
    }

    fn persist(&self) {
        match self.store.save_snapshot(&self.snapshot()) {
            Ok(()) => debug!("State saved"),
            Err(e) => warn!(error = %e, "Failed to save desk state"),
        }
    }

    pub fn customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.get(id)
    }

    pub fn customers(&self) -> &[Customer] {
        self.customers.all()
    }

    /// Customers on site, by locker
    pub fn active_customers(&self) -> Vec<&Customer> {
        self.customers.active()
    }

    pub fn lockers(&self) -> Vec<LockerView> {
        self.lockers.views()
    }

    pub fn free_lockers(&self) -> usize {
        self.lockers.free_count()
    }

    pub fn packages(&self) -> &[PackageSale] {
        self.packages.all()
    }

    pub fn package_summaries(&self) -> Vec<PackageSummary> {
        self.packages.summaries(&self.customers)
    }

    pub fn usage_history(&self, id: PackageId) -> Result<Vec<UsageRecord>> {
        self.packages.usage_history(id, &self.customers)
    }

    pub fn report(&self, start: NaiveDate, end: NaiveDate) -> Report {
        crate::report(self.customers.all(), self.packages.all(), start, end)
    }

    pub fn daily_overview(&self, date: NaiveDate) -> DailyOverview {
        crate::daily_overview(self.customers.all(), self.packages.all(), date)
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            customers: self.customers.all().to_vec(),
            package_sales: self.packages.all().to_vec(),
            lockers: self.lockers.slots().to_vec(),
        }
    }

    pub fn export(&self, now: DateTime<Local>) -> ExportDocument {
        sauna_store::export_document(&self.snapshot(), now)
    }
}

fn check_import_ids(doc: &ImportDocument) -> Result<()> {
    let customer_ids = doc.customers.iter().flatten().map(|c| c.id.as_i64());
    let sale_ids = doc.package_sales.iter().flatten().map(|s| s.id.as_i64());

    match customer_ids.chain(sale_ids).find(|id| *id > MAX_RECORD_ID) {
        Some(id) => Err(DeskError::import(format!("record id {id} is out of range"))),
        None => Ok(()),
    }
}
