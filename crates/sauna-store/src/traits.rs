//! Store trait definitions

use sauna_api::{Customer, PackageSale};
use sauna_util::CustomerId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::StoreResult;

/// The three persisted entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKey {
    Customers,
    Packages,
    Lockers,
}

impl EntryKey {
    pub const ALL: [EntryKey; 3] = [EntryKey::Customers, EntryKey::Packages, EntryKey::Lockers];

    /// Entry name, shared with the browser front desk's local storage
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKey::Customers => "saunaCustomers",
            EntryKey::Packages => "saunaPackages",
            EntryKey::Lockers => "saunaLockers",
        }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Main store trait: a key-value port holding one JSON document per entry
pub trait Store: Send + Sync {
    /// Read the raw JSON of an entry, `None` if it was never written
    fn read_entry(&self, key: EntryKey) -> StoreResult<Option<String>>;

    /// Replace the raw JSON of an entry
    fn write_entry(&self, key: EntryKey, json: &str) -> StoreResult<()>;

    /// Check if store is healthy
    fn is_healthy(&self) -> bool;

    /// Load all three entries. Missing entries fall back to no customers,
    /// no packages and `locker_capacity` empty lockers.
    fn load_snapshot(&self, locker_capacity: usize) -> StoreResult<StateSnapshot> {
        let customers = read_json(self, EntryKey::Customers)?.unwrap_or_default();
        let package_sales = read_json(self, EntryKey::Packages)?.unwrap_or_default();
        let lockers =
            read_json(self, EntryKey::Lockers)?.unwrap_or_else(|| vec![None; locker_capacity]);

        Ok(StateSnapshot {
            customers,
            package_sales,
            lockers,
        })
    }

    /// Write all three entries
    fn save_snapshot(&self, snapshot: &StateSnapshot) -> StoreResult<()> {
        self.write_entry(EntryKey::Customers, &serde_json::to_string(&snapshot.customers)?)?;
        self.write_entry(EntryKey::Packages, &serde_json::to_string(&snapshot.package_sales)?)?;
        self.write_entry(EntryKey::Lockers, &serde_json::to_string(&snapshot.lockers)?)?;
        Ok(())
    }
}

fn read_json<S, T>(store: &S, key: EntryKey) -> StoreResult<Option<T>>
where
    S: Store + ?Sized,
    T: DeserializeOwned,
{
    match store.read_entry(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Complete persisted state of the desk
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub customers: Vec<Customer>,
    pub package_sales: Vec<PackageSale>,
    /// One slot per locker; `Some` holds the occupying customer
    pub lockers: Vec<Option<CustomerId>>,
}

impl StateSnapshot {
    /// Fresh state with every locker free
    pub fn empty(locker_capacity: usize) -> Self {
        Self {
            customers: Vec::new(),
            package_sales: Vec::new(),
            lockers: vec![None; locker_capacity],
        }
    }
}
