//! Strongly-typed identifiers for the front desk

use chrono::{DateTime, Local};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a single visit (check-in record)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(i64);

impl CustomerId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a prepaid package sale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageId(i64);

impl PackageId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Physical locker number as printed on the door (1-based)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LockerNumber(u32);

impl LockerNumber {
    pub fn new(number: u32) -> Self {
        Self(number)
    }

    /// Build from a 0-based slot index
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    /// 0-based slot index; `None` for locker 0, which never exists
    pub fn index(&self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Display for LockerNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Browser exports stored the locker as the raw form text ("3"), so accept both.
impl<'de> Deserialize<'de> for LockerNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = crate::lenient::amount(deserializer)?;
        u32::try_from(raw)
            .map(LockerNumber)
            .map_err(|_| D::Error::custom(format!("invalid locker number {}", raw)))
    }
}

/// A single admission ticket number, compared exactly after trimming
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketNumber(String);

impl TicketNumber {
    /// Returns `None` for blank input
    pub fn new(raw: impl AsRef<str>) -> Option<Self> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for TicketNumber {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s).ok_or_else(|| "ticket number cannot be blank".to_string())
    }
}

impl From<TicketNumber> for String {
    fn from(t: TicketNumber) -> Self {
        t.0
    }
}

/// Largest id a record may carry: the last millisecond of year 9999 (UTC)
pub const MAX_RECORD_ID: i64 = 253_402_300_799_999;

/// Issues creation-ordered record ids.
///
/// Ids are millisecond timestamps, bumped past the last issued id so two
/// records created within the same millisecond still get distinct, increasing
/// ids.
#[derive(Debug, Clone, Default)]
pub struct IdSequence {
    last: i64,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure future ids sort after `id`
    pub fn observe(&mut self, id: i64) {
        self.last = self.last.max(id);
    }

    pub fn next(&mut self, now: DateTime<Local>) -> i64 {
        let id = now.timestamp_millis().max(self.last.saturating_add(1));
        self.last = id;
        id
    }
}
