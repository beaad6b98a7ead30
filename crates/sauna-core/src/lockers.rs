//! Locker slot registry

use sauna_api::LockerView;
use sauna_util::{CustomerId, DeskError, LockerNumber, Result};
use tracing::warn;

/// Fixed-size array of locker slots, each empty or held by one customer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockerRegistry {
    slots: Vec<Option<CustomerId>>,
}

impl LockerRegistry {
    /// All lockers free
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
        }
    }

    /// Rebuild from a stored slot array.
    ///
    /// Short arrays are padded with free slots. Long arrays are cut back to
    /// `capacity`, but never past the last occupied slot.
    pub fn from_slots(mut slots: Vec<Option<CustomerId>>, capacity: usize) -> Self {
        if slots.len() < capacity {
            slots.resize(capacity, None);
        } else if slots.len() > capacity {
            let last_occupied = slots.iter().rposition(Option::is_some).map_or(0, |i| i + 1);
            let keep = last_occupied.max(capacity);
            if keep > capacity {
                warn!(
                    stored = slots.len(),
                    capacity,
                    kept = keep,
                    "Stored lockers exceed capacity; keeping occupied slots"
                );
            }
            slots.truncate(keep);
        }

        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// 0-based index of a locker, or `InvalidSlot`
    pub fn index_of(&self, locker: LockerNumber) -> Result<usize> {
        locker
            .index()
            .filter(|&i| i < self.slots.len())
            .ok_or(DeskError::InvalidSlot {
                locker,
                capacity: self.slots.len(),
            })
    }

    pub fn is_occupied(&self, locker: LockerNumber) -> Result<bool> {
        let index = self.index_of(locker)?;
        Ok(self.slots[index].is_some())
    }

    pub fn occupant(&self, locker: LockerNumber) -> Option<CustomerId> {
        let index = self.index_of(locker).ok()?;
        self.slots[index]
    }

    /// Claim a free slot for a customer
    pub fn allocate(&mut self, locker: LockerNumber, customer: CustomerId) -> Result<()> {
        let index = self.index_of(locker)?;
        if self.slots[index].is_some() {
            return Err(DeskError::SlotOccupied(locker));
        }
        self.slots[index] = Some(customer);
        Ok(())
    }

    /// Free a slot whatever it held. Returns the previous occupant.
    pub fn release(&mut self, locker: LockerNumber) -> Result<Option<CustomerId>> {
        let index = self.index_of(locker)?;
        Ok(self.slots[index].take())
    }

    pub fn free_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_none()).count()
    }

    /// One view per slot, in locker order
    pub fn views(&self) -> Vec<LockerView> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, occupant)| LockerView {
                number: LockerNumber::from_index(i),
                occupant: *occupant,
            })
            .collect()
    }

    pub fn slots(&self) -> &[Option<CustomerId>] {
        &self.slots
    }
}
