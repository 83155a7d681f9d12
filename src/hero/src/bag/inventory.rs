// src/hero/src/bag/inventory.rs
use serde::{Deserialize, Serialize};
use thiserror::Error;

use error::GameError;

#[derive(Debug, Error, PartialEq)]
pub enum InventoryError {
    #[error("Inventory is full")]
    Full,
    #[error("Invalid index {index} (len {len})")]
    InvalidIndex { index: usize, len: usize },
    #[error("Item cannot be stored")]
    NotStorable,
}

impl From<InventoryError> for GameError {
    fn from(err: InventoryError) -> Self {
        match err {
            InventoryError::Full => GameError::BagFull,
            InventoryError::InvalidIndex { index, len } => {
                GameError::InvalidSelection { index, len }
            }
            InventoryError::NotStorable => GameError::InputError(err.to_string()),
        }
    }
}

/// Fixed-capacity list of unused items, kept in pickup order
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Inventory<T> {
    slots: Vec<T>,
    capacity: usize,
}

impl<T> Inventory<T> {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn add(&mut self, item: T) -> Result<(), InventoryError> {
        if self.is_full() {
            return Err(InventoryError::Full);
        }
        self.slots.push(item);
        Ok(())
    }

    pub fn remove(&mut self, index: usize) -> Result<T, InventoryError> {
        if index >= self.slots.len() {
            return Err(InventoryError::InvalidIndex {
                index,
                len: self.slots.len(),
            });
        }
        Ok(self.slots.remove(index))
    }

    pub fn items(&self) -> &[T] {
        &self.slots
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_until_full() {
        let mut inv = Inventory::new(2);
        assert!(inv.add(1).is_ok());
        assert!(inv.add(2).is_ok());
        assert!(inv.is_full());
        assert_eq!(inv.add(3), Err(InventoryError::Full));
        assert_eq!(inv.items(), &[1, 2]);
    }

    #[test]
    fn remove_checks_bounds() {
        let mut inv = Inventory::new(4);
        inv.add("a").unwrap();
        inv.add("b").unwrap();

        assert_eq!(inv.remove(5), Err(InventoryError::InvalidIndex { index: 5, len: 2 }));
        assert_eq!(inv.remove(0), Ok("a"));
        assert_eq!(inv.items(), &["b"]);
    }

    #[test]
    fn bad_index_becomes_invalid_selection() {
        let err: GameError = InventoryError::InvalidIndex { index: 3, len: 0 }.into();
        assert_eq!(err, GameError::InvalidSelection { index: 3, len: 0 });
        assert!(err.is_recoverable());
    }
}
