//! Wire stock inventory
//!
//! Cut lengths of wire kept on the shelf, keyed by a reference derived from
//! the wire type and length. Quantities never drop to zero: removing the last
//! piece removes the entry.
//!
//! Distinct wire types can reduce to the same reference (`1.5mm` and `15mm`).
//! An entry only ever holds the wire type it was created with; the other type
//! is refused on add and treated as absent on remove.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;
use thiserror::Error;

/// Lengths (m) offered when adding or removing stock
pub const LENGTHS: RangeInclusive<u32> = 2..=20;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error("Wire type must contain at least one letter or digit")]
    InvalidWireType,

    #[error("No {wire_type} ({length}m) found in inventory.")]
    NotInStock { wire_type: String, length: u32 },

    #[error("Reference {reference} is already used by {existing}; rename {wire_type} to stock it")]
    ReferenceConflict {
        wire_type: String,
        existing: String,
        reference: String,
    },
}

/// One stocked wire type/length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireStock {
    #[serde(rename = "type")]
    pub wire_type: String,
    pub length: u32,
    pub quantity: u32,
    pub reference: String,
}

/// Deterministic reference for a wire type and length
///
/// Non-alphanumeric characters are dropped and the rest upper-cased:
/// `("1.5mm² black", 5)` -> `15MMBLACK-05M`.
pub fn generate_reference(wire_type: &str, length: u32) -> Result<String, InventoryError> {
    let code: String = wire_type
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if code.is_empty() {
        return Err(InventoryError::InvalidWireType);
    }

    Ok(format!("{}-{:02}M", code, length))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    entries: BTreeMap<String, WireStock>,
}

impl Inventory {
    pub fn entries(&self) -> &BTreeMap<String, WireStock> {
        &self.entries
    }

    pub fn get(&self, reference: &str) -> Option<&WireStock> {
        self.entries.get(reference)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add one piece, creating the entry if needed
    pub fn add(&mut self, wire_type: &str, length: u32) -> Result<&WireStock, InventoryError> {
        let reference = generate_reference(wire_type, length)?;
        if let Some(existing) = self.entries.get(&reference) {
            if existing.wire_type != wire_type {
                return Err(InventoryError::ReferenceConflict {
                    wire_type: wire_type.to_string(),
                    existing: existing.wire_type.clone(),
                    reference,
                });
            }
        }

        let entry = self
            .entries
            .entry(reference.clone())
            .and_modify(|stock| stock.quantity += 1)
            .or_insert_with(|| WireStock {
                wire_type: wire_type.to_string(),
                length,
                quantity: 1,
                reference,
            });
        tracing::debug!(reference = %entry.reference, quantity = entry.quantity, "Wire stock added");
        Ok(entry)
    }

    /// Remove one piece; returns the remaining quantity
    pub fn remove(&mut self, wire_type: &str, length: u32) -> Result<u32, InventoryError> {
        let reference = generate_reference(wire_type, length)?;
        let not_in_stock = || InventoryError::NotInStock {
            wire_type: wire_type.to_string(),
            length,
        };

        let stock = self
            .entries
            .get_mut(&reference)
            .filter(|stock| stock.wire_type == wire_type)
            .ok_or_else(not_in_stock)?;
        if stock.quantity == 0 {
            return Err(not_in_stock());
        }
        stock.quantity -= 1;
        let remaining = stock.quantity;

        if remaining == 0 {
            self.entries.remove(&reference);
        }
        tracing::debug!(%reference, remaining, "Wire stock removed");
        Ok(remaining)
    }

    /// All stocked lengths of one wire type
    pub fn search(&self, wire_type: &str) -> Vec<&WireStock> {
        self.entries
            .values()
            .filter(|stock| stock.wire_type == wire_type)
            .collect()
    }

    /// Distinct wire types, sorted
    pub fn wire_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.entries.values().map(|s| s.wire_type.as_str()).collect();
        types.sort_unstable();
        types.dedup();
        types
    }

    /// Pieces on the shelf per wire type, across all lengths
    pub fn totals_by_type(&self) -> FxHashMap<&str, u32> {
        let mut totals: FxHashMap<&str, u32> = FxHashMap::default();
        for stock in self.entries.values() {
            *totals.entry(stock.wire_type.as_str()).or_insert(0) += stock.quantity;
        }
        totals
    }
}
