//! Inventory domain models.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the current-inventory table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InventoryRecord {
    /// Trimmed part identifier, unique within the index.
    pub part_key: String,
    /// Management number from the inventory table; when non-empty it takes
    /// precedence over the BOM-provided one.
    pub management_number: String,
    pub stock_quantity: f64,
}

/// Inventory lookup by part key. Built top-to-bottom from the sheet, so a
/// duplicated part key keeps the last row seen.
pub type InventoryIndex = HashMap<String, InventoryRecord>;

/// Stock figure for a report row.
///
/// A part key missing from the inventory table is "unknown", which is a
/// different statement than a true zero-stock part: no shortage can be
/// computed for it. Serializes untagged, so `OnHand` is a plain number and
/// `NotFound` is JSON null.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum StockLevel {
    OnHand(f64),
    NotFound,
}

impl StockLevel {
    pub fn on_hand(&self) -> Option<f64> {
        match self {
            Self::OnHand(qty) => Some(*qty),
            Self::NotFound => None,
        }
    }

    /// Shortage against a required total: `max(0, required - stock)` when
    /// the stock figure is known, 0 when it is not.
    pub fn shortage_against(&self, required: f64) -> f64 {
        match self {
            Self::OnHand(stock) => (required - stock).max(0.0),
            Self::NotFound => 0.0,
        }
    }
}

impl std::fmt::Display for StockLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OnHand(qty) => write!(f, "{qty}"),
            Self::NotFound => write!(f, "N/A"),
        }
    }
}
