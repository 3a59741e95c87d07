//! Picking-report domain models.
//!
//! Two presentation modes share one aggregation core: per-supply-destination
//! rows (used for the sheet export) and a combined view that shows every
//! destination's requirement for a part side by side.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::inventory::StockLevel;

/// Accumulation unit keyed by `(supply_destination, part_key)`.
///
/// Display attributes come from the first BOM line seen for the key, in
/// request-then-line order; `required_quantity` is the sum of every scaled
/// contribution to that key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AggregatedPart {
    pub management_number: String,
    pub part_key: String,
    pub manufacturer: String,
    pub part_name: String,
    pub unit: String,
    pub procurement: String,
    pub supply_destination: String,
    pub required_quantity: f64,
}

/// Accumulation unit for the combined view, keyed by `part_key` alone.
///
/// `quantities` holds the per-supply-destination requirement breakdown;
/// `total_required` is their sum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombinedPart {
    pub management_number: String,
    pub part_key: String,
    pub manufacturer: String,
    pub part_name: String,
    pub unit: String,
    pub procurement: String,
    pub quantities: BTreeMap<String, f64>,
    pub total_required: f64,
}

/// One reconciled row of the per-destination picking list.
///
/// Derived from an [`AggregatedPart`] once aggregation for its key is
/// complete; shortage is judged against the final total, never a partial
/// sum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportRow {
    pub management_number: String,
    pub part_key: String,
    pub manufacturer: String,
    pub part_name: String,
    pub unit: String,
    pub procurement: String,
    pub supply_destination: String,
    pub required_quantity: f64,
    pub stock_quantity: StockLevel,
    pub shortage_quantity: f64,
}

/// One reconciled row of the combined multi-destination view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CombinedRow {
    pub management_number: String,
    pub part_key: String,
    pub manufacturer: String,
    pub part_name: String,
    pub unit: String,
    pub procurement: String,
    /// Requirement per supply destination.
    pub quantities: BTreeMap<String, f64>,
    pub total_required: f64,
    pub stock_quantity: StockLevel,
    pub shortage_quantity: f64,
}

/// The combined picking list handed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PickingList {
    pub rows: Vec<CombinedRow>,
    /// Supply destinations that contributed, in first-seen order.
    pub destinations: Vec<String>,
}

impl PickingList {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A named sheet of the export workbook: fixed headers plus stringly-typed
/// cell rows, ready for re-encoding (CSV, XLSX, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// The per-supply-destination export: one sheet per destination.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}
