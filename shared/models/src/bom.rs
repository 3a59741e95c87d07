//! Bill-of-materials domain models.
//!
//! A BOM sheet describes the parts needed to build one unit of a product:
//! one `BomLine` per part, plus the supply destination the assembled batch
//! is shipped to, read once per sheet.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// One part entry inside one product's bill of materials.
///
/// `part_key` is the join key against inventory and is always stored
/// trimmed; a line whose part key is blank never leaves extraction.
/// `supply_destination` is derived once per BOM sheet but carried on every
/// line so downstream aggregation can treat lines uniformly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BomLine {
    /// Opaque in-house management number, may be empty.
    pub management_number: String,
    /// Canonical part identifier, trimmed, case-preserving.
    pub part_key: String,
    pub manufacturer: String,
    pub part_name: String,
    /// Unit label, defaults to a generic label when the cell is blank.
    pub unit: String,
    /// Procurement destination: who the part is sourced from. Descriptive
    /// only, distinct from `supply_destination`.
    pub procurement: String,
    /// Where the picked parts are shipped; the primary grouping key.
    pub supply_destination: String,
    /// Quantity of this part needed per single unit of the parent product.
    pub unit_requirement: f64,
}

/// A fully extracted BOM: the product it belongs to, the supply
/// destination read from the sheet header, and the usable lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BomSheet {
    pub product_id: String,
    pub supply_destination: String,
    pub lines: Vec<BomLine>,
}

impl BomSheet {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// One entry of the caller's input: build `quantity` units of `product_id`.
///
/// A request with quantity 0 or an unrecognized product id contributes
/// nothing to the picking list; it is skipped, not rejected.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
pub struct BuildRequest {
    #[validate(length(min = 1, max = 64, message = "Product id must be between 1 and 64 characters"))]
    pub product_id: String,
    pub quantity: u32,
}

impl BuildRequest {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}
