//! # Partspick Core Domain Models
//!
//! Domain types for the parts-picking back office: bills of materials,
//! build requests, inventory records, and the reconciled picking report.
//!
//! ## Key Models
//!
//! - **BomLine**: one part entry of a product's bill of materials
//! - **BuildRequest**: caller input, "build N units of product P"
//! - **InventoryRecord**: one row of the current-inventory table
//! - **StockLevel**: on-hand stock or the "not on file" sentinel
//! - **ReportRow** / **CombinedRow**: the reconciled picking list, per
//!   supply destination or consolidated across destinations
//! - **Workbook** / **Sheet**: the export shape, one sheet per destination
//!
//! All models serialize with serde; inbound request types carry validator
//! rules.

pub mod bom;
pub mod inventory;
pub mod report;


pub use bom::*;
pub use inventory::*;
pub use report::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_validation() {
        use validator::Validate;

        let ok = BuildRequest::new("Z4-1", 5);
        assert!(ok.validate().is_ok());

        let blank = BuildRequest::new("", 5);
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_stock_level_sentinel_is_not_zero() {
        assert_ne!(StockLevel::NotFound, StockLevel::OnHand(0.0));
        assert_eq!(StockLevel::NotFound.on_hand(), None);
        assert_eq!(StockLevel::OnHand(0.0).on_hand(), Some(0.0));
    }
}
