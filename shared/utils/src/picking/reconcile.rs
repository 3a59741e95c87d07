//! Inventory reconciliation: join aggregated totals against stock.
//!
//! Runs strictly after aggregation, so shortage is always judged against
//! the final total for a key, never a partial sum. A part key absent from
//! inventory gets the "not on file" sentinel and no shortage figure:
//! unknown stock is not zero stock.

use partspick_models::{
    AggregatedPart, CombinedPart, CombinedRow, InventoryIndex, ReportRow, StockLevel,
};

/// Reconcile one per-destination aggregate against the inventory index.
pub fn reconcile(part: &AggregatedPart, inventory: &InventoryIndex) -> ReportRow {
    let record = inventory.get(&part.part_key);
    let stock_quantity = match record {
        Some(record) => StockLevel::OnHand(record.stock_quantity),
        None => StockLevel::NotFound,
    };

    ReportRow {
        management_number: management_number(&part.management_number, record),
        part_key: part.part_key.clone(),
        manufacturer: part.manufacturer.clone(),
        part_name: part.part_name.clone(),
        unit: part.unit.clone(),
        procurement: part.procurement.clone(),
        supply_destination: part.supply_destination.clone(),
        required_quantity: part.required_quantity,
        stock_quantity,
        shortage_quantity: stock_quantity.shortage_against(part.required_quantity),
    }
}

/// Reconcile one combined aggregate against the inventory index.
pub fn reconcile_combined(part: &CombinedPart, inventory: &InventoryIndex) -> CombinedRow {
    let record = inventory.get(&part.part_key);
    let stock_quantity = match record {
        Some(record) => StockLevel::OnHand(record.stock_quantity),
        None => StockLevel::NotFound,
    };

    CombinedRow {
        management_number: management_number(&part.management_number, record),
        part_key: part.part_key.clone(),
        manufacturer: part.manufacturer.clone(),
        part_name: part.part_name.clone(),
        unit: part.unit.clone(),
        procurement: part.procurement.clone(),
        quantities: part.quantities.clone(),
        total_required: part.total_required,
        stock_quantity,
        shortage_quantity: stock_quantity.shortage_against(part.total_required),
    }
}

// The inventory table's management number wins when it has one.
fn management_number(
    from_bom: &str,
    record: Option<&partspick_models::InventoryRecord>,
) -> String {
    match record {
        Some(record) if !record.management_number.is_empty() => record.management_number.clone(),
        _ => from_bom.to_string(),
    }
}
