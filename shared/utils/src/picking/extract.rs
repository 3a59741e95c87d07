//! Tabular extraction: raw grids into typed BOM and inventory records.
//!
//! Extraction is deliberately forgiving. The workbooks are hand-edited, so
//! short rows, blank cells and unparsable numbers default silently; only
//! a row with no part key is dropped outright, since it could never join
//! against inventory. Extraction over an in-memory grid never fails;
//! whether an empty result is fatal is the caller's call.

use partspick_models::{BomLine, BomSheet, InventoryIndex, InventoryRecord};

use super::layout::{
    BomLayout, BOM_DATA_START, BOM_HEADER_ROW, BOM_MANAGEMENT_COLUMN, BOM_MANUFACTURER_COLUMN,
    BOM_PART_KEY_COLUMN, BOM_PART_NAME_COLUMN, BOM_PROCUREMENT_COLUMN, BOM_UNIT_COLUMN,
    DEFAULT_UNIT, INVENTORY_DATA_START, INVENTORY_MANAGEMENT_COLUMN, INVENTORY_PART_KEY_COLUMN,
    INVENTORY_STOCK_COLUMN, SUPPLY_DESTINATION_CELL, UNKNOWN_DESTINATION,
};
use super::source::Grid;

/// Extract a product's BOM from its grid.
pub fn extract_bom(grid: &Grid, product_id: &str) -> BomSheet {
    let supply_destination = {
        let (row, col) = SUPPLY_DESTINATION_CELL;
        let value = cell(grid, row, col).trim();
        if value.is_empty() {
            UNKNOWN_DESTINATION.to_string()
        } else {
            value.to_string()
        }
    };

    let header: &[String] = grid
        .get(BOM_HEADER_ROW)
        .map(Vec::as_slice)
        .unwrap_or_default();
    let layout = BomLayout::detect(header);

    let mut lines = Vec::new();
    for row in grid.iter().skip(BOM_DATA_START) {
        let part_key = row
            .get(BOM_PART_KEY_COLUMN)
            .map(|c| c.trim())
            .unwrap_or_default();
        if part_key.is_empty() {
            continue;
        }

        let unit = field(row, BOM_UNIT_COLUMN);
        lines.push(BomLine {
            management_number: field(row, BOM_MANAGEMENT_COLUMN),
            part_key: part_key.to_string(),
            manufacturer: field(row, BOM_MANUFACTURER_COLUMN),
            part_name: field(row, BOM_PART_NAME_COLUMN),
            unit: if unit.is_empty() {
                DEFAULT_UNIT.to_string()
            } else {
                unit
            },
            procurement: field(row, BOM_PROCUREMENT_COLUMN),
            supply_destination: supply_destination.clone(),
            unit_requirement: parse_quantity(row.get(layout.quantity_column())),
        });
    }

    tracing::debug!(
        product_id,
        lines = lines.len(),
        destination = %supply_destination,
        "extracted BOM"
    );

    BomSheet {
        product_id: product_id.to_string(),
        supply_destination,
        lines,
    }
}

/// Extract the inventory index from its grid. A duplicated part key keeps
/// the last row seen, matching a top-to-bottom scan into a key-to-record
/// map.
pub fn extract_inventory(grid: &Grid) -> InventoryIndex {
    let mut index = InventoryIndex::new();
    for row in grid.iter().skip(INVENTORY_DATA_START) {
        let part_key = row
            .get(INVENTORY_PART_KEY_COLUMN)
            .map(|c| c.trim())
            .unwrap_or_default();
        if part_key.is_empty() {
            continue;
        }

        index.insert(
            part_key.to_string(),
            InventoryRecord {
                part_key: part_key.to_string(),
                management_number: field(row, INVENTORY_MANAGEMENT_COLUMN),
                stock_quantity: parse_quantity(row.get(INVENTORY_STOCK_COLUMN)),
            },
        );
    }

    tracing::debug!(records = index.len(), "extracted inventory index");
    index
}

fn cell(grid: &Grid, row: usize, col: usize) -> &str {
    grid.get(row)
        .and_then(|r| r.get(col))
        .map(String::as_str)
        .unwrap_or_default()
}

fn field(row: &[String], col: usize) -> String {
    row.get(col).map(|c| c.trim().to_string()).unwrap_or_default()
}

fn parse_quantity(value: Option<&String>) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn bom_grid_7col() -> Grid {
        vec![
            row(&["", "Yoshikawa Works"]),
            row(&["Mgmt", "Part", "Maker", "Name", "Unit", "Proc", "Qty"]),
            row(&["M-1", " P1 ", "Acme", "Hex bolt", "EA", "Acme Trading", "2"]),
            row(&["M-2", "", "Acme", "row without part key", "EA", "", "9"]),
            row(&["M-3", "P2", "", "Washer", "", "Ohta Co", "0.5"]),
            row(&["M-4", "P3", "", "Nut", "EA", "", "not-a-number"]),
        ]
    }

    #[test]
    fn test_extract_bom_basic() {
        let sheet = extract_bom(&bom_grid_7col(), "Z4-1");
        assert_eq!(sheet.supply_destination, "Yoshikawa Works");
        assert_eq!(sheet.lines.len(), 3);

        let first = &sheet.lines[0];
        assert_eq!(first.part_key, "P1"); // trimmed
        assert_eq!(first.unit_requirement, 2.0);
        assert_eq!(first.supply_destination, "Yoshikawa Works");
    }

    #[test]
    fn test_blank_part_key_rows_are_dropped() {
        let sheet = extract_bom(&bom_grid_7col(), "Z4-1");
        assert!(sheet.lines.iter().all(|l| !l.part_key.is_empty()));
    }

    #[test]
    fn test_blank_unit_gets_default_label() {
        let sheet = extract_bom(&bom_grid_7col(), "Z4-1");
        assert_eq!(sheet.lines[1].unit, DEFAULT_UNIT);
    }

    #[test]
    fn test_unparsable_quantity_defaults_to_zero() {
        let sheet = extract_bom(&bom_grid_7col(), "Z4-1");
        assert_eq!(sheet.lines[2].part_key, "P3");
        assert_eq!(sheet.lines[2].unit_requirement, 0.0);
    }

    #[test]
    fn test_eight_column_layout_moves_quantity() {
        let grid = vec![
            row(&["", "S1"]),
            row(&["Mgmt", "Part", "Maker", "Name", "Unit", "Proc", "Extra", "Qty"]),
            row(&["", "P1", "", "Bolt", "EA", "", "x", "4"]),
        ];
        let sheet = extract_bom(&grid, "Z4-2");
        assert_eq!(sheet.lines[0].unit_requirement, 4.0);
    }

    #[test]
    fn test_blank_destination_uses_sentinel() {
        let grid = vec![
            row(&["", "  "]),
            row(&["Mgmt", "Part", "Maker", "Name", "Unit", "Proc", "Qty"]),
            row(&["", "P1", "", "Bolt", "EA", "", "1"]),
        ];
        let sheet = extract_bom(&grid, "Z4-1");
        assert_eq!(sheet.supply_destination, UNKNOWN_DESTINATION);
    }

    #[test]
    fn test_empty_grid_yields_empty_sheet() {
        let sheet = extract_bom(&Vec::new(), "Z4-1");
        assert!(sheet.is_empty());
        assert_eq!(sheet.supply_destination, UNKNOWN_DESTINATION);
    }

    fn inventory_grid() -> Grid {
        let mut grid = vec![
            row(&["header 1"]),
            row(&["header 2"]),
            row(&["header 3"]),
            row(&["header 4"]),
        ];
        grid.push(row(&[
            " P1 ", "", "M-9", "", "", "", "", "", "7",
        ]));
        grid.push(row(&["P2", "", "", "", "", "", "", "", "bad"]));
        grid.push(row(&["", "", "", "", "", "", "", "", "3"]));
        grid.push(row(&["P1", "", "", "", "", "", "", "", "5"]));
        grid
    }

    #[test]
    fn test_extract_inventory() {
        let index = extract_inventory(&inventory_grid());
        assert_eq!(index.len(), 2);
        assert_eq!(index["P2"].stock_quantity, 0.0); // unparsable -> 0
    }

    #[test]
    fn test_duplicate_part_key_last_write_wins() {
        let index = extract_inventory(&inventory_grid());
        assert_eq!(index["P1"].stock_quantity, 5.0);
        // The overriding row had no management number.
        assert_eq!(index["P1"].management_number, "");
    }

    #[test]
    fn test_inventory_short_rows_skipped() {
        let index = extract_inventory(&vec![row(&["only", "junk"])]);
        assert!(index.is_empty());
    }
}
