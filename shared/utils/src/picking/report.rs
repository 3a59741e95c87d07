//! Report ordering and export formatting.
//!
//! Rows are ordered deterministically: supply destination, then part key,
//! both ascending, stable. The workbook export partitions the ordered rows
//! by supply destination, one sheet per destination, with a fixed column
//! set; a sheet can be re-encoded as CSV for download.

use partspick_models::{CombinedRow, ReportRow, Sheet, StockLevel, Workbook};

use super::layout::MAX_SHEET_NAME_CHARS;
use crate::error::{PickError, PickResult};

/// Fixed column order of an exported sheet.
pub const SHEET_HEADERS: [&str; 9] = [
    "Management No",
    "Part Code",
    "Manufacturer",
    "Part Name",
    "Unit",
    "Procurement",
    "Stock",
    "Required",
    "Shortage",
];

/// Order per-destination rows: supply destination, then part key.
pub fn finalize(mut rows: Vec<ReportRow>) -> Vec<ReportRow> {
    rows.sort_by(|a, b| {
        a.supply_destination
            .cmp(&b.supply_destination)
            .then_with(|| a.part_key.cmp(&b.part_key))
    });
    rows
}

/// Order combined rows: procurement destination, then part key.
pub fn finalize_combined(mut rows: Vec<CombinedRow>) -> Vec<CombinedRow> {
    rows.sort_by(|a, b| {
        a.procurement
            .cmp(&b.procurement)
            .then_with(|| a.part_key.cmp(&b.part_key))
    });
    rows
}

/// Partition finalized rows into one sheet per supply destination.
///
/// Rows must already be ordered by [`finalize`]; partitioning preserves
/// their order inside each sheet.
pub fn build_workbook(rows: &[ReportRow]) -> Workbook {
    let mut workbook = Workbook::default();

    for row in rows {
        let name = sheet_name(&row.supply_destination);
        let sheet = match workbook.sheets.iter_mut().find(|s| s.name == name) {
            Some(sheet) => sheet,
            None => {
                workbook.sheets.push(Sheet {
                    name,
                    headers: SHEET_HEADERS.iter().map(|h| h.to_string()).collect(),
                    rows: Vec::new(),
                });
                workbook.sheets.last_mut().unwrap()
            }
        };
        sheet.rows.push(sheet_row(row));
    }

    workbook
}

/// Re-encode one sheet as CSV.
pub fn sheet_to_csv(sheet: &Sheet) -> PickResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(&sheet.headers)
        .map_err(|e| PickError::export(e.to_string()))?;
    for row in &sheet.rows {
        writer
            .write_record(row)
            .map_err(|e| PickError::export(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| PickError::export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| PickError::export(e.to_string()))
}

/// Sheet name for a supply destination, truncated to the 31-character
/// limit of the export format. Lookups against a built workbook must go
/// through the same mapping. Truncated by characters, not bytes;
/// destination names are not ASCII.
pub fn sheet_name(destination: &str) -> String {
    destination.chars().take(MAX_SHEET_NAME_CHARS).collect()
}

fn sheet_row(row: &ReportRow) -> Vec<String> {
    vec![
        row.management_number.clone(),
        row.part_key.clone(),
        row.manufacturer.clone(),
        row.part_name.clone(),
        row.unit.clone(),
        row.procurement.clone(),
        format_stock(row.stock_quantity),
        format_quantity(row.required_quantity),
        format_quantity(row.shortage_quantity),
    ]
}

fn format_stock(stock: StockLevel) -> String {
    match stock {
        StockLevel::OnHand(qty) => format_quantity(qty),
        StockLevel::NotFound => "N/A".to_string(),
    }
}

// Whole quantities print without a trailing fraction.
fn format_quantity(qty: f64) -> String {
    if qty.fract() == 0.0 {
        format!("{}", qty as i64)
    } else {
        format!("{qty}")
    }
}
