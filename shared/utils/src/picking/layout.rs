//! Sheet layout conventions for the hand-maintained source workbooks.
//!
//! Positions are 0-indexed. The BOM workbooks share a shape: a title row
//! whose second cell names the supply destination, a header row, then data.
//! The inventory workbook carries four header rows before its data.

/// Supply destination lives in the BOM title row, second column (B1).
pub const SUPPLY_DESTINATION_CELL: (usize, usize) = (0, 1);
/// BOM header row; data starts on the row after it.
pub const BOM_HEADER_ROW: usize = 1;
pub const BOM_DATA_START: usize = 2;

pub const BOM_MANAGEMENT_COLUMN: usize = 0;
pub const BOM_PART_KEY_COLUMN: usize = 1;
pub const BOM_MANUFACTURER_COLUMN: usize = 2;
pub const BOM_PART_NAME_COLUMN: usize = 3;
pub const BOM_UNIT_COLUMN: usize = 4;
pub const BOM_PROCUREMENT_COLUMN: usize = 5;

/// Inventory data starts after four header rows.
pub const INVENTORY_DATA_START: usize = 4;
pub const INVENTORY_PART_KEY_COLUMN: usize = 0;
pub const INVENTORY_MANAGEMENT_COLUMN: usize = 2;
/// On-hand stock column (I).
pub const INVENTORY_STOCK_COLUMN: usize = 8;

/// Placeholder when the supply-destination cell is blank. Never null:
/// rows still need a grouping key.
pub const UNKNOWN_DESTINATION: &str = "(unknown destination)";
/// Generic unit label for blank unit cells.
pub const DEFAULT_UNIT: &str = "EA";

/// Sheet-name limit of the spreadsheet format the export targets.
pub const MAX_SHEET_NAME_CHARS: usize = 31;

/// Observed BOM column layouts.
///
/// The workbooks come in two widths; the "quantity per unit" column moves
/// with the width. Modeled as an explicit variant so a new layout is a new
/// arm here, not another inline index in extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BomLayout {
    SevenColumn,
    EightColumn,
}

impl BomLayout {
    /// Pick the layout from the observed header row width.
    pub fn detect(header: &[String]) -> Self {
        if header.len() >= 8 {
            Self::EightColumn
        } else {
            Self::SevenColumn
        }
    }

    /// Column holding the per-unit requirement.
    pub fn quantity_column(self) -> usize {
        match self {
            Self::SevenColumn => 6,
            Self::EightColumn => 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(width: usize) -> Vec<String> {
        (0..width).map(|i| format!("col{i}")).collect()
    }

    #[test]
    fn test_layout_detection() {
        assert_eq!(BomLayout::detect(&header(7)), BomLayout::SevenColumn);
        assert_eq!(BomLayout::detect(&header(8)), BomLayout::EightColumn);
        // Short or oversized headers fall back to the nearest known shape.
        assert_eq!(BomLayout::detect(&header(5)), BomLayout::SevenColumn);
        assert_eq!(BomLayout::detect(&header(9)), BomLayout::EightColumn);
    }

    #[test]
    fn test_quantity_column_tracks_width() {
        assert_eq!(BomLayout::SevenColumn.quantity_column(), 6);
        assert_eq!(BomLayout::EightColumn.quantity_column(), 7);
    }
}
