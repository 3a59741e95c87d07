//! Sheet sources: where rectangular cell grids come from.
//!
//! The engine only sees the [`SheetSource`] seam. Production reads xlsx
//! workbooks through calamine; tests inject synthetic in-memory grids.

use calamine::{open_workbook_auto, DataType, Reader};
use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::SourceConfig;
use crate::error::{PickError, PickResult};

/// A raw rectangular sheet: rows of stringly-typed cells, 0-indexed,
/// blank cells as empty strings. Indices match absolute sheet coordinates.
pub type Grid = Vec<Vec<String>>;

/// Resolves product ids to sources and reads sources into grids.
///
/// `resolve` returning `None` means the product id is unknown to the
/// catalog; the caller skips such requests. `read_sheet` failing means the
/// whole invocation fails: a half-read picking list under-reports
/// shortages.
pub trait SheetSource: Send + Sync {
    /// Map a product id to the source id of its BOM, if known.
    fn resolve(&self, product_id: &str) -> Option<String>;

    /// Read one source into a grid. Blocking.
    fn read_sheet(&self, source_id: &str) -> PickResult<Grid>;

    /// Source id of the current-inventory table.
    fn inventory_source(&self) -> String;
}

/// Calamine-backed source reading xlsx workbooks from a data directory.
pub struct XlsxSource {
    data_dir: PathBuf,
    bom_files: HashMap<String, String>,
    inventory_file: String,
    inventory_sheet: Option<String>,
}

impl XlsxSource {
    pub fn new(config: &SourceConfig) -> Self {
        Self {
            data_dir: PathBuf::from(&config.data_dir),
            bom_files: config.bom_files.clone(),
            inventory_file: config.inventory_file.clone(),
            inventory_sheet: config.inventory_sheet.clone(),
        }
    }

    fn read_grid(&self, file_name: &str, preferred_sheet: Option<&str>) -> PickResult<Grid> {
        let path = self.data_dir.join(file_name);
        if !path.exists() {
            return Err(PickError::source_not_found(file_name));
        }

        let mut workbook = open_workbook_auto(&path)
            .map_err(|e| PickError::unreadable_source(file_name, e.to_string()))?;

        let sheet_name = match preferred_sheet {
            Some(name) if workbook.sheet_names().iter().any(|n| n == name) => name.to_string(),
            _ => workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or_else(|| PickError::unreadable_source(file_name, "workbook has no sheets"))?,
        };

        let range = workbook
            .worksheet_range(&sheet_name)
            .ok_or_else(|| {
                PickError::unreadable_source(file_name, format!("missing sheet {sheet_name}"))
            })?
            .map_err(|e| PickError::unreadable_source(file_name, e.to_string()))?;

        // The used range may not start at A1; pad so grid indices stay
        // absolute.
        let (row_offset, col_offset) = range.start().unwrap_or((0, 0));
        let mut grid: Grid = vec![Vec::new(); row_offset as usize];
        for row in range.rows() {
            let mut cells: Vec<String> = vec![String::new(); col_offset as usize];
            cells.extend(row.iter().map(cell_to_string));
            grid.push(cells);
        }
        Ok(grid)
    }
}

impl SheetSource for XlsxSource {
    fn resolve(&self, product_id: &str) -> Option<String> {
        self.bom_files.get(product_id).cloned()
    }

    fn read_sheet(&self, source_id: &str) -> PickResult<Grid> {
        let preferred = if source_id == self.inventory_file {
            self.inventory_sheet.as_deref()
        } else {
            None
        };
        self.read_grid(source_id, preferred)
    }

    fn inventory_source(&self) -> String {
        self.inventory_file.clone()
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}

/// In-memory source for tests and synthetic catalogs.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    bom_sources: HashMap<String, String>,
    sheets: HashMap<String, Grid>,
}

impl MemorySource {
    pub const INVENTORY_ID: &'static str = "inventory";

    pub fn new() -> Self {
        Self::default()
    }

    /// Register a BOM grid for a product id.
    pub fn with_bom(mut self, product_id: &str, grid: Grid) -> Self {
        let source_id = format!("bom:{product_id}");
        self.bom_sources
            .insert(product_id.to_string(), source_id.clone());
        self.sheets.insert(source_id, grid);
        self
    }

    /// Register the inventory grid.
    pub fn with_inventory(mut self, grid: Grid) -> Self {
        self.sheets.insert(Self::INVENTORY_ID.to_string(), grid);
        self
    }

    /// Register a product id whose source id exists but has no sheet
    /// behind it, so reads fail. Lets tests exercise the no-partial-report
    /// policy.
    pub fn with_broken_bom(mut self, product_id: &str) -> Self {
        self.bom_sources
            .insert(product_id.to_string(), format!("bom:{product_id}"));
        self
    }
}

impl SheetSource for MemorySource {
    fn resolve(&self, product_id: &str) -> Option<String> {
        self.bom_sources.get(product_id).cloned()
    }

    fn read_sheet(&self, source_id: &str) -> PickResult<Grid> {
        self.sheets
            .get(source_id)
            .cloned()
            .ok_or_else(|| PickError::source_not_found(source_id))
    }

    fn inventory_source(&self) -> String {
        Self::INVENTORY_ID.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_source_resolution() {
        let source = MemorySource::new().with_bom("Z4-1", vec![vec!["".to_string()]]);
        assert_eq!(source.resolve("Z4-1").as_deref(), Some("bom:Z4-1"));
        assert_eq!(source.resolve("Z9"), None);
    }

    #[test]
    fn test_memory_source_missing_sheet_fails() {
        let source = MemorySource::new().with_broken_bom("Z4-1");
        let id = source.resolve("Z4-1").unwrap();
        assert!(matches!(
            source.read_sheet(&id),
            Err(PickError::SourceNotFound { .. })
        ));
    }

    #[test]
    fn test_xlsx_source_missing_file_is_not_found() {
        let config = SourceConfig {
            data_dir: "/nonexistent".to_string(),
            bom_files: HashMap::new(),
            inventory_file: "inventory.xlsx".to_string(),
            inventory_sheet: None,
        };
        let source = XlsxSource::new(&config);
        assert!(matches!(
            source.read_sheet("inventory.xlsx"),
            Err(PickError::SourceNotFound { .. })
        ));
    }
}
