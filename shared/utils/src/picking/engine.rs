//! The engine façade: one call, one complete picking list.
//!
//! Each invocation reads every distinct requested BOM source at most once
//! and the inventory source exactly once, then runs
//! extract -> aggregate -> reconcile -> finalize to completion. Nothing is
//! shared across invocations.

use tracing::{info, warn};

use partspick_models::{BomSheet, BuildRequest, InventoryIndex, PickingList, ReportRow, Workbook};

use super::{aggregate, extract, reconcile, report};
use super::source::SheetSource;
use crate::error::PickResult;

pub struct PickingEngine<S: SheetSource> {
    source: S,
}

impl<S: SheetSource> PickingEngine<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Combined-view entry point: one row per part, destinations side by
    /// side.
    pub fn picking_list(&self, requests: &[BuildRequest]) -> PickResult<PickingList> {
        let boms = self.load_requested(requests)?;
        let inventory = self.load_inventory()?;

        let destinations = first_seen_destinations(&boms);
        let parts = aggregate::aggregate(&boms);
        let combined = aggregate::combine(&parts);
        let rows = combined
            .iter()
            .map(|part| reconcile::reconcile_combined(part, &inventory))
            .collect();
        let rows = report::finalize_combined(rows);

        info!(parts = rows.len(), destinations = destinations.len(), "picking list generated");
        Ok(PickingList { rows, destinations })
    }

    /// Per-destination rows, ordered for reporting.
    pub fn report_rows(&self, requests: &[BuildRequest]) -> PickResult<Vec<ReportRow>> {
        let boms = self.load_requested(requests)?;
        let inventory = self.load_inventory()?;

        let rows = aggregate::aggregate(&boms)
            .iter()
            .map(|part| reconcile::reconcile(part, &inventory))
            .collect();
        Ok(report::finalize(rows))
    }

    /// Sheet export built from the same aggregation: one sheet per supply
    /// destination.
    pub fn supplier_sheets(&self, requests: &[BuildRequest]) -> PickResult<Workbook> {
        let rows = self.report_rows(requests)?;
        let workbook = report::build_workbook(&rows);
        info!(sheets = workbook.sheets.len(), "supplier sheets generated");
        Ok(workbook)
    }

    /// Resolve and read the requested BOMs. Duplicate products fold into
    /// one read; zero-quantity and catalog-unknown requests are skipped.
    /// A resolvable source that cannot be read fails the invocation; a
    /// partial list would silently omit required parts.
    fn load_requested(&self, requests: &[BuildRequest]) -> PickResult<Vec<(BomSheet, u32)>> {
        let mut order: Vec<(String, String, u32)> = Vec::new();

        for request in requests {
            if request.quantity == 0 {
                warn!(product_id = %request.product_id, "skipping zero-quantity request");
                continue;
            }
            let Some(source_id) = self.source.resolve(&request.product_id) else {
                warn!(product_id = %request.product_id, "skipping unknown product id");
                continue;
            };
            match order
                .iter_mut()
                .find(|(product, _, _)| product == &request.product_id)
            {
                Some((_, _, quantity)) => *quantity += request.quantity,
                None => order.push((request.product_id.clone(), source_id, request.quantity)),
            }
        }

        let mut boms = Vec::with_capacity(order.len());
        for (product_id, source_id, quantity) in order {
            let grid = self.source.read_sheet(&source_id)?;
            let sheet = extract::extract_bom(&grid, &product_id);
            info!(
                product_id = %product_id,
                lines = sheet.lines.len(),
                destination = %sheet.supply_destination,
                quantity,
                "loaded BOM"
            );
            boms.push((sheet, quantity));
        }
        Ok(boms)
    }

    fn load_inventory(&self) -> PickResult<InventoryIndex> {
        let grid = self.source.read_sheet(&self.source.inventory_source())?;
        let index = extract::extract_inventory(&grid);
        info!(records = index.len(), "loaded inventory");
        Ok(index)
    }
}

fn first_seen_destinations(boms: &[(BomSheet, u32)]) -> Vec<String> {
    let mut destinations: Vec<String> = Vec::new();
    for (sheet, _) in boms {
        if !destinations.contains(&sheet.supply_destination) {
            destinations.push(sheet.supply_destination.clone());
        }
    }
    destinations
}
