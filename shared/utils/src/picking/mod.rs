//! BOM aggregation & inventory reconciliation engine.
//!
//! Pipeline: raw sheets -> [`extract`] -> (BOM records, inventory index)
//! -> [`aggregate`] (scaled per request, merged across requests) ->
//! [`reconcile`] (joined against inventory) -> [`report`] (sorted,
//! optionally re-encoded as a per-destination workbook).
//!
//! Everything is constructed fresh per invocation; the engine holds no
//! cross-request mutable state.

pub mod aggregate;
pub mod engine;
pub mod extract;
pub mod layout;
pub mod reconcile;
pub mod report;
pub mod source;

pub use aggregate::{aggregate as aggregate_requirements, combine, scale};
pub use engine::PickingEngine;
pub use extract::{extract_bom, extract_inventory};
pub use reconcile::{reconcile, reconcile_combined};
pub use report::{
    build_workbook, finalize, finalize_combined, sheet_name, sheet_to_csv, SHEET_HEADERS,
};
pub use source::{Grid, MemorySource, SheetSource, XlsxSource};
