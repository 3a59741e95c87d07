//! Partspick Picking List Service
//!
//! Turns "build N units of product P" requests into a consolidated
//! parts-picking list: required totals per part, on-hand stock, shortage,
//! grouped by supply destination. Thin HTTP shell over the picking engine.

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use partspick_models::{BuildRequest, CombinedRow, Workbook};
use partspick_utils::{
    init_logging, sheet_name, sheet_to_csv, AppConfig, ErrorResponse, PickError, PickingEngine,
    XlsxSource,
};

type Engine = Arc<PickingEngine<XlsxSource>>;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_default();
    init_logging(&config.logging)?;
    info!("Starting Partspick Picking List Service");

    let engine: Engine = Arc::new(PickingEngine::new(XlsxSource::new(&config.sources)));

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/v1/picking-list", post(generate_picking_list))
        .route("/api/v1/picking-list/sheets", post(generate_supplier_sheets))
        .route("/api/v1/picking-list/sheets/csv", post(download_sheet_csv))
        .layer(TraceLayer::new_for_http())
        .with_state(engine);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Picking List Service listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "picking-list",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Build quantities are unsigned, so a negative `quantity` in the JSON
/// payload is rejected at deserialization with a 422; quantity 0 passes
/// through and the engine skips it.
#[derive(Debug, Deserialize)]
pub struct PickingListRequest {
    pub requests: Vec<BuildRequest>,
}

#[derive(Debug, Serialize)]
pub struct PickingListResponse {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<CombinedRow>,
    pub destinations: Vec<String>,
    pub summary: PickingListSummary,
}

#[derive(Debug, Serialize)]
pub struct PickingListSummary {
    pub total_parts: usize,
    pub total_destinations: usize,
    pub short_parts: usize,
}

/// Combined-view picking list across all requested products.
async fn generate_picking_list(
    State(engine): State<Engine>,
    Json(payload): Json<PickingListRequest>,
) -> Result<Json<PickingListResponse>, (StatusCode, Json<ErrorResponse>)> {
    validate_requests(&payload.requests)?;
    let list = engine
        .picking_list(&payload.requests)
        .map_err(into_response_error)?;

    let short_parts = list
        .rows
        .iter()
        .filter(|row| row.shortage_quantity > 0.0)
        .count();

    Ok(Json(PickingListResponse {
        report_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        summary: PickingListSummary {
            total_parts: list.rows.len(),
            total_destinations: list.destinations.len(),
            short_parts,
        },
        rows: list.rows,
        destinations: list.destinations,
    }))
}

/// Per-supply-destination sheet export, one sheet per destination.
async fn generate_supplier_sheets(
    State(engine): State<Engine>,
    Json(payload): Json<PickingListRequest>,
) -> Result<Json<Workbook>, (StatusCode, Json<ErrorResponse>)> {
    validate_requests(&payload.requests)?;
    let workbook = engine
        .supplier_sheets(&payload.requests)
        .map_err(into_response_error)?;
    Ok(Json(workbook))
}

#[derive(Debug, Deserialize)]
pub struct SheetCsvRequest {
    pub requests: Vec<BuildRequest>,
    /// Sheet (supply destination) to download.
    pub destination: String,
}

/// One destination's sheet as a CSV attachment.
async fn download_sheet_csv(
    State(engine): State<Engine>,
    Json(payload): Json<SheetCsvRequest>,
) -> Result<(HeaderMap, String), (StatusCode, Json<ErrorResponse>)> {
    validate_requests(&payload.requests)?;
    let workbook = engine
        .supplier_sheets(&payload.requests)
        .map_err(into_response_error)?;

    // Sheet names are truncated on export, so the lookup key must go
    // through the same mapping.
    let sheet = workbook
        .sheet(&sheet_name(&payload.destination))
        .ok_or_else(|| into_response_error(PickError::source_not_found(&payload.destination)))?;
    let csv = sheet_to_csv(sheet).map_err(into_response_error)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!(
            "attachment; filename=\"picking_list_{}.csv\"",
            sanitize_filename(&payload.destination)
        ))
        .map_err(|e| into_response_error(PickError::export(e.to_string())))?,
    );
    Ok((headers, csv))
}

fn validate_requests(requests: &[BuildRequest]) -> Result<(), (StatusCode, Json<ErrorResponse>)> {
    for request in requests {
        request
            .validate()
            .map_err(|e| into_response_error(PickError::validation(e.to_string())))?;
    }
    Ok(())
}

fn into_response_error(error: PickError) -> (StatusCode, Json<ErrorResponse>) {
    let status = StatusCode::from_u16(error.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(error.into()))
}

fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
