//! REST API handlers
//!
//! `POST /submit_location` runs a deal lookup around the posted point and
//! answers with `[name, location, rating, review_count, deals]` rows sorted
//! by business name. A lookup that cannot even list nearby businesses
//! answers with an empty array.

use axum::{extract::State, response::Json};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use orchestrator::core::sort_rows_by_name;
use orchestrator::DealLookup;
use shared::{process_error, process_info, ProcessId, ResponseRow};

use crate::state::WebServerState;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LocationRequest {
    pub lat: f64,
    pub lng: f64,
}

/// Deal lookup endpoint - /submit_location
pub async fn submit_location<L>(
    State(state): State<WebServerState<L>>,
    Json(request): Json<LocationRequest>,
) -> Json<Vec<ResponseRow>>
where
    L: DealLookup + 'static,
{
    process_info!(ProcessId::current(), lat = request.lat, lng = request.lng, "📍 Location received");

    match state.lookup.lookup(request.lat, request.lng).await {
        Ok(records) => {
            let rows: Vec<ResponseRow> = sort_rows_by_name(records).into_iter().map(|record| record.into_row()).collect();
            process_info!(ProcessId::current(), rows = rows.len(), "Lookup answered");
            Json(rows)
        }
        Err(e) => {
            process_error!(ProcessId::current(), error = %e, "❌ Lookup failed, answering with no businesses");
            Json(Vec::new())
        }
    }
}

/// Get system status
pub async fn get_status<L>(State(state): State<WebServerState<L>>) -> Json<Value>
where
    L: DealLookup + 'static,
{
    let settings = state.lookup.settings();

    Json(json!({
        "status": "ok",
        "data": {
            "server_status": "running",
            "server_time": Utc::now().timestamp(),
            "uptime_seconds": state.uptime_seconds(),
            "version": env!("CARGO_PKG_VERSION"),
            "pipeline": {
                "max_lanes": settings.max_lanes,
                "lane_timeout_secs": settings.lane_timeout.as_secs(),
                "max_search_results": settings.max_search_results,
                "deal_tool_name": settings.deal_tool_name,
            }
        }
    }))
}

/// Liveness probe
pub async fn health_check() -> Json<Value> {
    Json(json!({"status": "ok"}))
}
