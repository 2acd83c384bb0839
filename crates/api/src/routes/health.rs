use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};

use crate::context::AppContext;

/// Liveness probe. Reports the gateway clock as SAP would read it.
pub async fn health(State(ctx): State<Arc<AppContext>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timezone": ctx.dates.timezone().name(),
        "sap_timestamp": ctx.dates.format_datetime(&Utc::now()),
    }))
}
