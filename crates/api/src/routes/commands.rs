use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use sapbridge_domain::SapCommand;
use serde_json::Value;

use crate::context::{AppContext, SapCredential};
use crate::errors::ApiError;

/// Forward the JSON body as a SAP command and answer with its `DATA`.
pub async fn execute_command(
    State(ctx): State<Arc<AppContext>>,
    Path(name): Path<String>,
    SapCredential(credential): SapCredential,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let command = SapCommand::new(name, payload).with_credential(credential);
    let outcome = ctx.sap.send_command(&command).await?;
    Ok(Json(outcome.data))
}
