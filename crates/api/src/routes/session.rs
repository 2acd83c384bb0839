use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use sapbridge_domain::SapUser;
use tracing::info;

use crate::context::{AppContext, SapCredential};
use crate::errors::ApiError;

/// Validate the attached credential against SAP and hand back the session
/// it opened.
pub async fn open_session(
    State(ctx): State<Arc<AppContext>>,
    SapCredential(credential): SapCredential,
) -> Result<Json<SapUser>, ApiError> {
    let user = ctx.sap.authenticate(&credential).await?;
    info!(user_id = %user.user_id, credential = credential.kind(), "session opened");
    Ok(Json(user))
}
