use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use sapbridge_domain::{SapUserInfo, UserQuery};
use serde::Deserialize;

use crate::context::{AppContext, SapCredential};
use crate::errors::ApiError;

pub const DEFAULT_MAX_RESULTS: u32 = 50;

#[derive(Debug, Default, Deserialize)]
pub struct UsersQuery {
    #[serde(default)]
    pub search: String,
    pub max_results: Option<u32>,
}

impl From<UsersQuery> for UserQuery {
    fn from(query: UsersQuery) -> Self {
        UserQuery {
            search: query.search,
            max_results: query.max_results.unwrap_or(DEFAULT_MAX_RESULTS),
        }
    }
}

pub async fn list_users(
    State(ctx): State<Arc<AppContext>>,
    SapCredential(credential): SapCredential,
    Query(query): Query<UsersQuery>,
) -> Result<Json<Vec<SapUserInfo>>, ApiError> {
    let users = ctx.sap.list_users(&query.into(), &credential).await?;
    Ok(Json(users))
}
