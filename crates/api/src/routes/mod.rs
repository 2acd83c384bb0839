//! HTTP routes
//!
//! `/health` is open; everything else sits behind [`auth_middleware`].

mod commands;
mod health;
mod session;
mod users;

use std::sync::Arc;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;

use crate::context::AppContext;
use crate::middleware::auth_middleware;

pub use commands::execute_command;
pub use health::health;
pub use session::open_session;
pub use users::{list_users, UsersQuery, DEFAULT_MAX_RESULTS};

pub fn build_router(ctx: Arc<AppContext>) -> Router {
    let protected = Router::new()
        .route("/session", post(open_session))
        .route("/commands/{name}", post(execute_command))
        .route("/users", get(list_users))
        .route_layer(from_fn_with_state(ctx.auth_state(), auth_middleware));

    Router::new().route("/health", get(health)).merge(protected).with_state(ctx)
}
