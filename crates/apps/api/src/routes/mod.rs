pub mod analyze;
pub mod root;

use crate::api_state::ApiContext;
use crate::routes::analyze::router::analyze_router;
use crate::routes::root::router::root_public_router;
use axum::Router;

// --- Router Construction ---
pub fn create_router(api_state: ApiContext) -> Router {
    Router::new()
        .merge(root_public_router())
        .merge(analyze_router())
        .with_state(api_state)
}
