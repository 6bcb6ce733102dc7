use crate::api_state::ApiContext;
use crate::routes::analyze::handlers::{analyze_image, handle_upload, upload_form};
use axum::{
    Router,
    routing::{get, post},
};

pub fn analyze_router() -> Router<ApiContext> {
    Router::new()
        .route("/upload", get(upload_form).post(handle_upload))
        .route("/analyze", post(analyze_image))
}
