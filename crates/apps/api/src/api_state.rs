use app_state::AppSettings;
use axum::extract::FromRef;
use image_analysis::ImageAnalyzer;
use std::sync::Arc;

#[derive(Clone)]
pub struct ApiContext {
    pub analyzer: Arc<ImageAnalyzer>,
    pub settings: AppSettings,
}

// These impls let handlers extract just the piece of state they need.
impl FromRef<ApiContext> for Arc<ImageAnalyzer> {
    fn from_ref(state: &ApiContext) -> Self {
        state.analyzer.clone()
    }
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}
