use crate::api_state::ApiContext;
use crate::create_router;
use app_state::AppSettings;
use axum::extract::DefaultBodyLimit;
use color_eyre::Result;
use color_eyre::eyre::eyre;
use image_analysis::ImageAnalyzer;
use search_gateway::{SearchGateway, SerperClient};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;
use vision_gateway::{GoogleVisionClient, ServiceAccountKey, VisionGateway};

const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub async fn serve(settings: AppSettings) -> Result<()> {
    info!("🚀 Initializing server...");

    // Both secrets are validated here so a misconfigured process never
    // starts serving.
    if settings.secrets.serper_key.is_empty() {
        return Err(eyre!("search API key is not configured"));
    }
    let key = ServiceAccountKey::from_json(&settings.secrets.gcp_credentials)
        .map_err(|e| eyre!("invalid vision gateway credentials: {e}"))?;

    let vision: Arc<dyn VisionGateway> =
        Arc::new(GoogleVisionClient::new(&settings.vision.endpoint, key));
    let search: Arc<dyn SearchGateway> = Arc::new(SerperClient::new(
        &settings.search.endpoint,
        &settings.secrets.serper_key,
    ));
    let api_state = ApiContext {
        analyzer: Arc::new(ImageAnalyzer::new(vision, search)),
        settings: settings.clone(),
    };

    let app = create_router(api_state)
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    let listen_address = format!("{}:{}", settings.api.host, settings.api.port);
    let listener = tokio::net::TcpListener::bind(&listen_address).await?;

    info!("✅ Server listening on http://{listen_address}");

    axum::serve(listener, app).await?;
    Ok(())
}
