use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use image_analysis::{AnalysisError, AnalysisResult, ImageAnalyzer};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("image analysis failed")]
    Analysis(#[from] AnalysisError),

    #[error("invalid multipart upload")]
    Multipart(#[from] MultipartError),

    #[error("multipart field `{0}` is missing")]
    MissingField(&'static str),

    #[error("internal error")]
    Internal(#[from] serde_json::Error),
}

impl IntoResponse for AnalyzeError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            Self::Analysis(e) => {
                error!("image analysis failed: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Image analysis failed.".to_string(),
                )
            }
            Self::Internal(e) => {
                error!("unexpected internal error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected internal error occurred.".to_string(),
                )
            }
            Self::Multipart(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            Self::MissingField(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

/// Pulls the named file field out of the multipart body.
async fn read_image_field(
    mut multipart: Multipart,
    field_name: &'static str,
) -> Result<Bytes, AnalyzeError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(field_name) {
            return Ok(field.bytes().await?);
        }
    }
    Err(AnalyzeError::MissingField(field_name))
}

pub async fn upload_form() -> Html<String> {
    Html(render_upload_page(None))
}

pub async fn handle_upload(
    State(analyzer): State<Arc<ImageAnalyzer>>,
    multipart: Multipart,
) -> Result<Html<String>, AnalyzeError> {
    let content = read_image_field(multipart, "file").await?;
    let result = analyzer.analyze(&content).await?;
    let pretty = serde_json::to_string_pretty(&result)?;
    Ok(Html(render_upload_page(Some(&pretty))))
}

pub async fn analyze_image(
    State(analyzer): State<Arc<ImageAnalyzer>>,
    multipart: Multipart,
) -> Result<Json<AnalysisResult>, AnalyzeError> {
    let content = read_image_field(multipart, "image").await?;
    let result = analyzer.analyze(&content).await?;
    Ok(Json(result))
}

fn render_upload_page(result_json: Option<&str>) -> String {
    let result_block = result_json.map_or_else(String::new, |json| {
        format!("<h2>Result</h2>\n<pre>{}</pre>", escape_html(json))
    });

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>Image Analysis</title>
</head>
<body>
    <h1>Upload an image</h1>
    <form action="/upload" method="post" enctype="multipart/form-data">
        <input type="file" name="file" accept="image/*" required>
        <button type="submit">Analyze</button>
    </form>
    {result_block}
</body>
</html>
"#
    )
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
