use crate::annotations::{
    DominantColor, EntityAnnotation, FaceAnnotation, ImagePropertiesAnnotation,
    LocalizedObjectAnnotation, SafeSearchAnnotation, WebDetection,
};
use crate::auth::{ServiceAccountKey, TokenProvider};
use crate::gateway::VisionGateway;
use crate::{VisionError, VisionResult};
use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Serialize};
use tracing::debug;

const MAX_RESULTS: u32 = 20;

#[derive(Serialize)]
struct BatchAnnotateRequest {
    requests: Vec<AnnotateImageRequest>,
}

#[derive(Serialize)]
struct AnnotateImageRequest {
    image: ImageContent,
    features: Vec<Feature>,
}

#[derive(Serialize)]
struct ImageContent {
    content: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Feature {
    #[serde(rename = "type")]
    feature_type: &'static str,
    max_results: u32,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct BatchAnnotateResponse {
    responses: Vec<AnnotateImageResponse>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct AnnotateImageResponse {
    localized_object_annotations: Vec<LocalizedObjectAnnotation>,
    text_annotations: Vec<EntityAnnotation>,
    safe_search_annotation: Option<SafeSearchAnnotation>,
    logo_annotations: Vec<EntityAnnotation>,
    image_properties_annotation: Option<ImagePropertiesAnnotation>,
    face_annotations: Vec<FaceAnnotation>,
    web_detection: Option<WebDetection>,
    error: Option<RpcStatus>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct RpcStatus {
    code: i32,
    message: String,
}

/// Authenticated client for the remote vision gateway. Constructed once at
/// startup and shared read-only across requests.
pub struct GoogleVisionClient {
    http: reqwest::Client,
    endpoint: String,
    auth: TokenProvider,
}

impl GoogleVisionClient {
    #[must_use]
    pub fn new(endpoint: &str, key: ServiceAccountKey) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            auth: TokenProvider::new(key),
        }
    }

    /// Runs a single-feature annotate call over one image.
    async fn annotate(
        &self,
        image: &[u8],
        feature_type: &'static str,
    ) -> VisionResult<AnnotateImageResponse> {
        debug!(feature = feature_type, bytes = image.len(), "annotate call");
        let token = self.auth.bearer_token(&self.http).await?;
        let body = BatchAnnotateRequest {
            requests: vec![AnnotateImageRequest {
                image: ImageContent {
                    content: general_purpose::STANDARD.encode(image),
                },
                features: vec![Feature {
                    feature_type,
                    max_results: MAX_RESULTS,
                }],
            }],
        };

        let url = format!("{}/v1/images:annotate", self.endpoint);
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(VisionError::Api {
                status: response.status(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let mut batch: BatchAnnotateResponse = response.json().await?;
        if batch.responses.is_empty() {
            return Err(VisionError::EmptyResponse);
        }
        let entry = batch.responses.swap_remove(0);
        if let Some(status) = entry.error {
            return Err(VisionError::Annotation {
                code: status.code,
                message: status.message,
            });
        }
        Ok(entry)
    }
}

#[async_trait]
impl VisionGateway for GoogleVisionClient {
    async fn localized_objects(
        &self,
        image: &[u8],
    ) -> VisionResult<Vec<LocalizedObjectAnnotation>> {
        Ok(self
            .annotate(image, "OBJECT_LOCALIZATION")
            .await?
            .localized_object_annotations)
    }

    async fn text_annotations(&self, image: &[u8]) -> VisionResult<Vec<EntityAnnotation>> {
        Ok(self.annotate(image, "TEXT_DETECTION").await?.text_annotations)
    }

    async fn safe_search(&self, image: &[u8]) -> VisionResult<SafeSearchAnnotation> {
        Ok(self
            .annotate(image, "SAFE_SEARCH_DETECTION")
            .await?
            .safe_search_annotation
            .unwrap_or_default())
    }

    async fn logo_annotations(&self, image: &[u8]) -> VisionResult<Vec<EntityAnnotation>> {
        Ok(self.annotate(image, "LOGO_DETECTION").await?.logo_annotations)
    }

    async fn dominant_colors(&self, image: &[u8]) -> VisionResult<Vec<DominantColor>> {
        Ok(self
            .annotate(image, "IMAGE_PROPERTIES")
            .await?
            .image_properties_annotation
            .unwrap_or_default()
            .dominant_colors
            .colors)
    }

    async fn face_annotations(&self, image: &[u8]) -> VisionResult<Vec<FaceAnnotation>> {
        Ok(self.annotate(image, "FACE_DETECTION").await?.face_annotations)
    }

    async fn web_detection(&self, image: &[u8]) -> VisionResult<WebDetection> {
        Ok(self
            .annotate(image, "WEB_DETECTION")
            .await?
            .web_detection
            .unwrap_or_default())
    }
}
