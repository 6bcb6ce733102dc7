use crate::annotations::{
    DominantColor, EntityAnnotation, FaceAnnotation, LocalizedObjectAnnotation,
    SafeSearchAnnotation, WebDetection,
};
use crate::VisionResult;
use async_trait::async_trait;

/// One method per vision capability, all over raw image bytes. Implemented
/// by the HTTP client and by test doubles.
#[async_trait]
pub trait VisionGateway: Send + Sync {
    async fn localized_objects(&self, image: &[u8]) -> VisionResult<Vec<LocalizedObjectAnnotation>>;

    async fn text_annotations(&self, image: &[u8]) -> VisionResult<Vec<EntityAnnotation>>;

    async fn safe_search(&self, image: &[u8]) -> VisionResult<SafeSearchAnnotation>;

    async fn logo_annotations(&self, image: &[u8]) -> VisionResult<Vec<EntityAnnotation>>;

    /// Dominant colors in the gateway's own ranking order.
    async fn dominant_colors(&self, image: &[u8]) -> VisionResult<Vec<DominantColor>>;

    async fn face_annotations(&self, image: &[u8]) -> VisionResult<Vec<FaceAnnotation>>;

    async fn web_detection(&self, image: &[u8]) -> VisionResult<WebDetection>;
}
