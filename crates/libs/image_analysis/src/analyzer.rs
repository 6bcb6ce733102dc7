use crate::AnalysisError;
use crate::controversies::search_controversies;
use crate::identity::resolve_identity;
use crate::result::{AnalysisResult, BrandColor, NsfwRatings};
use search_gateway::SearchGateway;
use std::sync::Arc;
use tracing::debug;
use vision_gateway::VisionGateway;

const FALLBACK_CAPTION: &str = "No clear objects found";
const MAX_BRAND_COLORS: usize = 3;

/// Top-level analysis pipeline. Gateways are injected so the pipeline runs
/// the same against the real services and against test doubles.
pub struct ImageAnalyzer {
    vision: Arc<dyn VisionGateway>,
    search: Arc<dyn SearchGateway>,
}

impl ImageAnalyzer {
    #[must_use]
    pub fn new(vision: Arc<dyn VisionGateway>, search: Arc<dyn SearchGateway>) -> Self {
        Self { vision, search }
    }

    /// Runs every vision capability over the image in a strict sequence,
    /// then conditionally enriches with a controversy lookup. Any vision
    /// failure aborts the whole run; there are no partial results.
    pub async fn analyze(&self, image: &[u8]) -> Result<AnalysisResult, AnalysisError> {
        let objects: Vec<String> = self
            .vision
            .localized_objects(image)
            .await?
            .into_iter()
            .map(|object| object.name)
            .collect();
        debug!(count = objects.len(), "object localization done");

        // The first text annotation is the full detected block.
        let text = self
            .vision
            .text_annotations(image)
            .await?
            .first()
            .map(|annotation| annotation.description.clone())
            .unwrap_or_default();

        let safe = self.vision.safe_search(image).await?;
        let nsfw = NsfwRatings {
            adult: safe.adult,
            violence: safe.violence,
            racy: safe.racy,
        };

        let logos: Vec<String> = self
            .vision
            .logo_annotations(image)
            .await?
            .into_iter()
            .map(|logo| logo.description)
            .collect();

        let brand_colors: Vec<BrandColor> = self
            .vision
            .dominant_colors(image)
            .await?
            .iter()
            .take(MAX_BRAND_COLORS)
            .map(BrandColor::from)
            .collect();

        let caption = if objects.is_empty() {
            FALLBACK_CAPTION.to_string()
        } else {
            format!("Image contains: {}", objects.join(", "))
        };

        let person = resolve_identity(self.vision.as_ref(), image).await?;

        let controversies = match person.entity() {
            Some(entity) => search_controversies(self.search.as_ref(), entity).await?,
            None => Vec::new(),
        };

        Ok(AnalysisResult {
            objects,
            text,
            nsfw,
            logos,
            brand_colors,
            caption,
            person,
            controversies,
        })
    }
}
