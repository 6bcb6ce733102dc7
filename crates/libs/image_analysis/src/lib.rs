#![deny(clippy::unwrap_used)]
#![allow(
    clippy::missing_errors_doc,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]

mod analyzer;
mod controversies;
mod face_crop;
mod identity;
mod result;

pub use analyzer::*;
pub use controversies::*;
pub use face_crop::*;
pub use identity::*;
pub use result::*;

use search_gateway::SearchError;
use thiserror::Error;
use vision_gateway::VisionError;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("vision gateway call failed: {0}")]
    Vision(#[from] VisionError),
    #[error("search gateway call failed: {0}")]
    Search(#[from] SearchError),
    #[error("could not decode uploaded image: {0}")]
    Image(#[from] image::ImageError),
    #[error("face bounding polygon has no vertices")]
    EmptyBoundingPoly,
    #[error("face bounding polygon lies outside the image")]
    CropOutOfBounds,
}
