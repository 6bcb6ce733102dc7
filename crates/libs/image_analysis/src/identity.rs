use crate::AnalysisError;
use crate::face_crop::crop_face;
use crate::result::PersonResult;
use vision_gateway::VisionGateway;

pub const NO_FACE_DETECTED: &str = "No face detected";

/// Guesses who is in the picture from a facial crop.
///
/// Only the first reported face is considered; additional faces are
/// ignored. Zero faces is not an error, it yields the inline error record.
pub async fn resolve_identity(
    vision: &dyn VisionGateway,
    image: &[u8],
) -> Result<PersonResult, AnalysisError> {
    let faces = vision.face_annotations(image).await?;
    let Some(face) = faces.first() else {
        return Ok(PersonResult::Unidentified {
            error: NO_FACE_DETECTED.to_string(),
        });
    };

    let crop = crop_face(image, &face.bounding_poly)?;
    let web = vision.web_detection(&crop).await?;

    let best_guess = web
        .best_guess_labels
        .first()
        .map(|label| label.label.clone())
        .filter(|label| !label.is_empty());
    let entity = web
        .web_entities
        .first()
        .map(|entity| entity.description.clone())
        .filter(|description| !description.is_empty());

    Ok(PersonResult::Identified { best_guess, entity })
}
