use search_gateway::SearchResultItem;
use serde::{Deserialize, Serialize};
use vision_gateway::{DominantColor, Likelihood};

/// Aggregate output of one analysis run. Field order is the wire order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub objects: Vec<String>,
    pub text: String,
    pub nsfw: NsfwRatings,
    pub logos: Vec<String>,
    pub brand_colors: Vec<BrandColor>,
    pub caption: String,
    pub person: PersonResult,
    pub controversies: Vec<SearchResultItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NsfwRatings {
    pub adult: Likelihood,
    pub violence: Likelihood,
    pub racy: Likelihood,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandColor {
    pub rgb: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<&DominantColor> for BrandColor {
    fn from(dominant: &DominantColor) -> Self {
        Self {
            rgb: Rgb {
                r: dominant.color.red.clamp(0.0, 255.0) as u8,
                g: dominant.color.green.clamp(0.0, 255.0) as u8,
                b: dominant.color.blue.clamp(0.0, 255.0) as u8,
            },
        }
    }
}

/// Either an identity guess or an inline error record. Serialized untagged,
/// absent identity fields are omitted rather than emitted as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersonResult {
    Unidentified {
        error: String,
    },
    Identified {
        #[serde(skip_serializing_if = "Option::is_none")]
        best_guess: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        entity: Option<String>,
    },
}

impl PersonResult {
    /// Entity name that qualifies for the controversy lookup, if any.
    #[must_use]
    pub fn entity(&self) -> Option<&str> {
        match self {
            Self::Identified {
                entity: Some(entity),
                ..
            } if !entity.is_empty() => Some(entity),
            _ => None,
        }
    }
}
