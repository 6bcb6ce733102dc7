use async_trait::async_trait;
use image::{ImageFormat, Rgb, RgbImage};
use image_analysis::{AnalysisResult, ImageAnalyzer, PersonResult};
use search_gateway::{SearchGateway, SearchResult, SearchResultItem};
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use vision_gateway::{
    BestGuessLabel, BoundingPoly, Color, DominantColor, EntityAnnotation, FaceAnnotation,
    Likelihood, LocalizedObjectAnnotation, SafeSearchAnnotation, Vertex, VisionGateway,
    VisionResult, WebDetection, WebEntity,
};

#[derive(Default)]
struct MockVision {
    objects: Vec<LocalizedObjectAnnotation>,
    text: Vec<EntityAnnotation>,
    safe: SafeSearchAnnotation,
    logos: Vec<EntityAnnotation>,
    colors: Vec<DominantColor>,
    faces: Vec<FaceAnnotation>,
    web: WebDetection,
}

#[async_trait]
impl VisionGateway for MockVision {
    async fn localized_objects(&self, _: &[u8]) -> VisionResult<Vec<LocalizedObjectAnnotation>> {
        Ok(self.objects.clone())
    }
    async fn text_annotations(&self, _: &[u8]) -> VisionResult<Vec<EntityAnnotation>> {
        Ok(self.text.clone())
    }
    async fn safe_search(&self, _: &[u8]) -> VisionResult<SafeSearchAnnotation> {
        Ok(self.safe)
    }
    async fn logo_annotations(&self, _: &[u8]) -> VisionResult<Vec<EntityAnnotation>> {
        Ok(self.logos.clone())
    }
    async fn dominant_colors(&self, _: &[u8]) -> VisionResult<Vec<DominantColor>> {
        Ok(self.colors.clone())
    }
    async fn face_annotations(&self, _: &[u8]) -> VisionResult<Vec<FaceAnnotation>> {
        Ok(self.faces.clone())
    }
    async fn web_detection(&self, _: &[u8]) -> VisionResult<WebDetection> {
        Ok(self.web.clone())
    }
}

#[derive(Default)]
struct RecordingSearch {
    results: Vec<SearchResultItem>,
    queries: Mutex<Vec<String>>,
}

#[async_trait]
impl SearchGateway for RecordingSearch {
    async fn search(&self, query: &str) -> SearchResult<Vec<SearchResultItem>> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.results.clone())
    }
}

fn sample_image() -> Vec<u8> {
    let img = RgbImage::from_pixel(64, 64, Rgb([180, 40, 90]));
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, ImageFormat::Png).unwrap();
    buffer.into_inner()
}

fn object(name: &str) -> LocalizedObjectAnnotation {
    LocalizedObjectAnnotation {
        name: name.to_string(),
        score: 0.9,
    }
}

fn annotation(description: &str) -> EntityAnnotation {
    EntityAnnotation {
        description: description.to_string(),
        score: 0.9,
    }
}

fn color(red: f32, green: f32, blue: f32) -> DominantColor {
    DominantColor {
        color: Color { red, green, blue },
        score: 0.5,
        pixel_fraction: 0.1,
    }
}

fn face() -> FaceAnnotation {
    FaceAnnotation {
        bounding_poly: BoundingPoly {
            vertices: [(8, 8), (40, 8), (40, 48), (8, 48)]
                .iter()
                .map(|&(x, y)| Vertex { x, y })
                .collect(),
        },
        detection_confidence: 0.97,
    }
}

fn web(best_guess: Option<&str>, entity: Option<&str>) -> WebDetection {
    WebDetection {
        web_entities: entity
            .map(|description| WebEntity {
                entity_id: "/m/test".to_string(),
                description: description.to_string(),
                score: 1.2,
            })
            .into_iter()
            .collect(),
        best_guess_labels: best_guess
            .map(|label| BestGuessLabel {
                label: label.to_string(),
            })
            .into_iter()
            .collect(),
    }
}

async fn run(
    vision: MockVision,
    search: Arc<RecordingSearch>,
) -> (AnalysisResult, Arc<RecordingSearch>) {
    let analyzer = ImageAnalyzer::new(Arc::new(vision), search.clone());
    let result = analyzer.analyze(&sample_image()).await.unwrap();
    (result, search)
}

#[tokio::test]
async fn identified_person_triggers_exactly_one_templated_search() {
    let vision = MockVision {
        objects: vec![object("cat"), object("dog")],
        text: vec![annotation("hello world"), annotation("hello")],
        safe: SafeSearchAnnotation {
            adult: Likelihood::VeryUnlikely,
            violence: Likelihood::Possible,
            racy: Likelihood::Unlikely,
            ..Default::default()
        },
        logos: vec![annotation("Acme Corp")],
        colors: vec![
            color(250.0, 10.0, 10.0),
            color(10.0, 250.0, 10.0),
            color(10.0, 10.0, 250.0),
            color(128.0, 128.0, 128.0),
        ],
        faces: vec![face()],
        web: web(Some("ada lovelace portrait"), Some("Ada Lovelace")),
    };
    let search = Arc::new(RecordingSearch {
        results: vec![SearchResultItem {
            title: Some("Headline".to_string()),
            snippet: Some("Summary".to_string()),
            link: Some("https://example.com".to_string()),
        }],
        queries: Mutex::new(Vec::new()),
    });

    let (result, search) = run(vision, search).await;

    assert_eq!(result.objects, vec!["cat", "dog"]);
    assert_eq!(result.text, "hello world");
    assert_eq!(result.caption, "Image contains: cat, dog");
    assert_eq!(result.logos, vec!["Acme Corp"]);
    assert_eq!(result.brand_colors.len(), 3);
    assert_eq!(
        result.person,
        PersonResult::Identified {
            best_guess: Some("ada lovelace portrait".to_string()),
            entity: Some("Ada Lovelace".to_string()),
        }
    );
    assert_eq!(result.controversies.len(), 1);

    let queries = search.queries.lock().unwrap();
    assert_eq!(
        *queries,
        vec!["Latest Ada Lovelace controversies 2025 - descriptive headlines"]
    );
}

#[tokio::test]
async fn no_face_yields_error_record_and_no_search_calls() {
    let vision = MockVision::default();
    let search = Arc::new(RecordingSearch::default());

    let (result, search) = run(vision, search).await;

    assert_eq!(
        result.person,
        PersonResult::Unidentified {
            error: "No face detected".to_string(),
        }
    );
    assert!(result.controversies.is_empty());
    assert!(search.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn person_without_entity_skips_the_search() {
    let vision = MockVision {
        faces: vec![face()],
        web: web(Some("some portrait"), None),
        ..Default::default()
    };
    let search = Arc::new(RecordingSearch::default());

    let (result, search) = run(vision, search).await;

    assert_eq!(
        result.person,
        PersonResult::Identified {
            best_guess: Some("some portrait".to_string()),
            entity: None,
        }
    );
    assert!(result.controversies.is_empty());
    assert!(search.queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn empty_gateway_results_produce_fallbacks() {
    let vision = MockVision::default();
    let search = Arc::new(RecordingSearch::default());

    let (result, _) = run(vision, search).await;

    assert!(result.objects.is_empty());
    assert_eq!(result.text, "");
    assert_eq!(result.caption, "No clear objects found");
    assert!(result.logos.is_empty());
    assert!(result.brand_colors.is_empty());
}

#[tokio::test]
async fn brand_colors_are_capped_and_clamped() {
    let vision = MockVision {
        colors: vec![
            color(300.0, -12.0, 128.4),
            color(0.0, 255.0, 1.0),
            color(42.0, 42.0, 42.0),
            color(9.0, 9.0, 9.0),
            color(1.0, 2.0, 3.0),
        ],
        ..Default::default()
    };
    let search = Arc::new(RecordingSearch::default());

    let (result, _) = run(vision, search).await;

    assert_eq!(result.brand_colors.len(), 3);
    assert_eq!(result.brand_colors[0].rgb.r, 255);
    assert_eq!(result.brand_colors[0].rgb.g, 0);
    assert_eq!(result.brand_colors[0].rgb.b, 128);
}

#[tokio::test]
async fn result_json_shape_is_stable() {
    let vision = MockVision {
        faces: vec![face()],
        web: web(None, Some("Ada Lovelace")),
        ..Default::default()
    };
    let search = Arc::new(RecordingSearch::default());
    let analyzer = ImageAnalyzer::new(Arc::new(vision), search);

    let image = sample_image();
    let first = serde_json::to_vec(&analyzer.analyze(&image).await.unwrap()).unwrap();
    let second = serde_json::to_vec(&analyzer.analyze(&image).await.unwrap()).unwrap();
    assert_eq!(first, second);

    let value: serde_json::Value = serde_json::from_slice(&first).unwrap();
    let object = value.as_object().unwrap();
    for key in [
        "objects",
        "text",
        "nsfw",
        "logos",
        "brand_colors",
        "caption",
        "person",
        "controversies",
    ] {
        assert!(object.contains_key(key), "missing key {key}");
    }
    assert_eq!(object.len(), 8);
    // best_guess is absent, not null.
    assert_eq!(
        value["person"],
        serde_json::json!({ "entity": "Ada Lovelace" })
    );
    assert_eq!(value["nsfw"]["adult"], "UNKNOWN");
}
