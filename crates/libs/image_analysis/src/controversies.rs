use crate::AnalysisError;
use search_gateway::{SearchGateway, SearchResultItem};

/// Looks up recent controversies around a named person.
pub async fn search_controversies(
    search: &dyn SearchGateway,
    person_name: &str,
) -> Result<Vec<SearchResultItem>, AnalysisError> {
    let query = format!("Latest {person_name} controversies 2025 - descriptive headlines");
    Ok(search.search(&query).await?)
}
