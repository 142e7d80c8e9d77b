use serde::{Deserialize, Serialize};

/// Detail page data. Carries no identifier; it belongs to the slug it was
/// fetched with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetail {
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub poster_url: Option<String>,
    pub rating: Option<String>,
    pub duration: Option<String>,
}
