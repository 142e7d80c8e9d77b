use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// A search hit. Identity is the navigation slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub page_slug: String,
    pub poster_url: Option<String>,
}

impl Movie {
    pub fn new(
        page_slug: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        poster_url: Option<String>,
    ) -> Self {
        let page_slug = page_slug.into();
        Self {
            id: page_slug.clone(),
            title: title.into(),
            subtitle: subtitle.into(),
            page_slug,
            poster_url,
        }
    }

    pub fn is_in_category(&self, prefix: &str) -> bool {
        self.page_slug.starts_with(prefix)
    }
}

impl PartialEq for Movie {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Movie {}

impl Hash for Movie {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
