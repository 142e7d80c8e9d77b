use super::dto::{
    search::{ImageRef, SearchWidgetData},
    ContentInfo, DetailTree, SearchTree, HEADER_TRAY_SPACE, RESULTS_SPACE,
};
use crate::modules::catalog::domain::{Movie, MovieDetail};
use crate::shared::config::ClientConfig;

const FEATURED_SUBTITLE: &str = "Featured";
const MISSING_SUBTITLE: &str = "No subtitle available";
const LABEL_SEPARATOR: &str = " • ";

/// Turns decoded widget trees into domain records.
///
/// Pure: no I/O, and the only "failure" is finding nothing.
#[derive(Debug, Clone)]
pub struct CatalogMapper {
    search_image_base: String,
    detail_image_base: String,
    category_prefix: String,
}

impl CatalogMapper {
    pub fn new(
        search_image_base: impl Into<String>,
        detail_image_base: impl Into<String>,
        category_prefix: impl Into<String>,
    ) -> Self {
        Self {
            search_image_base: search_image_base.into(),
            detail_image_base: detail_image_base.into(),
            category_prefix: category_prefix.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(
            config.search_image_base.clone(),
            config.detail_image_base.clone(),
            config.category_prefix.clone(),
        )
    }

    /// Header tray hits first, then results, then drop everything outside
    /// the target category.
    pub fn map_search(&self, tree: &SearchTree) -> Vec<Movie> {
        let featured = tree
            .space(HEADER_TRAY_SPACE)
            .into_iter()
            .flat_map(|space| space.payloads())
            .filter_map(|data| self.map_hero(data));

        let results = tree
            .space(RESULTS_SPACE)
            .into_iter()
            .flat_map(|space| space.payloads())
            .flat_map(|data| data.items.iter())
            .filter_map(|item| item.search_card.as_ref())
            .filter_map(|card| card.data.as_ref())
            .filter_map(|card| {
                let title = card.title.as_deref()?;
                let slug = card.actions.first_page_slug()?;
                Some(Movie::new(
                    slug,
                    title,
                    card.subtitle.as_deref().unwrap_or(MISSING_SUBTITLE),
                    Self::image_url(&self.search_image_base, card.image.as_ref()),
                ))
            });

        let movies: Vec<Movie> = featured
            .chain(results)
            .filter(|movie| movie.is_in_category(&self.category_prefix))
            .collect();

        log::debug!("Mapped {} movies from search page", movies.len());
        movies
    }

    /// The first payload carrying a content-info block, in document order,
    /// is authoritative. If that block has no title the page has no detail;
    /// later blocks are never consulted.
    pub fn map_detail(&self, tree: &DetailTree) -> Option<MovieDetail> {
        let data = tree.payloads().find(|data| data.content_info.is_some())?;
        let info = data.content_info.as_ref()?;

        let Some(title) = info.title.clone() else {
            log::debug!("First content-info block has no title");
            return None;
        };

        Some(MovieDetail {
            title,
            subtitle: data.starcast.clone(),
            description: info.description.clone(),
            poster_url: Self::image_url(&self.detail_image_base, data.hero_img.as_ref()),
            rating: info.rating().map(str::to_string),
            duration: info.duration().map(str::to_string),
        })
    }

    fn map_hero(&self, data: &SearchWidgetData) -> Option<Movie> {
        let title = data.title.as_deref()?;
        let slug = data
            .primary_cta
            .as_ref()
            .and_then(|cta| cta.actions.first_page_slug())?;

        let subtitle = if data.content_info.is_empty() {
            FEATURED_SUBTITLE.to_string()
        } else {
            data.content_info
                .iter()
                .map(ContentInfo::label)
                .collect::<Vec<_>>()
                .join(LABEL_SEPARATOR)
        };

        Some(Movie::new(
            slug,
            title,
            subtitle,
            Self::image_url(&self.search_image_base, data.image.as_ref()),
        ))
    }

    fn image_url(base: &str, image: Option<&ImageRef>) -> Option<String> {
        image
            .map(|image| image.src.as_str())
            .filter(|src| !src.is_empty())
            .map(|src| format!("{}{}", base, src))
    }
}

impl Default for CatalogMapper {
    fn default() -> Self {
        Self::from_config(&ClientConfig::default())
    }
}
