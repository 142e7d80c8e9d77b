use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use super::widget_tree::{lenient, lenient_seq, WidgetTree};

/// Decoded search page
pub type SearchTree = WidgetTree<SearchWidgetData>;

pub const HEADER_TRAY_SPACE: &str = "header_tray";
pub const RESULTS_SPACE: &str = "results";

/// `content_info` entries arrive either as a bare label or as an object with
/// a title, sometimes both within the same array.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentInfo {
    Label(String),
    Detailed {
        title: String,
        description: Option<String>,
    },
}

impl ContentInfo {
    /// Display label: the string itself, or the object's title.
    pub fn label(&self) -> &str {
        match self {
            ContentInfo::Label(label) => label,
            ContentInfo::Detailed { title, .. } => title,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            ContentInfo::Label(_) => None,
            ContentInfo::Detailed { description, .. } => description.as_deref(),
        }
    }
}

impl<'de> Deserialize<'de> for ContentInfo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Detailed {
            title: String,
            #[serde(default)]
            description: Option<String>,
        }

        match Value::deserialize(deserializer)? {
            Value::String(label) => Ok(ContentInfo::Label(label)),
            object @ Value::Object(_) => {
                let detailed: Detailed = serde_json::from_value(object).map_err(de::Error::custom)?;
                Ok(ContentInfo::Detailed {
                    title: detailed.title,
                    description: detailed.description,
                })
            }
            other => Err(de::Error::custom(format!(
                "content_info must be a string or an object, found {}",
                other
            ))),
        }
    }
}

/// Data payload of any widget on the search page. Header tray widgets fill
/// the hero fields, results widgets fill `items`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchWidgetData {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub content_info: Vec<ContentInfo>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub primary_cta: Option<CallToAction>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageRef {
    pub src: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallToAction {
    #[serde(default)]
    pub actions: Actions,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Actions {
    #[serde(default, deserialize_with = "lenient_seq")]
    pub on_click: Vec<OnClickAction>,
}

impl Actions {
    /// First action that navigates to a page.
    pub fn first_page_slug(&self) -> Option<&str> {
        self.on_click.iter().find_map(|action| {
            action
                .page_navigation
                .as_ref()
                .map(|navigation| navigation.page_slug.as_str())
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OnClickAction {
    #[serde(default, deserialize_with = "lenient")]
    pub page_navigation: Option<PageNavigation>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PageNavigation {
    pub page_slug: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    #[serde(
        rename = "search_horizontal_content_card",
        default,
        deserialize_with = "lenient"
    )]
    pub search_card: Option<SearchCard>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchCard {
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<SearchCardData>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchCardData {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(rename = "sub_title", default, deserialize_with = "lenient")]
    pub subtitle: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub image: Option<ImageRef>,
    #[serde(default)]
    pub actions: Actions,
}
