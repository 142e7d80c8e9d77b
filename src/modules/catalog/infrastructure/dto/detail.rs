use serde::Deserialize;

use super::search::ImageRef;
use super::widget_tree::{lenient, lenient_seq, lenient_slots, WidgetTree};

/// Decoded detail page
pub type DetailTree = WidgetTree<DetailWidgetData>;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DetailWidgetData {
    #[serde(default, deserialize_with = "lenient")]
    pub content_info: Option<DetailContentInfo>,
    #[serde(default, deserialize_with = "lenient")]
    pub hero_img: Option<ImageRef>,
    #[serde(default, deserialize_with = "lenient")]
    pub starcast: Option<String>,
}

/// A content-info block. The title is optional here so that an untitled
/// block still counts as the page's content-info block.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailContentInfo {
    #[serde(default, deserialize_with = "lenient")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub description: Option<String>,
    /// Positional: an undecodable tag stays as `None`
    #[serde(default, deserialize_with = "lenient_slots")]
    pub callout_meta_tags: Vec<Option<CalloutMetaTag>>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub superscript_tags: Vec<Tag>,
}

impl DetailContentInfo {
    /// Text of the first callout tag, e.g. "U/A 16+". A malformed first tag
    /// means no rating.
    pub fn rating(&self) -> Option<&str> {
        self.callout_meta_tags
            .first()?
            .as_ref()
            .map(|tag| tag.callout_tag.txt.text.as_str())
    }

    /// First superscript label containing both an hour and a minute marker,
    /// e.g. "2h 12m". Labels with only one marker are not durations.
    pub fn duration(&self) -> Option<&str> {
        self.superscript_tags
            .iter()
            .filter_map(|tag| tag.value.as_deref())
            .find(|value| value.contains('h') && value.contains('m'))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Tag {
    #[serde(default, deserialize_with = "lenient")]
    pub value: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalloutMetaTag {
    pub callout_tag: CalloutTag,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CalloutTag {
    pub txt: TextData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextData {
    pub text: String,
}
