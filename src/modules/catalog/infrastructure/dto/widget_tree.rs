//! Generic page shape shared by every upstream page type:
//! `success.page.spaces[name].widget_wrappers[].widget.data`.
//!
//! Everything below the page envelope is optional. Fields that fail to
//! decode are treated as absent instead of failing the whole document.

use indexmap::IndexMap;
use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "D: DeserializeOwned"))]
pub struct WidgetTree<D> {
    pub success: PageEnvelope<D>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "D: DeserializeOwned"))]
pub struct PageEnvelope<D> {
    pub page: Page<D>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "D: DeserializeOwned"))]
pub struct Page<D> {
    /// Spaces in document order
    #[serde(default)]
    pub spaces: IndexMap<String, Space<D>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "D: DeserializeOwned"))]
pub struct Space<D> {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub template: Option<String>,
    #[serde(default, deserialize_with = "lenient_seq")]
    pub widget_wrappers: Vec<WidgetWrapper<D>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "D: DeserializeOwned"))]
pub struct WidgetWrapper<D> {
    #[serde(default, deserialize_with = "lenient")]
    pub widget: Option<Widget<D>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(bound(deserialize = "D: DeserializeOwned"))]
pub struct Widget<D> {
    #[serde(default, deserialize_with = "lenient")]
    pub data: Option<D>,
}

impl<D> WidgetTree<D> {
    pub fn space(&self, name: &str) -> Option<&Space<D>> {
        self.success.page.spaces.get(name)
    }

    /// Every data payload in the tree, space by space in document order.
    pub fn payloads(&self) -> impl Iterator<Item = &D> {
        self.success
            .page
            .spaces
            .values()
            .flat_map(|space| space.payloads())
    }
}

impl<D> Space<D> {
    pub fn payloads(&self) -> impl Iterator<Item = &D> {
        self.widget_wrappers
            .iter()
            .filter_map(|wrapper| wrapper.widget.as_ref())
            .filter_map(|widget| widget.data.as_ref())
    }
}

/// Decode an optional field, treating a null or mistyped value as absent.
pub fn lenient<'de, De, T>(deserializer: De) -> Result<Option<T>, De::Error>
where
    De: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    Ok(serde_json::from_value(value).ok())
}

/// Decode a list, dropping elements that do not match `T`. A non-array
/// value yields an empty list.
pub fn lenient_seq<'de, De, T>(deserializer: De) -> Result<Vec<T>, De::Error>
where
    De: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

/// Decode a list element by element, keeping positions: an element that does
/// not match `T` becomes `None`. A non-array value yields an empty list.
pub fn lenient_slots<'de, De, T>(deserializer: De) -> Result<Vec<Option<T>>, De::Error>
where
    De: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}
