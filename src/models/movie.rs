//! Movie facts attached to a cast response.

use serde::Serialize;
use serde_json::Value;

use crate::models::Item;

/// The subset of a movie record returned alongside its cast.
///
/// Values are copied through as stored, whatever their type; only absent
/// attributes are left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieFacts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre_ids: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub overview: Option<Value>,
}

impl MovieFacts {
    /// Project a movie record onto `title`, `genre_ids` and `overview`.
    ///
    /// All other attributes are dropped.
    pub fn from_item(item: &Item) -> Self {
        Self {
            title: item.get("title").cloned(),
            genre_ids: item.get("genre_ids").cloned(),
            overview: item.get("overview").cloned(),
        }
    }
}
