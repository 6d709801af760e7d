//! Listing entry models: the wire shape and the normalized row.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Description used when the hub provides no pipeline tag.
pub const DEFAULT_DESCRIPTION: &str = "";

/// Language used when the hub provides none.
pub const DEFAULT_LANGUAGE: &str = "unknown";

/// Separator for the flattened tag list.
pub const TAG_SEPARATOR: &str = ", ";

/// One entry of the hub's model listing, as returned by the API.
///
/// Every field is optional on the wire; the listing omits whatever a model
/// does not have. `languages` has no stable shape, so it is kept as raw JSON
/// until normalization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelSummary {
    /// Model identifier, e.g. `bert-base-uncased`.
    #[serde(rename = "modelId", default)]
    pub model_id: Option<String>,

    /// Pipeline tag, e.g. `text-classification`.
    #[serde(default)]
    pub pipeline_tag: Option<String>,

    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Download counter.
    #[serde(default)]
    pub downloads: Option<u64>,

    /// Like counter.
    #[serde(default)]
    pub likes: Option<u64>,

    /// Language metadata; a string, a list, or absent depending on the model.
    #[serde(default)]
    pub languages: Option<Value>,
}

/// A normalized row of the snapshot dataset.
///
/// Field order here is the column order of the output file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelRecord {
    /// Model identifier; empty when the listing entry had none.
    pub model_id: String,

    /// Pipeline tag of the model.
    pub description: String,

    /// Tags flattened to a single `", "`-joined string.
    pub tags: String,

    /// Download counter.
    pub downloads: u64,

    /// Like counter.
    pub likes: u64,

    /// Language, or [`DEFAULT_LANGUAGE`] when the hub provides none.
    pub language: String,
}

impl From<&ModelSummary> for ModelRecord {
    fn from(model: &ModelSummary) -> Self {
        Self {
            model_id: model.model_id.clone().unwrap_or_default(),
            description: model
                .pipeline_tag
                .clone()
                .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string()),
            tags: model.tags.join(TAG_SEPARATOR),
            downloads: model.downloads.unwrap_or(0),
            likes: model.likes.unwrap_or(0),
            language: normalize_language(model.languages.as_ref()),
        }
    }
}

/// Flatten the `languages` value to a single cell.
///
/// A plain string passes through; absent or null falls back to
/// [`DEFAULT_LANGUAGE`]; any other shape is kept as its compact JSON text.
fn normalize_language(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => DEFAULT_LANGUAGE.to_string(),
        Some(Value::String(language)) => language.clone(),
        Some(other) => other.to_string(),
    }
}

/// One decoded page of the listing plus the token for the next one.
#[derive(Debug, Clone, Default)]
pub struct ModelPage {
    /// Entries of this page.
    pub models: Vec<ModelSummary>,

    /// Pagination token from the response header; `None` means last page.
    pub next_cursor: Option<String>,
}

impl ModelPage {
    /// Check whether the page carried no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}
