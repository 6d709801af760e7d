//! Data models for hub listing entries.
//!
//! Wire-side models use `#[serde(default)]` for every field; the listing
//! omits anything a model does not have.

mod model;

pub use model::{
    DEFAULT_DESCRIPTION, DEFAULT_LANGUAGE, ModelPage, ModelRecord, ModelSummary, TAG_SEPARATOR,
};
