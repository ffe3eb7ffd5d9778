//! Output selection
//!
//! Decides what a fetched page contributes to the output: its items (the
//! default), the whole response, or a single named field of the response.
//!
//! ```text
//! --select items            each item of each page
//! --select '*'              each response document
//! --select NextToken        the NextToken field of each response
//! ```

use crate::error::Result;
use crate::pagination::{ListResponse, Page};
use crate::remote::lookup_path;
use crate::types::JsonValue;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// What to emit for each fetched page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Select {
    /// Each item of the page, limited by the emission limit
    #[default]
    Items,
    /// The whole response document
    Response,
    /// One field of the response; array fields are emitted element by element
    Field(String),
}

impl Select {
    /// Project one page into output documents.
    ///
    /// A page whose response lacks the selected field contributes nothing.
    pub fn apply<R>(&self, page: Page<R>) -> Result<Vec<JsonValue>>
    where
        R: ListResponse + Serialize,
        R::Item: Serialize,
    {
        match self {
            Self::Items => page
                .into_items()
                .into_iter()
                .map(|item| serde_json::to_value(item).map_err(Into::into))
                .collect(),
            Self::Response => Ok(vec![serde_json::to_value(&page.response)?]),
            Self::Field(name) => {
                let document = serde_json::to_value(&page.response)?;
                match lookup_path(&document, name) {
                    Some(JsonValue::Array(values)) => Ok(values.clone()),
                    Some(JsonValue::Null) | None => {
                        warn!(field = %name, page = page.index, "Selected field missing from response");
                        Ok(Vec::new())
                    }
                    Some(value) => Ok(vec![value.clone()]),
                }
            }
        }
    }
}

impl FromStr for Select {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim() {
            "" | "items" => Self::Items,
            "*" => Self::Response,
            field => Self::Field(field.to_string()),
        })
    }
}

impl fmt::Display for Select {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Items => f.write_str("items"),
            Self::Response => f.write_str("*"),
            Self::Field(name) => f.write_str(name),
        }
    }
}
