// airtable/mod.rs - Upstream Airtable REST API access
//
// The proxy only ever lists records. Everything the handlers need from the
// upstream goes through the `RecordSource` trait so services can be driven by
// the real client or by an in-memory source in tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub mod client;

pub use client::AirtableClient;

/// Field label → value, in the order the upstream declared them.
pub type Fields = Map<String, Value>;

/// A single upstream row. Only `fields` is ever read by the mappers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirtableRecord {
    pub id: String,
    #[serde(default)]
    pub fields: Fields,
    #[serde(rename = "createdTime", default, skip_serializing_if = "Option::is_none")]
    pub created_time: Option<String>,
}

/// One page of a list-records response.
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub records: Vec<AirtableRecord>,
    #[serde(default)]
    pub offset: Option<String>,
}

impl Page {
    /// Continuation token for the next page. An empty token counts as absent.
    pub fn next_offset(&self) -> Option<&str> {
        self.offset.as_deref().filter(|o| !o.is_empty())
    }
}

/// Which table to list and how the upstream should order/filter it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableQuery {
    pub table_id: String,
    pub sort_field: Option<String>,
    pub view: Option<String>,
}

impl TableQuery {
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            sort_field: None,
            view: None,
        }
    }

    /// Sort ascending by `field`. Airtable is only ever asked for ascending order.
    pub fn sorted_by(mut self, field: impl Into<String>) -> Self {
        self.sort_field = Some(field.into());
        self
    }

    pub fn in_view(mut self, view: impl Into<String>) -> Self {
        self.view = Some(view.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum AirtableError {
    #[error("Invalid Airtable API URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Airtable error ({table_id}): {body}")]
    Upstream {
        table_id: String,
        status: u16,
        body: String,
    },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode Airtable response for {table_id}: {source}")]
    Decode {
        table_id: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Anything that can list every record of a table, page by page.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch all records of `query.table_id` in upstream order.
    ///
    /// The first failing page aborts the whole listing; nothing is retried.
    async fn list_records(
        &self,
        token: &str,
        query: &TableQuery,
    ) -> Result<Vec<AirtableRecord>, AirtableError>;
}
