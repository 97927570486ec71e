use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use tracing::{debug, info};
use url::{ParseError, Url};

use super::{AirtableError, AirtableRecord, Page, RecordSource, TableQuery};
use crate::config::AirtableConfig;

/// reqwest-backed `RecordSource` talking to `{api_url}/{base_id}/{table_id}`.
#[derive(Debug, Clone)]
pub struct AirtableClient {
    http: reqwest::Client,
    api_url: Url,
    base_id: String,
    page_size: u32,
}

impl AirtableClient {
    pub fn new(config: &AirtableConfig) -> Result<Self, AirtableError> {
        Self::with_http(reqwest::Client::new(), config)
    }

    /// Reuse an existing connection pool.
    pub fn with_http(http: reqwest::Client, config: &AirtableConfig) -> Result<Self, AirtableError> {
        Ok(Self {
            http,
            api_url: Url::parse(&config.api_url)?,
            base_id: config.base_id.clone(),
            page_size: config.page_size,
        })
    }

    /// Build the list-records URL for one page.
    pub fn page_url(&self, query: &TableQuery, offset: Option<&str>) -> Result<Url, AirtableError> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| AirtableError::InvalidUrl(ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .push(&self.base_id)
            .push(&query.table_id);

        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("pageSize", &self.page_size.to_string());
            if let Some(view) = &query.view {
                pairs.append_pair("view", view);
            }
            if let Some(field) = &query.sort_field {
                pairs.append_pair("sort[0][field]", field);
                pairs.append_pair("sort[0][direction]", "asc");
            }
            if let Some(offset) = offset {
                pairs.append_pair("offset", offset);
            }
        }

        Ok(url)
    }

    async fn fetch_page(
        &self,
        token: &str,
        query: &TableQuery,
        offset: Option<&str>,
    ) -> Result<Page, AirtableError> {
        let url = self.page_url(query, offset)?;

        let response = self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Bearer {}", token))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AirtableError::Upstream {
                table_id: query.table_id.clone(),
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| AirtableError::Decode {
            table_id: query.table_id.clone(),
            source,
        })
    }
}

#[async_trait]
impl RecordSource for AirtableClient {
    async fn list_records(
        &self,
        token: &str,
        query: &TableQuery,
    ) -> Result<Vec<AirtableRecord>, AirtableError> {
        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let page = self.fetch_page(token, query, offset.as_deref()).await?;
            pages += 1;
            debug!(
                table = %query.table_id,
                page = pages,
                count = page.records.len(),
                "fetched Airtable page"
            );

            let next = page.next_offset().map(str::to_owned);
            records.extend(page.records);

            match next {
                Some(next_offset) => offset = Some(next_offset),
                None => break,
            }
        }

        info!(table = %query.table_id, pages, records = records.len(), "fetched Airtable table");
        Ok(records)
    }
}
