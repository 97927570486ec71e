use std::sync::Arc;

use crate::airtable::{AirtableClient, AirtableError, RecordSource};
use crate::config::AppConfig;

/// Router state shared by every request. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub source: Arc<dyn RecordSource>,
}

impl AppState {
    pub fn new(config: AppConfig, source: Arc<dyn RecordSource>) -> Self {
        Self {
            config: Arc::new(config),
            source,
        }
    }

    /// State backed by the real Airtable client.
    pub fn from_config(config: AppConfig) -> Result<Self, AirtableError> {
        let client = AirtableClient::new(&config.airtable)?;
        Ok(Self::new(config, Arc::new(client)))
    }
}
