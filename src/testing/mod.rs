use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::airtable::{AirtableError, AirtableRecord, RecordSource, TableQuery};
use crate::config::{AppConfig, Environment};

/// Development config with a token set, ready for service tests.
pub fn config_with_token() -> AppConfig {
    let mut config = AppConfig::for_environment(Environment::Development);
    config.airtable.token = Some("pat-test".to_string());
    config
}

enum Table {
    Records(Vec<AirtableRecord>),
    Failure { status: u16, body: String },
}

/// In-memory `RecordSource`. Unknown tables list as empty.
#[derive(Default)]
pub struct FakeSource {
    tables: HashMap<String, Table>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `fields` as the records of `table_id`, ids assigned in order.
    pub fn with_records(mut self, table_id: &str, fields: Vec<Value>) -> Self {
        let records = fields
            .into_iter()
            .enumerate()
            .map(|(i, fields)| {
                serde_json::from_value(json!({ "id": format!("rec{i:03}"), "fields": fields }))
                    .expect("fixture record")
            })
            .collect();
        self.tables.insert(table_id.to_string(), Table::Records(records));
        self
    }

    pub fn with_failure(mut self, table_id: &str, status: u16, body: &str) -> Self {
        self.tables.insert(
            table_id.to_string(),
            Table::Failure {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    /// Table ids listed so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl RecordSource for FakeSource {
    async fn list_records(
        &self,
        _token: &str,
        query: &TableQuery,
    ) -> Result<Vec<AirtableRecord>, AirtableError> {
        self.calls.lock().expect("calls lock").push(query.table_id.clone());

        match self.tables.get(&query.table_id) {
            Some(Table::Records(records)) => Ok(records.clone()),
            Some(Table::Failure { status, body }) => Err(AirtableError::Upstream {
                table_id: query.table_id.clone(),
                status: *status,
                body: body.clone(),
            }),
            None => Ok(Vec::new()),
        }
    }
}
