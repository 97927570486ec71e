use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

use crate::airtable::TableQuery;

/// Error body returned by every handler when the token is absent.
pub const MISSING_TOKEN_MESSAGE: &str = "AIRTABLE_TOKEN not configured";

/// Largest `pageSize` Airtable accepts on list-records.
pub const MAX_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub airtable: AirtableConfig,
    pub tables: TablesConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct AirtableConfig {
    #[serde(skip)]
    pub token: Option<String>,
    pub api_url: String,
    pub base_id: String,
    pub page_size: u32,
}

/// Upstream tables each handler reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TablesConfig {
    pub sales: TableQuery,
    pub overview: TableQuery,
    pub invoiced: TableQuery,
    pub conversions: TableQuery,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
    pub cache_max_age_secs: u64,
    pub enable_request_logging: bool,
    pub include_debug_fields: bool,
}

impl AirtableConfig {
    /// The bearer token, if the hosting environment provided a non-empty one.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref().filter(|t| !t.is_empty())
    }
}

impl Default for AirtableConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_url: "https://api.airtable.com/v0".to_string(),
            base_id: "appbx9KaWpz9q1qpE".to_string(),
            page_size: MAX_PAGE_SIZE,
        }
    }
}

// Never print the token
impl fmt::Debug for AirtableConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AirtableConfig")
            .field("token", &self.token().map(|_| "<redacted>"))
            .field("api_url", &self.api_url)
            .field("base_id", &self.base_id)
            .field("page_size", &self.page_size)
            .finish()
    }
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            sales: TableQuery::new("tblgy7Oah36KTcmmS")
                .in_view("Dashboard Feed")
                .sorted_by("Date"),
            overview: TableQuery::new("tblf2Svz59N1TrLoI").sorted_by("Date Entered"),
            invoiced: TableQuery::new("tblVJzj3b8InNfXGw").sorted_by("Date Entered"),
            conversions: TableQuery::new("tblLcaZPn5zhuPNpS").sorted_by("Date Entered"),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary variable source (tests pass a map).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        Self::for_environment(environment).with_overrides(lookup)
    }

    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
    }

    fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Airtable
        self.airtable.token = lookup("AIRTABLE_TOKEN");
        if let Some(v) = lookup("AIRTABLE_API_URL") {
            self.airtable.api_url = v;
        }
        if let Some(v) = lookup("AIRTABLE_BASE_ID") {
            self.airtable.base_id = v;
        }
        if let Some(v) = lookup("AIRTABLE_PAGE_SIZE") {
            // Out-of-range sizes make Airtable reject every page
            if let Some(size) = v
                .parse::<u32>()
                .ok()
                .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
            {
                self.airtable.page_size = size;
            }
        }

        // Tables
        if let Some(v) = lookup("AIRTABLE_SALES_TABLE") {
            self.tables.sales.table_id = v;
        }
        if let Some(v) = lookup("AIRTABLE_SALES_VIEW") {
            self.tables.sales.view = Some(v).filter(|v| !v.is_empty());
        }
        if let Some(v) = lookup("AIRTABLE_OVERVIEW_TABLE") {
            self.tables.overview.table_id = v;
        }
        if let Some(v) = lookup("AIRTABLE_INVOICED_TABLE") {
            self.tables.invoiced.table_id = v;
        }
        if let Some(v) = lookup("AIRTABLE_CONVERSIONS_TABLE") {
            self.tables.conversions.table_id = v;
        }

        // API
        if let Some(port) = lookup("DASHBOARD_PROXY_PORT")
            .or_else(|| lookup("PORT"))
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.api.port = port;
        }
        if let Some(v) = lookup("DASHBOARD_CACHE_MAX_AGE") {
            self.api.cache_max_age_secs = v.parse().unwrap_or(self.api.cache_max_age_secs);
        }
        if let Some(v) = lookup("DASHBOARD_DEBUG_FIELDS") {
            self.api.include_debug_fields = v.parse().unwrap_or(self.api.include_debug_fields);
        }
        if let Some(v) = lookup("API_ENABLE_REQUEST_LOGGING") {
            self.api.enable_request_logging = v.parse().unwrap_or(self.api.enable_request_logging);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            airtable: AirtableConfig::default(),
            tables: TablesConfig::default(),
            api: ApiConfig {
                port: 3000,
                cache_max_age_secs: 300,
                enable_request_logging: true,
                include_debug_fields: true,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                include_debug_fields: false,
                ..Self::development().api
            },
            ..Self::development()
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                port: 3000,
                cache_max_age_secs: 300,
                enable_request_logging: false,
                include_debug_fields: false,
            },
            ..Self::development()
        }
    }
}
