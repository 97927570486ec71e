#![allow(dead_code)]

use std::collections::HashMap;
use std::process::{Child, Command, Stdio};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, RawQuery, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use dashboard_proxy::config::AppConfig;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

pub const TOKEN: &str = "pat-integration";

/// One list-records call as the fake upstream saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub base_id: String,
    pub table_id: String,
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
}

impl RecordedRequest {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone)]
enum FakeTable {
    Pages(Vec<Vec<Value>>),
    Failure { status: u16, body: String },
}

#[derive(Default)]
struct Upstream {
    tables: HashMap<String, FakeTable>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Airtable stand-in serving `/v0/:base/:table` from fixtures.
///
/// Pages are addressed with offsets `page1`, `page2`, ...; the last page
/// carries no offset.
#[derive(Default)]
pub struct FakeAirtable {
    upstream: Upstream,
}

pub struct RunningUpstream {
    pub api_url: String,
    upstream: Arc<Upstream>,
    handle: JoinHandle<()>,
}

impl FakeAirtable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `pages` of field objects for `table_id`.
    pub fn table_pages(mut self, table_id: &str, pages: Vec<Vec<Value>>) -> Self {
        self.upstream
            .tables
            .insert(table_id.to_string(), FakeTable::Pages(pages));
        self
    }

    pub fn table(self, table_id: &str, records: Vec<Value>) -> Self {
        self.table_pages(table_id, vec![records])
    }

    pub fn failing_table(mut self, table_id: &str, status: u16, body: &str) -> Self {
        self.upstream.tables.insert(
            table_id.to_string(),
            FakeTable::Failure {
                status,
                body: body.to_string(),
            },
        );
        self
    }

    pub async fn start(self) -> Result<RunningUpstream> {
        let upstream = Arc::new(self.upstream);
        let router = Router::new()
            .route("/v0/:base/:table", get(list_records))
            .with_state(upstream.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind fake Airtable")?;
        let addr = listener.local_addr()?;
        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(RunningUpstream {
            api_url: format!("http://{}/v0", addr),
            upstream,
            handle,
        })
    }
}

impl RunningUpstream {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.upstream.requests.lock().expect("requests lock").clone()
    }

    pub fn requests_for(&self, table_id: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.table_id == table_id)
            .collect()
    }

    /// Config pointing at this upstream with a token set.
    pub fn config(&self) -> AppConfig {
        self.config_with(&[("AIRTABLE_TOKEN", TOKEN)])
    }

    pub fn config_with(&self, vars: &[(&str, &str)]) -> AppConfig {
        let mut vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        vars.insert("AIRTABLE_API_URL".to_string(), self.api_url.clone());
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }
}

impl Drop for RunningUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn list_records(
    State(upstream): State<Arc<Upstream>>,
    Path((base_id, table_id)): Path<(String, String)>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> Response {
    let query: Vec<(String, String)> = url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes())
        .into_owned()
        .collect();
    let request = RecordedRequest {
        base_id,
        table_id: table_id.clone(),
        query,
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned),
    };
    let page_index = request
        .param("offset")
        .and_then(|o| o.strip_prefix("page"))
        .and_then(|n| n.parse::<usize>().ok())
        .unwrap_or(0);
    upstream.requests.lock().expect("requests lock").push(request);

    match upstream.tables.get(&table_id) {
        Some(FakeTable::Pages(pages)) => {
            let fields = pages.get(page_index).cloned().unwrap_or_default();
            let records: Vec<Value> = fields
                .into_iter()
                .enumerate()
                .map(|(i, fields)| {
                    json!({
                        "id": format!("rec{}p{}n{}", table_id, page_index, i),
                        "createdTime": "2024-01-01T00:00:00.000Z",
                        "fields": fields,
                    })
                })
                .collect();

            let mut body = json!({ "records": records });
            if page_index + 1 < pages.len() {
                body["offset"] = json!(format!("page{}", page_index + 1));
            }
            Json(body).into_response()
        }
        Some(FakeTable::Failure { status, body }) => (
            StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body.clone(),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": { "type": "TABLE_NOT_FOUND" } })),
        )
            .into_response(),
    }
}

/// The `dashboard-proxy` binary running on a free port.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    /// Spawn with a clean Airtable environment plus `envs`.
    pub fn spawn(envs: &[(&str, &str)]) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dashboard-proxy"));
        cmd.env_remove("AIRTABLE_TOKEN")
            .env_remove("PORT")
            .env("DASHBOARD_PROXY_PORT", port.to_string())
            .env("APP_ENV", "production")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::inherit());
        for (key, value) in envs {
            cmd.env(key, value);
        }

        let child = cmd.spawn().context("failed to spawn server binary")?;
        Ok(Self { port, base_url, child })
    }

    pub async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                // Ready once health answers at all; it reports 503 without a token
                if resp.status() == reqwest::StatusCode::OK
                    || resp.status() == reqwest::StatusCode::SERVICE_UNAVAILABLE
                {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub async fn ensure_server(envs: &[(&str, &str)]) -> Result<TestServer> {
    let server = TestServer::spawn(envs)?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}
