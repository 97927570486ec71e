use clap::Subcommand;

use crate::cli::utils::output_json;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::services::{DashboardService, SalesService};
use crate::state::AppState;

#[derive(Subcommand)]
pub enum FetchCommands {
    #[command(about = "Per-employee sales feed (same payload as GET /airtable)")]
    Sales,

    #[command(about = "Monthly dashboard tables (same payload as GET /sales-data)")]
    SalesData {
        #[arg(long, help = "Include the field names seen on each table's first record")]
        debug_fields: bool,
    },
}

pub async fn handle(cmd: FetchCommands, pretty: bool) -> anyhow::Result<()> {
    let state = AppState::from_config(apply_flags(&cmd, AppConfig::from_env()))?;

    match cmd {
        FetchCommands::Sales => {
            let payload = SalesService::new(&state.config, state.source.as_ref())
                .load()
                .await
                .map_err(into_anyhow)?;
            output_json(&payload, pretty)
        }
        FetchCommands::SalesData { .. } => {
            let payload = DashboardService::new(&state.config, state.source.as_ref())
                .load()
                .await
                .map_err(into_anyhow)?;
            output_json(&payload, pretty)
        }
    }
}

/// `--debug-fields` forces debug field names on; without it the environment decides.
fn apply_flags(cmd: &FetchCommands, mut config: AppConfig) -> AppConfig {
    if matches!(cmd, FetchCommands::SalesData { debug_fields: true }) {
        config.api.include_debug_fields = true;
    }
    config
}

fn into_anyhow(err: ApiError) -> anyhow::Error {
    anyhow::anyhow!("{} (HTTP {})", err.message(), err.status_code())
}
