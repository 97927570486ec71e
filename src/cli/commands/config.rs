use serde_json::json;

use crate::cli::utils::output_json;
use crate::config::AppConfig;

pub fn handle(pretty: bool) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    let token_configured = config.airtable.token().is_some();

    output_json(
        &json!({
            "token_configured": token_configured,
            "config": config,
        }),
        pretty,
    )
}
