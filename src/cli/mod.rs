pub mod commands;
pub mod utils;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(about = "Dashboard proxy CLI - run the Airtable feeds without the HTTP server")]
#[command(version)]
pub struct Cli {
    #[arg(long, short, global = true, help = "Log upstream requests and field matches to stderr")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Pretty-print JSON output")]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Fetch and map a dashboard feed, print the JSON payload")]
    Fetch {
        #[command(subcommand)]
        cmd: commands::fetch::FetchCommands,
    },

    #[command(about = "Show the resolved configuration (token redacted)")]
    Config,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Fetch { cmd } => commands::fetch::handle(cmd, cli.pretty).await,
        Commands::Config => commands::config::handle(cli.pretty),
    }
}
