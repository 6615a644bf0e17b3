use anyhow::Result;
use clap::Parser;
use tracing::info;

use repcount::api::{AppState, ServerConfig, serve};
use repcount::cli::Cli;
use repcount::store::SessionStore;
use repcount::{db, logging};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();

    let pool = db::open(&cli.db).await?;
    info!(db = %cli.db, "database ready");

    let state = AppState::new(SessionStore::new(pool));
    serve(ServerConfig::new(cli.host, cli.port), state).await
}
