//! Assistant server binary.

use anyhow::Context;
use clap::Parser;
use log::info;
use sahayak_config::ServerConfig;
use sahayak_server::{AppContext, router};

/// Command-line arguments for the server.
#[derive(Debug, Parser)]
#[command(name = "sahayak-server", about = "Multilingual citizen-services assistant API")]
struct Args {
    /// Address to bind the HTTP listener on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: String,
    /// Override the SQLite database path from the environment.
    #[arg(long)]
    db_path: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = ServerConfig::from_env().context("loading config")?;
    if let Some(db_path) = args.db_path {
        config.db_path = db_path;
    }
    info!(
        "starting {} v{} (model={}, db_path={})",
        config.app_name, config.app_version, config.model, config.db_path
    );

    let ctx = AppContext::initialize(config).context("initializing application context")?;
    if !ctx.chatbot_available() {
        info!("running in degraded mode: chat will return the fixed apology");
    }

    let app = router(ctx);
    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .with_context(|| format!("binding {}", args.bind))?;
    info!("listening on {}", args.bind);
    axum::serve(listener, app).await.context("serving")?;
    Ok(())
}
