use std::{net::SocketAddr, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use kisaragi::{
    AppState, SharedState, api, config::AppConfig, reconcile::Reconciler,
    validation::validate_zone_name, zone::client::ManagedDnsClient,
};
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(author, version, about, rename_all = "kebab-case")]
struct Cli {
    /// DNS zone name served through this webhook (e.g. example.com)
    #[arg(long, value_name = "ZONE")]
    zone_name: String,
    /// Listen address for the webhook HTTP server
    #[arg(long, value_name = "ADDR", default_value = "0.0.0.0:8080")]
    listen: SocketAddr,
    /// Managed DNS API base URL
    #[arg(long, value_name = "URL")]
    dns_api_url: String,
    /// Managed DNS API key
    #[arg(long, value_name = "KEY")]
    dns_api_key: String,
    /// Enable TXT registry mode
    #[arg(long)]
    registry_txt: bool,
    /// TXT owner ID for registry mode
    #[arg(long, value_name = "ID", default_value = "default")]
    txt_owner_id: String,
    /// Name prefix marking registry bookkeeping TXT records
    #[arg(long, value_name = "PREFIX", default_value = "_external-dns.")]
    txt_prefix: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = build_app_config(&cli)?;
    let state = init_shared_state(&cli, config).await?;

    let app = api::create_router(state);

    let listener = TcpListener::bind(cli.listen)
        .await
        .with_context(|| format!("failed to bind to {}", cli.listen))?;

    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server exited with error")?;

    Ok(())
}

async fn init_shared_state(cli: &Cli, config: AppConfig) -> Result<SharedState> {
    let client = ManagedDnsClient::connect(&cli.dns_api_url, &cli.dns_api_key, config.zone_root())
        .await
        .with_context(|| format!("failed to resolve zone '{}'", config.zone_name))?;

    info!(zone = %config.zone_name, "serving webhook for zone");
    if config.registry_txt {
        info!(owner = %config.txt_owner_id, "TXT registry enabled");
    }

    let reconciler = Reconciler::new(&config, Arc::new(client));

    Ok(Arc::new(AppState { config, reconciler }))
}

fn build_app_config(cli: &Cli) -> Result<AppConfig> {
    validate_zone_name(&cli.zone_name)
        .with_context(|| format!("invalid zone name '{}'", cli.zone_name))?;

    Ok(AppConfig {
        zone_name: cli.zone_name.trim_end_matches('.').to_string(),
        registry_txt: cli.registry_txt,
        txt_owner_id: cli.txt_owner_id.clone(),
        txt_prefix: cli.txt_prefix.clone(),
    })
}

async fn shutdown_signal() {
    if let Err(err) = signal::ctrl_c().await {
        error!("failed to install CTRL+C handler: {err}");
    }
    info!("shutdown signal received");
}

fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}
