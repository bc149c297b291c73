use anyhow::{Context, Result};
use clap::Parser;
use news_agent::{analysis::FinancialNewsAgent, api, config, logging};
use std::net::IpAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve the news agent tools over HTTP.
#[derive(Parser)]
#[command(name = "news-agent", version, about)]
struct Cli {
    /// Address to bind; overrides SERVER_HOST.
    #[arg(long)]
    host: Option<IpAddr>,
    /// Port to bind; overrides SERVER_PORT.
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_tracing();
    let config = config::init_config().context("failed to load configuration")?;

    let host = cli.host.unwrap_or(config.server_host);
    let port = cli.port.or(config.server_port);
    let app = api::create_router(Arc::new(FinancialNewsAgent::new()), config.pretty_json);

    let (listener, port) = bind_listener(host, port)
        .await
        .context("failed to bind HTTP listener")?;
    tracing::info!("Listening on http://{}:{}", host, port);
    axum::serve(listener, app)
        .await
        .context("HTTP server terminated unexpectedly")?;
    Ok(())
}

async fn bind_listener(host: IpAddr, port: Option<u16>) -> Result<(TcpListener, u16), std::io::Error> {
    if let Some(port) = port {
        return TcpListener::bind((host, port))
            .await
            .map(|listener| (listener, port));
    }

    const PORT_RANGE: std::ops::RangeInclusive<u16> = 8000..=8099;
    for port in PORT_RANGE {
        match TcpListener::bind((host, port)).await {
            Ok(listener) => {
                tracing::debug!(port, "Bound server port");
                return Ok((listener, port));
            }
            Err(err) if err.kind() == std::io::ErrorKind::AddrInUse => {
                tracing::debug!(port, "Port already in use; trying next");
                continue;
            }
            Err(err) => return Err(err),
        }
    }

    Err(std::io::Error::new(
        std::io::ErrorKind::AddrNotAvailable,
        "No available port found in range 8000-8099",
    ))
}
