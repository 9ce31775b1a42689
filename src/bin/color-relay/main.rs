mod args;

use std::process::ExitCode;

use anyhow::{Context as _, Result, ensure};
use args::Args;
use clap::Parser as _;
use color_relay::{
    api::{AppState, router},
    db::{migrate, new_pool},
    store::PgStore,
};
use tokio::{net::TcpListener, signal::ctrl_c};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        eprintln!("{e:#}");
        return ExitCode::from(1);
    }

    ExitCode::from(0)
}

async fn run() -> Result<()> {
    let args = Args::parse();
    ensure!(
        args.path.starts_with('/'),
        "relay path must start with '/': {}",
        args.path
    );

    let pool = new_pool(&args.database_url, args.max_connections)
        .await
        .context("failed to connect to database")?;

    migrate(&pool).await.context("failed to prepare database")?;

    let app = router(&args.path, AppState::new(PgStore::new(pool.clone())));

    let listener = TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("failed to bind {}", args.listen))?;
    info!("relay listening on http://{}{}", args.listen, args.path);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("closing connection pool");
    pool.close().await;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = ctrl_c().await {
            error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }

        info!("received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut s) => {
                s.recv().await;
            }
            Err(e) => {
                error!("failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }

        info!("received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
