use clap::Parser;
use tokio::signal;
use tokio::sync::broadcast;
use tokio::time::Duration;
use tracing::{error, info};

use ventokv_common::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SWEEP_INTERVAL_SECS};
use ventokv_server::{bind, run, run_sweeper};
use ventokv_storage::Store;

#[derive(Parser, Debug)]
#[command(name = "ventokv-server", about = "VentoKV — key-value store in-memory sobre HTTP")]
struct Args {
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Intervalo em segundos do sweep de chaves expiradas (0 desliga)
    #[arg(long, value_name = "SECS", default_value_t = DEFAULT_SWEEP_INTERVAL_SECS)]
    sweep_interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ventokv_server=info".into()),
        )
        .init();

    let args = Args::parse();
    let store = Store::new();
    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let sweeper = if args.sweep_interval > 0 {
        let every = Duration::from_secs(args.sweep_interval);
        Some(tokio::spawn(run_sweeper(
            store.clone(),
            every,
            shutdown_tx.subscribe(),
        )))
    } else {
        None
    };

    let listener = bind(&args.host, args.port).await?;

    let shutdown = async move {
        if let Err(e) = signal::ctrl_c().await {
            error!("falha ao escutar ctrl-c: {e}");
        }
        info!("shutdown signal recebido");
        drop(shutdown_tx);
    };

    run(listener, store, shutdown).await?;

    if let Some(handle) = sweeper {
        handle.await?;
    }

    info!("servidor encerrado");
    Ok(())
}
