use tokio::sync::broadcast;
use tokio::time::{Duration, MissedTickBehavior, interval};
use tracing::{debug, info};

use ventokv_storage::Store;

/// Tarefa de fundo que purga chaves expiradas a cada `every`.
///
/// Termina quando o canal de shutdown é fechado ou recebe um sinal.
pub async fn run_sweeper(store: Store, every: Duration, mut shutdown: broadcast::Receiver<()>) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // Primeiro tick é imediato
    ticker.tick().await;

    info!("sweep de expiração a cada {every:?}");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let removed = store.purge_expired();
                if removed > 0 {
                    debug!("{removed} keys expiradas purgadas");
                }
            }
            _ = shutdown.recv() => {
                debug!("encerrando sweep de expiração");
                return;
            }
        }
    }
}
