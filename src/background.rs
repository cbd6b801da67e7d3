use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::sync::watch;
use tokio::time::sleep;
use tracing::{error, info};
use crate::state::AppState;

/// Garbage-collects lapsed cart reservations on a configurable interval.
///
/// Reads never depend on the janitor: every cart query filters on
/// `expires_at` itself, so an expired row is invisible the moment it lapses.
/// The shutdown channel makes the loop cancellable instead of living as long
/// as the process.
pub async fn start_cart_janitor(state: Arc<AppState>, mut shutdown: watch::Receiver<bool>) {
    let interval = Duration::from_secs(state.config.cart_sweep_interval_secs);
    info!("Starting cart janitor (interval: {:?})", interval);

    loop {
        tokio::select! {
            _ = sleep(interval) => {
                match state.cart_repo.delete_expired(Utc::now()).await {
                    Ok(0) => {}
                    Ok(n) => info!("Cart janitor removed {} expired reservations", n),
                    Err(e) => error!("Cart sweep failed: {:?}", e),
                }
            }
            _ = shutdown.changed() => {
                info!("Cart janitor shutting down");
                break;
            }
        }
    }
}
