use crate::services::kyc_service::KycService;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Background verification-status poller.
///
/// Polls once immediately, then on a fixed interval, for as long as the
/// owning view is active. Dropping the handle (or calling `stop`) cancels the
/// loop; an in-flight poll is discarded on shutdown so nothing writes to the
/// shared status cell after teardown.
pub struct StatusPoller {
    handle: Option<JoinHandle<()>>,
    shutdown: watch::Sender<bool>,
}

impl StatusPoller {
    pub fn spawn(service: Arc<KycService>, interval: Duration) -> Self {
        let (shutdown, mut rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = rx.changed() => break,
                    _ = ticker.tick() => {
                        tokio::select! {
                            _ = rx.changed() => break,
                            result = service.fetch_status() => {
                                if let Err(e) = result {
                                    // Surfaced through the cell as `Error`; the
                                    // next tick retries naturally.
                                    warn!("Status poll failed: {}", e);
                                }
                            }
                        }
                    }
                }
            }

            debug!("Status poller stopped");
        });

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Signal shutdown and wait for the loop to exit.
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
