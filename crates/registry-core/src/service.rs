//! Registry lifecycle: construction, the sweeper task, teardown

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::interval;
use tracing::info;

use crate::registry::{RegistryConfig, SessionRegistry};

/// Owns one [`SessionRegistry`] together with its background sweeper.
///
/// Lifecycle is explicit: construct, [`start`](Self::start), hand the
/// registry to the transport, [`stop`](Self::stop) at teardown. Dropping
/// the service without stopping leaves the sweeper running until the
/// runtime shuts down.
pub struct RegistryService {
    registry: Arc<SessionRegistry>,
    sweep_interval: Duration,
    sweeper_handle: Option<JoinHandle<()>>,
}

impl RegistryService {
    /// Create the service and its registry; the sweeper is not yet running.
    pub fn new(config: RegistryConfig) -> Self {
        let sweep_interval = config.sweep_interval;
        Self {
            registry: Arc::new(SessionRegistry::new(config)),
            sweep_interval,
            sweeper_handle: None,
        }
    }

    /// Handle to the owned registry, for transports and tests.
    pub fn registry(&self) -> Arc<SessionRegistry> {
        self.registry.clone()
    }

    /// Spawn the sweeper task. Calling it again while running is a no-op.
    pub fn start(&mut self) {
        if self.sweeper_handle.is_some() {
            return;
        }

        let registry = self.registry.clone();
        let period = self.sweep_interval;
        self.sweeper_handle = Some(tokio::spawn(async move {
            Self::sweeper_loop(registry, period).await;
        }));
        info!("Session sweeper started ({:?} interval)", period);
    }

    /// Abort the sweeper task and wait for it to wind down.
    pub async fn stop(&mut self) {
        if let Some(handle) = self.sweeper_handle.take() {
            handle.abort();
            let _ = handle.await;
            info!("Session sweeper stopped");
        }
    }

    async fn sweeper_loop(registry: Arc<SessionRegistry>, period: Duration) {
        let mut ticker = interval(period);
        loop {
            ticker.tick().await;
            registry.sweep().await;
        }
    }
}
