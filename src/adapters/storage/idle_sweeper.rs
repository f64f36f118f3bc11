//! Idle Session Sweeper
//!
//! Background loop that periodically drops sessions nobody has touched for
//! longer than the configured time-to-live.
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `max_idle` | 30 min | Idle time after which a session is dropped |
//! | `sweep_interval` | 60 s | How often the store is swept |

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::ports::{SessionStore, SessionStoreError};

/// Configuration for the idle session sweeper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleSweeperConfig {
    pub max_idle: Duration,
    pub sweep_interval: Duration,
}

impl Default for IdleSweeperConfig {
    fn default() -> Self {
        Self {
            max_idle: Duration::from_secs(30 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

impl IdleSweeperConfig {
    pub fn new(max_idle: Duration) -> Self {
        Self {
            max_idle,
            ..Default::default()
        }
    }

    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}

/// Drops idle sessions from a [`SessionStore`] on a fixed interval.
pub struct IdleSessionSweeper {
    store: Arc<dyn SessionStore>,
    config: IdleSweeperConfig,
}

impl IdleSessionSweeper {
    pub fn new(store: Arc<dyn SessionStore>, config: IdleSweeperConfig) -> Self {
        Self { store, config }
    }

    /// Run until `shutdown` flips to `true`.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.sweep_interval);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        return;
                    }
                }
                _ = interval.tick() => {
                    if let Err(e) = self.sweep().await {
                        tracing::warn!(error = %e, "Idle session sweep failed");
                    }
                }
            }
        }
    }

    /// Sweep once, returning how many sessions were dropped.
    pub async fn sweep(&self) -> Result<usize, SessionStoreError> {
        let evicted = self.store.evict_idle(self.config.max_idle).await?;
        if !evicted.is_empty() {
            let remaining = self.store.count().await?;
            tracing::info!(evicted = evicted.len(), remaining, "Dropped idle sessions");
        }
        Ok(evicted.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::foundation::SessionId;
    use crate::domain::session::AnalysisSession;

    #[test]
    fn default_config_values() {
        let config = IdleSweeperConfig::default();
        assert_eq!(config.max_idle, Duration::from_secs(1800));
        assert_eq!(config.sweep_interval, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn sweep_drops_only_idle_sessions() {
        let store = Arc::new(InMemorySessionStore::new());
        let idle = SessionId::new();
        store.insert(AnalysisSession::new(idle)).await.unwrap();
        tokio::time::sleep(Duration::from_millis(120)).await;
        let recent = SessionId::new();
        store.insert(AnalysisSession::new(recent)).await.unwrap();

        let sweeper = IdleSessionSweeper::new(
            store.clone(),
            IdleSweeperConfig::new(Duration::from_millis(60)),
        );

        assert_eq!(sweeper.sweep().await.unwrap(), 1);
        assert!(store.find(&idle).await.unwrap().is_none());
        assert!(store.find(&recent).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn run_sweeps_until_shutdown() {
        let store = Arc::new(InMemorySessionStore::new());
        store.insert(AnalysisSession::new(SessionId::new())).await.unwrap();

        let sweeper = IdleSessionSweeper::new(
            store.clone(),
            IdleSweeperConfig::new(Duration::from_millis(20))
                .with_sweep_interval(Duration::from_millis(10)),
        );
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move { sweeper.run(shutdown_rx).await });

        tokio::time::sleep(Duration::from_millis(150)).await;
        shutdown_tx.send(true).unwrap();
        task.await.unwrap();

        assert_eq!(store.count().await.unwrap(), 0);
    }
}
