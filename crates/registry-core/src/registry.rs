//! The concurrent session map and its operations

use std::collections::HashMap;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{RegistryError, Result};
use crate::types::{Session, SessionDescriptor};

/// Tuning for a [`SessionRegistry`] and its sweeper.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Maximum age a session may reach before the sweeper evicts it.
    pub session_ttl: Duration,
    /// How often the sweeper runs.
    pub sweep_interval: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            session_ttl: Duration::from_secs(1800),
            sweep_interval: Duration::from_secs(300),
        }
    }
}

/// In-memory session registry keyed by game code.
///
/// Every operation is atomic with respect to the whole map: writers
/// (register, update, unregister, sweep) serialize on one write guard and
/// readers observe consistent snapshots. Guards are held only for the
/// single map action, never across I/O.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Session>>,
    config: RegistryConfig,
}

impl SessionRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            config,
        }
    }

    /// Validate a descriptor and store it, returning the game code.
    ///
    /// A session already stored under the same code is replaced wholesale;
    /// re-registering is how hosts refresh their entry.
    pub async fn register(&self, descriptor: SessionDescriptor) -> Result<String> {
        let session = Session::from_descriptor(descriptor, Utc::now().timestamp())?;
        let code = session.code.clone();
        let host_name = session.host_name.clone();

        self.sessions.write().await.insert(code.clone(), session);
        info!("Game registered: {} by {}", code, host_name);
        Ok(code)
    }

    /// Snapshot of all public sessions, in unspecified order.
    pub async fn list_public(&self) -> Vec<Session> {
        let sessions = self.sessions.read().await;
        sessions
            .values()
            .filter(|session| !session.is_private)
            .cloned()
            .collect()
    }

    /// Fetch one session by code, private ones included.
    pub async fn get(&self, code: &str) -> Result<Session> {
        let sessions = self.sessions.read().await;
        sessions
            .get(code)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound(code.to_string()))
    }

    /// Overwrite the reported occupancy of a stored session.
    ///
    /// The count is taken as the host reports it and is not checked against
    /// `max_players`.
    pub async fn update_players(&self, code: &str, current_players: u32) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(code)
            .ok_or_else(|| RegistryError::NotFound(code.to_string()))?;
        session.current_players = current_players;
        info!("Game {} updated: {} players", code, current_players);
        Ok(())
    }

    /// Remove a session explicitly.
    pub async fn unregister(&self, code: &str) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        if sessions.remove(code).is_none() {
            return Err(RegistryError::NotFound(code.to_string()));
        }
        info!("Game unregistered: {}", code);
        Ok(())
    }

    /// Evict every session whose age exceeds the configured TTL, returning
    /// how many were dropped.
    ///
    /// One bounded pass over the map under the write guard. The clock is
    /// read once, after the guard is acquired, so an entry registered while
    /// the sweep waited can never be judged by an older clock than the one
    /// that stamped it.
    pub async fn sweep(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let now = Utc::now().timestamp();
        self.evict_expired(&mut sessions, now)
    }

    fn evict_expired(&self, sessions: &mut HashMap<String, Session>, now: i64) -> usize {
        let ttl_secs = self.config.session_ttl.as_secs() as i64;

        let before = sessions.len();
        sessions.retain(|code, session| {
            let expired = session.age_secs(now) > ttl_secs;
            if expired {
                info!("Cleaned up expired game: {}", code);
            }
            !expired
        });
        let evicted = before - sessions.len();

        if evicted > 0 {
            debug!(
                "Sweep evicted {} session(s), {} remaining",
                evicted,
                sessions.len()
            );
        }
        evicted
    }

    /// Total stored sessions, private ones included.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
