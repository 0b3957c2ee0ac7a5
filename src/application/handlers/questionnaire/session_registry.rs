//! SessionRegistry - keeps each client's controller apart.
//!
//! Controllers are stored behind their own mutex, so events for one session
//! are handled strictly one after another while different sessions proceed
//! independently. Sessions untouched for longer than the idle timeout are
//! evicted, both when a new session is created and by `evict_idle` sweeps.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;

use super::{PersistenceGateway, SessionController};
use crate::domain::foundation::SessionId;

/// Idle timeout used when none is configured.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// A controller shared between the registry and an in-flight request.
pub type SharedController = Arc<Mutex<SessionController>>;

struct SessionEntry {
    controller: SharedController,
    last_touched: Instant,
}

impl SessionEntry {
    fn is_idle(&self, now: Instant, idle_timeout: Duration) -> bool {
        now.saturating_duration_since(self.last_touched) >= idle_timeout
    }
}

/// In-memory map from session id to controller.
#[derive(Clone)]
pub struct SessionRegistry {
    gateway: Arc<PersistenceGateway>,
    sessions: Arc<RwLock<HashMap<SessionId, SessionEntry>>>,
    idle_timeout: Duration,
}

impl SessionRegistry {
    pub fn new(gateway: Arc<PersistenceGateway>) -> Self {
        Self {
            gateway,
            sessions: Arc::new(RwLock::new(HashMap::new())),
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }

    /// Sets how long a session may go untouched before it is evicted.
    pub fn with_idle_timeout(mut self, idle_timeout: Duration) -> Self {
        self.idle_timeout = idle_timeout;
        self
    }

    pub fn idle_timeout(&self) -> Duration {
        self.idle_timeout
    }

    /// Creates a fresh session and returns its id and controller.
    ///
    /// Idle sessions are evicted first.
    pub async fn create(&self) -> (SessionId, SharedController) {
        let id = SessionId::new();
        let controller = Arc::new(Mutex::new(SessionController::new(
            id,
            Arc::clone(&self.gateway),
        )));

        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let evicted = Self::evict_locked(&mut sessions, now, self.idle_timeout);
        sessions.insert(
            id,
            SessionEntry {
                controller: Arc::clone(&controller),
                last_touched: now,
            },
        );
        let live = sessions.len();
        drop(sessions);

        tracing::info!(session_id = %id, evicted, live, "Session created");
        (id, controller)
    }

    /// Looks up a live session and marks it as touched.
    pub async fn get(&self, id: &SessionId) -> Option<SharedController> {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(id)?;
        if entry.is_idle(now, self.idle_timeout) {
            sessions.remove(id);
            tracing::info!(session_id = %id, "Idle session evicted on access");
            return None;
        }
        entry.last_touched = now;
        Some(Arc::clone(&entry.controller))
    }

    /// Discards a session. Returns false if it did not exist.
    pub async fn remove(&self, id: &SessionId) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!(session_id = %id, "Session discarded");
        }
        removed
    }

    /// Drops every session idle for at least the idle timeout.
    /// Returns how many were evicted.
    pub async fn evict_idle(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        let evicted = Self::evict_locked(&mut sessions, Instant::now(), self.idle_timeout);
        if evicted > 0 {
            tracing::info!(evicted, live = sessions.len(), "Idle sessions evicted");
        }
        evicted
    }

    /// Runs `evict_idle` every `interval` until the runtime shuts down.
    pub fn spawn_sweeper(&self, interval: Duration) -> tokio::task::JoinHandle<()> {
        let registry = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                registry.evict_idle().await;
            }
        })
    }

    /// Get the number of live sessions
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    fn evict_locked(
        sessions: &mut HashMap<SessionId, SessionEntry>,
        now: Instant,
        idle_timeout: Duration,
    ) -> usize {
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_idle(now, idle_timeout));
        before - sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryChatRecordStore;
    use crate::application::handlers::questionnaire::SessionEvent;
    use crate::domain::questionnaire::ConversationStep;
    use chrono::NaiveDate;

    fn registry() -> SessionRegistry {
        let store = Arc::new(InMemoryChatRecordStore::new());
        SessionRegistry::new(Arc::new(PersistenceGateway::new(
            store,
            Duration::from_secs(1),
        )))
    }

    #[tokio::test]
    async fn create_then_get_returns_same_controller() {
        let registry = registry();
        let (id, controller) = registry.create().await;

        let found = registry.get(&id).await.unwrap();
        assert!(Arc::ptr_eq(&controller, &found));
        assert_eq!(found.lock().await.id(), id);
    }

    #[tokio::test]
    async fn unknown_id_is_none() {
        assert!(registry().get(&SessionId::new()).await.is_none());
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let registry = registry();
        let (_, first) = registry.create().await;
        let (_, second) = registry.create().await;

        first
            .lock()
            .await
            .handle(SessionEvent::StartChat {
                name: "Ana".to_string(),
                date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1),
            })
            .await;

        assert_eq!(first.lock().await.view().step, ConversationStep::Converse);
        assert_eq!(
            second.lock().await.view().step,
            ConversationStep::CollectIdentity
        );
        assert_eq!(registry.len().await, 2);
    }

    #[tokio::test]
    async fn remove_discards_session() {
        let registry = registry();
        let (id, _) = registry.create().await;

        assert!(registry.remove(&id).await);
        assert!(!registry.remove(&id).await);
        assert!(registry.is_empty().await);
    }

    mod eviction {
        use super::*;

        fn short_lived() -> SessionRegistry {
            registry().with_idle_timeout(Duration::from_millis(50))
        }

        #[tokio::test]
        async fn idle_session_is_evicted_by_sweep() {
            let registry = short_lived();
            let (id, _) = registry.create().await;

            tokio::time::sleep(Duration::from_millis(80)).await;

            assert_eq!(registry.evict_idle().await, 1);
            assert!(registry.is_empty().await);
            assert!(registry.get(&id).await.is_none());
        }

        #[tokio::test]
        async fn create_evicts_idle_sessions() {
            let registry = short_lived();
            for _ in 0..3 {
                registry.create().await;
            }

            tokio::time::sleep(Duration::from_millis(80)).await;
            registry.create().await;

            assert_eq!(registry.len().await, 1);
        }

        #[tokio::test]
        async fn idle_session_is_gone_on_access() {
            let registry = short_lived();
            let (id, _) = registry.create().await;

            tokio::time::sleep(Duration::from_millis(80)).await;

            assert!(registry.get(&id).await.is_none());
            assert!(registry.is_empty().await);
        }

        #[tokio::test]
        async fn access_keeps_session_alive() {
            let registry = registry().with_idle_timeout(Duration::from_millis(200));
            let (id, _) = registry.create().await;

            for _ in 0..4 {
                tokio::time::sleep(Duration::from_millis(80)).await;
                assert!(registry.get(&id).await.is_some());
            }

            assert_eq!(registry.evict_idle().await, 0);
        }

        #[tokio::test]
        async fn fresh_sessions_survive_sweep() {
            let registry = registry();
            registry.create().await;
            assert_eq!(registry.evict_idle().await, 0);
            assert_eq!(registry.len().await, 1);
        }
    }
}
