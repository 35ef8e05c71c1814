use std::sync::{Arc, RwLock};

use tokio::sync::broadcast;

use assetdesk_auth::{Identity, Session};

/// Capacity of the change channel. Fan-out is lossy on overflow; `get`
/// always returns the latest committed value regardless.
const CHANGE_CHANNEL_CAPACITY: usize = 256;

/// Change notification carrying the new store value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    /// A full session was written (sign-in or refresh).
    Established(Session),
    /// The session was cleared (sign-out or expiry downgrade).
    Cleared,
}

/// Holds at most one session and fans out one notification per write.
///
/// The store is the only shared mutable state in the access core. Writes go
/// through whoever owns this value — in practice the lifecycle controller —
/// while every other component receives a [`SessionReader`], which has no
/// write surface. `set` notifies on every call; value-equal writes are not
/// deduplicated, so subscribers may key side effects off write count.
#[derive(Debug)]
pub struct SessionStore {
    current: Arc<RwLock<Option<Session>>>,
    tx: broadcast::Sender<SessionChange>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            current: Arc::new(RwLock::new(None)),
            tx,
        }
    }

    /// Current value. No side effects; blocks only for the read lock.
    pub fn get(&self) -> Option<Session> {
        read_current(&self.current)
    }

    /// Replace the value atomically and notify subscribers exactly once.
    pub fn set(&self, session: Option<Session>) {
        {
            let mut slot = self.current.write().unwrap_or_else(|e| e.into_inner());
            *slot = session.clone();
        }
        let change = match session {
            Some(s) => SessionChange::Established(s),
            None => SessionChange::Cleared,
        };
        // send only fails when no receiver exists, which is fine.
        let _ = self.tx.send(change);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.tx.subscribe()
    }

    /// Read-only view for gate and UI consumers.
    pub fn reader(&self) -> SessionReader {
        SessionReader {
            current: Arc::clone(&self.current),
            tx: self.tx.clone(),
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable read-only view of the store: current value plus change feed.
#[derive(Debug, Clone)]
pub struct SessionReader {
    current: Arc<RwLock<Option<Session>>>,
    tx: broadcast::Sender<SessionChange>,
}

impl SessionReader {
    pub fn get(&self) -> Option<Session> {
        read_current(&self.current)
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.get().map(|s| s.identity)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionChange> {
        self.tx.subscribe()
    }
}

fn read_current(slot: &RwLock<Option<Session>>) -> Option<Session> {
    slot.read().unwrap_or_else(|e| e.into_inner()).clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assetdesk_auth::{Role, SessionToken};
    use assetdesk_core::UserId;
    use chrono::Utc;
    use tokio::sync::broadcast::error::TryRecvError;

    fn session(token: &str) -> Session {
        Session {
            token: SessionToken::new(token),
            identity: Identity::new(UserId::new(), "Test Person", Role::new("user")),
            issued_at: Utc::now(),
            expires_at: None,
        }
    }

    #[test]
    fn get_after_set_sees_the_new_value() {
        let store = SessionStore::new();
        assert_eq!(store.get(), None);

        let s = session("tok-1");
        store.set(Some(s.clone()));
        assert_eq!(store.get(), Some(s));

        store.set(None);
        assert_eq!(store.get(), None);
    }

    #[test]
    fn every_set_notifies_even_when_the_value_is_unchanged() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        let s = session("tok-1");
        store.set(Some(s.clone()));
        store.set(Some(s.clone()));

        assert_eq!(rx.try_recv().unwrap(), SessionChange::Established(s.clone()));
        assert_eq!(rx.try_recv().unwrap(), SessionChange::Established(s));
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[test]
    fn clearing_notifies_cleared() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();

        store.set(Some(session("tok-1")));
        store.set(None);

        assert!(matches!(rx.try_recv().unwrap(), SessionChange::Established(_)));
        assert_eq!(rx.try_recv().unwrap(), SessionChange::Cleared);
    }

    #[test]
    fn readers_observe_writer_updates_but_cannot_write() {
        let store = SessionStore::new();
        let reader = store.reader();
        let mut rx = reader.subscribe();

        let s = session("tok-1");
        store.set(Some(s.clone()));

        assert_eq!(reader.get(), Some(s.clone()));
        assert_eq!(reader.current_identity(), Some(s.identity.clone()));
        assert_eq!(rx.try_recv().unwrap(), SessionChange::Established(s));
    }

    #[test]
    fn late_subscribers_converge_on_get() {
        let store = SessionStore::new();
        for i in 0..10 {
            store.set(Some(session(&format!("tok-{i}"))));
        }
        let reader = store.reader();
        assert_eq!(
            reader.get().map(|s| s.token.as_str().to_string()),
            Some("tok-9".to_string())
        );
    }
}
