//! Process-wide store pairing refresh tokens with anti-forgery tokens.
//!
//! A refresh token can mint a new access token only while the anti-forgery
//! value presented alongside it matches the value recorded here at login or
//! at the last refresh. Entries carry a TTL matching the refresh-token
//! lifetime; expired entries are evicted lazily and logout removes its entry
//! explicitly, so the map does not grow with the number of sessions ever
//! issued.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

struct SessionEntry {
    xsrf_token: String,
    expires_at: Instant,
}

/// Shared in-memory registry of active refresh sessions.
#[derive(Clone)]
pub struct SessionStore {
    entries: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Records (or overwrites) the anti-forgery value expected for a refresh
    /// token. Called at login and after every successful refresh, which is
    /// what rotates the anti-forgery token.
    pub async fn insert(&self, refresh_token: &str, xsrf_token: &str) {
        let mut entries = self.entries.write().await;
        let now = Instant::now();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            refresh_token.to_string(),
            SessionEntry {
                xsrf_token: xsrf_token.to_string(),
                expires_at: now + self.ttl,
            },
        );
    }

    /// Checks whether the presented anti-forgery value matches the one
    /// currently recorded for the refresh token. Expired entries never match.
    pub async fn matches(&self, refresh_token: &str, xsrf_token: &str) -> bool {
        let entries = self.entries.read().await;
        match entries.get(refresh_token) {
            Some(entry) => entry.expires_at > Instant::now() && entry.xsrf_token == xsrf_token,
            None => false,
        }
    }

    /// Drops the session entry for a refresh token, ending the session
    /// server-side. Called on logout.
    pub async fn remove(&self, refresh_token: &str) {
        self.entries.write().await.remove(refresh_token);
    }

    /// Number of live entries, expired ones included until the next insert.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> SessionStore {
        SessionStore::new(Duration::from_secs(3600))
    }

    #[tokio::test]
    async fn recorded_pair_matches() {
        let store = store();
        store.insert("refresh-1", "xsrf-1").await;

        assert!(store.matches("refresh-1", "xsrf-1").await);
        assert!(!store.matches("refresh-1", "xsrf-other").await);
        assert!(!store.matches("refresh-unknown", "xsrf-1").await);
    }

    #[tokio::test]
    async fn rotation_invalidates_previous_value() {
        let store = store();
        store.insert("refresh-1", "xsrf-old").await;
        store.insert("refresh-1", "xsrf-new").await;

        assert!(store.matches("refresh-1", "xsrf-new").await);
        assert!(!store.matches("refresh-1", "xsrf-old").await);
    }

    #[tokio::test]
    async fn removed_entry_no_longer_matches() {
        let store = store();
        store.insert("refresh-1", "xsrf-1").await;
        store.remove("refresh-1").await;

        assert!(!store.matches("refresh-1", "xsrf-1").await);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn expired_entries_never_match_and_get_purged() {
        let store = SessionStore::new(Duration::ZERO);
        store.insert("refresh-1", "xsrf-1").await;

        assert!(!store.matches("refresh-1", "xsrf-1").await);

        // The next insert sweeps out anything already expired.
        store.insert("refresh-2", "xsrf-2").await;
        assert_eq!(store.len().await, 1);
    }
}
