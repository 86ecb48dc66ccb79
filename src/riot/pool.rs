//! Reusable HTTP connection resource shared between API clients.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use super::types::{RiotApiError, RiotApiResponse};

#[derive(Debug, Default)]
enum Slot {
    #[default]
    Idle,
    Open(reqwest::Client),
    Closed,
}

/// Handle to a lazily opened `reqwest::Client`.
///
/// Clones share the same underlying client. Whoever created the pool is in
/// charge of closing it; clients that merely borrow a clone never do (see
/// [`RiotClient::close`](super::RiotClient::close)).
#[derive(Debug, Clone, Default)]
pub struct HttpPool(Arc<Mutex<Slot>>);

impl HttpPool {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the shared client, building it on first use.
    pub fn client(&self) -> RiotApiResponse<reqwest::Client> {
        let mut slot = self.slot();

        match &*slot {
            Slot::Open(client) => Ok(client.clone()),
            Slot::Closed => Err(RiotApiError::ConnectionClosed),
            Slot::Idle => {
                let client = reqwest::Client::builder()
                    .user_agent(concat!("rankwarden/", env!("CARGO_PKG_VERSION")))
                    .build()?;
                *slot = Slot::Open(client.clone());
                debug!("🛰️ HTTP connection pool opened");
                Ok(client)
            }
        }
    }

    /// Close the pool. Returns `true` only for the call that actually closed it.
    ///
    /// Requests already in flight keep their own handle to the client and
    /// complete normally; new requests fail with
    /// [`RiotApiError::ConnectionClosed`].
    pub fn close(&self) -> bool {
        let mut slot = self.slot();

        if matches!(*slot, Slot::Closed) {
            return false;
        }

        *slot = Slot::Closed;
        info!("🛰️ HTTP connection pool closed");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_open(pool: &HttpPool) -> bool {
        matches!(*pool.slot(), Slot::Open(_))
    }

    #[test]
    fn opens_lazily() {
        let pool = HttpPool::new();
        assert!(!is_open(&pool));

        pool.client().unwrap();
        assert!(is_open(&pool));
    }

    #[test]
    fn clones_share_state() {
        let pool = HttpPool::new();
        let other = pool.clone();

        other.client().unwrap();
        assert!(is_open(&pool));
    }

    #[test]
    fn close_happens_exactly_once() {
        let pool = HttpPool::new();
        pool.client().unwrap();

        assert!(pool.close());
        assert!(!pool.close());
        assert!(matches!(*pool.slot(), Slot::Closed));
        assert!(matches!(
            pool.client(),
            Err(RiotApiError::ConnectionClosed)
        ));
    }

    #[test]
    fn closing_an_unused_pool_prevents_opening() {
        let pool = HttpPool::new();
        assert!(pool.close());
        assert!(pool.client().is_err());
    }
}
