use std::{sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use shared::domain::User;
use tokio::sync::RwLock;
use tracing::debug;

/// Round-trip delay the in-memory store imitates on every call.
pub const DEFAULT_LATENCY: Duration = Duration::from_millis(500);

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get(&self) -> Result<User>;
    async fn set(&self, user: User) -> Result<bool>;
}

#[async_trait]
impl<T> UserStore for Arc<T>
where
    T: UserStore + ?Sized,
{
    async fn get(&self) -> Result<User> {
        (**self).get().await
    }

    async fn set(&self, user: User) -> Result<bool> {
        (**self).set(user).await
    }
}

/// Single-slot store living for the process lifetime.
///
/// Clones share the slot. Each `get`/`set` is atomic on its own, but a
/// read-then-write sequence across two calls is not.
#[derive(Clone)]
pub struct InMemoryUserStore {
    current: Arc<RwLock<User>>,
    latency: Duration,
}

impl InMemoryUserStore {
    pub fn new(seed: User) -> Self {
        Self::with_latency(seed, DEFAULT_LATENCY)
    }

    pub fn with_latency(seed: User, latency: Duration) -> Self {
        debug!(seed = %seed, latency_ms = latency.as_millis() as u64, "creating in-memory user store");
        Self {
            current: Arc::new(RwLock::new(seed)),
            latency,
        }
    }

    pub fn seeded() -> Self {
        Self::new(User::default_seed())
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Reads the slot immediately, skipping the simulated latency.
    pub async fn snapshot(&self) -> User {
        self.current.read().await.clone()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get(&self) -> Result<User> {
        debug!("get: request received");
        self.simulate_latency().await;
        let user = self.current.read().await.clone();
        debug!(user = %user, "get: returning current user");
        Ok(user)
    }

    async fn set(&self, user: User) -> Result<bool> {
        debug!(user = %user, "set: request received");
        self.simulate_latency().await;
        *self.current.write().await = user;
        debug!("set: stored");
        Ok(true)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
