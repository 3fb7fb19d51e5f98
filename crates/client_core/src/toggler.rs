use std::sync::Arc;

use anyhow::{Context, Result};
use shared::domain::SubscriptionStatus;
use storage::UserStore;
use tracing::{debug, info};

/// Applies a subscription change through the store, refusing Admin users.
pub struct SubscriptionToggler<S: UserStore> {
    store: Arc<S>,
}

impl<S: UserStore> SubscriptionToggler<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns `Ok(false)` without writing when the current user is Admin.
    pub async fn change_subscription(&self, new_status: SubscriptionStatus) -> Result<bool> {
        debug!(new_status = %new_status, "change_subscription: requested");
        let current = self
            .store
            .get()
            .await
            .context("failed to read current user")?;

        if current.is_admin() {
            info!(name = %current.name, "admin subscription cannot be changed");
            return Ok(false);
        }

        let updated = current.with_status(new_status);
        debug!(user = %updated, "change_subscription: writing updated user");
        self.store
            .set(updated)
            .await
            .context("failed to store updated user")
    }
}

#[cfg(test)]
#[path = "tests/toggler_tests.rs"]
mod tests;
