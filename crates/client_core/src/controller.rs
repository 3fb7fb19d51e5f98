use std::sync::Arc;

use anyhow::{Context, Result};
use storage::UserStore;
use tokio::{sync::watch, task::JoinHandle};
use tracing::{debug, info};

use crate::{formatter::format_display_name, toggler::SubscriptionToggler};

pub const IDLE_LABEL: &str = "Loading...";
pub const FETCHING_LABEL: &str = "Fetching user...";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    Loading,
    Ready(String),
}

impl ControllerState {
    pub fn label(&self) -> &str {
        match self {
            Self::Idle => IDLE_LABEL,
            Self::Loading => FETCHING_LABEL,
            Self::Ready(label) => label,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Holds the latest formatted label as observable state and runs the two
/// user-facing commands against a store.
pub struct UserController<S: UserStore> {
    store: Arc<S>,
    toggler: SubscriptionToggler<S>,
    state: watch::Sender<ControllerState>,
}

impl<S: UserStore> UserController<S> {
    pub fn new(store: Arc<S>) -> Self {
        let (state, _) = watch::channel(ControllerState::Idle);
        Self {
            toggler: SubscriptionToggler::new(Arc::clone(&store)),
            store,
            state,
        }
    }

    /// Builds a controller and publishes the first label before returning.
    pub async fn start(store: Arc<S>) -> Result<Self> {
        let controller = Self::new(store);
        controller.fetch_user().await?;
        Ok(controller)
    }

    pub fn subscribe(&self) -> watch::Receiver<ControllerState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> ControllerState {
        self.state.borrow().clone()
    }

    pub fn label(&self) -> String {
        self.state.borrow().label().to_string()
    }

    pub async fn fetch_user(&self) -> Result<String> {
        debug!("fetch_user: command received");
        self.publish(ControllerState::Loading);

        let user = self
            .store
            .get()
            .await
            .context("failed to fetch user")?;
        let label = format_display_name(&user);
        info!(label = %label, "fetched user");

        self.publish(ControllerState::Ready(label.clone()));
        Ok(label)
    }

    /// Flips the stored status and refreshes the label on success.
    ///
    /// A refusal (Admin) returns `Ok(false)` and leaves the published state alone.
    pub async fn toggle_subscription(&self) -> Result<bool> {
        debug!("toggle_subscription: command received");
        let current = self
            .store
            .get()
            .await
            .context("failed to read user before toggling")?;
        let new_status = current.status.toggled();
        debug!(
            from = %current.status,
            to = %new_status,
            upgrading = new_status.is_premium(),
            "toggle_subscription: target decided"
        );

        let changed = self.toggler.change_subscription(new_status).await?;
        if changed {
            self.fetch_user().await?;
        } else {
            info!(name = %current.name, "subscription change refused; label unchanged");
        }
        Ok(changed)
    }

    fn publish(&self, next: ControllerState) {
        debug!(state = ?next, "publishing controller state");
        self.state.send_replace(next);
    }
}

impl<S: UserStore + 'static> UserController<S> {
    pub fn spawn_fetch_user(self: &Arc<Self>) -> JoinHandle<Result<String>> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.fetch_user().await })
    }

    pub fn spawn_toggle_subscription(self: &Arc<Self>) -> JoinHandle<Result<bool>> {
        let controller = Arc::clone(self);
        tokio::spawn(async move { controller.toggle_subscription().await })
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
