use std::{collections::HashMap, fs, path::Path, time::Duration};

use clap::Args;
use shared::{
    domain::{SubscriptionStatus, User},
    error::ProfileError,
};
use tracing::warn;

pub const CONFIG_FILE: &str = "profile.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub seed_name: String,
    pub seed_status: SubscriptionStatus,
    pub latency_ms: u64,
    pub toggles: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let seed = User::default_seed();
        Self {
            seed_name: seed.name,
            seed_status: seed.status,
            latency_ms: 500,
            toggles: 2,
        }
    }
}

/// Command-line values that win over every other layer.
#[derive(Debug, Clone, Default, Args)]
pub struct Overrides {
    /// Name of the seeded user.
    #[arg(long)]
    pub name: Option<String>,
    /// Subscription status of the seeded user (free or premium).
    #[arg(long)]
    pub status: Option<SubscriptionStatus>,
    /// Simulated store latency in milliseconds.
    #[arg(long)]
    pub latency_ms: Option<u64>,
    /// Number of toggle commands to run after the first fetch.
    #[arg(long)]
    pub toggles: Option<u32>,
}

impl Settings {
    pub fn seed_user(&self) -> User {
        User::new(self.seed_name.clone(), self.seed_status)
    }

    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(v) = &overrides.name {
            self.seed_name = v.clone();
        }
        if let Some(v) = overrides.status {
            self.seed_status = v;
        }
        if let Some(v) = overrides.latency_ms {
            self.latency_ms = v;
        }
        if let Some(v) = overrides.toggles {
            self.toggles = v;
        }
        self
    }

    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.seed_name.trim().is_empty() {
            return Err(ProfileError::invalid_setting(
                "seed_name",
                "must not be empty",
            ));
        }
        Ok(())
    }

    fn apply(&mut self, key: &'static str, raw: &str) {
        let result = match key {
            "seed_name" => {
                self.seed_name = raw.to_string();
                Ok(())
            }
            "seed_status" => raw.parse::<SubscriptionStatus>().map(|v| self.seed_status = v),
            "latency_ms" => raw
                .trim()
                .parse::<u64>()
                .map(|v| self.latency_ms = v)
                .map_err(|e| ProfileError::invalid_setting(key, format!("{e}"))),
            "toggles" => raw
                .trim()
                .parse::<u32>()
                .map(|v| self.toggles = v)
                .map_err(|e| ProfileError::invalid_setting(key, format!("{e}"))),
            _ => Ok(()),
        };

        if let Err(err) = result {
            warn!(key, value = raw, error = %err, "ignoring unparsable setting");
        }
    }
}

const KEYS: [(&str, &str); 4] = [
    ("seed_name", "APP__SEED_NAME"),
    ("seed_status", "APP__SEED_STATUS"),
    ("latency_ms", "APP__LATENCY_MS"),
    ("toggles", "APP__TOGGLES"),
];

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(CONFIG_FILE), |name| std::env::var(name).ok())
}

/// Defaults, then the TOML file, then environment variables.
pub fn load_settings_from(
    config_path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        match toml::from_str::<HashMap<String, toml::Value>>(&raw) {
            Ok(file_cfg) => {
                for (key, _) in KEYS {
                    if let Some(v) = file_cfg.get(key) {
                        settings.apply(key, &toml_value_to_string(v));
                    }
                }
            }
            Err(err) => {
                warn!(path = %config_path.display(), error = %err, "ignoring malformed config file");
            }
        }
    }

    for (key, env_name) in KEYS {
        if let Some(v) = env(env_name) {
            settings.apply(key, &v);
        }
    }

    settings
}

fn toml_value_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
