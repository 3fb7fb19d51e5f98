use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("invalid subscription status '{0}': expected 'free' or 'premium'")]
    InvalidStatus(String),
    #[error("invalid setting {key}: {message}")]
    InvalidSetting { key: &'static str, message: String },
}

impl ProfileError {
    pub fn invalid_setting(key: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            key,
            message: message.into(),
        }
    }
}
