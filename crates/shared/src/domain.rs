use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ProfileError;

/// Name that the Admin rule matches, compared case-insensitively.
pub const ADMIN_NAME: &str = "Admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Free,
    Premium,
}

impl SubscriptionStatus {
    pub fn is_premium(self) -> bool {
        matches!(self, Self::Premium)
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Free => Self::Premium,
            Self::Premium => Self::Free,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Premium => "PREMIUM",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionStatus {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "premium" => Ok(Self::Premium),
            _ => Err(ProfileError::InvalidStatus(s.to_string())),
        }
    }
}

/// Immutable user record. Status changes produce a new value via [`User::with_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub status: SubscriptionStatus,
}

impl User {
    pub fn new(name: impl Into<String>, status: SubscriptionStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }

    /// Record every fresh store starts from.
    pub fn default_seed() -> Self {
        Self::new("John Doe", SubscriptionStatus::Premium)
    }

    pub fn is_admin(&self) -> bool {
        eq_ignore_case(&self.name, ADMIN_NAME)
    }

    pub fn with_status(&self, status: SubscriptionStatus) -> Self {
        Self {
            name: self.name.clone(),
            status,
        }
    }
}

/// Case-insensitive comparison that folds each character through both its
/// upper- and lowercase forms, so `ı`/`I` and `İ`/`i` compare equal.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| chars_eq_ignore_case(x, y))
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    let (upper_a, upper_b) = (simple_upper(a), simple_upper(b));
    upper_a == upper_b || simple_lower(upper_a) == simple_lower(upper_b)
}

// Single-char mappings only; expansions such as `ß` -> "SS" keep the original.
fn simple_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

// `İ` is the only character whose lowercase expands; its simple mapping is the leading `i`.
fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "User(name={}, status={})", self.name, self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggled_flips_between_free_and_premium() {
        assert_eq!(SubscriptionStatus::Free.toggled(), SubscriptionStatus::Premium);
        assert_eq!(SubscriptionStatus::Premium.toggled(), SubscriptionStatus::Free);
    }

    #[test]
    fn parses_status_case_insensitively() {
        assert_eq!(
            "PREMIUM".parse::<SubscriptionStatus>().expect("premium"),
            SubscriptionStatus::Premium
        );
        assert_eq!(
            " free ".parse::<SubscriptionStatus>().expect("free"),
            SubscriptionStatus::Free
        );
    }

    #[test]
    fn rejects_unknown_status() {
        let err = "gold".parse::<SubscriptionStatus>().unwrap_err();
        assert!(matches!(err, ProfileError::InvalidStatus(ref raw) if raw == "gold"));
    }

    #[test]
    fn admin_check_ignores_case() {
        for name in ["Admin", "admin", "ADMIN", "aDmIn"] {
            assert!(User::new(name, SubscriptionStatus::Free).is_admin(), "{name}");
        }
        assert!(!User::new("Administrator", SubscriptionStatus::Free).is_admin());
        assert!(!User::new("Admi", SubscriptionStatus::Free).is_admin());
        assert!(!User::default_seed().is_admin());
    }

    #[test]
    fn admin_check_folds_non_ascii_case_variants() {
        for name in ["admın", "ADMİN", "Admın", "admİn"] {
            assert!(User::new(name, SubscriptionStatus::Free).is_admin(), "{name}");
        }
        assert!(!User::new("Admün", SubscriptionStatus::Free).is_admin());
    }

    #[test]
    fn eq_ignore_case_handles_expanding_mappings() {
        assert!(!eq_ignore_case("straße", "STRASSE"));
        assert!(eq_ignore_case("ǅ", "ǆ"));
        assert!(eq_ignore_case("", ""));
    }

    #[test]
    fn is_premium_matches_status() {
        assert!(SubscriptionStatus::Premium.is_premium());
        assert!(!SubscriptionStatus::Free.is_premium());
        assert!(!SubscriptionStatus::Premium.toggled().is_premium());
    }

    #[test]
    fn with_status_keeps_name_and_leaves_original_untouched() {
        let original = User::new("Jane", SubscriptionStatus::Free);
        let updated = original.with_status(SubscriptionStatus::Premium);
        assert_eq!(updated, User::new("Jane", SubscriptionStatus::Premium));
        assert_eq!(original.status, SubscriptionStatus::Free);
    }

    #[test]
    fn serializes_status_as_snake_case() {
        let json = serde_json::to_string(&User::default_seed()).expect("json");
        assert_eq!(json, r#"{"name":"John Doe","status":"premium"}"#);
    }

    #[test]
    fn display_shows_name_and_status() {
        assert_eq!(
            User::default_seed().to_string(),
            "User(name=John Doe, status=PREMIUM)"
        );
    }
}
