use shared::domain::{SubscriptionStatus, User};

pub const ADMIN_GLYPH: &str = "👑";
pub const PREMIUM_GLYPH: &str = "⭐️";

/// Maps a user record to the label shown to the user. Admin wins over status.
pub fn format_display_name(user: &User) -> String {
    if user.is_admin() {
        return format!("{ADMIN_GLYPH} {}", user.name);
    }

    match user.status {
        SubscriptionStatus::Premium => format!("{PREMIUM_GLYPH} {}", user.name),
        SubscriptionStatus::Free => user.name.clone(),
    }
}
