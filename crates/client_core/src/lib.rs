//! Display formatting, the subscription toggle rule, and the controller that
//! publishes the formatted label.

pub mod controller;
pub mod formatter;
pub mod toggler;

pub use controller::{ControllerState, UserController, FETCHING_LABEL, IDLE_LABEL};
pub use formatter::{format_display_name, ADMIN_GLYPH, PREMIUM_GLYPH};
pub use toggler::SubscriptionToggler;

#[cfg(test)]
#[path = "tests/test_support.rs"]
mod test_support;
