//! Screen implementations. Each screen is a top-level Component.

mod activity;
mod dashboard;

pub use activity::ActivityScreen;
pub use dashboard::DashboardScreen;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create both screens in tab-bar order.
pub fn create_screens() -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (ScreenId::Dashboard, Box::new(DashboardScreen::new())),
        (ScreenId::Activity, Box::new(ActivityScreen::new())),
    ]
}
