use std::time::Duration;

use crate::presentation::PopupStyle;

pub const DEFAULT_ZOOM: f64 = 13.;
pub const POPUP_MAX_WIDTH: f64 = 250.;
pub const POPUP_MIN_WIDTH: f64 = 100.;
/// How long the hidden form stays out of layout.
pub const FORM_TRANSITION_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub zoom: f64,
    pub popup: PopupStyle,
    pub form_transition: Duration,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom: DEFAULT_ZOOM,
            popup: PopupStyle::default(),
            form_transition: Duration::from_millis(FORM_TRANSITION_MS),
        }
    }
}

impl Default for PopupStyle {
    fn default() -> Self {
        Self {
            max_width: POPUP_MAX_WIDTH,
            min_width: POPUP_MIN_WIDTH,
            auto_close: false,
            close_on_click: false,
        }
    }
}
