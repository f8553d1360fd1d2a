use chrono::{DateTime, Local};

use crate::controller::TrackingSession;
use crate::fix::LatestFix;

/// Snapshot of everything the screen shows. Always derived from the session
/// and the latest fix, never stored or patched in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub start_enabled: bool,
    pub stop_enabled: bool,
    /// `None` until the first fix arrives; a stopped session keeps showing
    /// the last value.
    pub coordinate_text: Option<String>,
    pub last_update_text: Option<String>,
}

impl ViewState {
    pub fn derive(session: &TrackingSession, latest_fix: &Option<LatestFix>) -> Self {
        let active = session.active();
        ViewState {
            start_enabled: !active,
            stop_enabled: active,
            coordinate_text: latest_fix.as_ref().map(format_coordinate),
            last_update_text: latest_fix.as_ref().map(format_observed_at),
        }
    }
}

pub fn format_coordinate(fix: &LatestFix) -> String {
    format!("{} / {}", fix.latitude, fix.longitude)
}

/// Local time-of-day of the moment the fix reached us.
pub fn format_observed_at(fix: &LatestFix) -> String {
    match DateTime::from_timestamp_millis(fix.observed_at_ms) {
        None => String::new(),
        Some(utc) => utc.with_timezone(&Local).format("%H:%M:%S").to_string(),
    }
}
