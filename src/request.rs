use strum_macros::Display;

pub const UPDATE_INTERVAL_MS: i64 = 10_000;
pub const MIN_UPDATE_INTERVAL_MS: i64 = 3_000;

/// How aggressively the location source should work for a fix. Mirrors the
/// priority levels exposed by the platform location services.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum AccuracyPriority {
    HighAccuracy,
    BalancedPowerAccuracy,
    LowPower,
    Passive,
}

/// Parameters for a location-update subscription. Built once when the
/// controller is constructed and passed unchanged to the location source on
/// every (re-)arm.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateRequestSpec {
    pub interval_ms: i64,
    pub min_interval_ms: i64,
    pub priority: AccuracyPriority,
}

impl UpdateRequestSpec {
    pub fn new() -> Self {
        UpdateRequestSpec {
            interval_ms: UPDATE_INTERVAL_MS,
            min_interval_ms: MIN_UPDATE_INTERVAL_MS,
            priority: AccuracyPriority::HighAccuracy,
        }
    }
}
