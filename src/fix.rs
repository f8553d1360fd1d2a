/// A single position reading reported by the location source.
#[derive(Clone, Debug, PartialEq)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
}

/// The most recent fix, stamped with the wall-clock time we received it.
/// Note this is the receipt time, not the time the device measured the
/// position; the screen shows when the value it displays arrived.
#[derive(Clone, Debug, PartialEq)]
pub struct LatestFix {
    pub latitude: f64,
    pub longitude: f64,
    pub observed_at_ms: i64,
}

impl LatestFix {
    pub fn from_fix(fix: &Fix, received_timestamp_ms: i64) -> Self {
        LatestFix {
            latitude: fix.latitude,
            longitude: fix.longitude,
            observed_at_ms: received_timestamp_ms,
        }
    }
}
