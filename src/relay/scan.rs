use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanControl {
    pub scan_requested: bool,

    pub updated_at: DateTime<Utc>,
}
