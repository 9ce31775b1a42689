//! Key-value state behind the relay endpoint.
//!
//! The relay only ever touches two records, `latest_color` and
//! `scan_control`. Each is upserted in place and never deleted.

mod memory;
mod postgres;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub use memory::MemoryStore;
pub use postgres::PgStore;

use crate::relay::{Color, LatestColor};

#[async_trait]
pub trait Store: Send + Sync {
    async fn upsert_latest_color(&self, color: Color, at: DateTime<Utc>) -> Result<()>;

    async fn latest_color(&self) -> Result<Option<LatestColor>>;

    async fn request_scan(&self, at: DateTime<Utc>) -> Result<()>;

    /// Atomically reads and clears the scan flag. A pending request is
    /// reported to exactly one caller.
    async fn take_scan_request(&self, at: DateTime<Utc>) -> Result<bool>;
}
