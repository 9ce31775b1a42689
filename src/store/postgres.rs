use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{
    db,
    relay::{Color, LatestColor},
    store::Store,
};

#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn upsert_latest_color(&self, color: Color, at: DateTime<Utc>) -> Result<()> {
        db::upsert_latest_color(&self.pool, color, at).await
    }

    async fn latest_color(&self) -> Result<Option<LatestColor>> {
        db::get_latest_color(&self.pool).await
    }

    async fn request_scan(&self, at: DateTime<Utc>) -> Result<()> {
        db::request_scan(&self.pool, at).await
    }

    async fn take_scan_request(&self, at: DateTime<Utc>) -> Result<bool> {
        db::take_scan_request(&self.pool, at).await
    }
}
