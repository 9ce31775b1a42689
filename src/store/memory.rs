use std::sync::Mutex;

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::{
    relay::{Color, LatestColor, ScanControl},
    store::Store,
};

#[derive(Debug, Default)]
struct Records {
    latest_color: Option<LatestColor>,
    scan_control: Option<ScanControl>,
}

/// In-process store. State lives as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Records>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Records>> {
        self.records
            .lock()
            .map_err(|_| anyhow!("memory store lock poisoned"))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn upsert_latest_color(&self, color: Color, at: DateTime<Utc>) -> Result<()> {
        self.lock()?.latest_color = Some(LatestColor {
            color,
            updated_at: at,
        });

        Ok(())
    }

    async fn latest_color(&self) -> Result<Option<LatestColor>> {
        Ok(self.lock()?.latest_color)
    }

    async fn request_scan(&self, at: DateTime<Utc>) -> Result<()> {
        self.lock()?.scan_control = Some(ScanControl {
            scan_requested: true,
            updated_at: at,
        });

        Ok(())
    }

    async fn take_scan_request(&self, at: DateTime<Utc>) -> Result<bool> {
        let mut records = self.lock()?;

        let Some(scan_control) = records.scan_control.as_mut() else {
            return Ok(false);
        };

        if !scan_control.scan_requested {
            return Ok(false);
        }

        scan_control.scan_requested = false;
        scan_control.updated_at = at;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn latest_color_is_replaced_in_place() {
        let store = MemoryStore::new();
        assert_eq!(store.latest_color().await.unwrap(), None);

        let first = Utc::now();
        store
            .upsert_latest_color(Color::new(10, 20, 30), first)
            .await
            .unwrap();
        store
            .upsert_latest_color(Color::new(40, 50, 60), first)
            .await
            .unwrap();

        let latest = store.latest_color().await.unwrap().unwrap();
        assert_eq!(latest.color, Color::new(40, 50, 60));
        assert_eq!(latest.updated_at, first);
    }

    #[tokio::test]
    async fn scan_request_is_taken_once() {
        let store = MemoryStore::new();
        assert!(!store.take_scan_request(Utc::now()).await.unwrap());

        store.request_scan(Utc::now()).await.unwrap();
        assert!(store.take_scan_request(Utc::now()).await.unwrap());
        assert!(!store.take_scan_request(Utc::now()).await.unwrap());
    }

    #[tokio::test]
    async fn repeated_requests_collapse_into_one() {
        let store = MemoryStore::new();

        store.request_scan(Utc::now()).await.unwrap();
        store.request_scan(Utc::now()).await.unwrap();

        assert!(store.take_scan_request(Utc::now()).await.unwrap());
        assert!(!store.take_scan_request(Utc::now()).await.unwrap());
    }
}
