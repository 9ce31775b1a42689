use anyhow::{Context as _, Result};
use chrono::{DateTime, Utc};
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::relay::{Color, LATEST_COLOR_KEY, LatestColor, SCAN_CONTROL_KEY};

pub async fn new_pool(database_url: &str, max_connections: u32) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .context("failed to open connection pool")
}

pub async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!()
        .run(pool)
        .await
        .context("failed to run migrations")
}

pub async fn upsert_latest_color(pool: &PgPool, color: Color, at: DateTime<Utc>) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO latest_color (key, red, green, blue, updated_at)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (key) DO UPDATE
        SET red = EXCLUDED.red, green = EXCLUDED.green, blue = EXCLUDED.blue, updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(LATEST_COLOR_KEY)
    .bind(i16::from(color.red))
    .bind(i16::from(color.green))
    .bind(i16::from(color.blue))
    .bind(at)
    .execute(pool)
    .await
    .context("failed to execute latest color upsert")?;

    Ok(())
}

pub async fn get_latest_color(pool: &PgPool) -> Result<Option<LatestColor>> {
    let row: Option<(i16, i16, i16, DateTime<Utc>)> = sqlx::query_as(
        r#"
        SELECT red, green, blue, updated_at FROM latest_color WHERE key = $1
        "#,
    )
    .bind(LATEST_COLOR_KEY)
    .fetch_optional(pool)
    .await
    .context("failed to execute latest color query")?;

    let Some((red, green, blue, updated_at)) = row else {
        return Ok(None);
    };

    let color = Color::new(
        decode_channel(red).context("failed to decode red")?,
        decode_channel(green).context("failed to decode green")?,
        decode_channel(blue).context("failed to decode blue")?,
    );

    Ok(Some(LatestColor { color, updated_at }))
}

pub async fn request_scan(pool: &PgPool, at: DateTime<Utc>) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO scan_control (key, scan_requested, updated_at)
        VALUES ($1, TRUE, $2)
        ON CONFLICT (key) DO UPDATE
        SET scan_requested = TRUE, updated_at = EXCLUDED.updated_at
        "#,
    )
    .bind(SCAN_CONTROL_KEY)
    .bind(at)
    .execute(pool)
    .await
    .context("failed to execute scan request upsert")?;

    Ok(())
}

/// Clears a pending scan request in a single statement, so concurrent polls
/// cannot both observe it. Returns whether a request was pending.
pub async fn take_scan_request(pool: &PgPool, at: DateTime<Utc>) -> Result<bool> {
    let cleared: Option<(String,)> = sqlx::query_as(
        r#"
        UPDATE scan_control
        SET scan_requested = FALSE, updated_at = $2
        WHERE key = $1 AND scan_requested
        RETURNING key
        "#,
    )
    .bind(SCAN_CONTROL_KEY)
    .bind(at)
    .fetch_optional(pool)
    .await
    .context("failed to execute scan request clear")?;

    Ok(cleared.is_some())
}

fn decode_channel(v: i16) -> Result<u8> {
    u8::try_from(v).with_context(|| format!("channel out of range: expected 0-255, got {v}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_byte_channels() {
        assert_eq!(decode_channel(0).unwrap(), 0);
        assert_eq!(decode_channel(255).unwrap(), 255);
    }

    #[test]
    fn rejects_out_of_range_channels() {
        assert!(decode_channel(-1).is_err());
        assert!(decode_channel(256).is_err());
    }
}
