use axum::{Json, body::Bytes, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;
use serde_json::{Value, json};
use tracing::info;

use crate::{
    api::{AppError, AppState},
    relay::Color,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestCommand {
    RequestScan,
    RecordColor(Color),
}

/// Body is parsed regardless of `Content-Type`; the sensor firmware does not
/// always send one.
pub async fn ingest_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let now = Utc::now();

    match parse_ingest(&body)? {
        IngestCommand::RequestScan => {
            state.store.request_scan(now).await?;
            info!("scan requested");

            Ok((
                StatusCode::OK,
                Json(json!({ "message": "Scan requested successfully" })),
            ))
        }
        IngestCommand::RecordColor(color) => {
            state.store.upsert_latest_color(color, now).await?;
            info!(
                red = color.red,
                green = color.green,
                blue = color.blue,
                "color saved"
            );

            Ok((
                StatusCode::CREATED,
                Json(json!({ "message": "Data saved successfully" })),
            ))
        }
    }
}

pub fn parse_ingest(body: &[u8]) -> Result<IngestCommand, AppError> {
    let body: Value = serde_json::from_slice(body)
        .map_err(|e| AppError::MalformedPayload(format!("invalid JSON body: {e}")))?;

    let Value::Object(fields) = body else {
        return Err(AppError::MalformedPayload(
            "body must be a JSON object".to_string(),
        ));
    };

    if let Some(Value::Bool(true)) = fields.get("scan") {
        return Ok(IngestCommand::RequestScan);
    }

    let red = parse_channel("red", fields.get("red"))?;
    let green = parse_channel("green", fields.get("green"))?;
    let blue = parse_channel("blue", fields.get("blue"))?;

    Ok(IngestCommand::RecordColor(Color::new(red, green, blue)))
}

fn parse_channel(name: &str, v: Option<&Value>) -> Result<u8, AppError> {
    let Some(v) = v else {
        return Err(AppError::MalformedPayload(format!("missing field: {name}")));
    };

    v.as_u64()
        .and_then(|n| u8::try_from(n).ok())
        .ok_or_else(|| {
            AppError::MalformedPayload(format!(
                "{name} out of range: expected an integer 0-255, got {v}"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> Result<IngestCommand, AppError> {
        parse_ingest(body.as_bytes())
    }

    #[test]
    fn scan_true_requests_scan() {
        assert_eq!(parse(r#"{"scan": true}"#).unwrap(), IngestCommand::RequestScan);
    }

    #[test]
    fn scan_wins_over_color() {
        let command = parse(r#"{"scan": true, "red": 1, "green": 2, "blue": 3}"#).unwrap();
        assert_eq!(command, IngestCommand::RequestScan);
    }

    #[test]
    fn scan_must_be_boolean_true() {
        let command = parse(r#"{"scan": "true", "red": 1, "green": 2, "blue": 3}"#).unwrap();
        assert_eq!(command, IngestCommand::RecordColor(Color::new(1, 2, 3)));

        assert!(matches!(
            parse(r#"{"scan": false}"#),
            Err(AppError::MalformedPayload(_))
        ));
    }

    #[test]
    fn full_color_is_recorded() {
        let command = parse(r#"{"red": 0, "green": 128, "blue": 255}"#).unwrap();
        assert_eq!(command, IngestCommand::RecordColor(Color::new(0, 128, 255)));
    }

    #[test]
    fn missing_channel_is_rejected() {
        let Err(AppError::MalformedPayload(message)) = parse(r#"{"red": 1, "green": 2}"#) else {
            panic!("expected malformed payload");
        };
        assert_eq!(message, "missing field: blue");
    }

    #[test]
    fn out_of_range_channels_are_rejected() {
        for body in [
            r#"{"red": 256, "green": 0, "blue": 0}"#,
            r#"{"red": -1, "green": 0, "blue": 0}"#,
            r#"{"red": 1.5, "green": 0, "blue": 0}"#,
            r#"{"red": "12", "green": 0, "blue": 0}"#,
        ] {
            assert!(
                matches!(parse(body), Err(AppError::MalformedPayload(_))),
                "{body}"
            );
        }
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        for body in ["", "null", "[1, 2, 3]", "[null, 1, 2, 3]", "42", "not json"] {
            assert!(
                matches!(parse(body), Err(AppError::MalformedPayload(_))),
                "{body}"
            );
        }
    }
}
