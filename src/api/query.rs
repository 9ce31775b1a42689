use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};

use crate::{
    api::{AppError, AppState},
    relay::{Client, Color},
};

pub async fn query_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let client = Client::from_query(params.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    debug!(client = client.as_str(), "poll");

    match client {
        Client::Device => {
            let scan_requested = state.store.take_scan_request(Utc::now()).await?;
            if scan_requested {
                info!("scan request delivered to device");
            }

            Ok(Json(json!({ "scan_requested": scan_requested })).into_response())
        }
        Client::Frontend => {
            let color = state
                .store
                .latest_color()
                .await?
                .map(|latest| latest.color)
                .unwrap_or(Color::NEUTRAL);

            Ok(Json(color).into_response())
        }
    }
}
