// ============================================================================
// Message Routes
// ============================================================================
//
// Endpoints:
// - POST /api/v1/send - Produce one message to the configured topic
//
// ============================================================================

use anyway_error::{AppError, AppResult};
use axum::{body::Bytes, extract::State, http::StatusCode};
use base64::{Engine, engine::general_purpose::STANDARD as BASE64};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::context::AppContext;
use crate::message::Message;
use crate::metadata::RequestContext;
use crate::metrics::HTTP_SEND_REQUESTS_TOTAL;

/// JSON body accepted by the send endpoint
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub headers: Option<HashMap<String, String>>,
    /// Base64 payload; plain strings that are not valid base64 are sent as UTF-8
    pub content: String,
}

impl SendMessageRequest {
    pub fn into_message(self) -> Message {
        Message::new(
            self.key,
            self.headers.unwrap_or_default(),
            decode_content(self.content),
        )
    }
}

pub(crate) fn decode_content(content: String) -> Bytes {
    match BASE64.decode(content.as_bytes()) {
        Ok(decoded) => Bytes::from(decoded),
        Err(_) => Bytes::from(content.into_bytes()),
    }
}

/// POST /api/v1/send
///
/// 200 with an empty body on success, 400 for an undecodable body,
/// 500 when the broker rejects the message.
pub async fn send_message(
    State(app_context): State<Arc<AppContext>>,
    request_ctx: RequestContext,
    body: Bytes,
) -> AppResult<StatusCode> {
    let request: SendMessageRequest = serde_json::from_slice(&body).map_err(|e| {
        HTTP_SEND_REQUESTS_TOTAL.with_label_values(&["invalid"]).inc();
        AppError::invalid_request(e.to_string())
    })?;
    let message = request.into_message();

    tracing::debug!(
        key = message.key().unwrap_or_default(),
        bytes = message.content().len(),
        "Send request accepted"
    );

    if let Err(e) = app_context.messaging.send(&request_ctx, &message).await {
        HTTP_SEND_REQUESTS_TOTAL.with_label_values(&["failed"]).inc();
        return Err(AppError::delivery(e));
    }

    HTTP_SEND_REQUESTS_TOTAL.with_label_values(&["ok"]).inc();
    Ok(StatusCode::OK)
}
