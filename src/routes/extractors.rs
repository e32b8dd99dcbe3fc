// ============================================================================
// Axum Extractors
// ============================================================================
//
// - RequestContext: correlation / routing / request ids from the inbound
//   headers, plus the configured per-request deadline
//
// ============================================================================

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use crate::context::AppContext;
use crate::metadata::{
    CORRELATION_ID_HEADER, REQUEST_ID_HEADER, ROUTING_ID_HEADER, RequestContext, RequestMetadata,
};

/// Header value as a string; absent, empty or non UTF-8 values count as missing
fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

pub fn metadata_from_headers(headers: &HeaderMap) -> RequestMetadata {
    RequestMetadata {
        correlation_id: header_value(headers, CORRELATION_ID_HEADER),
        routing_id: header_value(headers, ROUTING_ID_HEADER),
        request_id: header_value(headers, REQUEST_ID_HEADER),
    }
}

impl FromRequestParts<Arc<AppContext>> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppContext>,
    ) -> Result<Self, Self::Rejection> {
        let ctx = RequestContext::new(metadata_from_headers(&parts.headers));

        Ok(match state.config.request_timeout_ms {
            0 => ctx,
            ms => ctx.with_timeout(Duration::from_millis(ms)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_metadata_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Correlation-Id", HeaderValue::from_static("abc"));
        headers.insert("X-Routing-Id", HeaderValue::from_static(""));
        headers.insert(
            "X-Request-Id",
            HeaderValue::from_bytes(b"\xffreq").unwrap(),
        );

        let metadata = metadata_from_headers(&headers);

        assert_eq!(metadata.correlation_id.as_deref(), Some("abc"));
        assert_eq!(metadata.routing_id, None);
        assert_eq!(metadata.request_id, None);
    }

    #[test]
    fn test_header_values_are_not_trimmed() {
        let mut headers = HeaderMap::new();
        headers.insert("X-Correlation-Id", HeaderValue::from_static(" abc "));

        let metadata = metadata_from_headers(&headers);

        assert_eq!(metadata.correlation_id.as_deref(), Some(" abc "));
    }
}
