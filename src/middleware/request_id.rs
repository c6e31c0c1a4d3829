use reqwest::{header::HeaderValue, RequestBuilder};
use uuid::Uuid;

/// HTTP header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation id attached to every outbound backend call
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestId(pub Uuid);

impl RequestId {
    /// Creates a new random request ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the UUID as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Generates a request ID and adds it to the outgoing request headers.
pub fn tag_request(builder: RequestBuilder) -> (RequestBuilder, RequestId) {
    let request_id = RequestId::new();

    let builder = match HeaderValue::from_str(&request_id.as_str()) {
        Ok(value) => builder.header(REQUEST_ID_HEADER, value),
        Err(_) => builder,
    };

    (builder, request_id)
}

/// Helper function to create a tracing span with request ID
pub fn make_span(method: &str, path: &str, request_id: &RequestId) -> tracing::Span {
    tracing::info_span!(
        "backend_request",
        method = %method,
        path = %path,
        request_id = %request_id,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_ids_are_unique() {
        assert_ne!(RequestId::new(), RequestId::new());
    }

    #[test]
    fn test_tag_request_sets_header() {
        let client = reqwest::Client::new();
        let (builder, request_id) = tag_request(client.get("http://localhost/health"));
        let request = builder.build().unwrap();

        let header = request.headers().get(REQUEST_ID_HEADER).unwrap();
        assert_eq!(header.to_str().unwrap(), request_id.as_str());
    }
}
