use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use serde::Serialize;
use serde_json::{Value, json};

use crate::exception::HttpError;

/// Value produced by a controller method, before wire normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplyValue {
    /// Plain body, emitted with the server's default status handling.
    Body(Value),
    /// Structured error, mapped onto the wire status line.
    Error(HttpError),
}

impl ReplyValue {
    /// Serialize any value into a body reply.
    pub fn json<T: Serialize>(value: T) -> serde_json::Result<Self> {
        Ok(Self::Body(serde_json::to_value(value)?))
    }
}

impl From<Value> for ReplyValue {
    fn from(value: Value) -> Self {
        Self::Body(value)
    }
}

impl From<HttpError> for ReplyValue {
    fn from(error: HttpError) -> Self {
        Self::Error(error)
    }
}

/// A normalized wire reply.
///
/// `status_message` is kept on the struct rather than as an HTTP reason
/// phrase (HTTP/2 has none); for error replies the same message travels in
/// the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct WireReply {
    pub status: StatusCode,
    pub status_message: Option<String>,
    pub body: Option<Value>,
}

impl WireReply {
    /// 204 with an empty body, the reply for an explicit no-value outcome.
    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            status_message: None,
            body: None,
        }
    }
}

impl IntoResponse for WireReply {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(body)).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// Normalize a handler's return value into a wire reply.
///
/// A structured [`HttpError`] becomes its own status code and message with a
/// `{code, message}` body; any other value becomes the body directly with
/// default status handling. This is the single chokepoint turning in-process
/// errors into wire-visible HTTP errors.
pub fn send(value: ReplyValue) -> WireReply {
    match value {
        ReplyValue::Error(error) => {
            let status = StatusCode::from_u16(error.code)
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            WireReply {
                status,
                status_message: Some(error.message.clone()),
                body: Some(json!({ "code": error.code, "message": error.message })),
            }
        }
        ReplyValue::Body(body) => WireReply {
            status: StatusCode::OK,
            status_message: None,
            body: Some(body),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_error_sets_status_line_and_body() {
        let reply = send(ReplyValue::Error(HttpError::new(404, "X")));
        assert_eq!(reply.status, StatusCode::NOT_FOUND);
        assert_eq!(reply.status_message.as_deref(), Some("X"));
        assert_eq!(reply.body, Some(json!({ "code": 404, "message": "X" })));
    }

    #[test]
    fn plain_value_becomes_body_with_default_status() {
        let reply = send(ReplyValue::Body(json!({ "id": 1 })));
        assert_eq!(reply.status, StatusCode::OK);
        assert_eq!(reply.status_message, None);
        assert_eq!(reply.body, Some(json!({ "id": 1 })));
    }

    #[test]
    fn out_of_range_code_falls_back_to_500() {
        let reply = send(ReplyValue::Error(HttpError::new(9999, "weird")));
        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn no_content_reply_is_empty_204() {
        let reply = WireReply::no_content();
        assert_eq!(reply.status, StatusCode::NO_CONTENT);
        assert!(reply.body.is_none());
    }
}
