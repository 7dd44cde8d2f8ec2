use serde::Serialize;
use thiserror::Error;

/// Structured HTTP error carried as a value.
///
/// Controllers return or resolve to an `HttpError` to signal a client or
/// server error without raising: the reply normalizer maps it onto the wire
/// status line and emits `{code, message}` as the body.
///
/// # Example
/// ```
/// use portico::HttpError;
///
/// let err = HttpError::not_found();
/// assert_eq!(err.code, 404);
/// assert_eq!(err.message, "Not found");
///
/// let err = HttpError::bad_request().with_message("missing id");
/// assert_eq!(err.code, 400);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct HttpError {
    pub code: u16,
    pub message: String,
}

impl HttpError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// 400 with the canonical message.
    pub fn bad_request() -> Self {
        Self::new(400, "Bad request")
    }

    /// 404 with the canonical message.
    pub fn not_found() -> Self {
        Self::new(404, "Not found")
    }

    /// 500 with the canonical message.
    pub fn internal_error() -> Self {
        Self::new(500, "Internal error")
    }

    /// Replace the canonical message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factories_carry_canonical_defaults() {
        assert_eq!(HttpError::bad_request(), HttpError::new(400, "Bad request"));
        assert_eq!(HttpError::not_found(), HttpError::new(404, "Not found"));
        assert_eq!(
            HttpError::internal_error(),
            HttpError::new(500, "Internal error")
        );
    }

    #[test]
    fn with_message_overrides_default() {
        let err = HttpError::not_found().with_message("no such user");
        assert_eq!(err.code, 404);
        assert_eq!(err.message, "no such user");
    }

    #[test]
    fn displays_as_message() {
        assert_eq!(HttpError::bad_request().to_string(), "Bad request");
    }
}
