use poem::http::StatusCode;
use poem_openapi::{Object, payload::Json};

/// Error payload shared by every endpoint: an error class name plus a
/// code-style message suitable for i18n lookup.
#[derive(Object, Debug)]
pub struct ErrorResponse {
    pub name: String,
    pub message: String,
}

pub trait IntoErrorResponse {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>);
}
