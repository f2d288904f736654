use poem::http::StatusCode;
use poem_openapi::payload::Json;

use business::domain::outfit::errors::OutfitError;
use business::domain::resolution::errors::ResolutionError;

use crate::api::error::{ErrorResponse, IntoErrorResponse};

impl IntoErrorResponse for OutfitError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            OutfitError::NoInputImages => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "ValidationError",
                "outfit.no_input_images",
            ),
            OutfitError::GenerationFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "GenerationError",
                "outfit.generation_failed",
            ),
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message: message.to_string(),
            }),
        )
    }
}

impl IntoErrorResponse for ResolutionError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        let (status, name, message) = match &self {
            ResolutionError::SessionNotFound => (
                StatusCode::NOT_FOUND,
                "NotFoundError",
                "resolution.session_not_found",
            ),
            ResolutionError::ItemNotFound => (
                StatusCode::NOT_FOUND,
                "NotFoundError",
                "resolution.item_not_found",
            ),
            ResolutionError::SynthesisFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "GenerationError",
                "resolution.synthesis_failed",
            ),
        };

        (
            status,
            Json(ErrorResponse {
                name: name.to_string(),
                message: message.to_string(),
            }),
        )
    }
}
