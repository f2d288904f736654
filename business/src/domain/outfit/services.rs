use async_trait::async_trait;

use crate::domain::shared::value_objects::EncodedImage;

use super::errors::OutfitError;
use super::model::SuggestionResult;

/// Service port for generating outfit suggestions from uploaded garment
/// images.
///
/// Implementations issue exactly one structured-generation call per
/// invocation and validate the response against the [`SuggestionResult`]
/// contract; anything that cannot be validated is a
/// [`OutfitError::GenerationFailed`].
#[async_trait]
pub trait OutfitSuggesterService: Send + Sync {
    async fn suggest<'a>(
        &self,
        input_images: &'a [EncodedImage],
        occasion: Option<&'a str>,
        style_preference: Option<&'a str>,
    ) -> Result<SuggestionResult, OutfitError>;
}
