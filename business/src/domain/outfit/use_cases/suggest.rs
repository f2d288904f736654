use async_trait::async_trait;

use crate::domain::outfit::errors::OutfitError;
use crate::domain::outfit::model::SuggestionResult;
use crate::domain::shared::value_objects::EncodedImage;

pub struct SuggestOutfitsParams {
    pub input_images: Vec<EncodedImage>,
    pub occasion: Option<String>,
    pub style_preference: Option<String>,
}

#[async_trait]
pub trait SuggestOutfitsUseCase: Send + Sync {
    async fn execute(
        &self,
        params: SuggestOutfitsParams,
    ) -> Result<SuggestionResult, OutfitError>;
}
