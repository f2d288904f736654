use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::logger::Logger;
use crate::domain::outfit::errors::OutfitError;
use crate::domain::outfit::model::SuggestionResult;
use crate::domain::outfit::services::OutfitSuggesterService;
use crate::domain::outfit::use_cases::suggest::{SuggestOutfitsParams, SuggestOutfitsUseCase};

pub struct SuggestOutfitsUseCaseImpl {
    pub suggester: Arc<dyn OutfitSuggesterService>,
    pub logger: Arc<dyn Logger>,
}

#[async_trait]
impl SuggestOutfitsUseCase for SuggestOutfitsUseCaseImpl {
    async fn execute(
        &self,
        params: SuggestOutfitsParams,
    ) -> Result<SuggestionResult, OutfitError> {
        if params.input_images.is_empty() {
            return Err(OutfitError::NoInputImages);
        }

        self.logger.info(&format!(
            "Suggesting outfits for {} uploaded items",
            params.input_images.len()
        ));

        let result = self
            .suggester
            .suggest(
                &params.input_images,
                params.occasion.as_deref(),
                params.style_preference.as_deref(),
            )
            .await?
            .sanitized(params.input_images.len());

        if result.is_empty() {
            self.logger.info("No confident outfit suggestions returned");
        } else {
            self.logger
                .info(&format!("Generated {} outfits", result.outfits.len()));
        }

        Ok(result)
    }
}
