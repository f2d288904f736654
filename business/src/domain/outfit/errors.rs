/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum OutfitError {
    #[error("outfit.no_input_images")]
    NoInputImages,
    #[error("outfit.generation_failed")]
    GenerationFailed,
}
