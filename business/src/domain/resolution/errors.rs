/// Use code-style identifiers for all error variants for i18n compatibility.
#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error("resolution.synthesis_failed")]
    SynthesisFailed,
    #[error("resolution.session_not_found")]
    SessionNotFound,
    #[error("resolution.item_not_found")]
    ItemNotFound,
}
