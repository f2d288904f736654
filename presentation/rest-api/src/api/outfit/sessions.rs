use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use business::application::resolution::resolver::ResolutionContext;
use business::domain::outfit::model::Outfit;

/// One live suggestion session: the outfits plus their resolution context.
/// Cloning shares the underlying context state.
#[derive(Clone)]
pub struct Session {
    pub outfits: Vec<Outfit>,
    pub context: ResolutionContext,
}

/// In-memory registry of active suggestion sessions.
///
/// Sessions are ephemeral: they live until the client discards them or the
/// process restarts. Nothing is persisted.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    pub fn insert(&self, outfits: Vec<Outfit>, context: ResolutionContext) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .expect("session registry lock poisoned")
            .insert(id, Session { outfits, context });
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<Session> {
        self.sessions
            .read()
            .expect("session registry lock poisoned")
            .get(id)
            .cloned()
    }

    /// Removes a session and discards its resolution context so any
    /// in-flight synthesis result is dropped instead of applied.
    pub fn remove(&self, id: &Uuid) -> bool {
        let removed = self
            .sessions
            .write()
            .expect("session registry lock poisoned")
            .remove(id);

        match removed {
            Some(session) => {
                session.context.discard();
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use business::application::resolution::resolver::OutfitImageResolver;
    use business::domain::logger::Logger;
    use business::domain::resolution::errors::ResolutionError;
    use business::domain::resolution::services::ItemImageSynthesizerService;
    use business::domain::shared::value_objects::EncodedImage;

    struct NullLogger;

    impl Logger for NullLogger {
        fn info(&self, _message: &str) {}
        fn warn(&self, _message: &str) {}
        fn error(&self, _message: &str) {}
        fn debug(&self, _message: &str) {}
    }

    struct NeverSynthesizer;

    #[async_trait]
    impl ItemImageSynthesizerService for NeverSynthesizer {
        async fn synthesize(&self, _description: &str) -> Result<EncodedImage, ResolutionError> {
            Err(ResolutionError::SynthesisFailed)
        }
    }

    fn empty_context() -> ResolutionContext {
        let resolver = OutfitImageResolver::new(Arc::new(NeverSynthesizer), Arc::new(NullLogger));
        resolver.resolve(&[], &[])
    }

    #[test]
    fn should_store_and_return_sessions_by_id() {
        let registry = SessionRegistry::new();
        let id = registry.insert(vec![], empty_context());

        assert!(registry.get(&id).is_some());
        assert!(registry.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn should_discard_context_when_removing_session() {
        let registry = SessionRegistry::new();
        let context = empty_context();
        let id = registry.insert(vec![], context.clone());

        assert!(registry.remove(&id));
        assert!(context.is_discarded());
        assert!(registry.get(&id).is_none());
    }

    #[test]
    fn should_report_unknown_session_on_remove() {
        let registry = SessionRegistry::new();
        assert!(!registry.remove(&Uuid::new_v4()));
    }
}
