use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::domain::logger::Logger;
use crate::domain::outfit::model::Outfit;
use crate::domain::resolution::errors::ResolutionError;
use crate::domain::resolution::model::{ImageResolutionState, ItemKey};
use crate::domain::resolution::services::ItemImageSynthesizerService;
use crate::domain::shared::value_objects::EncodedImage;

/// Orchestrates image resolution for every item of a suggestion result.
///
/// Input-backed items resolve synchronously from the uploaded images; novel
/// items get exactly one concurrent synthesis task each. Each call to
/// [`OutfitImageResolver::resolve`] produces a fresh [`ResolutionContext`]
/// stamped with a new generation, so results from a discarded context can
/// never leak into a newer one.
pub struct OutfitImageResolver {
    synthesizer: Arc<dyn ItemImageSynthesizerService>,
    logger: Arc<dyn Logger>,
    generation: AtomicU64,
}

impl OutfitImageResolver {
    pub fn new(synthesizer: Arc<dyn ItemImageSynthesizerService>, logger: Arc<dyn Logger>) -> Self {
        Self {
            synthesizer,
            logger,
            generation: AtomicU64::new(0),
        }
    }

    /// Seeds one state record per item and schedules synthesis for every
    /// novel item. Returns immediately; novel items settle asynchronously.
    ///
    /// Items whose `input_index` is out of range for `input_images` are
    /// logged and handled as novel rather than dropped.
    pub fn resolve(&self, outfits: &[Outfit], input_images: &[EncodedImage]) -> ResolutionContext {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let mut states = HashMap::new();
        let mut pending = Vec::new();

        for (outfit_index, outfit) in outfits.iter().enumerate() {
            for (item_index, item) in outfit.items.iter().enumerate() {
                let key = ItemKey::new(outfit_index, item_index);
                if item.references_input(input_images.len()) {
                    let index = item.input_index.unwrap_or_default();
                    states.insert(
                        key,
                        ImageResolutionState::Resolved(input_images[index].clone()),
                    );
                } else {
                    if let Some(index) = item.input_index {
                        self.logger.warn(&format!(
                            "Item {} references input image {} but only {} were uploaded, synthesizing instead",
                            key,
                            index,
                            input_images.len()
                        ));
                    }
                    states.insert(key, ImageResolutionState::Loading);
                    pending.push((key, item.name.clone()));
                }
            }
        }

        let (changes, _) = watch::channel(0u64);
        let context = ResolutionContext {
            generation,
            discarded: Arc::new(AtomicBool::new(false)),
            states: Arc::new(Mutex::new(states)),
            changes: Arc::new(changes),
        };

        self.logger.debug(&format!(
            "Resolution context {} created, {} items pending synthesis",
            generation,
            pending.len()
        ));

        for (key, name) in pending {
            let context = context.clone();
            let synthesizer = self.synthesizer.clone();
            let logger = self.logger.clone();
            tokio::spawn(async move {
                let state = match synthesizer.synthesize(&name).await {
                    Ok(image) => ImageResolutionState::Resolved(image),
                    Err(err) => {
                        logger.warn(&format!(
                            "Synthesis failed for item {} ('{}'): {}",
                            key, name, err
                        ));
                        ImageResolutionState::Failed
                    }
                };
                context.complete(key, state);
            });
        }

        context
    }
}

/// Per-suggestion resolution state, exclusively owned by whoever rendered
/// the suggestion. Cheap to clone; clones share the same state records.
#[derive(Clone)]
pub struct ResolutionContext {
    generation: u64,
    discarded: Arc<AtomicBool>,
    states: Arc<Mutex<HashMap<ItemKey, ImageResolutionState>>>,
    changes: Arc<watch::Sender<u64>>,
}

impl ResolutionContext {
    /// Generation stamp assigned when this context was created.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Current state of one item, or `None` for a key that was never part
    /// of this context.
    pub fn current_state(&self, key: ItemKey) -> Option<ImageResolutionState> {
        self.states
            .lock()
            .expect("resolution state lock poisoned")
            .get(&key)
            .cloned()
    }

    /// All item states, ordered by outfit index then item index.
    pub fn snapshot(&self) -> Vec<(ItemKey, ImageResolutionState)> {
        let mut entries: Vec<_> = self
            .states
            .lock()
            .expect("resolution state lock poisoned")
            .iter()
            .map(|(key, state)| (*key, state.clone()))
            .collect();
        entries.sort_by_key(|(key, _)| *key);
        entries
    }

    /// True once no item is still loading.
    pub fn is_settled(&self) -> bool {
        self.states
            .lock()
            .expect("resolution state lock poisoned")
            .values()
            .all(ImageResolutionState::is_terminal)
    }

    /// Monotonic change counter, bumped on every state transition.
    pub fn current_version(&self) -> u64 {
        *self.changes.borrow()
    }

    /// Subscribes to change notifications. Receivers observe the version
    /// counter; re-read [`ResolutionContext::snapshot`] after each change.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }

    /// Marks this context dead. Synthesis results arriving afterwards are
    /// dropped instead of mutating state.
    pub fn discard(&self) {
        self.discarded.store(true, Ordering::SeqCst);
    }

    pub fn is_discarded(&self) -> bool {
        self.discarded.load(Ordering::SeqCst)
    }

    /// Records that a resolved image turned out to be undisplayable at
    /// render time. One-shot: `Resolved` flips to `Failed`, `Failed` stays
    /// `Failed`, a still-loading item is left untouched. Returns the state
    /// after the report.
    pub fn mark_render_failed(
        &self,
        key: ItemKey,
    ) -> Result<ImageResolutionState, ResolutionError> {
        let mut states = self.states.lock().expect("resolution state lock poisoned");
        let state = states.get_mut(&key).ok_or(ResolutionError::ItemNotFound)?;

        if matches!(*state, ImageResolutionState::Resolved(_)) {
            *state = ImageResolutionState::Failed;
            drop(states);
            self.changes.send_modify(|version| *version += 1);
            return Ok(ImageResolutionState::Failed);
        }

        Ok(state.clone())
    }

    /// Applies a synthesis outcome. Only a `Loading` record may transition,
    /// and never inside a discarded context, so each item settles at most
    /// once and stale tasks cannot write.
    fn complete(&self, key: ItemKey, state: ImageResolutionState) {
        if self.is_discarded() {
            return;
        }

        let mut states = self.states.lock().expect("resolution state lock poisoned");
        match states.get(&key) {
            Some(ImageResolutionState::Loading) => {
                states.insert(key, state);
            }
            _ => return,
        }
        drop(states);

        self.changes.send_modify(|version| *version += 1);
    }
}
