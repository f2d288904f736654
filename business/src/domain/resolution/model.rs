use crate::domain::shared::value_objects::EncodedImage;

/// Stable identity of one item inside one suggestion result: the outfit it
/// belongs to plus its position within that outfit. Array position alone is
/// not enough because the same garment may appear in several outfits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub outfit_index: usize,
    pub item_index: usize,
}

impl ItemKey {
    pub fn new(outfit_index: usize, item_index: usize) -> Self {
        Self {
            outfit_index,
            item_index,
        }
    }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.outfit_index, self.item_index)
    }
}

/// Display state of one item, scoped to one resolution context.
///
/// Input-backed items start out `Resolved`. Novel items start out `Loading`
/// and transition exactly once to `Resolved` or `Failed`; a `Resolved` item
/// may additionally take a one-shot transition to `Failed` when its image
/// turns out to be undisplayable at render time. States never revert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageResolutionState {
    Loading,
    Resolved(EncodedImage),
    Failed,
}

impl ImageResolutionState {
    /// True once the item has settled and will no longer transition on its
    /// own (a render-failure report may still flip `Resolved` to `Failed`).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ImageResolutionState::Loading)
    }

    /// The displayable image, present only in the `Resolved` state.
    pub fn image(&self) -> Option<&EncodedImage> {
        match self {
            ImageResolutionState::Resolved(image) => Some(image),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageResolutionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImageResolutionState::Loading => write!(f, "loading"),
            ImageResolutionState::Resolved(_) => write!(f, "resolved"),
            ImageResolutionState::Failed => write!(f, "failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_treat_loading_as_non_terminal() {
        assert!(!ImageResolutionState::Loading.is_terminal());
    }

    #[test]
    fn should_treat_resolved_and_failed_as_terminal() {
        let image = EncodedImage::new("image/png", "YWJj");
        assert!(ImageResolutionState::Resolved(image).is_terminal());
        assert!(ImageResolutionState::Failed.is_terminal());
    }

    #[test]
    fn should_expose_image_only_when_resolved() {
        let image = EncodedImage::new("image/png", "YWJj");
        assert_eq!(
            ImageResolutionState::Resolved(image.clone()).image(),
            Some(&image)
        );
        assert_eq!(ImageResolutionState::Loading.image(), None);
        assert_eq!(ImageResolutionState::Failed.image(), None);
    }

    #[test]
    fn should_display_status_identifiers() {
        let image = EncodedImage::new("image/png", "YWJj");
        assert_eq!(format!("{}", ImageResolutionState::Loading), "loading");
        assert_eq!(
            format!("{}", ImageResolutionState::Resolved(image)),
            "resolved"
        );
        assert_eq!(format!("{}", ImageResolutionState::Failed), "failed");
    }

    #[test]
    fn should_display_item_key_as_path() {
        assert_eq!(format!("{}", ItemKey::new(1, 3)), "1/3");
    }
}
