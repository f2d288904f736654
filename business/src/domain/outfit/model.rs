use chrono::{DateTime, Utc};

/// Maximum number of outfits a single suggestion call may return.
pub const MAX_OUTFITS: usize = 3;

/// One item inside a suggested outfit.
///
/// The item either points back at one of the caller's uploaded images
/// (`input_index` present) or is a novel garment the stylist invented,
/// described only by its `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReference {
    pub name: String,
    pub input_index: Option<usize>,
}

impl ItemReference {
    /// True when the item carries an index that is in range for the given
    /// number of input images. An out-of-range index is a data-contract
    /// violation from the model and must be treated as a novel item.
    pub fn references_input(&self, input_count: usize) -> bool {
        matches!(self.input_index, Some(index) if index < input_count)
    }
}

/// One curated set of garments with a human-readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outfit {
    pub description: String,
    pub items: Vec<ItemReference>,
}

/// The outcome of one suggestion call: zero to [`MAX_OUTFITS`] outfits.
///
/// An empty `outfits` list is a valid "no confident suggestions" outcome,
/// not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionResult {
    pub outfits: Vec<Outfit>,
    pub created_at: DateTime<Utc>,
}

impl SuggestionResult {
    pub fn new(outfits: Vec<Outfit>) -> Self {
        Self {
            outfits,
            created_at: Utc::now(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.outfits.is_empty()
    }

    /// Enforces the generation contract on a result that came back from the
    /// remote model: at most [`MAX_OUTFITS`] outfits, and every item either
    /// carries an `input_index` in range for `input_count` or none at all.
    /// Out-of-range indices are cleared so the item is handled as novel.
    pub fn sanitized(mut self, input_count: usize) -> Self {
        self.outfits.truncate(MAX_OUTFITS);
        for outfit in &mut self.outfits {
            for item in &mut outfit.items {
                if item.input_index.is_some() && !item.references_input(input_count) {
                    item.input_index = None;
                }
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, input_index: Option<usize>) -> ItemReference {
        ItemReference {
            name: name.to_string(),
            input_index,
        }
    }

    fn outfit(items: Vec<ItemReference>) -> Outfit {
        Outfit {
            description: "A look".to_string(),
            items,
        }
    }

    #[test]
    fn should_recognize_in_range_input_reference() {
        assert!(item("Uploaded Top", Some(0)).references_input(2));
        assert!(item("Uploaded Jacket", Some(1)).references_input(2));
    }

    #[test]
    fn should_reject_out_of_range_input_reference() {
        assert!(!item("Phantom Scarf", Some(7)).references_input(2));
        assert!(!item("Phantom Scarf", Some(2)).references_input(2));
    }

    #[test]
    fn should_treat_novel_item_as_not_referencing_input() {
        assert!(!item("Black Belt", None).references_input(2));
    }

    #[test]
    fn should_clear_out_of_range_indices_when_sanitizing() {
        let result = SuggestionResult::new(vec![outfit(vec![
            item("Uploaded Top", Some(0)),
            item("Phantom Scarf", Some(7)),
            item("Black Belt", None),
        ])])
        .sanitized(2);

        let items = &result.outfits[0].items;
        assert_eq!(items[0].input_index, Some(0));
        assert_eq!(items[1].input_index, None);
        assert_eq!(items[2].input_index, None);
    }

    #[test]
    fn should_truncate_to_max_outfits_when_sanitizing() {
        let outfits = (0..5)
            .map(|_| outfit(vec![item("Black Belt", None)]))
            .collect();
        let result = SuggestionResult::new(outfits).sanitized(0);
        assert_eq!(result.outfits.len(), MAX_OUTFITS);
    }

    #[test]
    fn should_keep_duplicate_references_across_outfits() {
        let result = SuggestionResult::new(vec![
            outfit(vec![item("Uploaded Top", Some(0))]),
            outfit(vec![item("Uploaded Top", Some(0))]),
        ])
        .sanitized(1);

        assert_eq!(result.outfits[0].items[0].input_index, Some(0));
        assert_eq!(result.outfits[1].items[0].input_index, Some(0));
    }

    #[test]
    fn should_report_empty_result() {
        assert!(SuggestionResult::new(vec![]).is_empty());
        assert!(!SuggestionResult::new(vec![outfit(vec![])]).is_empty());
    }
}
