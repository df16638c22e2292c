//! Category label completeness check.

use crate::error::Result;
use crate::ports::CategorySource;
use crate::raster::CategoryEntry;

/// True iff every entry carries a label. Partial labeling counts as none;
/// an empty listing is vacuously complete.
pub fn labels_complete(entries: &[CategoryEntry]) -> bool {
    entries.iter().all(CategoryEntry::has_label)
}

/// Read the category listing of `map` and test it with [`labels_complete`].
pub fn has_complete_labels<S: CategorySource + ?Sized>(source: &S, map: &str) -> Result<bool> {
    let entries = source.list_categories(map)?;
    let complete = labels_complete(&entries);
    log::debug!(
        "{map}: {} categories, {} labeled",
        entries.len(),
        entries.iter().filter(|e| e.has_label()).count()
    );
    Ok(complete)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(v: &str, label: Option<&str>) -> CategoryEntry {
        CategoryEntry::new(v, label)
    }

    #[test]
    fn all_labeled_is_complete() {
        let entries = [entry("1", Some("grass")), entry("2", Some("forest")), entry("3", Some("water"))];
        assert!(labels_complete(&entries));
    }

    #[test]
    fn one_missing_label_makes_it_incomplete() {
        let entries = [entry("1", Some("grass")), entry("2", None), entry("3", Some("water"))];
        assert!(!labels_complete(&entries));
    }

    #[test]
    fn blank_label_makes_it_incomplete() {
        let entries = [entry("1", Some("grass")), entry("2", Some(""))];
        assert!(!labels_complete(&entries));
    }

    #[test]
    fn reads_listing_from_source() {
        use crate::raster::{Category, DataType};
        use crate::testing::{Call, MockBackend};

        let backend = MockBackend::unlabeled(vec![Category::new("1")], DataType::Integer);
        assert!(!has_complete_labels(&backend, "lc").unwrap());
        assert_eq!(backend.calls(), vec![Call::ListCategories("lc".into())]);
    }

    #[test]
    fn empty_listing_is_complete() {
        assert!(labels_complete(&[]));
    }
}
