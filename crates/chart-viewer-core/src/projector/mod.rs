//! Record projector.
//!
//! Pipeline: select sub-collection → sort newest-first → truncate → (reverse)
//!
//! Every category screen goes through [`project`]; the per-category rules
//! (sort fields, display limit, reversal) live on [`Category`].

mod dates;

pub use dates::*;

use chrono::NaiveDateTime;

use crate::models::{Category, Entry, PatientRecord};

/// Sort date of an entry for a category. `None` means undated.
pub fn sort_date(entry: &Entry, category: Category) -> Option<NaiveDateTime> {
    first_date(entry, category.date_fields())
}

/// Select, order and truncate a category for display.
///
/// Entries are borrowed from `record`; the record itself is never touched.
/// Undated entries compare as earliest, so they fall to the end of the
/// newest-first ordering. Ties keep source order.
pub fn project(record: &PatientRecord, category: Category) -> Vec<&Entry> {
    let mut keyed: Vec<(Option<NaiveDateTime>, &Entry)> = record
        .section(category)
        .into_iter()
        .map(|entry| (sort_date(entry, category), entry))
        .collect();

    // Stable sort: equal keys keep their source order.
    keyed.sort_by(|a, b| b.0.cmp(&a.0));
    keyed.truncate(category.display_limit());

    let mut entries: Vec<&Entry> = keyed.into_iter().map(|(_, entry)| entry).collect();
    if category.reverse_for_display() {
        entries.reverse();
    }
    entries
}
