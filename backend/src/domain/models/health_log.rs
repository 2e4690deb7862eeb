//! Domain helpers for health log entries

use shared::HealthLogEntry;

/// An entry paired with its position in storage
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedEntry {
    /// Append-order index; update and delete operations address entries by this
    pub index: usize,
    pub entry: HealthLogEntry,
}

/// Order entries for display, newest first, keeping their storage index
pub fn newest_first(entries: &[HealthLogEntry]) -> Vec<IndexedEntry> {
    entries
        .iter()
        .cloned()
        .enumerate()
        .rev()
        .map(|(index, entry)| IndexedEntry { index, entry })
        .collect()
}
