//! backend/src/io/rest/mappers/health_log_mapper.rs

use crate::domain::models::health_log::IndexedEntry;
use shared::HealthLogEntryRow;

pub struct HealthLogMapper;

impl HealthLogMapper {
    pub fn to_row(indexed: IndexedEntry) -> HealthLogEntryRow {
        HealthLogEntryRow {
            index: indexed.index,
            date: indexed.entry.date,
            text: indexed.entry.text,
        }
    }

    pub fn to_rows(entries: Vec<IndexedEntry>) -> Vec<HealthLogEntryRow> {
        entries.into_iter().map(Self::to_row).collect()
    }
}
