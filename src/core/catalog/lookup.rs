//! Lookup and filtering over fetched records, shared by both catalog clients.

use super::record::ModelRecord;

/// First record whose id matches exactly. Duplicate ids are not an error; the
/// earliest one wins.
pub fn find_by_id<'a>(records: &'a [ModelRecord], id: &str) -> Option<&'a ModelRecord> {
    records.iter().find(|m| m.id == id)
}

/// Owned variant of [`find_by_id`] for callers done with the rest of the list.
pub fn take_by_id(records: Vec<ModelRecord>, id: &str) -> Option<ModelRecord> {
    records.into_iter().find(|m| m.id == id)
}

/// Case-insensitive substring match on id, name, or owner. An empty query
/// keeps everything.
pub fn filter_models<'a>(records: &'a [ModelRecord], query: &str) -> Vec<&'a ModelRecord> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|m| {
            [&m.id, &m.name, &m.owned_by]
                .iter()
                .any(|field| field.to_lowercase().contains(&q))
        })
        .collect()
}
