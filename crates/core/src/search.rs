//! Free-text search over record lists.

/// Records that can be found by a free-text search over their display name.
pub trait Searchable {
    fn search_key(&self) -> &str;

    /// Case-insensitive substring match; an empty term matches everything.
    fn matches(&self, term: &str) -> bool {
        let term = term.trim();
        term.is_empty()
            || self
                .search_key()
                .to_lowercase()
                .contains(&term.to_lowercase())
    }
}

/// Keep the records whose display name contains `term`, preserving order.
pub fn filter_by_name<'a, T: Searchable>(records: &'a [T], term: &str) -> Vec<&'a T> {
    records.iter().filter(|r| r.matches(term)).collect()
}
