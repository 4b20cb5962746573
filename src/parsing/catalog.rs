use crate::domain::menu::MenuItem;

// ============================================================================
// Catalog Matcher - Resolve Free-Text Item References
// ============================================================================
// Matching is case-insensitive substring containment in either direction:
// the candidate contains the catalog name, or the catalog name contains the
// candidate. No edit distance. Spelling repair is the assistant's job
// upstream; this only reconciles what it emitted against the menu.

/// Resolve a free-text item reference against the catalog.
///
/// First containment match wins, in catalog order. Returns `None` when the
/// candidate is blank or nothing matches; callers treat that as "item not
/// resolvable", never as an error.
pub fn match_item<'a>(candidate: &str, catalog: &'a [MenuItem]) -> Option<&'a MenuItem> {
    let needle = candidate.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    catalog.iter().find(|item| {
        let name = item.name.to_lowercase();
        name.contains(&needle) || needle.contains(&name)
    })
}
