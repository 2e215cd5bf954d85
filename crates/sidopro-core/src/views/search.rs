//! Client-side search filtering shared by every view.

/// Case-insensitive substring match.
///
/// A blank query matches everything.
///
/// ```rust
/// use sidopro_core::views::search::matches_search;
///
/// assert!(matches_search("Survey Awal", "awal"));
/// assert!(matches_search("Survey Awal", "  "));
/// assert!(!matches_search("Survey Awal", "akhir"));
/// ```
pub fn matches_search(text: &str, query: &str) -> bool {
    let query = query.trim();
    query.is_empty() || text.to_lowercase().contains(&query.to_lowercase())
}

/// Normalizes a user-supplied search string; blank strings become `None`.
pub fn normalize_query(query: Option<&str>) -> Option<String> {
    query
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_search_ignores_case() {
        assert!(matches_search("PENGUKURAN Lahan", "lahan"));
        assert!(matches_search("pengukuran", "UKUR"));
    }

    #[test]
    fn test_normalize_query() {
        assert_eq!(normalize_query(None), None);
        assert_eq!(normalize_query(Some("   ")), None);
        assert_eq!(normalize_query(Some(" budi ")), Some("budi".to_string()));
    }
}
