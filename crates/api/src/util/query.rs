/// Looks up the first value of `key` in a raw query string. Values are taken verbatim.
pub fn find<'q>(query: &'q str, key: &str) -> Option<&'q str> {
    query.split('&').find_map(|chunk| {
        let (name, value) = chunk.split_once('=')?;
        (name == key).then_some(value)
    })
}

/// Extracts the requested page number. Absent or non-numeric values fall back to the first page.
pub fn page(query: &str) -> i64 {
    find(query, "page").and_then(|page| page.parse().ok()).unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::{find, page};

    #[test]
    fn finds_first_matching_key() {
        assert_eq!(find("page=2&page=3", "page"), Some("2"));
        assert_eq!(find("sort=id&page=4", "page"), Some("4"));
        assert_eq!(find("pages=4", "page"), None);
        assert_eq!(find("page", "page"), None);
        assert_eq!(find("", "page"), None);
    }

    #[test]
    fn defaults_to_first_page() {
        assert_eq!(page(""), 1);
        assert_eq!(page("page="), 1);
        assert_eq!(page("page=two"), 1);
        assert_eq!(page("other=5"), 1);
    }

    #[test]
    fn parses_explicit_pages() {
        assert_eq!(page("page=2"), 2);
        assert_eq!(page("page=2000"), 2000);
        assert_eq!(page("page=0"), 0);
        assert_eq!(page("page=-3"), -3);
    }
}
