#![forbid(unsafe_code)]

//! Page-location helpers for navigation highlighting.

/// File name served when the path ends in a directory.
pub const HOME_PAGE: &str = "index.html";

/// Lower-cased last path segment of `path`, or [`HOME_PAGE`] when empty.
///
/// Any `?query` or `#fragment` suffix is ignored.
///
/// ```
/// use jgabs_core::location::current_page_name;
///
/// assert_eq!(current_page_name("/journal/About.HTML"), "about.html");
/// assert_eq!(current_page_name("/journal/"), "index.html");
/// ```
#[must_use]
pub fn current_page_name(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    let last = path.rsplit('/').next().unwrap_or_default();
    if last.is_empty() {
        HOME_PAGE.to_string()
    } else {
        last.to_lowercase()
    }
}

/// Whether a navigation link with target `href` points at `current`.
///
/// Both arguments are compared case-insensitively. The home link also
/// matches when `current` is empty.
#[must_use]
pub fn nav_target_matches(href: &str, current: &str) -> bool {
    let href = href.to_lowercase();
    let current = current.to_lowercase();
    href == current || (href == HOME_PAGE && (current.is_empty() || current == HOME_PAGE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_and_trailing_slash_resolve_home() {
        assert_eq!(current_page_name(""), "index.html");
        assert_eq!(current_page_name("/"), "index.html");
        assert_eq!(current_page_name("/site/issues/"), "index.html");
    }

    #[test]
    fn last_segment_is_lowercased() {
        assert_eq!(current_page_name("/Issues.html"), "issues.html");
        assert_eq!(current_page_name("contact.html"), "contact.html");
    }

    #[test]
    fn query_and_fragment_are_ignored() {
        assert_eq!(current_page_name("/issues.html?vol=2"), "issues.html");
        assert_eq!(current_page_name("/issues.html#latest"), "issues.html");
        assert_eq!(current_page_name("/dir/?x=1"), "index.html");
    }

    #[test]
    fn home_special_case() {
        assert!(nav_target_matches("index.html", "index.html"));
        assert!(nav_target_matches("INDEX.html", ""));
        assert!(!nav_target_matches("about.html", ""));
        assert!(!nav_target_matches("index.html", "about.html"));
    }

    #[test]
    fn exact_match_is_case_insensitive() {
        assert!(nav_target_matches("About.html", "about.HTML"));
        assert!(!nav_target_matches("about.htm", "about.html"));
    }
}
