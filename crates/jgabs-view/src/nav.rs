#![forbid(unsafe_code)]

//! Navigation-link highlighting.

use jgabs_core::location::current_page_name;
use jgabs_core::{Dom, ViewConfig, debug, trace};

use crate::records::NavLink;

/// Mark the nav link(s) for the current page active and clear the rest.
///
/// Links without an `href` are left untouched. Returns the number of links
/// marked active. Idempotent.
pub fn set_active_nav_link<D: Dom>(dom: &mut D, config: &ViewConfig) -> Result<usize, D::Error> {
    let current = current_page_name(&dom.location_path());
    let mut active = 0;
    for node in dom.query_all(None, &config.nav_link_selector)? {
        let link = NavLink::read(dom, node)?;
        if link.href.is_empty() {
            continue;
        }
        if link.targets(&current) {
            dom.add_class(&link.node, &config.active_class)?;
            active += 1;
        } else {
            dom.remove_class(&link.node, &config.active_class)?;
        }
        trace!(href = %link.href, "nav link classified");
    }
    debug!(page = %current, active, "nav highlight applied");
    Ok(active)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jgabs_dom::Document;
    use pretty_assertions::assert_eq;

    const NAV: &str = concat!(
        r#"<nav class="nav-links">"#,
        r#"<a href="index.html">Home</a>"#,
        r#"<a href="Issues.html" class="active">Issues</a>"#,
        r#"<a href="contact.html">Contact</a>"#,
        r#"<a class="active">Blank</a>"#,
        r#"</nav><a href="contact.html" id="outside">Footer</a>"#
    );

    fn active_hrefs(doc: &Document) -> Vec<String> {
        doc.query_all(None, ".nav-links a.active")
            .unwrap()
            .into_iter()
            .map(|a| doc.attr(a, "href").unwrap().unwrap_or("<none>").to_string())
            .collect()
    }

    fn run(path: &str) -> (Document, usize) {
        let mut doc = Document::parse(NAV).unwrap().with_location(path);
        let n = set_active_nav_link(&mut doc, &ViewConfig::default()).unwrap();
        (doc, n)
    }

    #[test]
    fn exact_page_is_highlighted() {
        let (doc, n) = run("/site/contact.html");
        assert_eq!(n, 1);
        assert_eq!(active_hrefs(&doc), vec!["contact.html", "<none>"]);
    }

    #[test]
    fn comparison_ignores_case() {
        let (doc, _) = run("/ISSUES.HTML");
        assert_eq!(active_hrefs(&doc), vec!["Issues.html", "<none>"]);
    }

    #[test]
    fn directory_path_highlights_home() {
        let (doc, n) = run("/site/");
        assert_eq!(n, 1);
        assert_eq!(active_hrefs(&doc), vec!["index.html", "<none>"]);
    }

    #[test]
    fn links_outside_nav_are_ignored() {
        let (doc, _) = run("/contact.html");
        let outside = doc.element_by_id("outside").unwrap().unwrap();
        assert!(!doc.has_class(outside, "active").unwrap());
    }

    #[test]
    fn unknown_page_clears_everything_but_blank_links() {
        let (doc, n) = run("/archive.html");
        assert_eq!(n, 0);
        assert_eq!(active_hrefs(&doc), vec!["<none>"]);
    }

    #[test]
    fn idempotent() {
        let (mut doc, _) = run("/issues.html");
        let before = doc.to_html().unwrap();
        set_active_nav_link(&mut doc, &ViewConfig::default()).unwrap();
        assert_eq!(doc.to_html().unwrap(), before);
    }
}
