#![forbid(unsafe_code)]

//! The latest-articles view.
//!
//! The view is rebuilt from scratch on every call: the container is cleared,
//! the latest issue card is chosen (the one flagged `data-latest="true"`, else
//! the first card), and each of its list items becomes an article card with
//! view/download buttons. A card without list items is cloned whole.

use jgabs_core::{Dom, ViewConfig, debug, trace};

use crate::records::ArticleEntry;

/// Text rendered when the page has no issue cards at all.
pub const NO_ISSUES: &str = "No issues found.";

const ARTICLES_CLASS: &str = "articles";
const ARTICLE_CARD_CLASS: &str = "article-card";
const ARTICLE_ACTIONS_CLASS: &str = "article-actions";
const BUTTON_CLASS: &str = "btn";
const SECONDARY_CLASS: &str = "secondary";
const AUTHOR_STYLE: (&str, &str) = ("margin-bottom", "8px");

/// What a rebuild produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatestOutcome {
    /// No issue cards exist; the placeholder message was rendered.
    NoIssues,
    /// The chosen card had no list items and was cloned whole.
    ClonedCard,
    /// One article card per list item was rendered.
    Articles(usize),
}

/// Handle to the latest-articles container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestView<N> {
    container: N,
}

impl<N: Clone + PartialEq + std::fmt::Debug> LatestView<N> {
    /// Wrap an explicit container element.
    pub fn new(container: N) -> Self {
        Self { container }
    }

    /// Find the container by its configured id; `None` when the page has no
    /// latest view.
    pub fn locate<D: Dom<Node = N>>(dom: &D, config: &ViewConfig) -> Result<Option<Self>, D::Error> {
        Ok(dom
            .element_by_id(&config.latest_container_id)?
            .map(Self::new))
    }

    #[must_use]
    pub fn container(&self) -> &N {
        &self.container
    }

    /// Replace the container's content with the latest issue's articles.
    pub fn rebuild<D: Dom<Node = N>>(
        &self,
        dom: &mut D,
        config: &ViewConfig,
    ) -> Result<LatestOutcome, D::Error> {
        dom.clear_children(&self.container)?;

        let card = match dom.query(None, &config.latest_card_selector())? {
            Some(card) => card,
            None => match dom.query(None, &config.issue_card_selector)? {
                Some(first) => {
                    debug!("no card flagged latest; using the first issue card");
                    first
                }
                None => {
                    let p = dom.create_element("p")?;
                    dom.set_text_content(&p, NO_ISSUES)?;
                    dom.append_child(&self.container, &p)?;
                    debug!("latest view: no issue cards");
                    return Ok(LatestOutcome::NoIssues);
                }
            },
        };

        let items = dom.query_all(Some(&card), &config.article_item_selector)?;
        if items.is_empty() {
            let clone = dom.clone_deep(&card)?;
            if let Some(class) = ViewConfig::selector_class(&config.issue_card_selector) {
                dom.remove_class(&clone, class)?;
            }
            dom.add_class(&clone, ARTICLE_CARD_CLASS)?;
            for attr in [&config.volume_attr, &config.issue_attr, &config.latest_attr] {
                dom.remove_attr(&clone, attr)?;
            }
            dom.append_child(&self.container, &clone)?;
            debug!("latest card has no list items; cloned whole card");
            return Ok(LatestOutcome::ClonedCard);
        }

        let grid = dom.create_element("div")?;
        dom.add_class(&grid, ARTICLES_CLASS)?;
        for item in &items {
            let entry = ArticleEntry::read(dom, config, item)?;
            let article = render_article(dom, config, &entry)?;
            dom.append_child(&grid, &article)?;
            trace!(title = %entry.title, "article card rendered");
        }
        dom.append_child(&self.container, &grid)?;
        debug!(count = items.len(), "latest view rebuilt");
        Ok(LatestOutcome::Articles(items.len()))
    }
}

/// Build one detached `div.article-card` for `entry`.
fn render_article<D: Dom>(
    dom: &mut D,
    config: &ViewConfig,
    entry: &ArticleEntry<D::Node>,
) -> Result<D::Node, D::Error> {
    let article = dom.create_element("div")?;
    dom.add_class(&article, ARTICLE_CARD_CLASS)?;

    let heading = dom.create_element("h3")?;
    dom.set_text_content(&heading, &entry.title)?;
    dom.append_child(&article, &heading)?;

    // The author paragraph accompanies every view link, filled only when an
    // author is known.
    if entry.view.is_some() {
        let p = dom.create_element("p")?;
        dom.set_style(&p, AUTHOR_STYLE.0, AUTHOR_STYLE.1)?;
        if let Some(line) = entry.author_line() {
            dom.set_text_content(&p, &line)?;
        }
        dom.append_child(&article, &p)?;
    }

    let actions = dom.create_element("div")?;
    dom.add_class(&actions, ARTICLE_ACTIONS_CLASS)?;
    if let Some(view) = &entry.view {
        let button = dom.clone_deep(view)?;
        dom.add_class(&button, BUTTON_CLASS)?;
        if let Some(class) = ViewConfig::selector_class(&config.view_link_selector) {
            dom.remove_class(&button, class)?;
        }
        dom.set_attr(&button, "target", "_blank")?;
        dom.append_child(&actions, &button)?;
    }
    if let Some(download) = &entry.download {
        let button = dom.clone_deep(download)?;
        dom.add_class(&button, BUTTON_CLASS)?;
        dom.add_class(&button, SECONDARY_CLASS)?;
        if let Some(class) = ViewConfig::selector_class(&config.download_link_selector) {
            dom.remove_class(&button, class)?;
        }
        dom.append_child(&actions, &button)?;
    }
    dom.append_child(&article, &actions)?;
    Ok(article)
}

/// Rebuild `view` if the page has one.
pub fn populate_latest_from_issue_card<D: Dom>(
    dom: &mut D,
    config: &ViewConfig,
    view: Option<&LatestView<D::Node>>,
) -> Result<Option<LatestOutcome>, D::Error> {
    match view {
        Some(view) => view.rebuild(dom, config).map(Some),
        None => Ok(None),
    }
}
