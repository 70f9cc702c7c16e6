#![forbid(unsafe_code)]

//! Typed records parsed from element attributes.
//!
//! Each record is read once per handler invocation; behaviors work on the
//! record rather than re-reading attributes ad hoc.

use jgabs_core::config::ALL;
use jgabs_core::location::nav_target_matches;
use jgabs_core::{Dom, ViewConfig};

/// A navigation anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink<N> {
    pub node: N,
    /// Lower-cased `href`, empty when absent.
    pub href: String,
}

impl<N: Clone> NavLink<N> {
    pub fn read<D: Dom<Node = N>>(dom: &D, node: N) -> Result<Self, D::Error> {
        let href = dom.attr(&node, "href")?.unwrap_or_default().to_lowercase();
        Ok(Self { node, href })
    }

    /// Whether this link targets `current`. Links without a target never
    /// take part in highlighting.
    #[must_use]
    pub fn targets(&self, current: &str) -> bool {
        !self.href.is_empty() && nav_target_matches(&self.href, current)
    }
}

/// A tab trigger and the panel id it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabTrigger<N> {
    pub node: N,
    pub target: Option<String>,
    pub active: bool,
}

impl<N: Clone> TabTrigger<N> {
    pub fn read<D: Dom<Node = N>>(
        dom: &D,
        config: &ViewConfig,
        node: N,
    ) -> Result<Self, D::Error> {
        let target = dom.attr(&node, &config.tab_target_attr)?;
        let active = dom.has_class(&node, &config.active_class)?;
        Ok(Self {
            node,
            target,
            active,
        })
    }
}

/// One filter dropdown value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Matches any card.
    All,
    /// Matches cards whose attribute equals this token exactly.
    Only(String),
}

impl Choice {
    #[must_use]
    pub fn from_value(value: &str) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    #[must_use]
    pub fn admits(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(token) => token == value,
        }
    }
}

/// Current volume and issue dropdown values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub volume: Choice,
    pub issue: Choice,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            volume: Choice::All,
            issue: Choice::All,
        }
    }
}

impl FilterSelection {
    /// Read both selectors; an absent selector means [`Choice::All`].
    pub fn read<D: Dom>(
        dom: &D,
        volume_select: Option<&D::Node>,
        issue_select: Option<&D::Node>,
    ) -> Result<Self, D::Error> {
        let read = |select: Option<&D::Node>| -> Result<Choice, D::Error> {
            Ok(match select {
                Some(node) => Choice::from_value(&dom.control_value(node)?),
                None => Choice::All,
            })
        };
        Ok(Self {
            volume: read(volume_select)?,
            issue: read(issue_select)?,
        })
    }
}

/// An issue card and its classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueCard<N> {
    pub node: N,
    /// Empty when the attribute is absent.
    pub volume: String,
    pub issue: String,
    pub latest: bool,
}

impl<N: Clone> IssueCard<N> {
    pub fn read<D: Dom<Node = N>>(
        dom: &D,
        config: &ViewConfig,
        node: N,
    ) -> Result<Self, D::Error> {
        let volume = dom.attr(&node, &config.volume_attr)?.unwrap_or_default();
        let issue = dom.attr(&node, &config.issue_attr)?.unwrap_or_default();
        let latest = dom.attr(&node, &config.latest_attr)?.as_deref() == Some("true");
        Ok(Self {
            node,
            volume,
            issue,
            latest,
        })
    }

    /// Visibility under `selection`: both components must admit the card.
    #[must_use]
    pub fn visible_under(&self, selection: &FilterSelection) -> bool {
        selection.volume.admits(&self.volume) && selection.issue.admits(&self.issue)
    }
}

/// One article derived from an issue card's list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleEntry<N> {
    /// Trimmed title text.
    pub title: String,
    /// Author from the view link; `None` when absent or empty.
    pub author: Option<String>,
    pub view: Option<N>,
    pub download: Option<N>,
}

impl<N: Clone> ArticleEntry<N> {
    pub fn read<D: Dom<Node = N>>(
        dom: &D,
        config: &ViewConfig,
        item: &N,
    ) -> Result<Self, D::Error> {
        let title_node = dom
            .query(Some(item), &config.title_selector)?
            .unwrap_or_else(|| item.clone());
        let title = dom.text_content(&title_node)?.trim().to_string();
        let view = dom.query(Some(item), &config.view_link_selector)?;
        let download = dom.query(Some(item), &config.download_link_selector)?;
        let author = match &view {
            Some(link) => dom
                .attr(link, &config.author_attr)?
                .filter(|name| !name.is_empty()),
            None => None,
        };
        Ok(Self {
            title,
            author,
            view,
            download,
        })
    }

    /// Text of the author line, if one is shown.
    #[must_use]
    pub fn author_line(&self) -> Option<String> {
        self.author.as_ref().map(|name| format!("Author: {name}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jgabs_dom::Document;

    fn node(doc: &Document, id: &str) -> jgabs_dom::NodeId {
        doc.element_by_id(id).unwrap().expect("fixture element")
    }

    #[test]
    fn choice_all_admits_everything() {
        assert!(Choice::from_value("all").admits(""));
        assert!(Choice::from_value("all").admits("7"));
        assert!(Choice::from_value("2").admits("2"));
        assert!(!Choice::from_value("2").admits("22"));
        assert!(!Choice::from_value("All").admits("2"));
    }

    #[test]
    fn nav_link_without_href_never_targets() {
        let doc = Document::parse(r#"<a id="a">x</a><a id="b" href="Index.HTML">y</a>"#).unwrap();
        let a = NavLink::read(&doc, node(&doc, "a")).unwrap();
        let b = NavLink::read(&doc, node(&doc, "b")).unwrap();
        assert_eq!(a.href, "");
        assert!(!a.targets(""));
        assert!(!a.targets("index.html"));
        assert_eq!(b.href, "index.html");
        assert!(b.targets("index.html"));
    }

    #[test]
    fn issue_card_missing_attributes_are_empty() {
        let doc = Document::parse(r#"<div id="c" class="issue-card" data-latest="TRUE"></div>"#)
            .unwrap();
        let card = IssueCard::read(&doc, &ViewConfig::default(), node(&doc, "c")).unwrap();
        assert_eq!(card.volume, "");
        assert_eq!(card.issue, "");
        assert!(!card.latest, "only the exact string \"true\" flags latest");
        assert!(card.visible_under(&FilterSelection::default()));
        let only_one = FilterSelection {
            volume: Choice::Only("1".into()),
            issue: Choice::All,
        };
        assert!(!card.visible_under(&only_one));
    }

    #[test]
    fn article_entry_trims_title_and_reads_author() {
        let doc = Document::parse(concat!(
            r#"<li id="li"><span class="title">  Paper X  </span>"#,
            r#"<a class="view-link" data-author="Jane Doe" href="x.pdf">View</a></li>"#
        ))
        .unwrap();
        let entry = ArticleEntry::read(&doc, &ViewConfig::default(), &node(&doc, "li")).unwrap();
        assert_eq!(entry.title, "Paper X");
        assert_eq!(entry.author_line().as_deref(), Some("Author: Jane Doe"));
        assert!(entry.view.is_some());
        assert!(entry.download.is_none());
    }

    #[test]
    fn article_entry_falls_back_to_item_text() {
        let doc = Document::parse(
            r#"<li id="li"> Untitled note <a class="download-link" data-author="">PDF</a></li>"#,
        )
        .unwrap();
        let entry = ArticleEntry::read(&doc, &ViewConfig::default(), &node(&doc, "li")).unwrap();
        assert_eq!(entry.title, "Untitled note PDF");
        assert_eq!(entry.author, None);
        assert!(entry.view.is_none());
        assert!(entry.download.is_some());
    }

    #[test]
    fn empty_author_attribute_is_none() {
        let doc = Document::parse(
            r#"<li id="li">T<a class="view-link" data-author="">View</a></li>"#,
        )
        .unwrap();
        let entry = ArticleEntry::read(&doc, &ViewConfig::default(), &node(&doc, "li")).unwrap();
        assert_eq!(entry.author, None);
        assert_eq!(entry.author_line(), None);
    }
}
