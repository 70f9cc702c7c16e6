#![forbid(unsafe_code)]

//! Volume/issue filtering of issue cards.

use jgabs_core::{Dom, ViewConfig, debug};

use crate::records::{FilterSelection, IssueCard};

const DISPLAY: &str = "display";
const HIDDEN: &str = "none";

/// The two filter selectors and the cards they govern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueFilter<N> {
    volume_select: Option<N>,
    issue_select: Option<N>,
    cards: Vec<N>,
}

impl<N: Clone + PartialEq + std::fmt::Debug> IssueFilter<N> {
    pub fn init<D: Dom<Node = N>>(dom: &D, config: &ViewConfig) -> Result<Self, D::Error> {
        Ok(Self {
            volume_select: dom.element_by_id(&config.volume_select_id)?,
            issue_select: dom.element_by_id(&config.issue_select_id)?,
            cards: dom.query_all(None, &config.issue_card_selector)?,
        })
    }

    /// Whether at least one selector exists on the page.
    #[must_use]
    pub fn has_selectors(&self) -> bool {
        self.volume_select.is_some() || self.issue_select.is_some()
    }

    /// Selectors present on the page, volume first.
    pub fn selectors(&self) -> impl Iterator<Item = &N> {
        self.volume_select.iter().chain(self.issue_select.iter())
    }

    #[must_use]
    pub fn owns_selector(&self, node: &N) -> bool {
        self.selectors().any(|s| s == node)
    }

    #[must_use]
    pub fn cards(&self) -> &[N] {
        &self.cards
    }

    pub fn selection<D: Dom<Node = N>>(&self, dom: &D) -> Result<FilterSelection, D::Error> {
        FilterSelection::read(dom, self.volume_select.as_ref(), self.issue_select.as_ref())
    }

    /// Show the cards admitted by the current selection and hide the rest.
    /// Returns the number of visible cards.
    pub fn filter_issues<D: Dom<Node = N>>(
        &self,
        dom: &mut D,
        config: &ViewConfig,
    ) -> Result<usize, D::Error> {
        let selection = self.selection(dom)?;
        let mut visible = 0;
        for node in &self.cards {
            let card = IssueCard::read(dom, config, node.clone())?;
            if card.visible_under(&selection) {
                dom.set_style(&card.node, DISPLAY, "")?;
                visible += 1;
            } else {
                dom.set_style(&card.node, DISPLAY, HIDDEN)?;
            }
        }
        debug!(
            volume = ?selection.volume,
            issue = ?selection.issue,
            visible,
            total = self.cards.len(),
            "issue filter applied"
        );
        Ok(visible)
    }
}
