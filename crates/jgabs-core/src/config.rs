#![forbid(unsafe_code)]

//! View controller configuration.
//!
//! Every selector, element id and class name the behaviors rely on lives in
//! [`ViewConfig`]. The defaults describe the journal's published markup; a
//! host may override any subset (the browser binding accepts a partial JSON
//! object).

use bitflags::bitflags;
use serde::Deserialize;

bitflags! {
    /// Which behaviors [`ViewConfig`] enables.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
    pub struct Behaviors: u8 {
        /// Navigation-link highlighting.
        const NAV = 0b0001;
        /// Tab switching.
        const TABS = 0b0010;
        /// Issue filtering and the latest-articles view.
        const ISSUES = 0b0100;
        /// Form acknowledgment.
        const FORMS = 0b1000;
    }
}

impl Default for Behaviors {
    fn default() -> Self {
        Self::all()
    }
}

/// Selectors, ids, class names and messages used by the view controller.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub behaviors: Behaviors,

    /// Class toggled on the active nav link, tab trigger and tab panel.
    pub active_class: String,

    pub nav_link_selector: String,

    pub tab_trigger_selector: String,
    pub tab_panel_selector: String,
    /// Attribute on a trigger naming its panel id.
    pub tab_target_attr: String,
    /// Panel id whose activation rebuilds the latest view.
    pub latest_tab_id: String,

    pub volume_select_id: String,
    pub issue_select_id: String,
    pub issue_card_selector: String,
    pub volume_attr: String,
    pub issue_attr: String,
    pub latest_attr: String,

    pub latest_container_id: String,
    pub article_item_selector: String,
    pub title_selector: String,
    pub view_link_selector: String,
    pub download_link_selector: String,
    pub author_attr: String,

    pub submission_form_id: String,
    pub contact_form_id: String,
    pub submission_message: String,
    pub contact_message: String,
}

/// Filter value that matches every card.
pub const ALL: &str = "all";

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            behaviors: Behaviors::default(),
            active_class: "active".into(),
            nav_link_selector: ".nav-links a".into(),
            tab_trigger_selector: ".tab-btn".into(),
            tab_panel_selector: ".tab-content".into(),
            tab_target_attr: "data-tab".into(),
            latest_tab_id: "latest".into(),
            volume_select_id: "volumeSelect".into(),
            issue_select_id: "issueSelect".into(),
            issue_card_selector: ".issue-card".into(),
            volume_attr: "data-volume".into(),
            issue_attr: "data-issue".into(),
            latest_attr: "data-latest".into(),
            latest_container_id: "latest-articles".into(),
            article_item_selector: "ul li".into(),
            title_selector: ".title".into(),
            view_link_selector: "a.view-link".into(),
            download_link_selector: "a.download-link".into(),
            author_attr: "data-author".into(),
            submission_form_id: "submissionForm".into(),
            contact_form_id: "contactForm".into(),
            submission_message:
                "✅ Manuscript received. It will be reviewed and scheduled for the next issue."
                    .into(),
            contact_message: "📩 Thank you — your message was sent. We will reply soon.".into(),
        }
    }
}

impl ViewConfig {
    /// Restrict initialization to `behaviors`.
    #[must_use]
    pub fn with_behaviors(mut self, behaviors: Behaviors) -> Self {
        self.behaviors = behaviors;
        self
    }

    #[must_use]
    pub fn with_active_class(mut self, class: impl Into<String>) -> Self {
        self.active_class = class.into();
        self
    }

    #[must_use]
    pub fn with_nav_link_selector(mut self, selector: impl Into<String>) -> Self {
        self.nav_link_selector = selector.into();
        self
    }

    #[must_use]
    pub fn with_latest_tab_id(mut self, id: impl Into<String>) -> Self {
        self.latest_tab_id = id.into();
        self
    }

    #[must_use]
    pub fn with_latest_container_id(mut self, id: impl Into<String>) -> Self {
        self.latest_container_id = id.into();
        self
    }

    #[must_use]
    pub fn with_messages(
        mut self,
        submission: impl Into<String>,
        contact: impl Into<String>,
    ) -> Self {
        self.submission_message = submission.into();
        self.contact_message = contact.into();
        self
    }

    /// Attribute selector matching the card explicitly flagged as latest.
    #[must_use]
    pub fn latest_card_selector(&self) -> String {
        format!(
            "{}[{}=\"true\"]",
            self.issue_card_selector, self.latest_attr
        )
    }

    /// Selector matching a trigger that is already active.
    #[must_use]
    pub fn active_trigger_selector(&self) -> String {
        format!("{}.{}", self.tab_trigger_selector, self.active_class)
    }

    /// Class named by a `.class` or `tag.class` selector, used when a cloned
    /// link drops its original styling.
    #[must_use]
    pub fn selector_class(selector: &str) -> Option<&str> {
        selector.rsplit_once('.').map(|(_, class)| class)
    }
}
