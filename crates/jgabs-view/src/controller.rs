#![forbid(unsafe_code)]

//! The view controller.
//!
//! [`ViewController::initialize`] runs the page-load sequence once against a
//! document and keeps only the element handles each behavior needs. The host
//! then forwards [`Event`]s to [`ViewController::update`] and executes the
//! returned [`Cmd`]. No state outlives the controller value.
//!
//! Page-load sequence, in order:
//!
//! 1. highlight the nav link,
//! 2. resolve the tabs and synthesize one activation of the start tab,
//! 3. resolve the filters, run an initial filter pass when a selector
//!    exists, and build the latest view once,
//! 4. resolve the forms.

use jgabs_core::{Behaviors, Cmd, Dom, Event, ViewConfig, debug, debug_span};

use crate::forms::FormAcknowledger;
use crate::issues::IssueFilter;
use crate::latest::LatestView;
use crate::nav::set_active_nav_link;
use crate::tabs::TabSwitcher;

/// An element the host must listen on, and for which event type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listener<N> {
    /// DOM event type (`click`, `change`, `submit`).
    pub event: &'static str,
    pub target: N,
}

/// Resolved handles for the four page behaviors.
#[derive(Debug, Clone)]
pub struct ViewController<N> {
    config: ViewConfig,
    tabs: Option<TabSwitcher<N>>,
    issues: Option<IssueFilter<N>>,
    latest: Option<LatestView<N>>,
    forms: Option<FormAcknowledger<N>>,
}

impl<N: Clone + PartialEq + std::fmt::Debug> ViewController<N> {
    /// Run the page-load sequence and return the controller.
    pub fn initialize<D: Dom<Node = N>>(dom: &mut D, config: ViewConfig) -> Result<Self, D::Error> {
        let span = debug_span!("view_initialize");
        let _guard = span.enter();
        let behaviors = config.behaviors;

        if behaviors.contains(Behaviors::NAV) {
            set_active_nav_link(dom, &config)?;
        }

        let latest = if behaviors.intersects(Behaviors::TABS | Behaviors::ISSUES) {
            LatestView::locate(dom, &config)?
        } else {
            None
        };

        let tabs = if behaviors.contains(Behaviors::TABS) {
            TabSwitcher::init(dom, &config)?
        } else {
            None
        };
        if let Some(tabs) = &tabs {
            tabs.start(dom, &config, latest.as_ref())?;
        }

        let issues = if behaviors.contains(Behaviors::ISSUES) {
            let filter = IssueFilter::init(dom, &config)?;
            if filter.has_selectors() {
                filter.filter_issues(dom, &config)?;
            }
            if let Some(view) = &latest {
                view.rebuild(dom, &config)?;
            }
            Some(filter)
        } else {
            None
        };

        let forms = if behaviors.contains(Behaviors::FORMS) {
            Some(FormAcknowledger::init(dom, &config)?)
        } else {
            None
        };

        debug!(
            tabs = tabs.as_ref().map_or(0, |t| t.triggers().len()),
            latest = latest.is_some(),
            "view controller initialized"
        );
        Ok(Self {
            config,
            tabs,
            issues,
            latest,
            forms,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    #[must_use]
    pub fn latest_view(&self) -> Option<&LatestView<N>> {
        self.latest.as_ref()
    }

    /// Every element/event pair the host must forward to [`Self::update`].
    #[must_use]
    pub fn listeners(&self) -> Vec<Listener<N>> {
        let mut out = Vec::new();
        if let Some(tabs) = &self.tabs {
            out.extend(tabs.triggers().iter().map(|t| Listener {
                event: "click",
                target: t.clone(),
            }));
        }
        if let Some(issues) = &self.issues {
            out.extend(issues.selectors().map(|s| Listener {
                event: "change",
                target: s.clone(),
            }));
        }
        if let Some(forms) = &self.forms {
            out.extend(forms.forms().map(|f| Listener {
                event: "submit",
                target: f.clone(),
            }));
        }
        out
    }

    /// Handle one event. Events for elements no behavior owns are ignored.
    pub fn update<D: Dom<Node = N>>(
        &mut self,
        dom: &mut D,
        event: Event<N>,
    ) -> Result<Cmd, D::Error> {
        match event {
            Event::Click(node) => {
                if let Some(tabs) = self.tabs.as_ref().filter(|t| t.owns(&node)) {
                    tabs.activate(dom, &self.config, &node, self.latest.as_ref())?;
                }
                Ok(Cmd::none())
            }
            Event::Change(node) => {
                if let Some(issues) = self.issues.as_ref().filter(|i| i.owns_selector(&node)) {
                    issues.filter_issues(dom, &self.config)?;
                }
                Ok(Cmd::none())
            }
            Event::Submit(node) => match &self.forms {
                Some(forms) => forms.on_submit(dom, &self.config, &node),
                None => Ok(Cmd::none()),
            },
        }
    }

    /// Rebuild the latest view on demand.
    pub fn refresh_latest<D: Dom<Node = N>>(
        &self,
        dom: &mut D,
    ) -> Result<Option<crate::LatestOutcome>, D::Error> {
        crate::latest::populate_latest_from_issue_card(dom, &self.config, self.latest.as_ref())
    }
}
