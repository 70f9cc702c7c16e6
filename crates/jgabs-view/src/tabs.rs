#![forbid(unsafe_code)]

//! Tab switching.
//!
//! One state per trigger; the only transition is activating a trigger.
//! Exactly one trigger (and its panel, if present) carries the active class
//! once [`TabSwitcher::start`] has run.

use jgabs_core::{Dom, ViewConfig, debug};

use crate::latest::{LatestOutcome, LatestView};
use crate::records::TabTrigger;

/// The tab triggers found at initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabSwitcher<N> {
    triggers: Vec<N>,
}

impl<N: Clone + PartialEq + std::fmt::Debug> TabSwitcher<N> {
    /// Resolve the triggers; `None` when the page has no tabs.
    pub fn init<D: Dom<Node = N>>(dom: &D, config: &ViewConfig) -> Result<Option<Self>, D::Error> {
        let triggers = dom.query_all(None, &config.tab_trigger_selector)?;
        if triggers.is_empty() {
            return Ok(None);
        }
        Ok(Some(Self { triggers }))
    }

    #[must_use]
    pub fn triggers(&self) -> &[N] {
        &self.triggers
    }

    #[must_use]
    pub fn owns(&self, node: &N) -> bool {
        self.triggers.contains(node)
    }

    /// The trigger already marked active, else the first one.
    pub fn start_trigger<D: Dom<Node = N>>(
        &self,
        dom: &D,
        config: &ViewConfig,
    ) -> Result<N, D::Error> {
        let marked = dom.query(None, &config.active_trigger_selector())?;
        Ok(marked
            .filter(|node| self.owns(node))
            .unwrap_or_else(|| self.triggers[0].clone()))
    }

    /// Activate the start trigger, as if it had been clicked.
    pub fn start<D: Dom<Node = N>>(
        &self,
        dom: &mut D,
        config: &ViewConfig,
        latest: Option<&LatestView<N>>,
    ) -> Result<Option<LatestOutcome>, D::Error> {
        let start = self.start_trigger(dom, config)?;
        self.activate(dom, config, &start, latest)
    }

    /// Make `trigger` and its panel the only active ones.
    ///
    /// Returns the latest-view rebuild outcome when the latest tab opened.
    pub fn activate<D: Dom<Node = N>>(
        &self,
        dom: &mut D,
        config: &ViewConfig,
        trigger: &N,
        latest: Option<&LatestView<N>>,
    ) -> Result<Option<LatestOutcome>, D::Error> {
        let trigger = TabTrigger::read(dom, config, trigger.clone())?;

        for node in &self.triggers {
            dom.remove_class(node, &config.active_class)?;
        }
        dom.add_class(&trigger.node, &config.active_class)?;

        for panel in dom.query_all(None, &config.tab_panel_selector)? {
            dom.remove_class(&panel, &config.active_class)?;
        }
        let Some(target) = trigger.target else {
            debug!("tab trigger has no target panel");
            return Ok(None);
        };
        if let Some(panel) = dom.element_by_id(&target)? {
            dom.add_class(&panel, &config.active_class)?;
        }
        debug!(tab = %target, "tab activated");

        if target == config.latest_tab_id
            && let Some(view) = latest
        {
            return view.rebuild(dom, config).map(Some);
        }
        Ok(None)
    }
}
