#![forbid(unsafe_code)]

//! Hosts for the JGABS page behaviors.
//!
//! - [`StepHost`] plays the browser's part over an in-memory
//!   [`jgabs_dom::Document`]: the caller pushes events, steps the host, and
//!   reads back the alerts and default-prevented flags the behaviors asked for.
//! - `JournalPage` (wasm32 only) binds the same controller to the live
//!   browser document through `wasm-bindgen`.
//!
//! Both hosts accept the same partial JSON options object, parsed by
//! [`parse_options`].

pub mod step_host;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::{JournalPage, JsError, WebDom};

pub use step_host::{DispatchRecord, HostOutputs, StepHost, StepResult};

use jgabs_core::{Cmd, ViewConfig};
use jgabs_dom::DomError;

/// `document.readyState` while the parser is still running.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const READY_STATE_LOADING: &str = "loading";

/// Host error type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The in-memory document rejected an operation.
    Dom(DomError),
    /// [`StepHost::step`] was called before [`StepHost::init`].
    NotInitialized,
    /// The options object could not be decoded into a [`ViewConfig`].
    InvalidConfig(String),
}

impl core::fmt::Display for HostError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Dom(err) => write!(f, "document error: {err}"),
            Self::NotInitialized => write!(f, "host stepped before init"),
            Self::InvalidConfig(msg) => write!(f, "invalid options: {msg}"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dom(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DomError> for HostError {
    fn from(err: DomError) -> Self {
        Self::Dom(err)
    }
}

/// Decode a JSON options object into a [`ViewConfig`].
///
/// Missing keys keep their defaults; `None` or a blank string yields
/// [`ViewConfig::default`].
pub fn parse_options(json: Option<&str>) -> Result<ViewConfig, HostError> {
    match json.map(str::trim) {
        None | Some("") => Ok(ViewConfig::default()),
        Some(json) => {
            serde_json::from_str(json).map_err(|err| HostError::InvalidConfig(err.to_string()))
        }
    }
}

/// Whether a mount must wait for `DOMContentLoaded`.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn mount_is_deferred(ready_state: &str) -> bool {
    ready_state == READY_STATE_LOADING
}

/// The log line both hosts emit when a behavior handler returns an error.
pub(crate) fn handler_failure(event: &str, err: &dyn core::fmt::Display) -> Cmd {
    Cmd::log(format!("{event} handler failed: {err}"))
}

/// Native builds compile the browser binding as a stub so the workspace
/// checks on non-wasm targets. `mount` still validates the options object.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct JournalPage {
    config: Option<ViewConfig>,
}

#[cfg(not(target_arch = "wasm32"))]
impl JournalPage {
    pub fn new() -> Self {
        Self { config: None }
    }

    pub fn mount(&mut self, options_json: Option<String>) -> Result<(), HostError> {
        self.config = Some(parse_options(options_json.as_deref())?);
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> Option<&ViewConfig> {
        self.config.as_ref()
    }

    pub fn destroy(&mut self) {
        self.config = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jgabs_core::Behaviors;
    use pretty_assertions::assert_eq;

    #[test]
    fn blank_options_are_defaults() {
        assert_eq!(parse_options(None).unwrap(), ViewConfig::default());
        assert_eq!(parse_options(Some("  ")).unwrap(), ViewConfig::default());
    }

    #[test]
    fn partial_options_override_only_named_keys() {
        let config =
            parse_options(Some(r#"{"active_class":"current","behaviors":"NAV | FORMS"}"#)).unwrap();
        assert_eq!(config.active_class, "current");
        assert_eq!(config.behaviors, Behaviors::NAV | Behaviors::FORMS);
        assert_eq!(config.tab_trigger_selector, ".tab-btn");
    }

    #[test]
    fn malformed_options_are_invalid_config() {
        let err = parse_options(Some("{not json")).unwrap_err();
        assert!(matches!(err, HostError::InvalidConfig(_)), "{err:?}");
        assert!(err.to_string().starts_with("invalid options:"));
    }

    #[test]
    fn dom_errors_keep_their_source() {
        let err = HostError::from(DomError::Cycle);
        assert_eq!(err.to_string(), "document error: append would create a cycle");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn only_a_loading_document_defers_the_mount() {
        assert!(mount_is_deferred("loading"));
        assert!(!mount_is_deferred("interactive"));
        assert!(!mount_is_deferred("complete"));
    }

    #[test]
    fn handler_failures_become_log_commands() {
        assert_eq!(
            handler_failure("click", &DomError::Cycle),
            Cmd::Log("click handler failed: append would create a cycle".to_string())
        );
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn native_stub_validates_and_forgets_options() {
        let mut page = JournalPage::new();
        assert!(page.mount(Some("42".into())).is_err());
        page.mount(Some(r#"{"latest_tab_id":"newest"}"#.into())).unwrap();
        assert_eq!(page.config().map(|c| c.latest_tab_id.as_str()), Some("newest"));
        page.destroy();
        assert!(page.config().is_none());
    }
}
