#![forbid(unsafe_code)]

//! Host-driven runner over the in-memory document.
//!
//! [`StepHost`] plays the browser's part for a [`ViewController`] without a
//! browser. The caller controls the event loop:
//!
//! 1. [`StepHost::init`] runs the page-load sequence once.
//! 2. Queue events with [`StepHost::push_event`].
//! 3. [`StepHost::step`] dispatches the queue and executes each returned
//!    [`Cmd`].
//! 4. Read alerts, log lines and per-event dispatch records through
//!    [`StepHost::take_outputs`].
//!
//! # Example
//!
//! ```
//! use jgabs_core::{Event, ViewConfig};
//! use jgabs_web::StepHost;
//!
//! let html = r#"<form id="contactForm"><input id="email"></form>"#;
//! let mut host = StepHost::from_html(html, "/contact.html", ViewConfig::default()).unwrap();
//! host.init().unwrap();
//!
//! let form = host.document().element_by_id("contactForm").unwrap().unwrap();
//! host.push_event(Event::Submit(form));
//! host.step().unwrap();
//!
//! let outputs = host.take_outputs();
//! assert!(outputs.dispatches[0].default_prevented);
//! assert_eq!(outputs.alerts.len(), 1);
//! ```

use std::collections::VecDeque;

use jgabs_core::{Cmd, Event, ViewConfig, debug, warn};
use jgabs_dom::{Document, NodeId};
use jgabs_view::ViewController;

use crate::{HostError, handler_failure};

/// What happened to one dispatched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchRecord {
    /// DOM event type (`click`, `change`, `submit`).
    pub event: &'static str,
    pub target: NodeId,
    /// Whether the handler cancelled the native default action.
    pub default_prevented: bool,
    /// Whether the handler failed. The failure was logged and the step went on.
    pub failed: bool,
}

/// Effects captured since the last [`StepHost::take_outputs`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostOutputs {
    /// Messages the behaviors asked to show, in order.
    pub alerts: Vec<String>,
    /// Diagnostic lines, including handler failures.
    pub logs: Vec<String>,
    /// One record per dispatched event, in dispatch order.
    pub dispatches: Vec<DispatchRecord>,
}

/// Result of a single [`StepHost::step`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepResult {
    /// Number of events dispatched during this step.
    pub events_processed: u32,
    /// Number of those whose handler returned an error.
    pub events_failed: u32,
    /// Steps completed so far, this one included.
    pub step_idx: u64,
}

/// Host-driven, non-blocking runner for the page behaviors.
///
/// The document arena never frees nodes, so every rebuild of the latest view
/// leaves the previous cards allocated but detached. Memory grows by one
/// latest view per reopen of the latest tab; long sessions should build a
/// fresh host rather than step one indefinitely.
#[derive(Debug)]
pub struct StepHost {
    document: Document,
    config: ViewConfig,
    controller: Option<ViewController<NodeId>>,
    queue: VecDeque<Event<NodeId>>,
    outputs: HostOutputs,
    step_idx: u64,
}

impl StepHost {
    /// Wrap an already-built document.
    #[must_use]
    pub fn new(document: Document, config: ViewConfig) -> Self {
        Self {
            document,
            config,
            controller: None,
            queue: VecDeque::new(),
            outputs: HostOutputs::default(),
            step_idx: 0,
        }
    }

    /// Parse `html` and place it at `location` (the page path).
    pub fn from_html(html: &str, location: &str, config: ViewConfig) -> Result<Self, HostError> {
        let document = Document::parse(html)?.with_location(location);
        Ok(Self::new(document, config))
    }

    /// Run the page-load sequence. A second call is ignored.
    pub fn init(&mut self) -> Result<(), HostError> {
        if self.controller.is_some() {
            warn!("step host already initialized");
            return Ok(());
        }
        let controller = ViewController::initialize(&mut self.document, self.config.clone())?;
        debug!(
            listeners = controller.listeners().len(),
            location = self.document.location(),
            "step host initialized"
        );
        self.controller = Some(controller);
        Ok(())
    }

    /// Queue an event for the next [`step`](Self::step).
    pub fn push_event(&mut self, event: Event<NodeId>) {
        self.queue.push_back(event);
    }

    /// Dispatch every queued event and execute the commands they return.
    ///
    /// A failing handler does not abort the step: the error is logged and
    /// recorded, and the remaining events are still dispatched.
    pub fn step(&mut self) -> Result<StepResult, HostError> {
        let Some(controller) = self.controller.as_mut() else {
            return Err(HostError::NotInitialized);
        };

        let mut events_processed: u32 = 0;
        let mut events_failed: u32 = 0;
        while let Some(event) = self.queue.pop_front() {
            events_processed += 1;
            let mut record = DispatchRecord {
                event: event.kind(),
                target: *event.target(),
                default_prevented: false,
                failed: false,
            };
            match controller.update(&mut self.document, event) {
                Ok(cmd) => execute_cmd(cmd, &mut record, &mut self.outputs),
                Err(err) => {
                    warn!(error = %err, event = record.event, "event handler failed");
                    execute_cmd(
                        handler_failure(record.event, &err),
                        &mut record,
                        &mut self.outputs,
                    );
                    record.failed = true;
                    events_failed += 1;
                }
            }
            self.outputs.dispatches.push(record);
        }

        self.step_idx += 1;
        Ok(StepResult {
            events_processed,
            events_failed,
            step_idx: self.step_idx,
        })
    }

    /// Take the captured outputs, leaving empty defaults.
    pub fn take_outputs(&mut self) -> HostOutputs {
        std::mem::take(&mut self.outputs)
    }

    /// Read the captured outputs without consuming them.
    #[must_use]
    pub fn outputs(&self) -> &HostOutputs {
        &self.outputs
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable document access, for simulating user input between steps.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    #[must_use]
    pub fn controller(&self) -> Option<&ViewController<NodeId>> {
        self.controller.as_ref()
    }

    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.controller.is_some()
    }

    #[must_use]
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }
}

fn execute_cmd(cmd: Cmd, record: &mut DispatchRecord, outputs: &mut HostOutputs) {
    match cmd {
        Cmd::None => {}
        Cmd::PreventDefault => record.default_prevented = true,
        Cmd::Alert(msg) => outputs.alerts.push(msg),
        Cmd::Log(msg) => outputs.logs.push(msg),
        Cmd::Batch(cmds) => {
            for cmd in cmds {
                execute_cmd(cmd, record, outputs);
            }
        }
    }
}
