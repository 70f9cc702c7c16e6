#![forbid(unsafe_code)]

//! Canonical events and commands.
//!
//! Hosts translate their native events into [`Event`] values and hand them to
//! the view controller; the controller answers with a [`Cmd`] describing the
//! effects only the host can perform (cancelling the native default action,
//! showing an alert).

/// Canonical page event, generic over the host's node handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<N> {
    /// An element was activated (mouse click or keyboard activation).
    Click(N),
    /// A form control committed a new value.
    Change(N),
    /// A form is being submitted.
    Submit(N),
}

impl<N> Event<N> {
    /// The element the event was dispatched to.
    #[must_use]
    pub fn target(&self) -> &N {
        match self {
            Self::Click(node) | Self::Change(node) | Self::Submit(node) => node,
        }
    }

    /// Stable event name, matching the DOM event type.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Click(_) => "click",
            Self::Change(_) => "change",
            Self::Submit(_) => "submit",
        }
    }
}

/// Effects requested from the host.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Cmd {
    /// No operation.
    #[default]
    None,
    /// Cancel the native default action of the event being handled.
    PreventDefault,
    /// Show a blocking user-facing message.
    Alert(String),
    /// Record a diagnostic line in the host's log.
    Log(String),
    /// Execute multiple commands in order.
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a no-op command.
    #[inline]
    pub fn none() -> Self {
        Self::None
    }

    /// Create an alert command.
    #[inline]
    pub fn alert(msg: impl Into<String>) -> Self {
        Self::Alert(msg.into())
    }

    /// Create a log command.
    #[inline]
    pub fn log(msg: impl Into<String>) -> Self {
        Self::Log(msg.into())
    }

    /// Create a batch of commands, collapsing trivial batches.
    pub fn batch(cmds: Vec<Self>) -> Self {
        let mut cmds: Vec<Self> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Self::None,
            1 => cmds.remove(0),
            _ => Self::Batch(cmds),
        }
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Whether executing this command cancels the default action.
    pub fn prevents_default(&self) -> bool {
        match self {
            Self::PreventDefault => true,
            Self::Batch(cmds) => cmds.iter().any(Self::prevents_default),
            _ => false,
        }
    }

    /// Flatten into leaf commands in execution order.
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Self::None => Vec::new(),
            Self::Batch(cmds) => cmds.into_iter().flat_map(Self::flatten).collect(),
            leaf => vec![leaf],
        }
    }

    /// Return a stable name for tracing.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::PreventDefault => "PreventDefault",
            Self::Alert(_) => "Alert",
            Self::Log(_) => "Log",
            Self::Batch(_) => "Batch",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_collapses_none_and_singletons() {
        assert_eq!(Cmd::batch(vec![]), Cmd::None);
        assert_eq!(Cmd::batch(vec![Cmd::None, Cmd::None]), Cmd::None);
        assert_eq!(
            Cmd::batch(vec![Cmd::None, Cmd::PreventDefault]),
            Cmd::PreventDefault
        );
        assert_eq!(
            Cmd::batch(vec![Cmd::PreventDefault, Cmd::alert("hi")]),
            Cmd::Batch(vec![Cmd::PreventDefault, Cmd::Alert("hi".into())])
        );
    }

    #[test]
    fn prevents_default_looks_inside_batches() {
        assert!(!Cmd::none().prevents_default());
        assert!(!Cmd::alert("x").prevents_default());
        let nested = Cmd::Batch(vec![
            Cmd::log("a"),
            Cmd::Batch(vec![Cmd::alert("b"), Cmd::PreventDefault]),
        ]);
        assert!(nested.prevents_default());
    }

    #[test]
    fn flatten_preserves_order() {
        let cmd = Cmd::Batch(vec![
            Cmd::log("1"),
            Cmd::Batch(vec![Cmd::None, Cmd::alert("2")]),
            Cmd::PreventDefault,
        ]);
        assert_eq!(
            cmd.flatten(),
            vec![Cmd::log("1"), Cmd::alert("2"), Cmd::PreventDefault]
        );
    }

    #[test]
    fn event_accessors() {
        let ev = Event::Submit(7u32);
        assert_eq!(*ev.target(), 7);
        assert_eq!(ev.kind(), "submit");
        assert_eq!(Event::Click(()).kind(), "click");
        assert_eq!(Event::Change(()).kind(), "change");
    }
}
