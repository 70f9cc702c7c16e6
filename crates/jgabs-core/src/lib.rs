#![forbid(unsafe_code)]

//! Core: the document host abstraction, canonical events, commands, and
//! configuration shared by the JGABS page behaviors.

pub mod config;
pub mod dom;
pub mod event;
pub mod location;
pub mod logging;

pub use config::{Behaviors, ViewConfig};
pub use dom::Dom;
pub use event::{Cmd, Event};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, warn};
