#![forbid(unsafe_code)]

//! Page behaviors for the JGABS journal site.
//!
//! [`ViewController::initialize`] wires four independent behaviors against a
//! [`jgabs_core::Dom`]:
//!
//! - [`nav`]: highlight the navigation link for the current page.
//! - [`tabs`]: one-active-tab switching, rebuilding the latest view when its
//!   tab opens.
//! - [`issues`] and [`latest`]: volume/issue filtering of issue cards, and the
//!   latest-articles view derived from the latest card.
//! - [`forms`]: acknowledge submission and contact forms without submitting.
//!
//! Events are fed back through [`ViewController::update`], which returns the
//! [`jgabs_core::Cmd`] the host must execute.

pub mod controller;
pub mod forms;
pub mod issues;
pub mod latest;
pub mod nav;
pub mod records;
pub mod tabs;

pub use controller::{Listener, ViewController};
pub use latest::{LatestOutcome, LatestView, NO_ISSUES};
pub use records::{ArticleEntry, Choice, FilterSelection, IssueCard, NavLink, TabTrigger};
