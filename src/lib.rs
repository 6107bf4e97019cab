//! Custom actions and recognizers for a MAA-style automation agent.
//!
//! The automation host drives a pipeline and calls into this crate by name
//! (see [`registry::Registry`]). Handlers talk to the device only through the
//! [`host::AutomationHost`] trait and share state through
//! [`config::ConfigStore`].

pub mod actions;
pub mod compare;
pub mod config;
pub mod dialogs;
pub mod extract;
pub mod geometry;
pub mod host;
pub mod logging;
pub mod paths;
pub mod recognizers;
pub mod registry;
pub mod search;
pub mod spreadsheet;
pub mod window;
