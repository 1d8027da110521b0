//! Test doubles for the host and the console.
//!
//! [`InMemoryHost`] implements [`RepositoryHost`](crate::github::RepositoryHost)
//! and [`Connect`](crate::menu::Connect); [`ScriptedConsole`] drives the menu
//! from a list of answers.

mod console;
mod host;

pub use console::{Output, ScriptedConsole};
pub use host::{HostCall, InMemoryHost, Operation};
