pub mod common;
pub mod config;
pub mod diagnostics;
pub mod launcher;
pub mod notifier;
pub mod poller;
pub mod service;

pub use crate::config::*;
