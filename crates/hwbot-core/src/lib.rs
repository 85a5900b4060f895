//! Core domain + control loop for the homework status bot.
//!
//! This crate is framework-agnostic. The status API and Telegram live behind
//! ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod messaging;
pub mod poller;
pub mod ports;
pub mod validator;
pub mod verdict;

pub use errors::{Error, Result};
