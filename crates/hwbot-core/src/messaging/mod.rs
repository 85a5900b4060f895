//! Outbound messaging: the transport port and the notifier built on it.

pub mod notifier;
pub mod port;
