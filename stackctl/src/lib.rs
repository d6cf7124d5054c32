//! Lifecycle dispatcher for a docker compose stack.
//!
//! `stackctl start|stop|restart|update` maps one command token to a fixed
//! sequence of orchestrator calls, run against the compose file that lives
//! next to the binary.

pub mod cli;
pub mod common;
pub mod dispatch;
pub mod error;
pub mod logging;
