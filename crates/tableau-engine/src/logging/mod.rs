//! Logging utilities.
//!
//! The library itself only talks to the `log` facade. This module offers a
//! ready-made `env_logger` setup for hosts and tests that do not install
//! their own backend.

mod init;

pub use init::{init_logging, LoggingConfig};
