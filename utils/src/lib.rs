//! Shared utilities for the remittance split services.

pub mod logging;

pub use logging::{init_logging, LogFormat, UnknownLogFormat};
