//! Foundation types for Broadsheet.
//!
//! This crate holds what every other Broadsheet crate shares: the error
//! type and the reader configuration loaded from TOML.

pub mod config;
pub mod error;

pub use config::BroadsheetConfig;
pub use error::{BroadsheetError, Result};
