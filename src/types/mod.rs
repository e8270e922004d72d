//! Core types for the connector.
//!
//! This module provides foundational types used throughout the crate:
//! - **IDs**: Strongly-typed identifiers (JobId, Ticket)
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Host configuration map and its resolved settings

mod config;
mod errors;
mod ids;

pub use config::{
    config_map_from_json, ConfigKey, ConfigMap, ConnectorSettings, ProjectDirectorConfig,
    DEFAULT_FILE_FORMAT, DEFAULT_USER_AGENT,
};
pub use errors::{Error, Result};
pub use ids::{JobId, Ticket};
