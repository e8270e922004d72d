//! Configuration structures.
//!
//! The host hands the connector a flat string map. It is resolved once, at
//! initialization, into [`ConnectorSettings`]; a missing required key is a
//! fatal [`Error::Configuration`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::types::{Error, Result};
use crate::validation::non_empty;

/// Flat configuration map as supplied by the host.
pub type ConfigMap = HashMap<String, String>;

/// User agent sent to the vendor when none is configured.
pub const DEFAULT_USER_AGENT: &str = "Sitefinity";

/// File format profile used for uploaded documents when none is configured.
pub const DEFAULT_FILE_FORMAT: &str = "XLIFF";

/// Keys recognised in the host configuration map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Url,
    Username,
    Password,
    UserAgent,
    Project,
    FileFormat,
    SubmissionPrefix,
}

impl ConfigKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Url => "url",
            ConfigKey::Username => "username",
            ConfigKey::Password => "password",
            ConfigKey::UserAgent => "userAgent",
            ConfigKey::Project => "project",
            ConfigKey::FileFormat => "fileFormatProfile",
            ConfigKey::SubmissionPrefix => "submissionPrefix",
        }
    }

    fn require(self, map: &ConfigMap) -> Result<String> {
        non_empty(map, self.as_str())
            .map(str::to_string)
            .ok_or_else(|| Error::configuration(self.as_str()))
    }

    fn optional(self, map: &ConfigMap) -> Option<String> {
        non_empty(map, self.as_str()).map(str::to_string)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection parameters for one Project Director endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDirectorConfig {
    /// Base URL of the Project Director installation.
    pub url: String,
    pub username: String,
    pub password: String,
    pub user_agent: String,
}

impl ProjectDirectorConfig {
    /// Resolve connection parameters, failing on the first missing key in
    /// the order url, username, password.
    pub fn from_map(map: &ConfigMap) -> Result<Self> {
        let url = ConfigKey::Url.require(map)?;
        let username = ConfigKey::Username.require(map)?;
        let password = ConfigKey::Password.require(map)?;
        let user_agent = ConfigKey::UserAgent
            .optional(map)
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());

        Ok(Self {
            url,
            username,
            password,
            user_agent,
        })
    }
}

impl fmt::Debug for ProjectDirectorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProjectDirectorConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Fully resolved connector configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectorSettings {
    /// Vendor connection parameters.
    pub director: ProjectDirectorConfig,

    /// Short code of the vendor project all submissions go to.
    pub project_short_code: String,

    /// File format profile attached to uploaded documents.
    pub file_format: String,

    /// Prepended verbatim to generated submission names.
    #[serde(default)]
    pub submission_prefix: Option<String>,
}

impl ConnectorSettings {
    pub fn from_map(map: &ConfigMap) -> Result<Self> {
        let director = ProjectDirectorConfig::from_map(map)?;
        let project_short_code = ConfigKey::Project.require(map)?;
        let file_format = ConfigKey::FileFormat
            .optional(map)
            .unwrap_or_else(|| DEFAULT_FILE_FORMAT.to_string());
        let submission_prefix = ConfigKey::SubmissionPrefix.optional(map);

        Ok(Self {
            director,
            project_short_code,
            file_format,
            submission_prefix,
        })
    }

    /// Prefix for submission names, empty when none is configured.
    pub fn prefix(&self) -> &str {
        self.submission_prefix.as_deref().unwrap_or("")
    }
}

/// Build a [`ConfigMap`] from a JSON object of string values, as hosts that
/// persist connector settings in JSON store them. Non-string values are
/// rejected.
pub fn config_map_from_json(value: &serde_json::Value) -> Result<ConfigMap> {
    let object = value
        .as_object()
        .ok_or_else(|| Error::validation("connector configuration must be a JSON object"))?;

    object
        .iter()
        .map(|(key, v)| {
            v.as_str()
                .map(|s| (key.clone(), s.to_string()))
                .ok_or_else(|| Error::validation(format!("configuration value '{}' must be a string", key)))
        })
        .collect()
}
