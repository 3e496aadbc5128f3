//! Provider configuration.
//!
//! This module provides the configuration types used to reach Ansible Forms
//! management endpoints and to tune response normalization.
//!
//! # Overview
//!
//! The main types in this module are:
//!
//! - [`ProviderConfig`]: The provider-level configuration
//! - [`ProviderConfigBuilder`]: A builder for constructing [`ProviderConfig`] instances
//! - [`ConnectionProfile`]: Host and credentials for one endpoint
//! - [`ProfileName`], [`Hostname`], [`Username`], [`Password`]: Validated newtypes
//!
//! # Example
//!
//! ```rust
//! use ansible_forms::ProviderConfig;
//! use std::time::Duration;
//!
//! let config: ProviderConfig = r#"{
//!     "connection_profiles": [
//!         {"name": "cluster1", "hostname": "forms.example.com", "username": "admin", "password": "secret"}
//!     ]
//! }"#
//! .parse()
//! .unwrap();
//!
//! assert_eq!(config.job_completion_timeout(), Duration::from_secs(600));
//! assert!(config.profile("cluster1").unwrap().validate_certs());
//! ```

mod newtypes;
mod profile;

pub use newtypes::{Hostname, Password, ProfileName, Username};
pub use profile::{ConnectionProfile, ConnectionProfileBuilder};

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::rest::NormalizerPolicy;

/// Default time to wait for a job to complete.
pub const DEFAULT_JOB_COMPLETION_TIMEOUT: Duration = Duration::from_secs(600);

/// Configuration shared by every resource and data source of the provider.
///
/// # Thread Safety
///
/// `ProviderConfig` is `Clone`, `Send`, and `Sync`, making it safe to share
/// across threads and async tasks.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    connection_profiles: BTreeMap<ProfileName, ConnectionProfile>,
    job_completion_timeout: Duration,
    version: String,
    normalizer_policy: NormalizerPolicy,
    user_agent_prefix: Option<String>,
}

impl ProviderConfig {
    /// Creates a new builder for constructing a `ProviderConfig`.
    #[must_use]
    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::new()
    }

    /// Builds a configuration from a provider block in JSON form.
    ///
    /// The block has the shape
    /// `{"job_completion_timeout": 600, "connection_profiles": [{"name", "hostname", "username", "password", "validate_certs"}]}`.
    /// `job_completion_timeout` (seconds) and `validate_certs` are optional;
    /// unknown attributes are ignored.
    ///
    /// Profile names must be unique: a repeated name is an error, the later
    /// entry does not replace the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProviderBlock`] if the block does not have
    /// the expected shape, [`ConfigError::DuplicateProfile`] if two profiles
    /// share a name, or the validation error of the first invalid value.
    pub fn from_json(block: &serde_json::Value) -> Result<Self, ConfigError> {
        let block = ProviderBlock::deserialize(block).map_err(|e| {
            ConfigError::InvalidProviderBlock {
                reason: e.to_string(),
            }
        })?;
        block.into_config()
    }

    /// Returns all configured connection profiles, ordered by name.
    #[must_use]
    pub const fn connection_profiles(&self) -> &BTreeMap<ProfileName, ConnectionProfile> {
        &self.connection_profiles
    }

    /// Looks up a connection profile by name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownProfile`] if no profile has that name.
    pub fn profile(&self, name: &str) -> Result<&ConnectionProfile, ConfigError> {
        ProfileName::new(name)
            .ok()
            .and_then(|key| self.connection_profiles.get(&key))
            .ok_or_else(|| ConfigError::UnknownProfile {
                name: name.to_string(),
            })
    }

    /// Returns how long to wait for a job to complete.
    #[must_use]
    pub const fn job_completion_timeout(&self) -> Duration {
        self.job_completion_timeout
    }

    /// Returns the provider version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the response normalizer policy.
    #[must_use]
    pub const fn normalizer_policy(&self) -> &NormalizerPolicy {
        &self.normalizer_policy
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

impl FromStr for ProviderConfig {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let block: serde_json::Value =
            serde_json::from_str(s).map_err(|e| ConfigError::InvalidProviderBlock {
                reason: e.to_string(),
            })?;
        Self::from_json(&block)
    }
}

// Verify ProviderConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProviderConfig>();
};

/// Builder for constructing [`ProviderConfig`] instances.
///
/// At least one connection profile is required.
///
/// # Defaults
///
/// - `job_completion_timeout`: 600 seconds
/// - `version`: the crate version
/// - `normalizer_policy`: [`NormalizerPolicy::default`]
/// - `user_agent_prefix`: `None`
///
/// # Example
///
/// ```rust
/// use ansible_forms::{ConnectionProfile, Hostname, Password, ProfileName, ProviderConfig, Username};
/// use std::time::Duration;
///
/// let profile = ConnectionProfile::builder()
///     .hostname(Hostname::new("forms.example.com").unwrap())
///     .username(Username::new("admin").unwrap())
///     .password(Password::new("secret").unwrap())
///     .build()
///     .unwrap();
///
/// let config = ProviderConfig::builder()
///     .connection_profile(ProfileName::new("cluster1").unwrap(), profile)
///     .job_completion_timeout(Duration::from_secs(120))
///     .build()
///     .unwrap();
///
/// assert_eq!(config.job_completion_timeout(), Duration::from_secs(120));
/// ```
#[derive(Debug, Default)]
pub struct ProviderConfigBuilder {
    connection_profiles: Vec<(ProfileName, ConnectionProfile)>,
    job_completion_timeout: Option<Duration>,
    version: Option<String>,
    normalizer_policy: Option<NormalizerPolicy>,
    user_agent_prefix: Option<String>,
}

impl ProviderConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named connection profile.
    #[must_use]
    pub fn connection_profile(mut self, name: ProfileName, profile: ConnectionProfile) -> Self {
        self.connection_profiles.push((name, profile));
        self
    }

    /// Sets how long to wait for a job to complete.
    #[must_use]
    pub const fn job_completion_timeout(mut self, timeout: Duration) -> Self {
        self.job_completion_timeout = Some(timeout);
        self
    }

    /// Sets the provider version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Sets the response normalizer policy.
    #[must_use]
    pub const fn normalizer_policy(mut self, policy: NormalizerPolicy) -> Self {
        self.normalizer_policy = Some(policy);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ProviderConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoConnectionProfiles`] if no profile was added,
    /// or [`ConfigError::DuplicateProfile`] if a profile name is used twice.
    pub fn build(self) -> Result<ProviderConfig, ConfigError> {
        if self.connection_profiles.is_empty() {
            return Err(ConfigError::NoConnectionProfiles);
        }

        let mut connection_profiles = BTreeMap::new();
        for (name, profile) in self.connection_profiles {
            if connection_profiles.contains_key(&name) {
                return Err(ConfigError::DuplicateProfile {
                    name: name.to_string(),
                });
            }
            connection_profiles.insert(name, profile);
        }

        Ok(ProviderConfig {
            connection_profiles,
            job_completion_timeout: self
                .job_completion_timeout
                .unwrap_or(DEFAULT_JOB_COMPLETION_TIMEOUT),
            version: self
                .version
                .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string()),
            normalizer_policy: self.normalizer_policy.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

/// Provider block as written by the user.
#[derive(Debug, Deserialize)]
struct ProviderBlock {
    job_completion_timeout: Option<u64>,
    #[serde(default)]
    connection_profiles: Vec<ProfileBlock>,
}

#[derive(Debug, Deserialize)]
struct ProfileBlock {
    name: String,
    hostname: String,
    username: String,
    password: String,
    validate_certs: Option<bool>,
}

impl ProviderBlock {
    fn into_config(self) -> Result<ProviderConfig, ConfigError> {
        let mut builder = ProviderConfig::builder();
        if let Some(seconds) = self.job_completion_timeout {
            builder = builder.job_completion_timeout(Duration::from_secs(seconds));
        }

        for block in self.connection_profiles {
            let mut profile = ConnectionProfile::builder()
                .hostname(Hostname::new(block.hostname)?)
                .username(Username::new(block.username)?)
                .password(Password::new(block.password)?);
            if let Some(validate) = block.validate_certs {
                profile = profile.validate_certs(validate);
            }
            builder = builder.connection_profile(ProfileName::new(block.name)?, profile.build()?);
        }

        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile(host: &str) -> ConnectionProfile {
        ConnectionProfile::builder()
            .hostname(Hostname::new(host).unwrap())
            .username(Username::new("admin").unwrap())
            .password(Password::new("secret").unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_requires_a_profile() {
        let result = ProviderConfigBuilder::new().build();
        assert!(matches!(result, Err(ConfigError::NoConnectionProfiles)));
    }

    #[test]
    fn test_builder_rejects_duplicate_profiles() {
        let result = ProviderConfig::builder()
            .connection_profile(ProfileName::new("a").unwrap(), profile("h1"))
            .connection_profile(ProfileName::new("a").unwrap(), profile("h2"))
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::DuplicateProfile { name }) if name == "a"
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = ProviderConfig::builder()
            .connection_profile(ProfileName::new("a").unwrap(), profile("h1"))
            .build()
            .unwrap();

        assert_eq!(config.job_completion_timeout(), Duration::from_secs(600));
        assert_eq!(config.version(), env!("CARGO_PKG_VERSION"));
        assert_eq!(config.normalizer_policy(), &NormalizerPolicy::default());
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_profile_lookup() {
        let config = ProviderConfig::builder()
            .connection_profile(ProfileName::new("a").unwrap(), profile("h1"))
            .connection_profile(ProfileName::new("b").unwrap(), profile("h2"))
            .build()
            .unwrap();

        assert_eq!(config.profile("b").unwrap().hostname().as_ref(), "h2");
        assert!(matches!(
            config.profile("c"),
            Err(ConfigError::UnknownProfile { name }) if name == "c"
        ));
        assert!(config.profile("").is_err());
        assert_eq!(config.connection_profiles().len(), 2);
    }

    #[test]
    fn test_from_json_applies_block_defaults() {
        let config = ProviderConfig::from_json(&json!({
            "endpoint": "ignored",
            "connection_profiles": [
                {"name": "a", "hostname": "h1", "username": "u", "password": "p"},
                {"name": "b", "hostname": "h2", "username": "u", "password": "p", "validate_certs": false}
            ]
        }))
        .unwrap();

        assert_eq!(config.job_completion_timeout(), DEFAULT_JOB_COMPLETION_TIMEOUT);
        assert!(config.profile("a").unwrap().validate_certs());
        assert!(!config.profile("b").unwrap().validate_certs());
    }

    #[test]
    fn test_from_json_reads_timeout() {
        let config = ProviderConfig::from_json(&json!({
            "job_completion_timeout": 30,
            "connection_profiles": [
                {"name": "a", "hostname": "h1", "username": "u", "password": "p"}
            ]
        }))
        .unwrap();

        assert_eq!(config.job_completion_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_from_json_rejects_missing_profiles() {
        let result = ProviderConfig::from_json(&json!({"job_completion_timeout": 30}));
        assert!(matches!(result, Err(ConfigError::NoConnectionProfiles)));
    }

    #[test]
    fn test_from_json_reports_invalid_values() {
        let result = ProviderConfig::from_json(&json!({
            "connection_profiles": [
                {"name": "a", "hostname": "https://h1", "username": "u", "password": "p"}
            ]
        }));
        assert!(matches!(result, Err(ConfigError::InvalidHostname { .. })));

        let result = ProviderConfig::from_json(&json!({
            "connection_profiles": [{"name": "a", "hostname": "h1"}]
        }));
        assert!(matches!(
            result,
            Err(ConfigError::InvalidProviderBlock { .. })
        ));
    }

    #[test]
    fn test_from_str_rejects_invalid_json() {
        let result: Result<ProviderConfig, _> = "{not json".parse();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidProviderBlock { .. })
        ));
    }
}
