//! Validated newtype wrappers for configuration values.
//!
//! This module provides type-safe wrappers around string values that validate
//! their contents on construction. Invalid values are rejected with clear error messages.

use crate::error::ConfigError;
use std::fmt;

/// The name of a connection profile.
///
/// # Example
///
/// ```rust
/// use ansible_forms::ProfileName;
///
/// let name = ProfileName::new("cluster1").unwrap();
/// assert_eq!(name.as_ref(), "cluster1");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProfileName(String);

impl ProfileName {
    /// Creates a new validated profile name.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyProfileName`] if the name is empty.
    pub fn new(name: impl Into<String>) -> Result<Self, ConfigError> {
        let name = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::EmptyProfileName);
        }
        Ok(Self(name.to_string()))
    }
}

impl AsRef<str> for ProfileName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A validated Ansible Forms management host.
///
/// Accepts a host name or IP address, optionally followed by a port. A scheme
/// or path is rejected: the client always talks `https://{hostname}/api`.
///
/// # Example
///
/// ```rust
/// use ansible_forms::Hostname;
///
/// let host = Hostname::new("forms.example.com:8443").unwrap();
/// assert_eq!(host.as_ref(), "forms.example.com:8443");
///
/// assert!(Hostname::new("https://forms.example.com").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hostname(String);

impl Hostname {
    /// Creates a new validated hostname.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidHostname`] if the hostname is empty,
    /// contains whitespace, a scheme, or a path.
    pub fn new(hostname: impl Into<String>) -> Result<Self, ConfigError> {
        let hostname = hostname.into();
        let hostname = hostname.trim().to_string();

        let invalid = hostname.is_empty()
            || hostname.contains("://")
            || hostname
                .chars()
                .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@'));
        if invalid {
            return Err(ConfigError::InvalidHostname { hostname });
        }

        Ok(Self(hostname))
    }
}

impl AsRef<str> for Hostname {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated management user name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Creates a new validated user name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyUsername`] if the user name is empty.
    pub fn new(username: impl Into<String>) -> Result<Self, ConfigError> {
        let username = username.into();
        if username.is_empty() {
            return Err(ConfigError::EmptyUsername);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A validated management password.
///
/// # Security
///
/// The `Debug` implementation masks the value, displaying only
/// `Password(*****)`.
///
/// # Example
///
/// ```rust
/// use ansible_forms::Password;
///
/// let password = Password::new("hunter2").unwrap();
/// assert_eq!(format!("{:?}", password), "Password(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Creates a new validated password.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyPassword`] if the password is empty.
    pub fn new(password: impl Into<String>) -> Result<Self, ConfigError> {
        let password = password.into();
        if password.is_empty() {
            return Err(ConfigError::EmptyPassword);
        }
        Ok(Self(password))
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(*****)")
    }
}
