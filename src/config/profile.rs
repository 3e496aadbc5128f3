//! Connection profiles.

use crate::config::{Hostname, Password, Username};
use crate::error::ConfigError;

/// Host and credentials for one Ansible Forms management endpoint.
///
/// # Example
///
/// ```rust
/// use ansible_forms::{ConnectionProfile, Hostname, Password, Username};
///
/// let profile = ConnectionProfile::builder()
///     .hostname(Hostname::new("forms.example.com").unwrap())
///     .username(Username::new("admin").unwrap())
///     .password(Password::new("secret").unwrap())
///     .build()
///     .unwrap();
///
/// assert!(profile.validate_certs());
/// assert_eq!(profile.max_concurrent_requests(), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConnectionProfile {
    hostname: Hostname,
    username: Username,
    password: Password,
    validate_certs: bool,
    max_concurrent_requests: usize,
}

impl ConnectionProfile {
    /// Creates a new builder for constructing a `ConnectionProfile`.
    #[must_use]
    pub fn builder() -> ConnectionProfileBuilder {
        ConnectionProfileBuilder::default()
    }

    /// Returns the management host.
    #[must_use]
    pub const fn hostname(&self) -> &Hostname {
        &self.hostname
    }

    /// Returns the management user name.
    #[must_use]
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Returns the management password.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }

    /// Returns whether TLS certificates are validated.
    #[must_use]
    pub const fn validate_certs(&self) -> bool {
        self.validate_certs
    }

    /// Returns the concurrent request limit, 0 meaning unlimited.
    #[must_use]
    pub const fn max_concurrent_requests(&self) -> usize {
        self.max_concurrent_requests
    }
}

/// Builder for [`ConnectionProfile`].
///
/// # Defaults
///
/// - `validate_certs`: `true`
/// - `max_concurrent_requests`: `0` (unlimited)
#[derive(Debug, Default)]
pub struct ConnectionProfileBuilder {
    hostname: Option<Hostname>,
    username: Option<Username>,
    password: Option<Password>,
    validate_certs: Option<bool>,
    max_concurrent_requests: Option<usize>,
}

impl ConnectionProfileBuilder {
    /// Sets the management host (required).
    #[must_use]
    pub fn hostname(mut self, hostname: Hostname) -> Self {
        self.hostname = Some(hostname);
        self
    }

    /// Sets the management user name (required).
    #[must_use]
    pub fn username(mut self, username: Username) -> Self {
        self.username = Some(username);
        self
    }

    /// Sets the management password (required).
    #[must_use]
    pub fn password(mut self, password: Password) -> Self {
        self.password = Some(password);
        self
    }

    /// Sets whether TLS certificates are validated.
    #[must_use]
    pub const fn validate_certs(mut self, validate: bool) -> Self {
        self.validate_certs = Some(validate);
        self
    }

    /// Sets the concurrent request limit.
    #[must_use]
    pub const fn max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent_requests = Some(max);
        self
    }

    /// Builds the [`ConnectionProfile`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `hostname`,
    /// `username` or `password` is not set.
    pub fn build(self) -> Result<ConnectionProfile, ConfigError> {
        let hostname = self
            .hostname
            .ok_or(ConfigError::MissingRequiredField { field: "hostname" })?;
        let username = self
            .username
            .ok_or(ConfigError::MissingRequiredField { field: "username" })?;
        let password = self
            .password
            .ok_or(ConfigError::MissingRequiredField { field: "password" })?;

        Ok(ConnectionProfile {
            hostname,
            username,
            password,
            validate_certs: self.validate_certs.unwrap_or(true),
            max_concurrent_requests: self.max_concurrent_requests.unwrap_or(0),
        })
    }
}
