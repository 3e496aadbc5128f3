//! Configuration error types.
//!
//! All configuration constructors return `Result<T, ConfigError>` so invalid
//! provider settings are rejected before any request is sent.
//!
//! # Example
//!
//! ```rust
//! use ansible_forms::{ConfigError, Username};
//!
//! let result = Username::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyUsername)));
//! ```

use thiserror::Error;

/// Errors that can occur while building the provider configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Connection profile name cannot be empty.
    #[error("Connection profile name cannot be empty.")]
    EmptyProfileName,

    /// Hostname is invalid.
    #[error("Invalid hostname '{hostname}'. Expected a host name or IP address, optionally with a port, without scheme or path.")]
    InvalidHostname {
        /// The invalid hostname that was provided.
        hostname: String,
    },

    /// Username cannot be empty.
    #[error("Username cannot be empty. Please provide the Ansible Forms management user name.")]
    EmptyUsername,

    /// Password cannot be empty.
    #[error("Password cannot be empty. Please provide the Ansible Forms management password.")]
    EmptyPassword,

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// No connection profile was configured.
    #[error("No connection profile: at least one connection profile must be defined.")]
    NoConnectionProfiles,

    /// Two connection profiles share a name.
    #[error("Connection profile '{name}' is defined more than once.")]
    DuplicateProfile {
        /// The duplicated profile name.
        name: String,
    },

    /// A connection profile was requested but is not configured.
    #[error("Connection profile '{name}' is not defined.")]
    UnknownProfile {
        /// The requested profile name.
        name: String,
    },

    /// The provider configuration block could not be read.
    #[error("Invalid provider configuration: {reason}")]
    InvalidProviderBlock {
        /// Why the block was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_hostname_error_message() {
        let error = ConfigError::InvalidHostname {
            hostname: "https://host/api".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("https://host/api"));
        assert!(message.contains("without scheme or path"));
    }

    #[test]
    fn test_missing_required_field_error_message() {
        let error = ConfigError::MissingRequiredField { field: "hostname" };
        let message = error.to_string();
        assert!(message.contains("hostname"));
        assert!(message.contains("must be set"));
    }

    #[test]
    fn test_profile_errors_name_the_profile() {
        let duplicate = ConfigError::DuplicateProfile {
            name: "cluster1".to_string(),
        };
        assert!(duplicate.to_string().contains("cluster1"));

        let unknown = ConfigError::UnknownProfile {
            name: "cluster2".to_string(),
        };
        assert!(unknown.to_string().contains("cluster2"));
    }

    #[test]
    fn test_error_implements_std_error() {
        let error = ConfigError::NoConnectionProfiles;
        // Verify it implements std::error::Error by using it as a dyn Error
        let _: &dyn std::error::Error = &error;
    }
}
