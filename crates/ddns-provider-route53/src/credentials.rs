// # Credential Providers
//
// The Route 53 provider never discovers credentials on its own. It asks an
// injected `CredentialProvider` for a ready `SdkConfig` right before it
// submits a change.
//
// `EnvironmentCredentials` follows the host's AWS conventions: environment
// variables, shared config/credentials files, SSO, container and instance
// metadata. A named profile pins the shared-file lookup to that profile.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::fmt;

/// Region used when none is configured (Route 53 is a global service)
pub const DEFAULT_REGION: &str = "us-east-1";

/// Source of AWS configuration and credentials
#[async_trait]
pub trait CredentialProvider: Send + Sync + fmt::Debug {
    /// Load the SDK configuration for one provider session
    async fn load(&self) -> SdkConfig;
}

/// Credentials from the host environment's standard chain
///
/// # Security
///
/// The Debug implementation only shows the profile name.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentCredentials {
    /// Named profile (default chain when absent)
    profile: Option<String>,
}

impl EnvironmentCredentials {
    /// Use the default credential chain
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a named profile from the shared config/credentials files
    pub fn with_profile(profile: impl Into<String>) -> Self {
        Self {
            profile: Some(profile.into()),
        }
    }

    /// The configured profile, if any
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }
}

#[async_trait]
impl CredentialProvider for EnvironmentCredentials {
    async fn load(&self) -> SdkConfig {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(ref profile) = self.profile {
            tracing::debug!("Loading AWS configuration for profile {}", profile);
            loader = loader.profile_name(profile);
        } else {
            tracing::debug!("Loading AWS configuration from the default chain");
        }

        let config = loader.load().await;

        if config.region().is_none() {
            tracing::debug!("No AWS region configured, using {}", DEFAULT_REGION);
            return config
                .into_builder()
                .region(Region::new(DEFAULT_REGION))
                .build();
        }

        config
    }
}
