//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Secrets are read from the environment by the binaries only; the
//! services never touch process-wide state during request handling.

use crate::constants::DEFAULT_BLOG_DATA_DIR;
use crate::gate::{ApiKeyGate, CapabilityGate, JwtGate};
use crate::signature::SignatureVerifier;
use crate::{BlogError, BlogResult};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// How interactive administrators prove they hold the editing capability.
#[derive(Clone)]
pub enum AdminCredential {
    /// HS256 secret used to verify bearer JWTs.
    JwtSecret(String),
    /// Static API key compared in constant time.
    ApiKey(String),
}

impl fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdminCredential::JwtSecret(_) => f.write_str("JwtSecret(<redacted>)"),
            AdminCredential::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
        }
    }
}

/// Storage directory from a raw setting, falling back to [`DEFAULT_BLOG_DATA_DIR`] when it is
/// absent or blank.
pub fn resolve_data_dir(raw: Option<String>) -> PathBuf {
    raw.filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BLOG_DATA_DIR))
}

/// Core configuration resolved at startup.
#[derive(Clone)]
pub struct CoreConfig {
    blog_data_dir: PathBuf,
    webhook_secret: String,
    admin_credential: AdminCredential,
}

impl fmt::Debug for CoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CoreConfig")
            .field("blog_data_dir", &self.blog_data_dir)
            .field("webhook_secret", &"<redacted>")
            .field("admin_credential", &self.admin_credential)
            .finish()
    }
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`BlogError::Config`] if the webhook secret or the admin credential is blank.
    pub fn new(
        blog_data_dir: PathBuf,
        webhook_secret: String,
        admin_credential: AdminCredential,
    ) -> BlogResult<Self> {
        if webhook_secret.trim().is_empty() {
            return Err(BlogError::Config("webhook secret cannot be empty".into()));
        }

        let blank = match &admin_credential {
            AdminCredential::JwtSecret(s) | AdminCredential::ApiKey(s) => s.trim().is_empty(),
        };
        if blank {
            return Err(BlogError::Config("admin credential cannot be empty".into()));
        }

        Ok(Self {
            blog_data_dir,
            webhook_secret,
            admin_credential,
        })
    }

    /// Build a configuration from raw environment values without reading the environment.
    ///
    /// `blog_data_dir` goes through [`resolve_data_dir`]. Exactly one of `jwt_secret`
    /// and `api_key` is used; the JWT secret takes precedence when both are set.
    pub fn from_env_values(
        blog_data_dir: Option<String>,
        webhook_secret: Option<String>,
        jwt_secret: Option<String>,
        api_key: Option<String>,
    ) -> BlogResult<Self> {
        fn present(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        let blog_data_dir = resolve_data_dir(blog_data_dir);

        let webhook_secret = present(webhook_secret)
            .ok_or_else(|| BlogError::Config("WEBHOOK_SECRET must be set".into()))?;

        let admin_credential = match (present(jwt_secret), present(api_key)) {
            (Some(secret), _) => AdminCredential::JwtSecret(secret),
            (None, Some(key)) => AdminCredential::ApiKey(key),
            (None, None) => {
                return Err(BlogError::Config(
                    "one of ADMIN_JWT_SECRET or ADMIN_API_KEY must be set".into(),
                ))
            }
        };

        Self::new(blog_data_dir, webhook_secret, admin_credential)
    }

    pub fn blog_data_dir(&self) -> &Path {
        &self.blog_data_dir
    }

    pub fn admin_credential(&self) -> &AdminCredential {
        &self.admin_credential
    }

    /// Verifier for webhook payload signatures, keyed with the shared webhook secret.
    pub fn signature_verifier(&self) -> BlogResult<SignatureVerifier> {
        SignatureVerifier::new(self.webhook_secret.as_bytes())
    }

    /// Capability gate matching the configured admin credential.
    pub fn capability_gate(&self) -> BlogResult<Arc<dyn CapabilityGate>> {
        Ok(match &self.admin_credential {
            AdminCredential::JwtSecret(secret) => Arc::new(JwtGate::new(secret)?),
            AdminCredential::ApiKey(key) => Arc::new(ApiKeyGate::new(key)?),
        })
    }
}
