//! API key verification

use std::sync::Arc;

use crate::config::AuthConfig;

/// Credential verification capability.
///
/// The server only ships a static shared-secret implementation, but handlers
/// never see anything beyond this trait, so per-client or hashed key schemes
/// can be swapped in without touching them.
pub trait KeyVerifier: Send + Sync {
    /// Whether the presented credential is valid
    fn verify(&self, presented: &str) -> bool;
}

/// Exact-match check against a single configured secret
pub struct StaticKeyVerifier {
    secret: String,
}

impl StaticKeyVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl KeyVerifier for StaticKeyVerifier {
    fn verify(&self, presented: &str) -> bool {
        presented == self.secret
    }
}

#[derive(Clone)]
pub struct AuthService {
    verifier: Arc<dyn KeyVerifier>,
}

impl AuthService {
    pub fn new(verifier: Arc<dyn KeyVerifier>) -> Self {
        Self { verifier }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(Arc::new(StaticKeyVerifier::new(config.api_key.clone())))
    }

    pub fn verify(&self, presented: &str) -> bool {
        self.verifier.verify(presented)
    }
}
