//! Session tokens for management reads, signed with HMAC-SHA256.
//!
//! The dashboard obtains a token from the identity layer and presents it
//! as `x-session-user` / `x-session-signature` / `x-session-issued-at`
//! headers. Signing material lives in [`SessionKeys`], which is injected
//! into the middleware through application state and can be rotated at
//! runtime; nothing reads key material from ambient globals.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::RwLock;

use crate::error::ApiError;

type HmacSha256 = Hmac<Sha256>;

/// Allowance for clocks running slightly ahead of ours.
const MAX_CLOCK_SKEW_SECONDS: i64 = 30;

/// Process-wide signing material with an explicit lifecycle.
pub struct SessionKeys {
    secret: RwLock<String>,
}

impl SessionKeys {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: RwLock::new(secret.into()),
        }
    }

    /// Replace the signing secret. Outstanding tokens signed with the
    /// old secret stop validating immediately.
    pub fn rotate(&self, secret: impl Into<String>) {
        let mut guard = match self.secret.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = secret.into();
    }

    fn current(&self) -> String {
        match self.secret.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

/// A signed session identity presented on management reads.
#[derive(Debug, Clone)]
pub struct SessionToken {
    /// Identity the token was issued to.
    pub user: String,
    /// Hex-encoded HMAC-SHA256 of `user|issued_at`.
    pub signature: String,
    /// Token creation timestamp (RFC 3339).
    pub issued_at: String,
}

impl SessionToken {
    /// Create a signed token for `user`.
    pub fn create(user: &str, keys: &SessionKeys) -> Result<Self, ApiError> {
        if user.is_empty() {
            return Err(ApiError::invalid_session("user must not be empty"));
        }

        let issued_at = Utc::now().to_rfc3339();
        let signature = sign(user, &issued_at, &keys.current())?;

        Ok(Self {
            user: user.to_string(),
            signature,
            issued_at,
        })
    }

    /// Validate signature and expiry against the current signing key.
    pub fn validate(&self, keys: &SessionKeys, ttl_seconds: i64) -> Result<(), ApiError> {
        if self.user.is_empty() || self.signature.is_empty() || self.issued_at.is_empty() {
            return Err(ApiError::invalid_session("session token has empty fields"));
        }

        // Constant-time comparison via HMAC verify.
        let payload = format!("{}|{}", self.user, self.issued_at);
        let mut mac = HmacSha256::new_from_slice(keys.current().as_bytes())
            .map_err(|e| ApiError::invalid_session(format!("HMAC error: {e}")))?;
        mac.update(payload.as_bytes());

        let sig_bytes = hex::decode(&self.signature)
            .map_err(|_| ApiError::invalid_session("signature is not valid hex"))?;

        mac.verify_slice(&sig_bytes)
            .map_err(|_| ApiError::invalid_session("signature mismatch"))?;

        let issued_at: DateTime<Utc> = self
            .issued_at
            .parse()
            .map_err(|_| ApiError::invalid_session("invalid issued_at timestamp"))?;

        let age = Utc::now().signed_duration_since(issued_at);

        if age.num_seconds() > ttl_seconds {
            return Err(ApiError::invalid_session(format!(
                "session token expired (age: {}s, TTL: {}s)",
                age.num_seconds(),
                ttl_seconds
            )));
        }

        if age.num_seconds() < -MAX_CLOCK_SKEW_SECONDS {
            return Err(ApiError::invalid_session("issued_at is in the future"));
        }

        Ok(())
    }
}

fn sign(user: &str, issued_at: &str, secret: &str) -> Result<String, ApiError> {
    let payload = format!("{user}|{issued_at}");
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| ApiError::invalid_session(format!("HMAC error: {e}")))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
