//! Identity tokens
//!
//! The identity provider signs HS256 tokens carrying the user, an optional
//! role claim and group memberships. This module verifies them with the
//! `jsonwebtoken` crate and decides whether the caller is an administrator.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use safari_core::Actor;
use serde::{Deserialize, Serialize};

use crate::config::IdentityConfig;
use crate::error::AppError;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (provider user id)
    pub sub: String,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Resolved caller identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: String,
    pub name: String,
    pub role: Option<String>,
    pub groups: Vec<String>,
    pub is_admin: bool,
}

impl Identity {
    /// Audit actor for mutations made by this identity
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor::new(self.user_id.clone(), self.name.clone())
    }
}

/// Verifies identity tokens and classifies admin callers
#[derive(Clone)]
pub struct IdentityVerifier {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    admin_role: String,
    admin_groups: Vec<String>,
}

impl IdentityVerifier {
    #[must_use]
    pub fn new(config: &IdentityConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            admin_role: config.admin_role.clone(),
            admin_groups: config.admin_groups.clone(),
        }
    }

    /// Decode and validate a JWT token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn decode_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken,
            }
        })?;

        Ok(token_data.claims)
    }

    /// Resolve the identity behind a bearer token
    pub fn verify(&self, token: &str) -> Result<Identity, AppError> {
        let claims = self.decode_token(token)?;
        let is_admin = self.is_admin(&claims);

        Ok(Identity {
            name: claims.name.clone().unwrap_or_else(|| claims.sub.clone()),
            user_id: claims.sub,
            role: claims.role,
            groups: claims.groups,
            is_admin,
        })
    }

    /// Like [`verify`](Self::verify), but rejects non-admin identities
    pub fn verify_admin(&self, token: &str) -> Result<Identity, AppError> {
        let identity = self.verify(token)?;
        if identity.is_admin {
            Ok(identity)
        } else {
            Err(AppError::InsufficientPermissions)
        }
    }

    /// Admin by role claim, or by membership in any admin group
    #[must_use]
    pub fn is_admin(&self, claims: &Claims) -> bool {
        claims.role.as_deref() == Some(self.admin_role.as_str())
            || claims
                .groups
                .iter()
                .any(|group| self.admin_groups.contains(group))
    }

    /// Sign a token the way the identity provider does; used by tests and local tooling
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue(
        &self,
        user_id: &str,
        name: Option<&str>,
        role: Option<&str>,
        groups: &[&str],
        ttl_secs: i64,
    ) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            name: name.map(String::from),
            role: role.map(String::from),
            groups: groups.iter().map(|g| (*g).to_string()).collect(),
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode JWT")))
    }
}

impl std::fmt::Debug for IdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityVerifier")
            .field("admin_role", &self.admin_role)
            .field("admin_groups", &self.admin_groups)
            .finish_non_exhaustive()
    }
}
