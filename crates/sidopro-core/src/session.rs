//! Role claims carried in the session cookie.
//!
//! Without a session secret the `role` cookie is taken at face value. With
//! one, the cookie must be `<role>.<hex HMAC-SHA256 of role>`; anything else
//! resolves to [`Role::Viewer`].

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{
    error::{ProgressError, Result},
    models::Role,
};

type HmacSha256 = Hmac<Sha256>;

/// Signs and verifies role cookie values.
#[derive(Clone)]
pub struct SessionSigner {
    mac: HmacSha256,
}

impl SessionSigner {
    /// Creates a signer from a shared secret.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::Configuration` for an empty secret.
    pub fn new(secret: &str) -> Result<Self> {
        if secret.trim().is_empty() {
            return Err(ProgressError::Configuration {
                message: "Session secret must not be empty".to_string(),
            });
        }

        let mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|e| {
            ProgressError::Configuration {
                message: format!("Invalid session secret: {e}"),
            }
        })?;
        Ok(Self { mac })
    }

    /// Produces the cookie value for `role`.
    pub fn sign(&self, role: Role) -> String {
        let mut mac = self.mac.clone();
        mac.update(role.as_str().as_bytes());
        format!("{}.{}", role.as_str(), hex::encode(mac.finalize().into_bytes()))
    }

    /// Returns the role of a correctly signed cookie value.
    pub fn verify(&self, value: &str) -> Option<Role> {
        let (role, signature) = value.rsplit_once('.')?;
        let signature = hex::decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(role.as_bytes());
        mac.verify_slice(&signature).ok()?;

        role.parse().ok()
    }
}

/// Turns a raw `role` cookie value into a [`Role`].
#[derive(Clone)]
pub enum RoleResolver {
    /// Plain role names are trusted as-is
    Unsigned,
    /// Only signed role values are trusted
    Signed(SessionSigner),
}

impl RoleResolver {
    /// Builds a resolver, signed when a secret is supplied.
    pub fn from_secret(secret: Option<&str>) -> Result<Self> {
        match secret {
            Some(secret) => Ok(Self::Signed(SessionSigner::new(secret)?)),
            None => Ok(Self::Unsigned),
        }
    }

    pub fn is_signed(&self) -> bool {
        matches!(self, Self::Signed(_))
    }

    /// Resolves a cookie value; absent or unrecognised values are viewers.
    pub fn resolve(&self, cookie: Option<&str>) -> Role {
        let Some(value) = cookie else {
            return Role::Viewer;
        };

        match self {
            Self::Unsigned => value.parse().unwrap_or_default(),
            Self::Signed(signer) => signer.verify(value).unwrap_or_default(),
        }
    }
}
