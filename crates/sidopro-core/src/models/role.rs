//! Access roles carried by the `role` session cookie.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Access level gating route access.
///
/// A request without a recognised role cookie is a [`Role::Viewer`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Petugas,
    #[default]
    Viewer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Petugas => "petugas",
            Role::Viewer => "viewer",
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "petugas" => Ok(Role::Petugas),
            "viewer" => Ok(Role::Viewer),
            _ => Err(format!("Invalid role: {s}")),
        }
    }
}
