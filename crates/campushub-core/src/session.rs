// Session state and the admin gate
//
// Sessions are issued by the external auth provider; this crate only carries
// the access token and the role claim. `is_admin` is the sole authorization
// check, consumed at the page-layout boundary.

use serde::{Deserialize, Serialize};

/// Role claim recognised by the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    SuperAdmin,
}

impl Role {
    /// Parse the remote role claim; any unrecognised claim carries no role.
    pub fn parse(claim: &str) -> Option<Role> {
        match claim {
            "admin" => Some(Role::Admin),
            "super_admin" => Some(Role::SuperAdmin),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "admin"),
            Role::SuperAdmin => write!(f, "super_admin"),
        }
    }
}

/// An active session against the hosted backend.
#[derive(Debug, Clone)]
pub struct Session {
    /// Bearer token attached to every store request.
    pub access_token: String,
    pub role: Option<Role>,
}

impl Session {
    pub fn new(access_token: impl Into<String>, role: Option<Role>) -> Self {
        Self {
            access_token: access_token.into(),
            role,
        }
    }

    /// Build a session from the raw role claim string.
    pub fn from_claim(access_token: impl Into<String>, claim: &str) -> Self {
        Self::new(access_token, Role::parse(claim))
    }

    /// The sole authorization check: both recognised roles pass.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Some(Role::Admin) | Some(Role::SuperAdmin))
    }
}
