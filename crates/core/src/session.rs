//! Session identity.
//!
//! There is no password and no token: identity is a client-held username,
//! and admin rights are a pure function of that name.

use serde::Serialize;

/// A signed-in user, as the client sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub username: String,
    pub is_admin: bool,
}

impl User {
    /// Resolve a raw username input against the configured admin name.
    ///
    /// The username keeps its original casing for display; the admin check
    /// is case-insensitive. A blank input resolves to `None`.
    pub fn resolve(raw: &str, admin_name: &str) -> Option<Self> {
        let username = raw.trim();
        if username.is_empty() {
            return None;
        }
        Some(Self {
            username: username.to_string(),
            is_admin: username.eq_ignore_ascii_case(admin_name),
        })
    }
}
