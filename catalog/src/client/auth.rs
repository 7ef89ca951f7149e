//! Authentication state.

/// An authenticated session against the catalog backend.
#[derive(Debug, Clone)]
pub struct Session {
    /// Bearer token.
    pub token: String,
    /// User ID.
    pub id: String,
    /// Display username.
    pub username: String,
    /// Granted roles.
    pub roles: Vec<String>,
}

impl Session {
    /// Create a new session.
    pub fn new(token: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            id: id.into(),
            username: String::new(),
            roles: Vec::new(),
        }
    }

    /// Set the username.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Set the roles.
    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }

    /// Check if the session looks usable.
    pub fn is_valid(&self) -> bool {
        !self.token.is_empty()
    }

    /// Check if the session carries a role.
    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
