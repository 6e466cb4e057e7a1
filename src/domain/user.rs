//! User domain entity and the ephemeral request types around it.

/// Directory user confirmed by a successful bind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub username: String,
    /// Distinguished Name of the directory entry
    pub dn: String,
}

impl User {
    pub fn new(username: impl Into<String>, dn: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            dn: dn.into(),
        }
    }
}

/// Username/password pair for a single authentication call.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

// Never expose passwords in debug output
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Request to replace the password of an authenticated user.
#[derive(Clone)]
pub struct PasswordChange {
    pub username: String,
    pub user_dn: String,
    pub current_password: String,
    pub new_password: String,
}

impl std::fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordChange")
            .field("username", &self.username)
            .field("user_dn", &self.user_dn)
            .field("current_password", &"[REDACTED]")
            .field("new_password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let creds = Credentials::new("alice", "hunter22");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter22"));
    }

    #[test]
    fn test_password_change_debug_redacts_passwords() {
        let change = PasswordChange {
            username: "alice".into(),
            user_dn: "CN=Alice,OU=Users,DC=example,DC=com".into(),
            current_password: "old-secret".into(),
            new_password: "new-secret".into(),
        };
        let debug = format!("{:?}", change);
        assert!(debug.contains("CN=Alice"));
        assert!(!debug.contains("old-secret"));
        assert!(!debug.contains("new-secret"));
    }
}
