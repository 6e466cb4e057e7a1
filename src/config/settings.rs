//! Application settings loaded from environment variables.

use std::env;

use super::constants::{
    DEFAULT_LDAP_BASE_DN, DEFAULT_LDAP_PORT, DEFAULT_LDAP_SERVER, DEFAULT_LDAP_USER_FILTER,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_SESSION_KEY, MIN_SESSION_KEY_LENGTH,
    USER_FILTER_PLACEHOLDER,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub session: SessionConfig,
    pub directory: DirectoryConfig,
}

/// Session cookie settings
#[derive(Clone)]
pub struct SessionConfig {
    key: String,
    pub cookie_secure: bool,
}

/// Directory connection settings. Read-only for the process lifetime.
#[derive(Clone)]
pub struct DirectoryConfig {
    pub server: String,
    pub port: u16,
    pub base_dn: String,
    pub bind_dn: Option<String>,
    bind_password: String,
    pub user_filter: String,
    pub use_tls: bool,
    pub tls_skip_verify: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("session", &self.session)
            .field("directory", &self.directory)
            .finish()
    }
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("key", &"[REDACTED]")
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl std::fmt::Debug for DirectoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirectoryConfig")
            .field("server", &self.server)
            .field("port", &self.port)
            .field("base_dn", &self.base_dn)
            .field("bind_dn", &self.bind_dn)
            .field("bind_password", &"[REDACTED]")
            .field("user_filter", &self.user_filter)
            .field("use_tls", &self.use_tls)
            .field("tls_skip_verify", &self.tls_skip_verify)
            .finish()
    }
}

impl Config {
    /// Load configuration from the process environment (and `.env` if present).
    pub fn from_env() -> Self {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(_) => tracing::debug!(".env file not found, using process environment"),
        }

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset, so every key falls back to its default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let get_or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let session_key = get("SESSION_KEY").unwrap_or_else(|| {
            tracing::warn!("SESSION_KEY not set, using insecure default");
            DEFAULT_SESSION_KEY.to_string()
        });

        if session_key.len() < MIN_SESSION_KEY_LENGTH {
            tracing::warn!(
                "SESSION_KEY is shorter than {} bytes; sessions are weakly protected",
                MIN_SESSION_KEY_LENGTH
            );
        }

        let mut directory = DirectoryConfig::new(
            get_or("LDAP_SERVER", DEFAULT_LDAP_SERVER),
            get("LDAP_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_LDAP_PORT),
            get_or("LDAP_BASE_DN", DEFAULT_LDAP_BASE_DN),
        );
        if let Some(bind_dn) = get("LDAP_BIND_DN") {
            directory = directory
                .with_service_account(bind_dn, get("LDAP_BIND_PASSWORD").unwrap_or_default());
        }
        directory.user_filter = get_or("LDAP_USER_FILTER", DEFAULT_LDAP_USER_FILTER);
        directory.use_tls = parse_flag(get("LDAP_USE_TLS"), false);
        directory.tls_skip_verify = parse_flag(get("LDAP_TLS_SKIP_VERIFY"), false);

        Self {
            server_host: get_or("SERVER_HOST", DEFAULT_SERVER_HOST),
            server_port: get("PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            session: SessionConfig {
                key: session_key,
                cookie_secure: parse_flag(get("SESSION_COOKIE_SECURE"), true),
            },
            directory,
        }
    }

    /// Reject settings the server cannot run with.
    pub fn validate(&self) -> AppResult<()> {
        self.directory.validate()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl SessionConfig {
    pub fn new(key: impl Into<String>, cookie_secure: bool) -> Self {
        Self {
            key: key.into(),
            cookie_secure,
        }
    }

    /// Get session key bytes for token signing/verification.
    pub fn key_bytes(&self) -> &[u8] {
        self.key.as_bytes()
    }
}

impl DirectoryConfig {
    pub fn new(server: impl Into<String>, port: u16, base_dn: impl Into<String>) -> Self {
        Self {
            server: server.into(),
            port,
            base_dn: base_dn.into(),
            bind_dn: None,
            bind_password: String::new(),
            user_filter: DEFAULT_LDAP_USER_FILTER.to_string(),
            use_tls: false,
            tls_skip_verify: false,
        }
    }

    /// Configure the service account used for searches and password writes.
    pub fn with_service_account(
        mut self,
        bind_dn: impl Into<String>,
        bind_password: impl Into<String>,
    ) -> Self {
        self.bind_dn = Some(bind_dn.into());
        self.bind_password = bind_password.into();
        self
    }

    pub fn bind_password(&self) -> &str {
        &self.bind_password
    }

    /// `ldaps://` when TLS is enabled, `ldap://` otherwise.
    pub fn url(&self) -> String {
        let scheme = if self.use_tls { "ldaps" } else { "ldap" };
        format!("{}://{}:{}", scheme, self.server, self.port)
    }

    /// Substitute an already escaped username into the filter template.
    pub fn user_filter_for(&self, escaped_username: &str) -> String {
        self.user_filter
            .replacen(USER_FILTER_PLACEHOLDER, escaped_username, 1)
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.base_dn.trim().is_empty() {
            return Err(AppError::Config("LDAP_BASE_DN must not be empty".to_string()));
        }

        let placeholders = self.user_filter.matches(USER_FILTER_PLACEHOLDER).count();
        if placeholders != 1 {
            return Err(AppError::Config(format!(
                "LDAP_USER_FILTER must contain exactly one '{}' placeholder, found {}",
                USER_FILTER_PLACEHOLDER, placeholders
            )));
        }

        if self.tls_skip_verify {
            tracing::warn!("LDAP TLS certificate verification is disabled");
        }

        Ok(())
    }
}

/// Parse a boolean flag, falling back to `default` when unset or unparsable.
fn parse_flag(value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(str::trim).map(str::to_ascii_lowercase) {
        Some(v) if matches!(v.as_str(), "true" | "1" | "yes" | "t") => true,
        Some(v) if matches!(v.as_str(), "false" | "0" | "no" | "f") => false,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.server_port, 8080);
        assert!(config.session.cookie_secure);
        assert_eq!(config.session.key_bytes(), DEFAULT_SESSION_KEY.as_bytes());
        assert_eq!(config.directory.url(), "ldap://localhost:389");
        assert_eq!(config.directory.base_dn, "dc=example,dc=com");
        assert_eq!(config.directory.user_filter, "(userPrincipalName=%s)");
        assert!(config.directory.bind_dn.is_none());
        assert!(!config.directory.use_tls);
        assert!(!config.directory.tls_skip_verify);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9090"),
            ("SESSION_COOKIE_SECURE", "false"),
            ("LDAP_SERVER", "dc01.corp.local"),
            ("LDAP_PORT", "636"),
            ("LDAP_USE_TLS", "true"),
            ("LDAP_BIND_DN", "cn=svc,dc=corp,dc=local"),
            ("LDAP_BIND_PASSWORD", "svc-secret"),
        ]);

        assert_eq!(config.server_port, 9090);
        assert!(!config.session.cookie_secure);
        assert_eq!(config.directory.url(), "ldaps://dc01.corp.local:636");
        assert_eq!(
            config.directory.bind_dn.as_deref(),
            Some("cn=svc,dc=corp,dc=local")
        );
        assert_eq!(config.directory.bind_password(), "svc-secret");
    }

    #[test]
    fn test_empty_bind_dn_means_anonymous() {
        let config = config_from(&[("LDAP_BIND_DN", ""), ("LDAP_BIND_PASSWORD", "ignored")]);
        assert!(config.directory.bind_dn.is_none());
        assert_eq!(config.directory.bind_password(), "");
    }

    #[test]
    fn test_with_service_account() {
        let directory = DirectoryConfig::new("dc01.corp.local", 389, "dc=corp,dc=local")
            .with_service_account("cn=svc,dc=corp,dc=local", "svc-secret");

        assert_eq!(directory.bind_dn.as_deref(), Some("cn=svc,dc=corp,dc=local"));
        assert_eq!(directory.bind_password(), "svc-secret");
        assert_eq!(directory.user_filter, DEFAULT_LDAP_USER_FILTER);
        assert!(directory.validate().is_ok());
    }

    #[test]
    fn test_unparsable_values_fall_back() {
        let config = config_from(&[("PORT", "not-a-port"), ("LDAP_USE_TLS", "maybe")]);
        assert_eq!(config.server_port, DEFAULT_SERVER_PORT);
        assert!(!config.directory.use_tls);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = config_from(&[
            ("SESSION_KEY", "super-secret-session-key-0123456789"),
            ("LDAP_BIND_PASSWORD", "svc-secret"),
        ]);
        let debug = format!("{:?}", config);

        assert!(!debug.contains("super-secret-session-key"));
        assert!(!debug.contains("svc-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_user_filter_substitution() {
        let directory = DirectoryConfig::new("localhost", 389, "dc=example,dc=com");
        assert_eq!(
            directory.user_filter_for("alice"),
            "(userPrincipalName=alice)"
        );
    }

    #[test]
    fn test_validate_rejects_bad_filter() {
        let mut directory = DirectoryConfig::new("localhost", 389, "dc=example,dc=com");
        directory.user_filter = "(uid=alice)".to_string();
        assert!(matches!(directory.validate(), Err(AppError::Config(_))));

        directory.user_filter = "(|(uid=%s)(mail=%s))".to_string();
        assert!(matches!(directory.validate(), Err(AppError::Config(_))));

        directory.user_filter = "(sAMAccountName=%s)".to_string();
        assert!(directory.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_base_dn() {
        let directory = DirectoryConfig::new("localhost", 389, " ");
        assert!(matches!(directory.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(Some("TRUE".into()), false));
        assert!(parse_flag(Some("1".into()), false));
        assert!(!parse_flag(Some("no".into()), true));
        assert!(parse_flag(None, true));
        assert!(!parse_flag(Some("garbage".into()), false));
    }
}
