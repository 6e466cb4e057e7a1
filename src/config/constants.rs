//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

/// Request timeout enforced by the HTTP layer, in seconds
pub const REQUEST_TIMEOUT_SECONDS: u64 = 10;

// =============================================================================
// Session
// =============================================================================

/// Fallback session key used when SESSION_KEY is not set
pub const DEFAULT_SESSION_KEY: &str = "default-secret-key-change-this";

/// Minimum session key length in bytes (256 bits)
pub const MIN_SESSION_KEY_LENGTH: usize = 32;

/// Absolute session lifetime in hours, independent of activity
pub const SESSION_LIFETIME_HOURS: i64 = 8;

/// Seconds per hour (for token expiration calculation)
pub const SECONDS_PER_HOUR: i64 = 3600;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE_NAME: &str = "session";

/// Path scope of the session cookie
pub const SESSION_COOKIE_PATH: &str = "/";

// =============================================================================
// Directory (LDAP)
// =============================================================================

/// Default directory host
pub const DEFAULT_LDAP_SERVER: &str = "localhost";

/// Default directory port (plain LDAP)
pub const DEFAULT_LDAP_PORT: u16 = 389;

/// Default search base
pub const DEFAULT_LDAP_BASE_DN: &str = "dc=example,dc=com";

/// Default user search filter; `%s` is replaced by the escaped username
pub const DEFAULT_LDAP_USER_FILTER: &str = "(userPrincipalName=%s)";

/// Placeholder substituted in the user filter template
pub const USER_FILTER_PLACEHOLDER: &str = "%s";

/// Attribute holding the Active Directory password
pub const PASSWORD_ATTRIBUTE: &str = "unicodePwd";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement (characters)
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// Routes & htmx
// =============================================================================

pub const ROUTE_LOGIN: &str = "/login";
pub const ROUTE_LOGOUT: &str = "/logout";
pub const ROUTE_DASHBOARD: &str = "/dashboard";
pub const ROUTE_CHANGE_PASSWORD: &str = "/change-password";

/// Target element for inline error fragments
pub const ERROR_TARGET: &str = "#error-message";

/// Target element for inline success fragments
pub const SUCCESS_TARGET: &str = "#success-message";

// =============================================================================
// User-facing messages
// =============================================================================

pub const MSG_AUTHENTICATION_FAILED: &str = "Authentication failed";
pub const MSG_SESSION_FAILED: &str = "Failed to create session";
pub const MSG_PASSWORD_CHANGE_FAILED: &str = "Failed to change password";
pub const MSG_PASSWORD_CHANGED: &str = "Password changed successfully!";
pub const MSG_PASSWORDS_DO_NOT_MATCH: &str = "New passwords do not match";
