//! Centralized constants for the loan chat client
//!
//! Single source of truth for endpoint paths, defaults and timeouts.

/// Backend endpoints (defaults)
pub mod endpoints {
    /// Hosted loan advisor backend
    pub const BACKEND_DEFAULT: &str = "https://savify-backend.onrender.com";

    /// Path segment a development proxy mounts the backend under
    pub const API_PROXY_SEGMENT: &str = "/api";
}

/// Backend route paths, before prefix resolution
pub mod paths {
    pub const CHAT: &str = "/chat";
    pub const APPLICATION: &str = "/application";
    pub const SANCTION_LETTER: &str = "/sanction-letter";
    pub const HEALTH: &str = "/health";
}

/// Timeouts (in milliseconds)
pub mod timeouts {
    /// Backend request timeout; hosted free-tier instances cold start slowly
    pub const REQUEST_MS: u64 = 60_000;

    /// Connection establishment timeout
    pub const CONNECT_MS: u64 = 10_000;
}

/// Session defaults
pub mod session {
    /// Directory (under the home directory) holding local client state
    pub const STATE_DIR: &str = ".loan-chat";

    /// File holding the persisted customer identifier
    pub const CUSTOMER_ID_FILE: &str = "customer_id";
}

/// Environment variable names
pub mod env {
    /// Prefix for structured overrides, e.g. `LOAN_CHAT__API__BASE_URL`
    pub const PREFIX: &str = "LOAN_CHAT";

    /// Short aliases, checked in order
    pub const API_URL: &str = "LOAN_CHAT_API_URL";
    pub const BACKEND_URL: &str = "LOAN_CHAT_BACKEND_URL";
    pub const API_PREFIX: &str = "LOAN_CHAT_API_PREFIX";
}
