//! Application Configuration
//!
//! Configuration for the Accounts application layer.

use crate::domain::ban_policy::BanPolicy;

/// Accounts application configuration
#[derive(Debug, Clone)]
pub struct AccountsConfig {
    /// Ban policy applied to repeated login failures
    pub ban_policy: BanPolicy,
    /// Length of the opaque session token in hex characters
    pub token_length: usize,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Page size used when the caller does not supply one
    pub default_page_size: i64,
    /// Upper bound on caller-supplied page sizes
    pub max_page_size: i64,
}

impl Default for AccountsConfig {
    fn default() -> Self {
        Self {
            ban_policy: BanPolicy::default(),
            token_length: 32,
            password_pepper: None,
            default_page_size: 10,
            max_page_size: 100,
        }
    }
}

impl AccountsConfig {
    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Clamp pagination parameters to sane values
    ///
    /// Pages below 1 become 1, sizes below 1 become the default, sizes
    /// above the maximum are capped.
    pub fn clamp_page(&self, page: i64, page_size: i64) -> (i64, i64) {
        let page = if page < 1 { 1 } else { page };
        let page_size = if page_size < 1 {
            self.default_page_size
        } else if page_size > self.max_page_size {
            self.max_page_size
        } else {
            page_size
        };
        (page, page_size)
    }
}
