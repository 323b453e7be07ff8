//! Endpoint variant resolution

use loan_chat_config::constants::endpoints::API_PROXY_SEGMENT;

/// Builds absolute URLs and the ordered endpoint variants for a path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointResolver {
    base_url: String,
    prefix: String,
    include_api_variant: bool,
}

impl EndpointResolver {
    /// `prefix` may carry leading or trailing slashes; blank means none
    pub fn new(base_url: &str, prefix: &str, include_api_variant: bool) -> Self {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        let trimmed = prefix.trim().trim_matches('/');
        let prefix = if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        };
        Self {
            base_url,
            prefix,
            include_api_variant,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Normalized prefix, `/<prefix>` or empty
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Base already points at the proxy mount, so `/api<path>` would double it
    fn base_is_api_proxy(&self) -> bool {
        self.base_url.ends_with(API_PROXY_SEGMENT)
    }

    /// Variants in try order: `<prefix><path>`, `<path>`, `/api<path>`
    pub fn variants(&self, path: &str) -> Vec<String> {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{}", path)
        };

        let mut variants = Vec::with_capacity(3);
        if !self.prefix.is_empty() {
            variants.push(format!("{}{}", self.prefix, path));
        }
        variants.push(path.clone());
        if self.include_api_variant && !self.base_is_api_proxy() {
            variants.push(format!("{}{}", API_PROXY_SEGMENT, path));
        }
        variants
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }
}
