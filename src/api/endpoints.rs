//! Endpoint URLs
//!
//! Base URLs are configuration, never module constants, so tests and hosts
//! can point the dashboard at any server.

/// Default limits service
pub const DEFAULT_LIMITS_URL: &str = "http://localhost:8003";

/// Default assistant service
pub const DEFAULT_ASSISTANT_URL: &str = "http://localhost:8004";

/// Default billing service
pub const DEFAULT_BILLING_URL: &str = "http://localhost:8005";

/// Base URLs of the three backend services
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    limits_base: String,
    billing_base: String,
    assistant_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_LIMITS_URL, DEFAULT_BILLING_URL, DEFAULT_ASSISTANT_URL)
    }
}

impl Endpoints {
    pub fn new(limits_base: &str, billing_base: &str, assistant_base: &str) -> Self {
        Self {
            limits_base: normalize(limits_base),
            billing_base: normalize(billing_base),
            assistant_base: normalize(assistant_base),
        }
    }

    /// All three services behind one origin, such as a reverse proxy that
    /// serves all three paths
    pub fn single(base: &str) -> Self {
        Self::new(base, base, base)
    }

    pub fn limits_base(&self) -> &str {
        &self.limits_base
    }

    pub fn billing_base(&self) -> &str {
        &self.billing_base
    }

    pub fn assistant_base(&self) -> &str {
        &self.assistant_base
    }

    /// `GET` target for the yearly limits summary
    pub fn limits_summary(&self, year: i32, user_id: u64) -> String {
        format!(
            "{}/limits/summary?year={}&user_id={}",
            self.limits_base, year, user_id
        )
    }

    /// `GET` target for the current plan and usage
    pub fn billing_me(&self, user_id: u64) -> String {
        format!("{}/billing/me?user_id={}", self.billing_base, user_id)
    }

    /// `POST` target for assistant messages
    pub fn assistant_chat(&self) -> String {
        format!("{}/assistant/chat", self.assistant_base)
    }
}

fn normalize(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
