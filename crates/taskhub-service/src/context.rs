//! Request context carrying transport metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Transport metadata for the current request.
///
/// Carries only where the request came from; identity always comes from
/// verified claims, never from here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Network address of the request origin.
    pub source_addr: Option<String>,
    /// User-Agent header value.
    pub user_agent: Option<String>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(source_addr: Option<String>, user_agent: Option<String>) -> Self {
        Self {
            source_addr,
            user_agent,
            request_time: Utc::now(),
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new(None, None)
    }
}
