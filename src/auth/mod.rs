//! Trusted-header authentication.
//!
//! An upstream proxy authenticates users and forwards the username in a
//! header. `RemoteAuth` is built once at startup and registered as
//! application data; the `RemoteUser` extractor consumes it.

mod extractor;

use actix_web::HttpRequest;

use crate::config::DEFAULT_AUTH_HEADER;

pub use extractor::RemoteUser;

/// Reads the authenticated username from a configurable request header.
#[derive(Debug, Clone)]
pub struct RemoteAuth {
    header_name: String,
}

impl RemoteAuth {
    /// Create an authenticator reading `header_name`.
    pub fn new(header_name: impl Into<String>) -> Self {
        let header_name = header_name.into();
        tracing::info!("Authenticating users with the \"{}\" header", header_name);
        Self { header_name }
    }

    /// Name of the header holding the username.
    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    /// Username carried by the request, if any.
    ///
    /// Missing, non UTF-8 and blank values all count as absent.
    pub fn username(&self, req: &HttpRequest) -> Option<String> {
        req.headers()
            .get(self.header_name.as_str())
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

impl Default for RemoteAuth {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_HEADER)
    }
}
