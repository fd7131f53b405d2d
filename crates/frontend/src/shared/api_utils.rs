//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs and auth headers.

use super::config::API_BASE_OVERRIDE;

/// Get the base URL for API requests
///
/// Uses `MEAMS_API_BASE` when it was set at build time, otherwise constructs
/// the base from the current window location with port 3000.
///
/// # Returns
/// - API base URL like "http://localhost:3000"
/// - Empty string if window is not available
pub fn api_base() -> String {
    if let Some(base) = API_BASE_OVERRIDE {
        return base.trim_end_matches('/').to_string();
    }

    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path starting with "/api/"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Value of the `Authorization` header for a bearer token
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
