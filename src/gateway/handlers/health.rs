//! Root endpoint.

/// GET /
pub async fn welcome() -> &'static str {
    "Welcome to the Dine-n-Shine API"
}
