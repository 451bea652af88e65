use uuid::Uuid;

/// `Authorization` header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// A fresh principal id.
pub fn new_user() -> Uuid {
    Uuid::new_v4()
}
