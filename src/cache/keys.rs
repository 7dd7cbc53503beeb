//! Cache key scheme.
//!
//! Per-user keys always carry the `user:` prefix followed by the id, so they
//! can never equal the collection key `users:all`.

/// Key of the full user collection.
pub const ALL_USERS_KEY: &str = "users:all";

/// Key of a single user.
pub fn user_key(id: i64) -> String {
    format!("user:{}", id)
}
