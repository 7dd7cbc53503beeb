//! Normalized user record.

use serde::{Deserialize, Serialize};

/// A user as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Identifier assigned by the API.
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Avatar image URI.
    pub avatar_url: String,
}

impl User {
    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
