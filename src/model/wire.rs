//! Raw response shapes of the users API.
//!
//! ```text
//! GET /users/{id}     → { "data": { "id", "email", "first_name", "last_name", "avatar" } }
//! GET /users?page={n} → { "page", "total", "total_pages", "data": [ ... ] }
//! ```
//! Unknown fields (`per_page`, `support`) are ignored.

use serde::Deserialize;

use crate::model::User;

/// A user exactly as the API spells it.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

impl From<ApiUser> for User {
    fn from(api: ApiUser) -> Self {
        Self {
            id: api.id,
            email: api.email,
            first_name: api.first_name,
            last_name: api.last_name,
            avatar_url: api.avatar,
        }
    }
}

/// Response of the single-user endpoint.
#[derive(Debug, Deserialize)]
pub struct SingleUserEnvelope {
    /// Absent or `null` means the body carried no user.
    #[serde(default)]
    pub data: Option<ApiUser>,
}

/// One page of the list endpoint.
#[derive(Debug, Deserialize)]
pub struct PagedUsersEnvelope {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub data: Option<Vec<ApiUser>>,
}

impl PagedUsersEnvelope {
    /// Users on this page; empty when `data` is absent.
    pub fn into_users(self) -> Vec<User> {
        self.data
            .unwrap_or_default()
            .into_iter()
            .map(User::from)
            .collect()
    }

    /// True when the page carries no users at all.
    pub fn is_empty(&self) -> bool {
        self.data.as_ref().map_or(true, |d| d.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_envelope_maps_field_names() {
        let body = r#"{
            "data": {
                "id": 2,
                "email": "janet.weaver@reqres.in",
                "first_name": "Janet",
                "last_name": "Weaver",
                "avatar": "https://reqres.in/img/faces/2-image.jpg"
            },
            "support": { "url": "https://reqres.in/#support-heading" }
        }"#;
        let envelope: SingleUserEnvelope = serde_json::from_str(body).unwrap();
        let user = User::from(envelope.data.unwrap());

        assert_eq!(user.id, 2);
        assert_eq!(user.email, "janet.weaver@reqres.in");
        assert_eq!(user.first_name, "Janet");
        assert_eq!(user.last_name, "Weaver");
        assert_eq!(user.avatar_url, "https://reqres.in/img/faces/2-image.jpg");
    }

    #[test]
    fn test_single_envelope_without_data() {
        let envelope: SingleUserEnvelope = serde_json::from_str("{}").unwrap();
        assert!(envelope.data.is_none());

        let envelope: SingleUserEnvelope = serde_json::from_str(r#"{"data":null}"#).unwrap();
        assert!(envelope.data.is_none());
    }

    #[test]
    fn test_paged_envelope_defaults() {
        let envelope: PagedUsersEnvelope =
            serde_json::from_str(r#"{"page":3,"per_page":6,"total":12,"total_pages":2}"#).unwrap();
        assert_eq!(envelope.page, 3);
        assert_eq!(envelope.total, 12);
        assert_eq!(envelope.total_pages, 2);
        assert!(envelope.is_empty());
        assert!(envelope.into_users().is_empty());
    }

    #[test]
    fn test_paged_envelope_preserves_order() {
        let body = r#"{
            "page": 1, "total": 2, "total_pages": 1,
            "data": [
                {"id": 9, "email": "b@x.io", "first_name": "B", "last_name": "Two", "avatar": "https://x.io/9.jpg"},
                {"id": 4, "email": "a@x.io", "first_name": "A", "last_name": "One", "avatar": "https://x.io/4.jpg"}
            ]
        }"#;
        let envelope: PagedUsersEnvelope = serde_json::from_str(body).unwrap();
        assert!(!envelope.is_empty());
        let ids: Vec<i64> = envelope.into_users().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![9, 4]);
    }

    #[test]
    fn test_missing_user_field_is_an_error() {
        let body = r#"{"data": {"id": 1, "email": "x@y.z"}}"#;
        assert!(serde_json::from_str::<SingleUserEnvelope>(body).is_err());
    }
}
