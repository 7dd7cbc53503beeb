//! User data model.
//!
//! # Data Flow
//! ```text
//! API response body (JSON)
//!     → wire.rs (SingleUserEnvelope / PagedUsersEnvelope → ApiUser)
//!     → From<ApiUser> for User
//!     → user.rs (User, handed to the caller)
//! ```
//!
//! Wire types mirror the third-party field names and stay inside the crate's
//! retrieval layer. Callers only ever see [`User`].

pub mod user;
pub(crate) mod wire;

pub use user::User;
