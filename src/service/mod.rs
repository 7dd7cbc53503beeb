//! User retrieval subsystem.
//!
//! # Data Flow
//! ```text
//! fetch_user_by_id(id):
//!     → cache "user:{id}" hit? return it
//!     → RetryPolicy { GET {base}/users/{id} → status check → SingleUserEnvelope }
//!     → ApiUser → User → cache (user TTL) → caller
//!
//! fetch_all_users():
//!     → cache "users:all" hit? return it
//!     → for page in 1..: GET {base}/users?page={n} → status check → PagedUsersEnvelope
//!         stop on empty page or page >= total_pages
//!     → Vec<User> → cache (collection TTL) → caller
//! ```
//!
//! # Design Decisions
//! - Only the single-user path retries; a failed page aborts the bulk fetch
//! - Nothing is cached unless the whole operation succeeded
//! - No per-key de-duplication: concurrent misses each hit the network and
//!   the last cache write wins
//! - Errors are logged once at the operation boundary and returned unchanged

pub mod user_service;

use async_trait::async_trait;

use crate::error::FetchResult;
use crate::model::User;

pub use user_service::{CacheTtls, UserService};

/// Read access to the user directory.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch one user.
    async fn fetch_user_by_id(&self, id: i64) -> FetchResult<User>;

    /// Fetch every user, in API order.
    async fn fetch_all_users(&self) -> FetchResult<Vec<User>>;
}
