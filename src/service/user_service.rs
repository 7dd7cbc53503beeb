//! Cache-aside user retrieval over the users API.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::cache::keys::{user_key, ALL_USERS_KEY};
use crate::cache::{CachedValue, MemoryCache, UserCache};
use crate::config::{CacheConfig, ConfigError, FetcherConfig};
use crate::error::{FetchError, FetchResult};
use crate::model::wire::{PagedUsersEnvelope, SingleUserEnvelope};
use crate::model::User;
use crate::observability::metrics;
use crate::resilience::RetryPolicy;
use crate::service::UserDirectory;
use crate::transport::{HttpResponse, HttpTransport, ReqwestTransport};

/// How long each kind of cache entry lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheTtls {
    /// Single-user entries.
    pub user: Duration,
    /// The full collection entry.
    pub all_users: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            user: Duration::from_secs(5 * 60),
            all_users: Duration::from_secs(10 * 60),
        }
    }
}

impl From<&CacheConfig> for CacheTtls {
    fn from(config: &CacheConfig) -> Self {
        Self {
            user: config.user_ttl(),
            all_users: config.all_users_ttl(),
        }
    }
}

/// Fetches users from the API, caching results.
#[derive(Clone)]
pub struct UserService {
    transport: Arc<dyn HttpTransport>,
    cache: Arc<dyn UserCache>,
    base_url: String,
    retry_policy: RetryPolicy,
    ttls: CacheTtls,
}

impl UserService {
    /// Create a service with the default retry policy and TTLs.
    ///
    /// A trailing `/` on `base_url` is ignored.
    pub fn new(
        base_url: impl Into<String>,
        transport: Arc<dyn HttpTransport>,
        cache: Arc<dyn UserCache>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            cache,
            base_url,
            retry_policy: RetryPolicy::default(),
            ttls: CacheTtls::default(),
        }
    }

    /// Build a service with a `reqwest` transport and an in-memory cache.
    pub fn from_config(config: &FetcherConfig) -> Result<Self, ConfigError> {
        let transport = ReqwestTransport::new(&config.api)?;

        tracing::info!(
            base_url = %config.api.base_url,
            max_retries = config.retries.max_retries,
            user_ttl_secs = config.cache.user_ttl_secs,
            all_users_ttl_secs = config.cache.all_users_ttl_secs,
            "User service configured"
        );

        Ok(Self::new(
            config.api.base_url.clone(),
            Arc::new(transport),
            Arc::new(MemoryCache::new()),
        )
        .with_retry_policy(RetryPolicy::from(&config.retries))
        .with_cache_ttls(CacheTtls::from(&config.cache)))
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }

    pub fn with_cache_ttls(mut self, ttls: CacheTtls) -> Self {
        self.ttls = ttls;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch one user, from cache when fresh.
    ///
    /// Transport failures are retried per the retry policy. Non-2xx statuses
    /// (404 included) and malformed bodies fail at once.
    pub async fn fetch_user_by_id(&self, id: i64) -> FetchResult<User> {
        let result = self.user_by_id(id).await;
        if let Err(e) = &result {
            tracing::error!(user_id = id, error = %e, "Error fetching user");
        }
        result
    }

    /// Fetch every user, from cache when fresh.
    ///
    /// Pages are requested in order without retries; any failed page aborts
    /// the whole fetch.
    pub async fn fetch_all_users(&self) -> FetchResult<Vec<User>> {
        let result = self.all_users().await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "Error fetching users list");
        }
        result
    }

    /// [`fetch_user_by_id`](Self::fetch_user_by_id) that gives up when
    /// `cancel` fires, leaving the cache untouched.
    pub async fn fetch_user_by_id_cancellable(
        &self,
        id: i64,
        cancel: &CancellationToken,
    ) -> FetchResult<User> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(user_id = id, "User fetch cancelled");
                Err(FetchError::Cancelled)
            }
            result = self.fetch_user_by_id(id) => result,
        }
    }

    /// [`fetch_all_users`](Self::fetch_all_users) that gives up when
    /// `cancel` fires, leaving the cache untouched.
    pub async fn fetch_all_users_cancellable(
        &self,
        cancel: &CancellationToken,
    ) -> FetchResult<Vec<User>> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Users list fetch cancelled");
                Err(FetchError::Cancelled)
            }
            result = self.fetch_all_users() => result,
        }
    }

    async fn user_by_id(&self, id: i64) -> FetchResult<User> {
        let key = user_key(id);
        if let Some(CachedValue::User(user)) = self.cache.get(&key) {
            tracing::debug!(user_id = id, "User served from cache");
            return Ok(user);
        }

        let url = format!("{}/users/{}", self.base_url, id);
        let url = url.as_str();
        let user = self
            .retry_policy
            .execute(move |attempt| self.request_user(url, id, attempt))
            .await?;

        self.cache
            .set(&key, CachedValue::User(user.clone()), self.ttls.user);
        Ok(user)
    }

    async fn request_user(&self, url: &str, id: i64, attempt: u32) -> FetchResult<User> {
        tracing::debug!(user_id = id, attempt, url, "Requesting user");

        let response = self.get(url, "user").await?;

        if response.status == 404 {
            tracing::warn!(user_id = id, "User with ID {} not found", id);
        }
        let response = ensure_success(url, response, "user")?;

        let envelope: SingleUserEnvelope = parse_body(url, &response.body)?;
        let api_user = envelope.data.ok_or_else(|| FetchError::MissingData {
            url: url.to_string(),
        })?;

        Ok(User::from(api_user))
    }

    async fn all_users(&self) -> FetchResult<Vec<User>> {
        if let Some(CachedValue::Users(users)) = self.cache.get(ALL_USERS_KEY) {
            tracing::debug!(count = users.len(), "Users list served from cache");
            return Ok(users);
        }

        let mut users = Vec::new();
        let mut page: u32 = 1;
        let mut pages_read: u32 = 0;
        loop {
            let envelope = self.request_page(page).await?;
            if envelope.is_empty() {
                tracing::debug!(page, "Empty page, stopping pagination");
                break;
            }

            let total_pages = envelope.total_pages;
            users.extend(envelope.into_users());
            pages_read += 1;

            if page >= total_pages {
                break;
            }
            page += 1;
        }

        self.cache.set(
            ALL_USERS_KEY,
            CachedValue::Users(users.clone()),
            self.ttls.all_users,
        );
        tracing::info!(count = users.len(), pages = pages_read, "Fetched users list");
        Ok(users)
    }

    async fn request_page(&self, page: u32) -> FetchResult<PagedUsersEnvelope> {
        let url = format!("{}/users?page={}", self.base_url, page);
        tracing::debug!(page, url = %url, "Requesting users page");

        let response = self.get(&url, "list").await?;
        let response = ensure_success(&url, response, "list")?;
        parse_body(&url, &response.body)
    }

    async fn get(&self, url: &str, endpoint: &'static str) -> FetchResult<HttpResponse> {
        self.transport.get(url).await.map_err(|source| {
            metrics::record_request(endpoint, "transport_error");
            FetchError::Transport {
                url: url.to_string(),
                source,
            }
        })
    }
}

fn ensure_success(
    url: &str,
    response: HttpResponse,
    endpoint: &'static str,
) -> FetchResult<HttpResponse> {
    if response.is_success() {
        metrics::record_request(endpoint, "ok");
        Ok(response)
    } else {
        metrics::record_request(endpoint, "http_error");
        Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: response.status,
        })
    }
}

fn parse_body<T: serde::de::DeserializeOwned>(url: &str, body: &str) -> FetchResult<T> {
    serde_json::from_str(body).map_err(|source| FetchError::Parse {
        url: url.to_string(),
        source,
    })
}

#[async_trait]
impl UserDirectory for UserService {
    async fn fetch_user_by_id(&self, id: i64) -> FetchResult<User> {
        UserService::fetch_user_by_id(self, id).await
    }

    async fn fetch_all_users(&self) -> FetchResult<Vec<User>> {
        UserService::fetch_all_users(self).await
    }
}

impl std::fmt::Debug for UserService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserService")
            .field("base_url", &self.base_url)
            .field("retry_policy", &self.retry_policy)
            .field("ttls", &self.ttls)
            .finish()
    }
}
