//! Application state management

use crate::session_cookie::fingerprint;
use dashboard_client::{ApiClient, ClientResult, MarketClient};
use dashboard_core::{BearerToken, Config, MarketAsset, Snapshot, User};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

/// Application state holding configuration, clients and cached lists
#[derive(Debug)]
pub struct AppState {
    /// Application configuration
    pub config: Config,
    /// Client for the internal user/auth API
    pub api_client: ApiClient,
    /// Client for the public market API
    pub market_client: MarketClient,
    /// Last successful market fetch, shared by every visitor
    pub markets: Snapshot<Vec<MarketAsset>>,
    /// Last successful user list per session, keyed by token fingerprint
    user_lists: DashMap<String, Arc<Snapshot<Vec<User>>>>,
}

impl AppState {
    /// Create new application state
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client cannot be built.
    pub fn new(config: Config) -> ClientResult<Self> {
        let api_client = ApiClient::from_config(&config.api)?;
        let market_client = MarketClient::from_config(&config.market)?;
        Ok(Self::with_clients(config, api_client, market_client))
    }

    /// Create state around existing clients
    #[must_use]
    pub fn with_clients(config: Config, api_client: ApiClient, market_client: MarketClient) -> Self {
        Self {
            config,
            api_client,
            market_client,
            markets: Snapshot::new(),
            user_lists: DashMap::new(),
        }
    }

    /// User list cache for a session, created on first use.
    ///
    /// Creating an entry first drops every list whose value is older than the
    /// users max age and has no fetch in flight.
    #[must_use]
    pub fn user_list(&self, token: &BearerToken) -> Arc<Snapshot<Vec<User>>> {
        let key = fingerprint(token);
        if let Some(existing) = self.user_lists.get(&key) {
            return Arc::clone(existing.value());
        }
        self.evict_idle_user_lists();
        Arc::clone(self.user_lists.entry(key).or_default().value())
    }

    fn evict_idle_user_lists(&self) {
        let max_age = self.config.api.users_max_age();
        let before = self.user_lists.len();
        self.user_lists.retain(|_, list| {
            list.is_fetching() || list.age().is_none_or(|age| age <= max_age)
        });
        let evicted = before.saturating_sub(self.user_lists.len());
        if evicted > 0 {
            debug!(evicted, "Dropped idle user lists");
        }
    }

    /// User list cache for a session, if one was ever created
    #[must_use]
    pub fn existing_user_list(&self, token: &BearerToken) -> Option<Arc<Snapshot<Vec<User>>>> {
        self.user_lists
            .get(&fingerprint(token))
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Drop a session's cache (logout or rejected token)
    pub fn evict_user_list(&self, token: &BearerToken) {
        self.user_lists.remove(&fingerprint(token));
    }

    /// Number of sessions holding a cached user list
    #[must_use]
    pub fn cached_sessions(&self) -> usize {
        self.user_lists.len()
    }
}
