//! Loading lists through their snapshots
//!
//! A page asks for a list and gets one of three outcomes: still loading, a
//! failed first load, or data (possibly from an earlier fetch if the latest
//! refresh failed). Errors never escape; they are logged here.

use crate::state::AppState;
use dashboard_client::ClientResult;
use dashboard_core::{BearerToken, MarketAsset, Snapshot, User};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

/// Outcome of loading a list for a page
#[derive(Debug, Clone, PartialEq)]
pub enum Loaded<T> {
    /// The first fetch is still outstanding
    Loading,
    /// No data and the fetch failed
    Failed,
    /// Data to render
    Ready {
        /// The list
        data: Arc<T>,
        /// The latest refresh failed and `data` is from an earlier fetch
        outdated: bool,
    },
}

impl<T> Loaded<T> {
    /// Data, if any
    #[must_use]
    pub const fn data(&self) -> Option<&Arc<T>> {
        match self {
            Self::Ready { data, .. } => Some(data),
            _ => None,
        }
    }
}

/// Serve from `snapshot` when fresh, otherwise run `fetch` and commit it.
///
/// A missing value with another fetch in flight reports `Loading` instead of
/// piling on a second request; `force` always fetches.
pub async fn load_through<T, F, Fut>(
    snapshot: &Snapshot<T>,
    max_age: Duration,
    force: bool,
    what: &'static str,
    fetch: F,
) -> Loaded<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ClientResult<T>>,
{
    let current = snapshot.get();
    if !force {
        if let Some(data) = &current
            && (!snapshot.is_stale(max_age) || snapshot.is_fetching())
        {
            return Loaded::Ready {
                data: Arc::clone(data),
                outdated: false,
            };
        }
        if current.is_none() && snapshot.is_fetching() {
            debug!(what, "Fetch already in flight");
            return Loaded::Loading;
        }
    }

    let ticket = snapshot.begin();
    match fetch().await {
        Ok(value) => {
            if !ticket.commit(value) {
                debug!(what, "Discarded superseded fetch result");
            }
            snapshot.get().map_or(Loaded::Loading, |data| Loaded::Ready {
                data,
                outdated: false,
            })
        }
        Err(e) => {
            error!(what, error = %e, "Failed to load");
            current.map_or(Loaded::Failed, |data| Loaded::Ready {
                data,
                outdated: true,
            })
        }
    }
}

/// Market list, shared across visitors
pub async fn load_markets(state: &AppState, force: bool) -> Loaded<Vec<MarketAsset>> {
    load_through(
        &state.markets,
        state.config.market.max_age(),
        force,
        "markets",
        || state.market_client.fetch_markets(),
    )
    .await
}

/// User list for a signed-in session
pub async fn load_users(state: &AppState, token: &BearerToken, force: bool) -> Loaded<Vec<User>> {
    let snapshot = state.user_list(token);
    load_through(
        snapshot.as_ref(),
        state.config.api.users_max_age(),
        force,
        "users",
        || state.api_client.list_users(Some(token)),
    )
    .await
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use dashboard_client::ClientError;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const AGE: Duration = Duration::from_secs(60);

    fn failure() -> ClientError {
        ClientError::Status {
            url: "http://upstream/list".to_string(),
            status: 500,
            message: None,
        }
    }

    #[tokio::test]
    async fn test_first_load_commits() {
        let snapshot = Snapshot::new();
        let loaded = load_through(&snapshot, AGE, false, "test", || async {
            Ok(vec![1, 2, 3])
        })
        .await;
        assert_eq!(
            loaded,
            Loaded::Ready {
                data: Arc::new(vec![1, 2, 3]),
                outdated: false
            }
        );
        assert_eq!(snapshot.get(), Some(Arc::new(vec![1, 2, 3])));
    }

    #[tokio::test]
    async fn test_fresh_value_skips_fetch() {
        let snapshot = Snapshot::new();
        snapshot.begin().commit(vec![1]);
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let loaded = load_through(&snapshot, AGE, false, "test", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![2])
        })
        .await;
        assert_eq!(loaded.data().map(|d| d.as_slice()), Some(&[1][..]));
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_force_refetches() {
        let snapshot = Snapshot::new();
        snapshot.begin().commit(vec![1]);

        let loaded = load_through(&snapshot, AGE, true, "test", || async { Ok(vec![2]) }).await;
        assert_eq!(loaded.data().map(|d| d.as_slice()), Some(&[2][..]));
    }

    #[tokio::test]
    async fn test_failure_without_data_is_failed() {
        let snapshot: Snapshot<Vec<i32>> = Snapshot::new();
        let loaded = load_through(&snapshot, AGE, false, "test", || async { Err(failure()) }).await;
        assert_eq!(loaded, Loaded::Failed);
        assert!(snapshot.get().is_none());
        assert!(!snapshot.is_fetching());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_previous_data() {
        let snapshot = Snapshot::new();
        snapshot.begin().commit(vec![1]);

        let loaded = load_through(&snapshot, AGE, true, "test", || async { Err(failure()) }).await;
        assert_eq!(
            loaded,
            Loaded::Ready {
                data: Arc::new(vec![1]),
                outdated: true
            }
        );
    }

    #[tokio::test]
    async fn test_empty_snapshot_with_fetch_in_flight_is_loading() {
        let snapshot: Snapshot<Vec<i32>> = Snapshot::new();
        let _outstanding = snapshot.begin();

        let loaded = load_through(&snapshot, AGE, false, "test", || async {
            Ok(vec![9])
        })
        .await;
        assert_eq!(loaded, Loaded::Loading);
    }

    #[tokio::test]
    async fn test_empty_result_is_ready_not_loading() {
        let snapshot: Snapshot<Vec<i32>> = Snapshot::new();
        let loaded = load_through(&snapshot, AGE, false, "test", || async { Ok(Vec::new()) }).await;
        assert_eq!(
            loaded,
            Loaded::Ready {
                data: Arc::new(Vec::new()),
                outdated: false
            }
        );
    }
}
