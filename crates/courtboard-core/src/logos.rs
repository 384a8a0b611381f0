//! Read-through logo resolution for match tiles
//!
//! [`LogoResolver`] checks the [`LogoCache`] for both teams of a match and
//! falls back to the upstream team list for whichever side missed.
//! [`LogoTracker`] re-resolves whenever the pair of team names changes and
//! exposes `{client_logo_url, opponent_logo_url, is_loading}` to the view.

use crate::cache::LogoCache;
use crate::models::Team;
use crate::normalize::normalize_team_name;
use crate::source::{list_teams, DocumentSource};
use parking_lot::{Mutex, RwLock};
use serde::Serialize;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Logo URLs for both sides of a match; empty string means "no logo"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchLogos {
    pub client_logo_url: String,
    pub opponent_logo_url: String,
    pub is_loading: bool,
}

/// Cache-first logo lookup
pub struct LogoResolver {
    cache: Arc<LogoCache>,
    source: Arc<dyn DocumentSource>,
}

impl LogoResolver {
    pub fn new(cache: Arc<LogoCache>, source: Arc<dyn DocumentSource>) -> Self {
        Self { cache, source }
    }

    pub fn cache(&self) -> &Arc<LogoCache> {
        &self.cache
    }

    /// Resolve logos for a client/opponent pair of raw team names.
    ///
    /// Never fails: an upstream error is logged and the missing sides stay empty.
    pub async fn resolve(&self, client_team: &str, opponent_team: &str) -> MatchLogos {
        let client_key = normalize_team_name(client_team);
        let opponent_key = normalize_team_name(opponent_team);

        let mut client_url = self.cached(&client_key);
        let mut opponent_url = self.cached(&opponent_key);

        if client_url.is_none() || opponent_url.is_none() {
            match list_teams(self.source.as_ref()).await {
                Ok(teams) => {
                    if client_url.is_none() {
                        client_url = self.store_match(&teams, &client_key);
                    }
                    if opponent_url.is_none() {
                        opponent_url = self.store_match(&teams, &opponent_key);
                    }
                }
                Err(e) => {
                    error!(
                        error = %e,
                        client = %client_key,
                        opponent = %opponent_key,
                        "Failed to fetch teams for logo lookup"
                    );
                }
            }
        }

        MatchLogos {
            client_logo_url: client_url.unwrap_or_default(),
            opponent_logo_url: opponent_url.unwrap_or_default(),
            is_loading: false,
        }
    }

    /// Cached URL for `key`
    ///
    /// An empty key skips the cache lookup entirely and resolves to "no logo",
    /// so it never triggers an upstream fetch.
    fn cached(&self, key: &str) -> Option<String> {
        if key.is_empty() {
            return Some(String::new());
        }
        self.cache.get(key)
    }

    fn store_match(&self, teams: &[Team], key: &str) -> Option<String> {
        let team = teams
            .iter()
            .find(|team| normalize_team_name(&team.name) == key);

        match team {
            Some(team) => {
                self.cache.set(key, &team.logo_url);
                Some(team.logo_url.clone())
            }
            None => {
                debug!(key, "No upstream team matches");
                None
            }
        }
    }
}

/// Tracks the logos for the match currently on screen
///
/// Each input change starts an independent resolution. Results are applied
/// in completion order with no generation check, so a slow earlier
/// resolution can overwrite a newer one.
pub struct LogoTracker {
    resolver: Arc<LogoResolver>,
    state: Arc<RwLock<MatchLogos>>,
    inputs: Mutex<Option<(String, String)>>,
}

impl LogoTracker {
    pub fn new(resolver: Arc<LogoResolver>) -> Self {
        Self {
            resolver,
            state: Arc::new(RwLock::new(MatchLogos::default())),
            inputs: Mutex::new(None),
        }
    }

    /// Current view state
    pub fn current(&self) -> MatchLogos {
        self.state.read().clone()
    }

    /// Feed the latest team names. Returns the spawned resolution, or `None`
    /// when the inputs did not change. Must run inside a tokio runtime.
    pub fn update(&self, client_team: &str, opponent_team: &str) -> Option<JoinHandle<()>> {
        {
            let mut inputs = self.inputs.lock();
            let unchanged = inputs
                .as_ref()
                .is_some_and(|(c, o)| c == client_team && o == opponent_team);
            if unchanged {
                return None;
            }
            *inputs = Some((client_team.to_string(), opponent_team.to_string()));
        }

        self.state.write().is_loading = true;

        let resolver = Arc::clone(&self.resolver);
        let state = Arc::clone(&self.state);
        let client_team = client_team.to_string();
        let opponent_team = opponent_team.to_string();

        Some(tokio::spawn(async move {
            let logos = resolver.resolve(&client_team, &opponent_team).await;
            *state.write() = logos;
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::CoreError;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticTeams {
        teams: Value,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DocumentSource for StaticTeams {
        async fn list(&self, _collection: &str) -> Result<Vec<Value>, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            crate::source::records_from_value("test", self.teams.clone())
        }

        fn describe(&self) -> String {
            "static".to_string()
        }
    }

    fn resolver(teams: Value) -> (LogoResolver, Arc<StaticTeams>) {
        let source = Arc::new(StaticTeams {
            teams,
            calls: AtomicUsize::new(0),
        });
        let cache = Arc::new(LogoCache::in_memory(Arc::new(ManualClock::new(0))));
        (LogoResolver::new(cache, source.clone()), source)
    }

    #[tokio::test]
    async fn test_blank_names_skip_upstream() {
        let (resolver, source) = resolver(json!([]));

        let logos = resolver.resolve("  ", "University").await;

        assert_eq!(logos, MatchLogos::default());
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_matches_on_normalized_name() {
        let (resolver, _) = resolver(json!([
            {"name": "Stanford University (W)", "logoUrl": "https://x/stanford.png"},
            {"name": "Stanford University (M)", "logoUrl": "https://x/stanford-m.png"}
        ]));

        let logos = resolver.resolve("Stanford (W)", "Stanford University (M)").await;

        assert_eq!(logos.client_logo_url, "https://x/stanford.png");
        assert_eq!(logos.opponent_logo_url, "https://x/stanford-m.png");
        assert_eq!(
            resolver.cache().get("Stanford (W)").as_deref(),
            Some("https://x/stanford.png")
        );
    }

    #[tokio::test]
    async fn test_tracker_ignores_unchanged_inputs() {
        let (resolver, source) = resolver(json!([
            {"name": "UCLA (M)", "logoUrl": "https://x/ucla.png"}
        ]));
        let tracker = LogoTracker::new(Arc::new(resolver));

        tracker.update("UCLA (M)", "USC (M)").unwrap().await.unwrap();
        assert!(tracker.update("UCLA (M)", "USC (M)").is_none());

        let logos = tracker.current();
        assert_eq!(logos.client_logo_url, "https://x/ucla.png");
        assert_eq!(logos.opponent_logo_url, "");
        assert!(!logos.is_loading);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
