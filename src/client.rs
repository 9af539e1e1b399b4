//! This module provides a client that fetches remote calendars through a cache

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use crate::cache::{cache_key, CalendarCache};
use crate::calendar::Calendar;
use crate::config::Config;
use crate::error::FetchError;
use crate::ical;
use crate::traits::CalendarSource;

/// Query parameters forwarded verbatim to the remote source.
/// Order is preserved and keys may repeat.
pub type QueryParams = Vec<(String, String)>;

/// A calendar source that fetches its data from configured HTTP endpoints.
///
/// One instance is built at startup and shared by every request task; the
/// target map is a snapshot of the configuration, and the cache it owns is
/// the only mutable state.
pub struct Client {
    http: reqwest::Client,
    targets: HashMap<String, Url>,
    cache: CalendarCache,
}

impl Client {
    /// Create a client with the default cache (5 minute TTL)
    pub fn new(config: &Config) -> Self {
        Self::with_cache(config, CalendarCache::default())
    }

    /// Create a client around an explicitly constructed cache
    pub fn with_cache(config: &Config, cache: CalendarCache) -> Self {
        let targets = config
            .targets
            .iter()
            .map(|(name, target)| (name.clone(), target.url.clone()))
            .collect();

        Self {
            http: reqwest::Client::new(),
            targets,
            cache,
        }
    }

    pub fn has_target(&self, name: &str) -> bool {
        self.targets.contains_key(name)
    }
}

#[async_trait]
impl CalendarSource for Client {
    /// Retrieve the calendar for `target`, using the cache if it holds a fresh copy.
    ///
    /// Concurrent misses for the same key each fetch independently and each
    /// overwrite the entry; last writer wins. Duplicate fetches waste work but
    /// never corrupt the cache, and no request ever waits on another one.
    async fn fetch_calendar(
        &self,
        target: &str,
        params: &[(String, String)],
    ) -> Result<Arc<Calendar>, FetchError> {
        let key = cache_key(target, params);

        if let Some((calendar, age)) = self.cache.lookup(&key) {
            log::info!("Cache hit for {} (age: {}s)", target, age.num_seconds());
            return Ok(calendar);
        }

        let url = self
            .targets
            .get(target)
            .ok_or_else(|| FetchError::UnknownTarget(target.to_string()))?;

        let response = self.http.get(url.clone()).query(params).send().await?;
        let status = response.status();
        let body = response.text().await?;
        log::info!("Fetched {} | {} | {} bytes", target, status, body.len());

        // Parse failures are not cached; the previous entry (if any) stays
        let calendar = Arc::new(ical::parse(&body)?);
        self.cache.insert(key, calendar.clone());

        Ok(calendar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::cache::TtlExpiry;
    use crate::config::Target;

    fn test_config() -> Config {
        let mut targets = HashMap::new();
        targets.insert(
            "leidencal".to_string(),
            Target {
                // An unroutable address: any attempt to actually fetch fails fast
                url: "http://127.0.0.1:9/ical".parse().unwrap(),
            },
        );
        Config {
            base_url_path: "/rooster".to_string(),
            bind_address: "0.0.0.0:8080".to_string(),
            targets,
            groupings: HashMap::new(),
            default_group: "overig".to_string(),
        }
    }

    #[tokio::test]
    async fn fresh_cache_entry_is_served_without_network() {
        let _ = env_logger::builder().is_test(true).try_init();

        let params: QueryParams = vec![("week".to_string(), "37".to_string())];

        let mut calendar = Calendar::new();
        calendar.set_name("Rooster");

        let cache = CalendarCache::default();
        cache.insert(cache_key("leidencal", &params), Arc::new(calendar));

        let client = Client::with_cache(&test_config(), cache);
        let fetched = client.fetch_calendar("leidencal", &params).await.unwrap();
        assert_eq!(fetched.name(), Some("Rooster"));
    }

    #[tokio::test]
    async fn stale_entry_triggers_a_refetch() {
        let _ = env_logger::builder().is_test(true).try_init();

        let cache = CalendarCache::new(TtlExpiry::new(chrono::Duration::zero()));
        cache.insert(cache_key("leidencal", &[]), Arc::new(Calendar::new()));

        let client = Client::with_cache(&test_config(), cache);
        // The only configured URL is unroutable, so reaching for the network
        // surfaces as a request error
        let result = client.fetch_calendar("leidencal", &[]).await;
        assert!(matches!(result, Err(FetchError::Request(_))));
    }

    #[tokio::test]
    async fn unknown_target_is_rejected() {
        let client = Client::new(&test_config());
        let result = client.fetch_calendar("nonexistent", &[]).await;
        assert!(matches!(result, Err(FetchError::UnknownTarget(_))));
    }
}
