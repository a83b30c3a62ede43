use std::sync::Arc;
use std::time::Duration;

use crate::source::{FetchOutcome, ProfileSource};
use data_error::{CrError, Result};
use data_player::PlayerSnapshot;
use data_tag::PlayerTag;
use fs_records::{DocumentStore, FolderStore, PlayerRecordStore};

/// A displayable profile: fresh from the source or the stored fallback.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedResult {
    pub snapshot: PlayerSnapshot,
    pub is_stale: bool,
    /// Age of the stored snapshot; only set for stale results.
    pub age: Option<Duration>,
}

/// Outcome of resolving a raw tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(CachedResult),
    /// Neither the source nor the store could provide the profile.
    Unavailable(PlayerTag),
    /// The tag contains characters outside the alphabet, in input order.
    Invalid(Vec<char>),
}

impl CachedResult {
    fn fresh(snapshot: PlayerSnapshot) -> Self {
        Self {
            snapshot,
            is_stale: false,
            age: None,
        }
    }

    fn stale(snapshot: PlayerSnapshot, age: Duration) -> Self {
        Self {
            snapshot,
            is_stale: true,
            age: Some(age),
        }
    }

    /// Notice to show next to a stale profile, `None` when fresh.
    pub fn stale_notice(&self) -> Option<String> {
        match (self.is_stale, self.age) {
            (true, Some(age)) => Some(format!(
                "Unable to load from API. Showing cached data from: {}.",
                humanize_age(age)
            )),
            _ => None,
        }
    }
}

impl Resolution {
    pub fn into_result(self) -> Result<CachedResult> {
        match self {
            Resolution::Resolved(result) => Ok(result),
            Resolution::Unavailable(tag) => {
                Err(CrError::NoCachedRecord(tag.to_string()))
            }
            Resolution::Invalid(chars) => Err(CrError::InvalidTag(chars)),
        }
    }
}

/// Fetch-or-fallback lookup of player profiles.
///
/// Each call is independent: the only shared state is the record store,
/// which is keyed by tag. Store access runs on the blocking thread pool.
pub struct ProfileResolver<S, D = FolderStore> {
    source: S,
    records: Arc<PlayerRecordStore<D>>,
    fetch_timeout: Duration,
}

impl<S, D> ProfileResolver<S, D>
where
    S: ProfileSource,
    D: DocumentStore + Send + Sync + 'static,
{
    pub fn new(
        source: S,
        records: PlayerRecordStore<D>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            source,
            records: Arc::new(records),
            fetch_timeout,
        }
    }

    pub fn records(&self) -> &PlayerRecordStore<D> {
        self.records.as_ref()
    }

    /// Canonicalize and validate `raw`, then resolve it.
    pub async fn resolve(&self, raw: &str) -> Resolution {
        let tag = PlayerTag::canonicalize(raw);
        let validation = tag.validate();
        if !validation.valid {
            log::debug!("resolver: rejected tag {:?}", raw);
            return Resolution::Invalid(validation.invalid_chars);
        }
        self.resolve_tag(&tag).await
    }

    /// Resolve an already validated tag.
    ///
    /// The fetch is attempted once and bounded by the timeout. Dropping
    /// the returned future before the fetch completes leaves the store
    /// untouched.
    pub async fn resolve_tag(&self, tag: &PlayerTag) -> Resolution {
        log::debug!("resolver: fetching #{}", tag);
        let outcome =
            match tokio::time::timeout(self.fetch_timeout, self.source.fetch(tag))
                .await
            {
                Ok(outcome) => outcome,
                Err(_) => FetchOutcome::TimedOut,
            };

        match outcome {
            FetchOutcome::Fetched(snapshot) => self.fresh(tag, snapshot).await,
            FetchOutcome::TimedOut => {
                log::warn!(
                    "resolver: fetch of #{} timed out after {:?}",
                    tag,
                    self.fetch_timeout
                );
                self.stale(tag).await
            }
            FetchOutcome::Malformed(reason) => {
                log::warn!("resolver: malformed profile for #{}: {}", tag, reason);
                self.stale(tag).await
            }
            FetchOutcome::Unreachable(reason) => {
                log::warn!("resolver: source unreachable for #{}: {}", tag, reason);
                self.stale(tag).await
            }
        }
    }

    async fn fresh(&self, tag: &PlayerTag, snapshot: PlayerSnapshot) -> Resolution {
        let (key, document) = (tag.clone(), snapshot.clone());
        let written = self
            .with_records(move |records| records.write(&key, &document))
            .await;
        // the fresh answer is returned even when it could not be stored
        if let Err(e) = written {
            log::error!("resolver: could not store snapshot of #{}: {}", tag, e);
        }
        log::info!("resolver: fresh profile for #{}", tag);
        Resolution::Resolved(CachedResult::fresh(snapshot))
    }

    async fn stale(&self, tag: &PlayerTag) -> Resolution {
        let key = tag.clone();
        let cached = self
            .with_records(move |records| records.read_aged(&key))
            .await;

        match cached {
            Ok(Some((snapshot, age))) => {
                log::info!("resolver: serving #{} from cache, {:?} old", tag, age);
                Resolution::Resolved(CachedResult::stale(snapshot, age))
            }
            Ok(None) => {
                log::warn!("resolver: no data available for #{}", tag);
                Resolution::Unavailable(tag.clone())
            }
            Err(e) => {
                log::warn!("resolver: cached record of #{} unusable: {}", tag, e);
                Resolution::Unavailable(tag.clone())
            }
        }
    }

    async fn with_records<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&PlayerRecordStore<D>) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let records = Arc::clone(&self.records);
        tokio::task::spawn_blocking(move || f(records.as_ref()))
            .await
            .map_err(|e| CrError::Storage("players".to_owned(), e.to_string()))?
    }
}

/// `[D days ]H hours M minutes S seconds ago`, singular where it applies.
pub fn humanize_age(age: Duration) -> String {
    let total = age.as_secs();
    let days = total / 86_400;
    let hours = total % 86_400 / 3600;
    let minutes = total % 3600 / 60;
    let seconds = total % 60;

    let unit = |n: u64, word: &str| {
        if n == 1 {
            format!("{} {}", n, word)
        } else {
            format!("{} {}s", n, word)
        }
    };

    let mut parts = Vec::with_capacity(4);
    if days > 0 {
        parts.push(unit(days, "day"));
    }
    parts.push(unit(hours, "hour"));
    parts.push(unit(minutes, "minute"));
    parts.push(unit(seconds, "second"));
    format!("{} ago", parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fs_records::MemoryStore;
    use rstest::rstest;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::SystemTime;
    use tempdir::TempDir;

    fn snapshot(tag: &str, trophies: u32) -> PlayerSnapshot {
        serde_json::from_value(serde_json::json!({
            "username": "tester",
            "tag": tag,
            "trophies": { "current": trophies, "highest": trophies, "legend": 0 },
            "level": 9,
            "experience": 100,
            "chests": {
                "cycle": ["Silver"],
                "fullcycle": ["Silver", "Giant", "Magic"],
                "super_magical": 1,
                "legendary": 2,
                "epic": 3
            },
            "wins": 1,
            "losses": 1,
            "draws": 0,
            "three_crown_wins": 0,
            "cards_found": 20,
            "favorite_card": "Knight"
        }))
        .unwrap()
    }

    /// Source that answers with a fixed outcome after an optional delay.
    struct StubSource {
        outcome: FetchOutcome,
        delay: Duration,
        calls: Arc<AtomicUsize>,
    }

    impl StubSource {
        fn new(outcome: FetchOutcome) -> Self {
            Self {
                outcome,
                delay: Duration::ZERO,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn slow(delay: Duration) -> Self {
            Self {
                delay,
                ..Self::new(FetchOutcome::Fetched(snapshot("2PP", 9999)))
            }
        }
    }

    #[async_trait]
    impl ProfileSource for StubSource {
        async fn fetch(&self, _tag: &PlayerTag) -> FetchOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.outcome.clone()
        }
    }

    fn resolver(
        source: StubSource,
        store: MemoryStore,
    ) -> ProfileResolver<StubSource, MemoryStore> {
        ProfileResolver::new(
            source,
            PlayerRecordStore::new(store),
            Duration::from_millis(100),
        )
    }

    fn backdated(tag: &str, age: Duration) -> MemoryStore {
        let store = MemoryStore::new();
        let document = serde_json::to_vec(&snapshot(tag, 1234)).unwrap();
        store
            .put_at(tag, &document, SystemTime::now() - age)
            .unwrap();
        store
    }

    #[tokio::test]
    async fn fresh_fetch_is_written_through() {
        let fetched = snapshot("2PP", 4000);
        let resolver = resolver(
            StubSource::new(FetchOutcome::Fetched(fetched.clone())),
            MemoryStore::new(),
        );

        let result = resolver.resolve("#2pp").await.into_result().unwrap();
        assert!(!result.is_stale);
        assert_eq!(result.age, None);
        assert_eq!(result.stale_notice(), None);
        assert_eq!(result.snapshot, fetched);

        let tag = PlayerTag::canonicalize("2PP");
        assert_eq!(resolver.records().read(&tag).unwrap(), Some(fetched));
    }

    #[tokio::test]
    async fn timeout_falls_back_to_aged_snapshot() {
        let two_hours = Duration::from_secs(2 * 3600);
        let resolver = resolver(
            StubSource::slow(Duration::from_secs(10)),
            backdated("2PP", two_hours),
        );

        let result = resolver.resolve("2PP").await.into_result().unwrap();
        assert!(result.is_stale);
        let age = result.age.unwrap();
        assert!(age >= two_hours && age < two_hours + Duration::from_secs(5));
        assert_eq!(result.snapshot.trophies.current, 1234);
        assert!(result
            .stale_notice()
            .unwrap()
            .starts_with("Unable to load from API. Showing cached data from: 2 hours"));
    }

    #[tokio::test]
    async fn timeout_without_snapshot_is_unavailable() {
        let resolver = resolver(
            StubSource::slow(Duration::from_secs(10)),
            backdated("2PP", Duration::from_secs(60)),
        );

        let resolution = resolver.resolve("9Q").await;
        assert_eq!(
            resolution,
            Resolution::Unavailable(PlayerTag::canonicalize("9Q"))
        );
        assert!(matches!(
            resolution.into_result(),
            Err(CrError::NoCachedRecord(_))
        ));
    }

    #[rstest]
    #[case(FetchOutcome::TimedOut)]
    #[case(FetchOutcome::Malformed("expected value at line 1".to_owned()))]
    #[case(FetchOutcome::Unreachable("HTTP 503".to_owned()))]
    #[tokio::test]
    async fn every_failure_falls_back_without_retry(#[case] outcome: FetchOutcome) {
        let source = StubSource::new(outcome);
        let calls = Arc::clone(&source.calls);
        let resolver = resolver(source, backdated("2PP", Duration::from_secs(90)));

        let result = resolver.resolve("2PP").await.into_result().unwrap();
        assert!(result.is_stale);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // the fallback does not touch the stored copy
        let age = resolver
            .records()
            .age(&PlayerTag::canonicalize("2PP"))
            .unwrap();
        assert!(age >= Duration::from_secs(90));
    }

    #[tokio::test]
    async fn invalid_tag_never_reaches_the_source() {
        let source = StubSource::new(FetchOutcome::TimedOut);
        let calls = Arc::clone(&source.calls);
        let resolver = resolver(source, MemoryStore::new());

        assert_eq!(
            resolver.resolve("#ABC123").await,
            Resolution::Invalid(vec!['A', 'B', '1', '3'])
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn corrupt_cache_is_unavailable() {
        let store = MemoryStore::new();
        store.put("2PP", b"not json").unwrap();
        let resolver =
            resolver(StubSource::new(FetchOutcome::TimedOut), store);

        assert!(matches!(
            resolver.resolve("2PP").await,
            Resolution::Unavailable(_)
        ));
    }

    #[tokio::test]
    async fn cancelled_fetch_leaves_store_untouched() {
        let temp_dir = TempDir::new("resolver").unwrap();
        let resolver = ProfileResolver::new(
            StubSource::slow(Duration::from_secs(10)),
            PlayerRecordStore::open(temp_dir.path()).unwrap(),
            Duration::from_secs(30),
        );

        let abandoned = tokio::time::timeout(
            Duration::from_millis(50),
            resolver.resolve("2PP"),
        )
        .await;
        assert!(abandoned.is_err());
        assert_eq!(
            resolver
                .records()
                .read(&PlayerTag::canonicalize("2PP"))
                .unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn concurrent_resolutions_are_independent() {
        let resolver = Arc::new(resolver(
            StubSource::new(FetchOutcome::Fetched(snapshot("2PP", 10))),
            MemoryStore::new(),
        ));

        let tasks: Vec<_> = ["2PP", "9Q", "#lqq"]
            .into_iter()
            .map(|raw| {
                let resolver = Arc::clone(&resolver);
                tokio::spawn(async move { resolver.resolve(raw).await })
            })
            .collect();
        for task in tasks {
            assert!(matches!(task.await.unwrap(), Resolution::Resolved(_)));
        }
        for tag in ["2PP", "9Q", "LQQ"] {
            let tag = PlayerTag::canonicalize(tag);
            assert!(resolver.records().read(&tag).unwrap().is_some());
        }
    }

    /// Store whose reads block the calling thread for a while.
    struct SluggishStore(MemoryStore);

    impl DocumentStore for SluggishStore {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
            std::thread::sleep(Duration::from_millis(300));
            self.0.get(key)
        }

        fn put(&self, key: &str, document: &[u8]) -> Result<()> {
            self.0.put(key, document)
        }

        fn last_modified(&self, key: &str) -> Result<Option<SystemTime>> {
            self.0.last_modified(key)
        }
    }

    #[tokio::test]
    async fn store_io_does_not_block_the_runtime() {
        let resolver = ProfileResolver::new(
            StubSource::new(FetchOutcome::TimedOut),
            PlayerRecordStore::new(SluggishStore(backdated(
                "2PP",
                Duration::from_secs(60),
            ))),
            Duration::from_millis(100),
        );

        let started = std::time::Instant::now();
        let (resolution, ticked) = tokio::join!(resolver.resolve("2PP"), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            started.elapsed()
        });

        assert!(ticked < Duration::from_millis(250));
        assert!(matches!(resolution, Resolution::Resolved(ref r) if r.is_stale));
    }

    #[rstest]
    #[case(0, "0 hours 0 minutes 0 seconds ago")]
    #[case(7200, "2 hours 0 minutes 0 seconds ago")]
    #[case(3661, "1 hour 1 minute 1 second ago")]
    #[case(90061, "1 day 1 hour 1 minute 1 second ago")]
    #[case(3 * 86_400 + 59, "3 days 0 hours 0 minutes 59 seconds ago")]
    fn humanize(#[case] secs: u64, #[case] expected: &str) {
        assert_eq!(humanize_age(Duration::from_secs(secs)), expected);
    }
}
