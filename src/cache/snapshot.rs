use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::clock::Clock;
use super::store::SnapshotStore;
use crate::market::timezone::is_older_than;
use crate::market::universe::{
    CRYPTO_REFRESH_MINUTES, EARNINGS_REFRESH_MINUTES, EQUITY_QUOTES_REFRESH_MINUTES,
    PROFILE_REFRESH_MINUTES, SECTOR_QUOTES_REFRESH_MINUTES, WEEKLY_REFRESH_MINUTES,
};

/// A separately cached and separately refreshed slice of market data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheDomain {
    Equities,
    EquitiesWeekly,
    Sectors,
    SectorsWeekly,
    Crypto,
    Earnings,
    CompanyProfiles,
}

impl CacheDomain {
    pub const ALL: [CacheDomain; 7] = [
        CacheDomain::Equities,
        CacheDomain::EquitiesWeekly,
        CacheDomain::Sectors,
        CacheDomain::SectorsWeekly,
        CacheDomain::Crypto,
        CacheDomain::Earnings,
        CacheDomain::CompanyProfiles,
    ];

    /// Storage key.
    pub fn key(self) -> &'static str {
        match self {
            CacheDomain::Equities => "md_sp500_cache",
            CacheDomain::EquitiesWeekly => "md_sp500_weekly_cache",
            CacheDomain::Sectors => "md_sector_cache",
            CacheDomain::SectorsWeekly => "md_sector_weekly_cache",
            CacheDomain::Crypto => "md_crypto_cache",
            CacheDomain::Earnings => "md_earnings_cache",
            CacheDomain::CompanyProfiles => "md_company_profiles_cache",
        }
    }

    /// How long a snapshot stays fresh.
    pub fn ttl(self) -> Duration {
        let minutes = match self {
            CacheDomain::Equities => EQUITY_QUOTES_REFRESH_MINUTES,
            CacheDomain::EquitiesWeekly | CacheDomain::SectorsWeekly => WEEKLY_REFRESH_MINUTES,
            CacheDomain::Sectors => SECTOR_QUOTES_REFRESH_MINUTES,
            CacheDomain::Crypto => CRYPTO_REFRESH_MINUTES,
            CacheDomain::Earnings => EARNINGS_REFRESH_MINUTES,
            CacheDomain::CompanyProfiles => PROFILE_REFRESH_MINUTES,
        };
        Duration::minutes(minutes)
    }
}

/// Last-known-good data for one domain plus refresh bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot<T> {
    pub data: T,
    pub fetched_at: Option<DateTime<Utc>>,
    /// Scope the data belongs to (e.g. the earnings week key). A different
    /// requested tag makes the snapshot stale regardless of age.
    #[serde(default)]
    pub tag: Option<String>,
    /// Message of the most recent failed refresh. Not persisted.
    #[serde(skip)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshStatus {
    /// Never fetched
    Idle,
    Ready,
    /// Last refresh failed; `data` is whatever was there before
    Failed,
}

impl<T> Snapshot<T> {
    pub fn status(&self) -> RefreshStatus {
        if self.error.is_some() {
            RefreshStatus::Failed
        } else if self.fetched_at.is_none() {
            RefreshStatus::Idle
        } else {
            RefreshStatus::Ready
        }
    }
}

/// Explicit cache object for one domain, with injected storage and clock.
pub struct SnapshotCache<T> {
    domain: CacheDomain,
    ttl: Duration,
    store: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
    snapshot: Snapshot<T>,
}

impl<T> SnapshotCache<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    /// Load the domain's snapshot from `store`. Missing or unreadable data starts empty.
    pub fn open(domain: CacheDomain, store: Arc<dyn SnapshotStore>, clock: Arc<dyn Clock>) -> Self {
        let snapshot = match store.load(domain.key()) {
            Ok(Some(raw)) => match serde_json::from_str::<Snapshot<T>>(&raw) {
                Ok(snapshot) => {
                    tracing::debug!("Loaded {} snapshot (fetched_at={:?})", domain.key(), snapshot.fetched_at);
                    snapshot
                }
                Err(e) => {
                    tracing::warn!("Discarding corrupt {} snapshot: {}", domain.key(), e);
                    Snapshot::default()
                }
            },
            Ok(None) => Snapshot::default(),
            Err(e) => {
                tracing::warn!("Failed to load {} snapshot: {:#}", domain.key(), e);
                Snapshot::default()
            }
        };

        Self {
            domain,
            ttl: domain.ttl(),
            store,
            clock,
            snapshot,
        }
    }

    /// Override the domain's default time-to-live.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn domain(&self) -> CacheDomain {
        self.domain
    }

    pub fn snapshot(&self) -> &Snapshot<T> {
        &self.snapshot
    }

    pub fn data(&self) -> &T {
        &self.snapshot.data
    }

    pub fn is_stale(&self) -> bool {
        is_older_than(self.snapshot.fetched_at, self.ttl, self.clock.now())
    }

    pub fn is_stale_for(&self, tag: Option<&str>) -> bool {
        self.snapshot.tag.as_deref() != tag || self.is_stale()
    }

    /// Refresh through `fetch` unless the snapshot is still fresh for `tag`.
    ///
    /// `fetch` receives the current data so it can merge into it. On failure the
    /// previous data is kept and the error is recorded on the snapshot.
    pub fn refresh_with<F>(&mut self, tag: Option<&str>, fetch: F) -> &Snapshot<T>
    where
        F: FnOnce(&T) -> Result<T>,
    {
        if !self.is_stale_for(tag) {
            tracing::debug!("{} is fresh, skipping refresh", self.domain.key());
            return &self.snapshot;
        }

        match fetch(&self.snapshot.data) {
            Ok(data) => {
                self.snapshot.data = data;
                self.snapshot.fetched_at = Some(self.clock.now());
                self.snapshot.tag = tag.map(str::to_string);
                self.snapshot.error = None;
                if let Err(e) = self.persist() {
                    tracing::warn!("Failed to persist {}: {:#}", self.domain.key(), e);
                }
                tracing::info!("Refreshed {}", self.domain.key());
            }
            Err(e) => {
                tracing::warn!("Refresh of {} failed: {:#}", self.domain.key(), e);
                self.snapshot.error = Some(format!("{:#}", e));
            }
        }
        &self.snapshot
    }

    /// Mark the snapshot stale so the next refresh always fetches.
    pub fn invalidate(&mut self) {
        self.snapshot.fetched_at = None;
    }

    /// Drop the snapshot from memory and storage.
    pub fn reset(&mut self) -> Result<()> {
        self.snapshot = Snapshot::default();
        self.store
            .remove(self.domain.key())
            .with_context(|| format!("Failed to reset {}", self.domain.key()))
    }

    fn persist(&self) -> Result<()> {
        let payload = serde_json::to_string(&self.snapshot)
            .with_context(|| format!("Failed to serialize {}", self.domain.key()))?;
        self.store.save(self.domain.key(), &payload)
    }
}
