use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::cache::{CacheDomain, Clock, JsonFileStore, Snapshot, SnapshotCache, SnapshotStore, SystemClock};
use crate::config::DashboardConfig;
use crate::heatmap::{build_heatmap, Heatmap, Tile, Timeframe};
use crate::market::status::last_updated_line;

/// The dashboard tabs that carry a heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Sp500,
    Sectors,
    Crypto,
}

impl View {
    pub const ALL: [View; 3] = [View::Sp500, View::Sectors, View::Crypto];

    pub fn key(self) -> &'static str {
        match self {
            View::Sp500 => "sp500",
            View::Sectors => "sectors",
            View::Crypto => "crypto",
        }
    }

    fn pref_key(self) -> String {
        format!("timeframe.{}", self.key())
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Ties configuration, storage and per-view preferences together.
pub struct Dashboard {
    config: DashboardConfig,
    store: Arc<dyn SnapshotStore>,
    clock: Arc<dyn Clock>,
    timeframes: HashMap<View, Timeframe>,
}

impl Dashboard {
    pub fn new(config: DashboardConfig, store: Arc<dyn SnapshotStore>, clock: Arc<dyn Clock>) -> Self {
        let timeframes = View::ALL
            .iter()
            .map(|&view| (view, load_timeframe(store.as_ref(), view)))
            .collect();
        Self {
            config,
            store,
            clock,
            timeframes,
        }
    }

    /// File-backed dashboard in `config.cache_dir` using the wall clock.
    pub fn open(config: DashboardConfig) -> Self {
        let store = Arc::new(JsonFileStore::new(config.cache_dir.clone()));
        Self::new(config, store, Arc::new(SystemClock))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn timeframe(&self, view: View) -> Timeframe {
        self.timeframes.get(&view).copied().unwrap_or_default()
    }

    /// Switch `view` to `timeframe` and persist the choice. Returns whether it changed.
    pub fn set_timeframe(&mut self, view: View, timeframe: Timeframe) -> Result<bool> {
        if self.timeframe(view) == timeframe {
            return Ok(false);
        }
        let payload = serde_json::to_string(&timeframe)?;
        self.store
            .save(&view.pref_key(), &payload)
            .with_context(|| format!("Failed to save timeframe for {}", view))?;
        self.timeframes.insert(view, timeframe);
        tracing::info!("{} timeframe set to {}", view, timeframe);
        Ok(true)
    }

    /// Build one heatmap per view, each with its own timeframe.
    pub fn compose(&self, views: &[(View, Vec<Tile>)]) -> Vec<(View, Heatmap)> {
        views
            .par_iter()
            .map(|(view, tiles)| {
                let heatmap = build_heatmap(tiles, self.timeframe(*view), &self.config.heatmap);
                (*view, heatmap)
            })
            .collect()
    }

    /// Snapshot cache for `domain` sharing this dashboard's store and clock.
    pub fn open_cache<T>(&self, domain: CacheDomain) -> SnapshotCache<T>
    where
        T: Serialize + DeserializeOwned + Default,
    {
        SnapshotCache::open(domain, self.store.clone(), self.clock.clone())
    }

    /// "Last updated" line for `view` based on the snapshot it was built from.
    pub fn status_line<T>(&self, view: View, snapshot: &Snapshot<T>) -> String {
        last_updated_line(
            snapshot.fetched_at,
            self.timeframe(view).as_str(),
            snapshot.error.as_deref(),
        )
    }
}

fn load_timeframe(store: &dyn SnapshotStore, view: View) -> Timeframe {
    match store.load(&view.pref_key()) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!("Ignoring stored timeframe for {}: {}", view, e);
            Timeframe::default()
        }),
        Ok(None) => Timeframe::default(),
        Err(e) => {
            tracing::warn!("Failed to load timeframe for {}: {:#}", view, e);
            Timeframe::default()
        }
    }
}
