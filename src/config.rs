use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::layout::{LayoutStrategy, Rect};

/// Configuration for heatmap layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeatmapConfig {
    /// Target rectangle; the unit square yields normalized coordinates
    pub canvas: Rect,
    pub strategy: LayoutStrategy,
    /// Minimum share of total weight for a large tile
    pub large_share: f64,
    /// Minimum share of total weight for a medium tile
    pub medium_share: f64,
}

impl Default for HeatmapConfig {
    fn default() -> Self {
        Self {
            canvas: Rect::UNIT,
            strategy: LayoutStrategy::Squarified,
            large_share: 0.04,
            medium_share: 0.015,
        }
    }
}

/// Top-level dashboard settings, read from a JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding the per-domain snapshot files
    pub cache_dir: PathBuf,
    pub heatmap: HeatmapConfig,
    /// How many earnings (largest by market cap) the weekly calendar shows
    pub earnings_limit: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(".marketmap-cache"),
            heatmap: HeatmapConfig::default(),
            earnings_limit: 80,
        }
    }
}

impl DashboardConfig {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let h = &self.heatmap;
        if !h.canvas.is_drawable() {
            anyhow::bail!(
                "heatmap canvas must have positive size, got {}x{}",
                h.canvas.w,
                h.canvas.h
            );
        }
        if !(0.0..=1.0).contains(&h.medium_share) || !(0.0..=1.0).contains(&h.large_share) {
            anyhow::bail!("size shares must lie in 0..=1");
        }
        if h.medium_share > h.large_share {
            anyhow::bail!(
                "medium_share ({}) exceeds large_share ({})",
                h.medium_share,
                h.large_share
            );
        }
        Ok(())
    }
}
