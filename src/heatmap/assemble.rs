use std::collections::HashMap;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use super::classify::ClassifiedChange;
use super::palette::TileColors;
use super::Tile;
use crate::config::HeatmapConfig;
use crate::layout::{PlacedRect, Rect, SortedWeights, TileId};

/// Coarse tile size, used by render shells to decide how much text fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SizeClass {
    Large,
    Medium,
    Small,
}

impl SizeClass {
    /// Class for a tile holding `share` of the total weight.
    pub fn for_share(share: Option<f64>, config: &HeatmapConfig) -> Self {
        match share {
            Some(s) if s >= config.large_share => SizeClass::Large,
            Some(s) if s >= config.medium_share => SizeClass::Medium,
            _ => SizeClass::Small,
        }
    }
}

/// Everything a render shell needs to paint one tile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderTile {
    pub id: TileId,
    pub symbol: CompactString,
    pub label: Option<CompactString>,
    pub image_ref: Option<String>,
    pub weight: f64,
    pub rect: Rect,
    pub change: ClassifiedChange,
    pub size_class: SizeClass,
    pub colors: TileColors,
}

/// Join placed rectangles with their tile metadata and classification.
///
/// `changes` is indexed by [`TileId`]. The join goes through the id carried by
/// each rectangle, never through positions, so the layout engine is free to
/// emit rectangles in any order. Output follows the order of `placed`.
pub fn assemble(
    tiles: &[Tile],
    placed: &[PlacedRect],
    changes: &[ClassifiedChange],
    weights: &SortedWeights,
    config: &HeatmapConfig,
) -> Vec<RenderTile> {
    let share_by_id: HashMap<TileId, f64> = weights.shares().collect();
    let weight_by_id: HashMap<TileId, f64> = weights
        .items()
        .iter()
        .map(|item| (item.id, item.weight))
        .collect();

    let mut out = Vec::with_capacity(placed.len());
    for rect in placed {
        let (Some(tile), Some(change)) = (tiles.get(rect.id.index()), changes.get(rect.id.index())) else {
            tracing::warn!("Assemble: no tile for placed rect {:?}, skipping", rect.id);
            continue;
        };
        let weight = weight_by_id.get(&rect.id).copied().unwrap_or(0.0);
        let share = share_by_id.get(&rect.id).copied();

        out.push(RenderTile {
            id: rect.id,
            symbol: tile.symbol.clone(),
            label: tile.label.clone(),
            image_ref: tile.image_ref.clone(),
            weight,
            rect: rect.rect(),
            change: *change,
            size_class: SizeClass::for_share(share, config),
            colors: TileColors::for_bucket(change.bucket),
        });
    }
    out
}
