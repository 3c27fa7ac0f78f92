pub mod assemble;
pub mod classify;
pub mod format;
pub mod palette;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

use self::assemble::{assemble, RenderTile};
use self::classify::{classify, ClassifiedChange};
use crate::config::HeatmapConfig;
use crate::layout::{self, SortedWeights, TileId};

/// Comparison horizon for percentage changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[default]
    #[serde(rename = "1D")]
    OneDay,
    #[serde(rename = "1W")]
    OneWeek,
}

impl Timeframe {
    pub const ALL: [Timeframe; 2] = [Timeframe::OneDay, Timeframe::OneWeek];

    pub fn as_str(self) -> &'static str {
        match self {
            Timeframe::OneDay => "1D",
            Timeframe::OneWeek => "1W",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "1D" => Ok(Timeframe::OneDay),
            "1W" => Ok(Timeframe::OneWeek),
            other => anyhow::bail!("unknown timeframe '{}', expected 1D or 1W", other),
        }
    }
}

/// One visualizable market entity (stock, sector ETF, crypto asset).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    pub symbol: CompactString,
    #[serde(default)]
    pub label: Option<CompactString>,
    /// Market capitalization (or any sizing metric). Must be `> 0` to be drawn.
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub change_1d: Option<f64>,
    #[serde(default)]
    pub change_1w: Option<f64>,
    #[serde(default)]
    pub image_ref: Option<String>,
}

impl Tile {
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: CompactString::new(symbol),
            label: None,
            weight: None,
            change_1d: None,
            change_1w: None,
            image_ref: None,
        }
    }

    /// `(primary, secondary)` changes for the active timeframe.
    pub fn changes_for(&self, timeframe: Timeframe) -> (Option<f64>, Option<f64>) {
        match timeframe {
            Timeframe::OneDay => (self.change_1d, self.change_1w),
            Timeframe::OneWeek => (self.change_1w, self.change_1d),
        }
    }

    pub fn classify(&self, timeframe: Timeframe) -> ClassifiedChange {
        let (primary, secondary) = self.changes_for(timeframe);
        classify(primary, secondary)
    }
}

/// Tiles with a usable weight, largest first. Ids index into `tiles`.
pub fn normalize_tiles(tiles: &[Tile]) -> SortedWeights {
    layout::normalize(
        tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| (TileId(i as u32), tile.weight)),
    )
}

/// The render-ready result of one layout call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Heatmap {
    pub timeframe: Timeframe,
    /// Tiles in layout order (largest first).
    pub tiles: Vec<RenderTile>,
    /// symbol → index into `tiles`
    #[serde(skip)]
    by_symbol: HashMap<CompactString, usize>,
}

impl Heatmap {
    pub fn empty(timeframe: Timeframe) -> Self {
        Self {
            timeframe,
            ..Self::default()
        }
    }

    fn from_tiles(timeframe: Timeframe, tiles: Vec<RenderTile>) -> Self {
        let by_symbol = tiles
            .iter()
            .enumerate()
            .map(|(i, tile)| (tile.symbol.clone(), i))
            .collect();
        Self {
            timeframe,
            tiles,
            by_symbol,
        }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, symbol: &str) -> Option<&RenderTile> {
        self.by_symbol.get(symbol).map(|&i| &self.tiles[i])
    }

    /// Tile under the point, if any.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<&RenderTile> {
        self.tiles.iter().find(|tile| tile.rect.contains(x, y))
    }

    /// Sum of all tile areas.
    pub fn covered_area(&self) -> f64 {
        self.tiles.iter().map(|tile| tile.rect.area()).sum()
    }

    /// Largest long-side/short-side ratio over all tiles (1.0 = all square).
    pub fn max_aspect_ratio(&self) -> f64 {
        self.tiles
            .iter()
            .map(|tile| tile.rect.aspect_ratio())
            .fold(0.0, f64::max)
    }
}

/// Normalize, lay out, classify and assemble `tiles` for `timeframe`.
pub fn build_heatmap(tiles: &[Tile], timeframe: Timeframe, config: &HeatmapConfig) -> Heatmap {
    let weights = normalize_tiles(tiles);
    if weights.is_empty() {
        tracing::debug!(
            "No tiles with a usable weight ({} supplied), empty heatmap",
            tiles.len()
        );
        return Heatmap::empty(timeframe);
    }

    tracing::info!(
        "Building {} heatmap: {} of {} tiles sized, canvas {:.3}x{:.3}",
        timeframe,
        weights.len(),
        tiles.len(),
        config.canvas.w,
        config.canvas.h
    );

    let placed = layout::compute_layout(&weights, config.canvas, config.strategy);
    let changes: Vec<ClassifiedChange> = tiles.iter().map(|tile| tile.classify(timeframe)).collect();
    let render_tiles = assemble(tiles, &placed, &changes, &weights, config);

    Heatmap::from_tiles(timeframe, render_tiles)
}

#[cfg(test)]
mod tests {
    use super::assemble::SizeClass;
    use super::classify::ChangeBucket;
    use super::*;
    use crate::layout::Rect;

    fn tile(symbol: &str, weight: Option<f64>, change_1d: Option<f64>) -> Tile {
        Tile {
            weight,
            change_1d,
            ..Tile::new(symbol)
        }
    }

    #[test]
    fn end_to_end_three_tiles() {
        let tiles = vec![
            tile("A", Some(70.0), Some(4.0)),
            tile("B", Some(20.0), Some(-4.0)),
            tile("C", Some(10.0), Some(0.2)),
        ];
        let heatmap = build_heatmap(&tiles, Timeframe::OneDay, &HeatmapConfig::default());

        assert_eq!(heatmap.len(), 3);
        assert!((heatmap.covered_area() - 1.0).abs() < 1e-9);

        let a = heatmap.get("A").unwrap();
        let b = heatmap.get("B").unwrap();
        let c = heatmap.get("C").unwrap();
        assert_eq!(a.change.bucket, ChangeBucket::StrongPositive);
        assert_eq!(b.change.bucket, ChangeBucket::StrongNegative);
        assert_eq!(c.change.bucket, ChangeBucket::Neutral);
        assert!(a.rect.area() > b.rect.area() && b.rect.area() > c.rect.area());
        assert!(a.rect.aspect_ratio() < b.rect.aspect_ratio());
        assert_eq!(a.size_class, SizeClass::Large);
        assert_eq!(heatmap.tiles[0].symbol, "A");
    }

    #[test]
    fn all_weights_missing_gives_empty_heatmap() {
        let tiles = vec![tile("A", None, Some(1.0)), tile("B", Some(0.0), None)];
        let heatmap = build_heatmap(&tiles, Timeframe::OneDay, &HeatmapConfig::default());
        assert!(heatmap.is_empty());
        assert_eq!(heatmap.covered_area(), 0.0);
    }

    #[test]
    fn empty_input_gives_empty_heatmap() {
        let heatmap = build_heatmap(&[], Timeframe::OneWeek, &HeatmapConfig::default());
        assert!(heatmap.is_empty());
        assert_eq!(heatmap.timeframe, Timeframe::OneWeek);
    }

    #[test]
    fn unsized_tiles_are_not_rendered() {
        let tiles = vec![tile("A", Some(1.0), None), tile("GHOST", None, Some(9.0))];
        let heatmap = build_heatmap(&tiles, Timeframe::OneDay, &HeatmapConfig::default());
        assert_eq!(heatmap.len(), 1);
        assert!(heatmap.get("GHOST").is_none());
    }

    #[test]
    fn weekly_timeframe_uses_weekly_change_with_daily_fallback() {
        let mut with_week = tile("W", Some(2.0), Some(-5.0));
        with_week.change_1w = Some(1.0);
        let daily_only = tile("D", Some(1.0), Some(-5.0));

        let heatmap = build_heatmap(&[with_week, daily_only], Timeframe::OneWeek, &HeatmapConfig::default());
        assert_eq!(heatmap.get("W").unwrap().change.display_value, Some(1.0));
        assert_eq!(heatmap.get("D").unwrap().change.display_value, Some(-5.0));
        assert_eq!(heatmap.get("D").unwrap().change.bucket, ChangeBucket::StrongNegative);
    }

    #[test]
    fn shuffled_input_yields_same_rectangles_per_symbol() {
        let tiles = vec![
            tile("A", Some(50.0), None),
            tile("B", Some(30.0), None),
            tile("C", Some(15.0), None),
            tile("D", Some(5.0), None),
        ];
        let mut shuffled = tiles.clone();
        shuffled.swap(0, 3);
        shuffled.swap(1, 2);

        let config = HeatmapConfig::default();
        let first = build_heatmap(&tiles, Timeframe::OneDay, &config);
        let second = build_heatmap(&shuffled, Timeframe::OneDay, &config);
        for symbol in ["A", "B", "C", "D"] {
            assert_eq!(first.get(symbol).unwrap().rect, second.get(symbol).unwrap().rect);
        }
    }

    #[test]
    fn hit_test_finds_tile_under_point() {
        let tiles = vec![tile("A", Some(70.0), None), tile("B", Some(30.0), None)];
        let heatmap = build_heatmap(&tiles, Timeframe::OneDay, &HeatmapConfig::default());
        assert_eq!(heatmap.hit_test(0.1, 0.5).unwrap().symbol, "A");
        assert_eq!(heatmap.hit_test(0.9, 0.5).unwrap().symbol, "B");
        assert!(heatmap.hit_test(1.5, 0.5).is_none());
    }

    #[test]
    fn custom_canvas_is_respected() {
        let config = HeatmapConfig {
            canvas: Rect::new(10.0, 20.0, 800.0, 600.0),
            ..HeatmapConfig::default()
        };
        let tiles = vec![tile("A", Some(3.0), None), tile("B", Some(1.0), None)];
        let heatmap = build_heatmap(&tiles, Timeframe::OneDay, &config);
        assert!((heatmap.covered_area() - 480_000.0).abs() < 1e-6);
        assert_eq!(heatmap.tiles[0].rect.x, 10.0);
        assert_eq!(heatmap.tiles[0].rect.y, 20.0);
    }

    #[test]
    fn timeframe_round_trips_through_text() {
        for tf in Timeframe::ALL {
            assert_eq!(tf.as_str().parse::<Timeframe>().unwrap(), tf);
        }
        assert_eq!("1w".parse::<Timeframe>().unwrap(), Timeframe::OneWeek);
        assert!("1M".parse::<Timeframe>().is_err());
        assert_eq!(serde_json::to_string(&Timeframe::OneWeek).unwrap(), "\"1W\"");
    }
}
