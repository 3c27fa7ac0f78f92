pub mod binary;
pub mod normalize;
pub mod squarify;

use serde::{Deserialize, Serialize};

pub use self::normalize::{is_valid_weight, normalize, SortedWeights, WeightedItem};
pub use self::squarify::{squarify, worst_aspect_ratio};

/// Identity of a tile inside one layout call. Index into the caller's tile slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An axis-aligned rectangle in an arbitrary coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    /// The unit square `(0, 0, 1, 1)`, the usual canvas for normalized layouts.
    pub const UNIT: Rect = Rect {
        x: 0.0,
        y: 0.0,
        w: 1.0,
        h: 1.0,
    };

    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Whether the rectangle has positive, finite extent on both axes.
    pub fn is_drawable(&self) -> bool {
        self.w.is_finite() && self.h.is_finite() && self.w > 0.0 && self.h > 0.0
    }

    /// Long side over short side (1.0 = square). Degenerate rects report infinity.
    pub fn aspect_ratio(&self) -> f64 {
        let short = self.w.min(self.h);
        if short <= 0.0 {
            return f64::INFINITY;
        }
        self.w.max(self.h) / short
    }

    /// Half-open containment: the left/top edges belong to the rect, the right/bottom don't.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }

    /// Whether the interiors of two rectangles overlap by more than `eps` on both axes.
    pub fn overlaps(&self, other: &Rect, eps: f64) -> bool {
        let ix = (self.x + self.w).min(other.x + other.w) - self.x.max(other.x);
        let iy = (self.y + self.h).min(other.y + other.h) - self.y.max(other.y);
        ix > eps && iy > eps
    }
}

impl Default for Rect {
    fn default() -> Self {
        Self::UNIT
    }
}

/// A rectangle assigned to one tile by a layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedRect {
    pub id: TileId,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl PlacedRect {
    pub fn new(id: TileId, rect: Rect) -> Self {
        Self {
            id,
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }
}

/// Which partitioning algorithm lays out the tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayoutStrategy {
    /// Row-based squarified treemap. Keeps tiles close to square.
    #[default]
    Squarified,
    /// Recursive split at the half-weight point. Cheaper, but produces slivers.
    Binary,
}

/// Lay out pre-sorted weights inside `bounds` with the chosen strategy.
pub fn compute_layout(items: &SortedWeights, bounds: Rect, strategy: LayoutStrategy) -> Vec<PlacedRect> {
    tracing::debug!(
        "Laying out {} items ({:?}) in {:.3}x{:.3} at ({:.3}, {:.3})",
        items.len(),
        strategy,
        bounds.w,
        bounds.h,
        bounds.x,
        bounds.y
    );

    match strategy {
        LayoutStrategy::Squarified => squarify(items, bounds),
        LayoutStrategy::Binary => binary::slice_halves(items, bounds),
    }
}
