use super::TileId;

/// One layout participant: a tile identity and its (positive) weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightedItem {
    pub id: TileId,
    pub weight: f64,
}

/// Layout input whose items all have finite, positive weights and are in
/// descending weight order.
///
/// Only [`normalize`] and [`SortedWeights::from_descending`] construct it, so
/// the layout engines rely on the order without sorting again. Re-sorting
/// inside the engines would reshuffle tiles of near-equal weight between
/// refreshes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortedWeights {
    items: Vec<WeightedItem>,
    total: f64,
    /// Sum of `weight / largest weight`, at least 1 when non-empty.
    relative_total: f64,
}

impl SortedWeights {
    /// Wrap items that are already in descending order. Returns `None` if any
    /// weight is invalid or the order is violated.
    pub fn from_descending(items: Vec<WeightedItem>) -> Option<Self> {
        if items.iter().any(|item| !is_valid_weight(Some(item.weight))) {
            return None;
        }
        if items.windows(2).any(|pair| pair[0].weight < pair[1].weight) {
            return None;
        }
        Some(Self::new(items))
    }

    fn new(items: Vec<WeightedItem>) -> Self {
        let total = items.iter().map(|item| item.weight).sum();
        let relative_total = match items.first() {
            Some(largest) => items.iter().map(|item| item.weight / largest.weight).sum(),
            None => 0.0,
        };
        Self {
            items,
            total,
            relative_total,
        }
    }

    pub fn items(&self) -> &[WeightedItem] {
        &self.items
    }

    /// Sum of all weights. Can overflow to infinity for extreme inputs; use
    /// [`SortedWeights::shares`] for proportions.
    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Each item's fraction of the whole, in layout order.
    ///
    /// Weights are taken relative to the largest one first, so the shares are
    /// finite and sum to 1 for any valid input, including sums that overflow
    /// and weights that are subnormal.
    pub fn shares(&self) -> impl Iterator<Item = (TileId, f64)> + '_ {
        let largest = self.items.first().map_or(1.0, |item| item.weight);
        self.items
            .iter()
            .map(move |item| (item.id, (item.weight / largest) / self.relative_total))
    }

    /// Share of the whole held by `id`, if it participates.
    pub fn share_of(&self, id: TileId) -> Option<f64> {
        self.shares().find(|&(item, _)| item == id).map(|(_, share)| share)
    }
}

/// A weight participates in layout only if it is present, finite and `> 0`.
pub fn is_valid_weight(weight: Option<f64>) -> bool {
    matches!(weight, Some(w) if w.is_finite() && w > 0.0)
}

/// Drop entries without a usable weight and sort the rest by weight, largest
/// first. Ties keep their input order.
pub fn normalize<I>(weights: I) -> SortedWeights
where
    I: IntoIterator<Item = (TileId, Option<f64>)>,
{
    let mut items: Vec<WeightedItem> = weights
        .into_iter()
        .filter_map(|(id, weight)| match weight {
            Some(w) if is_valid_weight(weight) => Some(WeightedItem { id, weight: w }),
            _ => None,
        })
        .collect();

    // sort_by is stable
    items.sort_by(|a, b| b.weight.total_cmp(&a.weight));

    SortedWeights::new(items)
}
