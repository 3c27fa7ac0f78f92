use super::{PlacedRect, Rect, SortedWeights, WeightedItem};

/// Split-in-half treemap: divide the items where the running weight first
/// reaches half the total, cut the rectangle across its longer side in that
/// proportion, and recurse into both halves.
pub fn slice_halves(items: &SortedWeights, bounds: Rect) -> Vec<PlacedRect> {
    let mut result = Vec::with_capacity(items.len());
    if items.is_empty() || !bounds.is_drawable() {
        return result;
    }
    let shares: Vec<f64> = items.shares().map(|(_, share)| share).collect();
    split(items.items(), &shares, 1.0, bounds, &mut result);
    result
}

/// `shares[i]` belongs to `items[i]`; `total` is their sum.
fn split(items: &[WeightedItem], shares: &[f64], total: f64, bounds: Rect, out: &mut Vec<PlacedRect>) {
    match items {
        [] => {}
        [only] => out.push(PlacedRect::new(only.id, bounds)),
        _ => {
            let half = total / 2.0;
            let mut running = 0.0;
            let mut k = items.len() - 1;
            for (i, &share) in shares.iter().enumerate() {
                running += share;
                if running >= half {
                    k = i + 1;
                    break;
                }
            }
            let k = k.clamp(1, items.len() - 1);
            let (left, right) = items.split_at(k);
            let (left_shares, right_shares) = shares.split_at(k);
            let left_sum: f64 = left_shares.iter().sum();
            let right_sum = total - left_sum;
            let fraction = (left_sum / if total > 0.0 { total } else { 1.0 }).clamp(0.0, 1.0);

            let (first, second) = if bounds.w >= bounds.h {
                let lw = bounds.w * fraction;
                (
                    Rect::new(bounds.x, bounds.y, lw, bounds.h),
                    Rect::new(bounds.x + lw, bounds.y, bounds.w - lw, bounds.h),
                )
            } else {
                let th = bounds.h * fraction;
                (
                    Rect::new(bounds.x, bounds.y, bounds.w, th),
                    Rect::new(bounds.x, bounds.y + th, bounds.w, bounds.h - th),
                )
            };

            split(left, left_shares, left_sum, first, out);
            split(right, right_shares, right_sum, second, out);
        }
    }
}
