use super::{PlacedRect, Rect, SortedWeights, WeightedItem};

/// Squarified treemap (Bruls, Huizing & van Wijk 2000).
///
/// Items are consumed in the order given by [`SortedWeights`] (largest first)
/// and grouped into rows. A row grows while adding the next item does not
/// worsen its worst aspect ratio; otherwise the row is closed into a strip of
/// the remaining rectangle and a new row starts. Every item gets exactly one
/// rectangle and the rectangles tile `bounds` without gaps or overlap.
pub fn squarify(items: &SortedWeights, bounds: Rect) -> Vec<PlacedRect> {
    let entries = items.items();
    if entries.is_empty() {
        return Vec::new();
    }
    if !bounds.is_drawable() {
        tracing::warn!(
            "Squarify: degenerate bounds {:.3}x{:.3}, nothing laid out",
            bounds.w,
            bounds.h
        );
        return Vec::new();
    }
    if entries.len() == 1 {
        return vec![PlacedRect::new(entries[0].id, bounds)];
    }

    // Work in canvas area units so the aspect formula is dimensionally sound.
    let canvas_area = bounds.area();
    let areas: Vec<f64> = items.shares().map(|(_, share)| share * canvas_area).collect();

    let mut result = Vec::with_capacity(entries.len());
    let mut remaining = bounds;
    let mut remaining_area = bounds.area();
    let mut wide = remaining.w >= remaining.h;
    let mut row_start = 0;
    let mut row_sum = 0.0;

    for i in 0..areas.len() {
        if i > row_start {
            let short = short_side(remaining, wide);
            let current = worst_aspect_ratio(&areas[row_start..i], row_sum, short);
            let grown = worst_aspect_ratio(&areas[row_start..=i], row_sum + areas[i], short);

            if grown > current {
                remaining = place_row(
                    &entries[row_start..i],
                    &areas[row_start..i],
                    row_sum,
                    remaining_area,
                    remaining,
                    wide,
                    &mut result,
                );
                remaining_area -= row_sum;
                wide = remaining.w >= remaining.h;
                row_start = i;
                row_sum = 0.0;
            }
        }
        row_sum += areas[i];
    }

    // The final row takes everything that is left.
    place_row(
        &entries[row_start..],
        &areas[row_start..],
        row_sum,
        row_sum,
        remaining,
        wide,
        &mut result,
    );

    result
}

/// Side of the remaining rectangle that the current row spans.
fn short_side(bounds: Rect, wide: bool) -> f64 {
    if wide {
        bounds.h
    } else {
        bounds.w
    }
}

/// Worst aspect ratio of a row of areas laid along a side of length `side`.
///
/// `row` must be in descending order: its first element is the maximum and
/// its last the minimum.
pub fn worst_aspect_ratio(row: &[f64], sum: f64, side: f64) -> f64 {
    let (Some(&max_r), Some(&min_r)) = (row.first(), row.last()) else {
        return f64::MAX;
    };
    if sum <= 0.0 || side <= 0.0 || min_r <= 0.0 {
        return f64::MAX;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    let a = (side_sq * max_r) / sum_sq;
    let b = sum_sq / (side_sq * min_r);
    a.max(b)
}

/// Allocate a strip for one row and return what is left of `bounds`.
///
/// The strip's thickness is `row_sum / remaining_total` of the side being
/// consumed; the row's items split the strip's length by their own areas.
fn place_row(
    row: &[WeightedItem],
    areas: &[f64],
    row_sum: f64,
    remaining_total: f64,
    bounds: Rect,
    wide: bool,
    out: &mut Vec<PlacedRect>,
) -> Rect {
    let fraction = (row_sum / if remaining_total > 0.0 { remaining_total } else { 1.0 }).clamp(0.0, 1.0);
    let divisor = if row_sum > 0.0 { row_sum } else { 1.0 };

    let mut offset = 0.0;
    if wide {
        // Column against the left edge, items stacked top to bottom.
        let thickness = bounds.w * fraction;
        for (item, &area) in row.iter().zip(areas) {
            let length = bounds.h * area / divisor;
            out.push(PlacedRect::new(
                item.id,
                Rect::new(bounds.x, bounds.y + offset, thickness, length),
            ));
            offset += length;
        }
        Rect::new(
            bounds.x + thickness,
            bounds.y,
            (bounds.w - thickness).max(0.0),
            bounds.h,
        )
    } else {
        // Row against the top edge, items left to right.
        let thickness = bounds.h * fraction;
        for (item, &area) in row.iter().zip(areas) {
            let length = bounds.w * area / divisor;
            out.push(PlacedRect::new(
                item.id,
                Rect::new(bounds.x + offset, bounds.y, length, thickness),
            ));
            offset += length;
        }
        Rect::new(
            bounds.x,
            bounds.y + thickness,
            bounds.w,
            (bounds.h - thickness).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{normalize, TileId};
    use proptest::prelude::*;

    fn sorted(weights: &[f64]) -> SortedWeights {
        normalize(
            weights
                .iter()
                .enumerate()
                .map(|(i, &w)| (TileId(i as u32), Some(w))),
        )
    }

    fn find(rects: &[PlacedRect], id: u32) -> PlacedRect {
        *rects.iter().find(|r| r.id == TileId(id)).expect("tile placed")
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(squarify(&sorted(&[]), Rect::UNIT).is_empty());
    }

    #[test]
    fn single_item_fills_viewport_without_axis_swap() {
        let bounds = Rect::new(0.0, 0.0, 1920.0, 1080.0);
        let rects = squarify(&sorted(&[42.0]), bounds);
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].rect(), bounds);
    }

    #[test]
    fn degenerate_bounds_yield_nothing() {
        assert!(squarify(&sorted(&[1.0, 2.0]), Rect::new(0.0, 0.0, 0.0, 1.0)).is_empty());
    }

    #[test]
    fn layout_preserves_area_for_simple_case() {
        let rects = squarify(&sorted(&[400.0, 300.0, 200.0, 100.0]), Rect::new(0.0, 0.0, 50.0, 20.0));
        let total_out: f64 = rects.iter().map(PlacedRect::area).sum();
        assert!((total_out - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn matches_reference_rows_for_classic_example() {
        // Weights and canvas from the original squarified treemap paper.
        let rects = squarify(&sorted(&[6.0, 6.0, 4.0, 3.0, 2.0, 2.0, 1.0]), Rect::new(0.0, 0.0, 6.0, 4.0));
        assert_eq!(rects.len(), 7);

        let first = find(&rects, 0);
        let second = find(&rects, 1);
        assert!(close(first.x, 0.0) && close(first.y, 0.0));
        assert!(close(first.w, 3.0) && close(first.h, 2.0));
        assert!(close(second.y, 2.0) && close(second.w, 3.0) && close(second.h, 2.0));

        let third = find(&rects, 2);
        let fourth = find(&rects, 3);
        assert!(close(third.x, 3.0) && close(third.y, 0.0));
        assert!(close(third.h, 7.0 / 3.0));
        assert!(close(third.w, 12.0 / 7.0));
        assert!(close(fourth.x, 3.0 + 12.0 / 7.0));

        let worst = rects
            .iter()
            .map(|r| r.rect().aspect_ratio())
            .fold(0.0, f64::max);
        assert!(worst < 3.0, "worst aspect ratio {worst}");
    }

    #[test]
    fn largest_item_is_anchored_at_origin() {
        let rects = squarify(&sorted(&[70.0, 20.0, 10.0]), Rect::new(0.25, 0.5, 2.0, 1.0));
        let a = rects[0];
        assert_eq!(a.id, TileId(0));
        assert!(close(a.x, 0.25) && close(a.y, 0.5));
        // Wide canvas: the first strip is a full-height column.
        assert!(close(a.h, 1.0));
    }

    #[test]
    fn end_to_end_weights_give_expected_geometry() {
        let rects = squarify(&sorted(&[70.0, 20.0, 10.0]), Rect::UNIT);
        let a = find(&rects, 0);
        let b = find(&rects, 1);
        let c = find(&rects, 2);
        assert!(close(a.area(), 0.7));
        assert!(close(b.area(), 0.2));
        assert!(close(c.area(), 0.1));
        assert!(a.rect().aspect_ratio() < b.rect().aspect_ratio());
        assert!(close(a.w, 0.7) && close(a.h, 1.0));
        assert!(close(b.x, 0.7) && close(b.y, 0.0));
        assert!(close(c.y, b.h));
    }

    #[test]
    fn equal_weights_on_square_are_square() {
        let rects = squarify(&sorted(&[1.0, 1.0, 1.0, 1.0]), Rect::UNIT);
        for r in &rects {
            assert!(close(r.w, 0.5) && close(r.h, 0.5), "{r:?}");
        }
    }

    #[test]
    fn extreme_weight_magnitudes_still_fill_the_canvas() {
        for weights in [vec![1e-310; 3], vec![1e308, 1e308, 1.0]] {
            let rects = squarify(&sorted(&weights), Rect::UNIT);
            assert_eq!(rects.len(), 3);
            let covered: f64 = rects.iter().map(PlacedRect::area).sum();
            assert!(close(covered, 1.0), "{weights:?} covered {covered}");
            assert!(rects.iter().all(|r| r.w.is_finite() && r.h.is_finite()));
        }

        let rects = squarify(&sorted(&[1e308, 1e308, 1.0]), Rect::UNIT);
        assert!(close(find(&rects, 0).area(), 0.5));
        assert!(close(find(&rects, 1).area(), 0.5));
    }

    #[test]
    fn worst_aspect_ratio_guards_degenerate_rows() {
        assert_eq!(worst_aspect_ratio(&[], 0.0, 1.0), f64::MAX);
        assert_eq!(worst_aspect_ratio(&[1.0], 1.0, 0.0), f64::MAX);
        assert!(close(worst_aspect_ratio(&[1.0], 1.0, 1.0), 1.0));
    }

    proptest! {
        #[test]
        fn prop_area_is_conserved(
            weights in prop::collection::vec(0.01f64..1000.0, 1..60),
            w in 0.1f64..10.0,
            h in 0.1f64..10.0,
        ) {
            let bounds = Rect::new(0.0, 0.0, w, h);
            let rects = squarify(&sorted(&weights), bounds);
            prop_assert_eq!(rects.len(), weights.len());
            let covered: f64 = rects.iter().map(PlacedRect::area).sum();
            prop_assert!((covered - bounds.area()).abs() < 1e-9 * bounds.area().max(1.0));
        }

        #[test]
        fn prop_rects_do_not_overlap_and_stay_inside(
            weights in prop::collection::vec(0.01f64..1000.0, 1..40),
        ) {
            let rects = squarify(&sorted(&weights), Rect::UNIT);
            for (i, a) in rects.iter().enumerate() {
                prop_assert!(a.x >= -1e-9 && a.y >= -1e-9);
                prop_assert!(a.x + a.w <= 1.0 + 1e-9 && a.y + a.h <= 1.0 + 1e-9);
                for b in &rects[i + 1..] {
                    prop_assert!(!a.rect().overlaps(&b.rect(), 1e-9), "{:?} overlaps {:?}", a, b);
                }
            }
        }

        #[test]
        fn prop_areas_are_proportional_to_weights(
            weights in prop::collection::vec(0.01f64..1000.0, 2..40),
        ) {
            let items = sorted(&weights);
            let rects = squarify(&items, Rect::UNIT);
            for r in &rects {
                let expected = items.share_of(r.id).unwrap();
                prop_assert!((r.area() - expected).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_layout_is_deterministic(
            weights in prop::collection::vec(0.01f64..1000.0, 0..40),
        ) {
            let items = sorted(&weights);
            prop_assert_eq!(squarify(&items, Rect::UNIT), squarify(&items, Rect::UNIT));
        }
    }
}
