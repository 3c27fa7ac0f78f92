/// Percent change for the day.
///
/// Prefers the provider's own percent field `dp`; otherwise derives it from the
/// current price `c` and previous close `pc`.
pub fn daily_change_pct(dp: Option<f64>, c: Option<f64>, pc: Option<f64>) -> Option<f64> {
    if let Some(dp) = dp.filter(|v| v.is_finite()) {
        return Some(dp);
    }
    match (c, pc) {
        (Some(c), Some(pc)) if c.is_finite() && pc.is_finite() && pc != 0.0 => {
            Some((c - pc) / pc * 100.0)
        }
        _ => None,
    }
}

/// Percent change from the first to the last daily close of the window.
///
/// Needs at least two closes and a non-zero first close.
pub fn weekly_change_pct(closes: &[f64]) -> Option<f64> {
    let (&first, &last) = (closes.first()?, closes.last()?);
    if closes.len() < 2 || first == 0.0 || !first.is_finite() || !last.is_finite() {
        return None;
    }
    Some((last - first) / first * 100.0)
}
