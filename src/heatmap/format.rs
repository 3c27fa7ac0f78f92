/// Format a percentage change with two decimals, or `"--"` when missing/NaN.
pub fn format_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v),
        _ => "--".to_string(),
    }
}

/// Format a market capitalization (in dollars) into a short human-readable string.
pub fn format_market_cap(value: f64) -> String {
    const THOUSAND: f64 = 1_000.0;
    const MILLION: f64 = 1_000.0 * THOUSAND;
    const BILLION: f64 = 1_000.0 * MILLION;
    const TRILLION: f64 = 1_000.0 * BILLION;

    if !value.is_finite() || value <= 0.0 {
        "--".to_string()
    } else if value >= TRILLION {
        format!("${:.2}T", value / TRILLION)
    } else if value >= BILLION {
        format!("${:.2}B", value / BILLION)
    } else if value >= MILLION {
        format!("${:.2}M", value / MILLION)
    } else {
        format!("${:.0}", value)
    }
}
