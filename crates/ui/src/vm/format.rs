/// Percentage with two decimals, e.g. `"66.67%"`.
#[must_use]
pub fn format_percent(value: f64) -> String {
    format!("{value:.2}%")
}

/// Hours without trailing zeros, e.g. `"2.5"` or `"3"`.
#[must_use]
pub fn format_hours(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_owned()
}

/// Width style for a progress bar fill.
#[must_use]
pub fn bar_width(percent: f64) -> String {
    format!("width: {:.2}%;", percent.clamp(0.0, 100.0))
}
