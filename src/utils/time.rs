/// Formats elapsed seconds as a compact axis label.
///
/// Zero components are left out, so a whole minute prints as `1m` rather than
/// `1m0s`. Fractional seconds are rounded and negative input is treated as zero.
///
/// ```rust
/// use hwmon_history::utils::format_total_seconds;
///
/// assert_eq!(format_total_seconds(100.0), "1m40s");
/// assert_eq!(format_total_seconds(3800.0), "1h3m20s");
/// ```
pub fn format_total_seconds(total_seconds: f64) -> String {
    let total = if total_seconds.is_finite() { total_seconds.max(0.0).round() as u64 } else { 0 };
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;

    let mut label = String::new();
    if hours > 0 {
        label.push_str(&format!("{}h", hours));
    }
    if minutes > 0 {
        label.push_str(&format!("{}m", minutes));
    }
    if seconds > 0 || label.is_empty() {
        label.push_str(&format!("{}s", seconds));
    }
    label
}
