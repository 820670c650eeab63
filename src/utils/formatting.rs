//! Formatting utilities used for CLI and export outputs.

/// Elapsed minutes as the field crews read it: "2hr 15min".
pub fn format_minutes(minutes: f64) -> String {
    let whole = minutes.max(0.0);
    let hours = (whole / 60.0).floor() as i64;
    let mins = (whole % 60.0).round() as i64;
    format!("{}hr {}min", hours, mins)
}
