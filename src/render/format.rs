//! Remaining-time text

/// Format seconds as `M:SS`.
///
/// Negative input clamps to zero and fractional seconds are truncated, so a
/// countdown at 4.9s still reads `0:04` until the next whole second passes.
pub fn format_time(seconds: f64) -> String {
    let seconds = if seconds.is_finite() && seconds > 0.0 { seconds } else { 0.0 };
    let whole = seconds.floor() as u64;
    format!("{}:{:02}", whole / 60, whole % 60)
}
