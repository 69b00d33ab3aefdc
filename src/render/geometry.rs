//! Arc geometry for the circular control
//!
//! The foreground sector is described as an SVG path: a pie slice swept
//! clockwise from 12 o'clock whose angle is proportional to the time left.

use std::time::Duration;

/// Center x of the control in viewbox units
pub const CENTER_X: f64 = 100.0;
/// Center y of the control in viewbox units
pub const CENTER_Y: f64 = 100.0;
/// Radius of the sector and of the background track
pub const RADIUS: f64 = 90.0;
/// Width and height of the square viewbox
pub const VIEWBOX: f64 = 200.0;

/// Offset of the end point used to close a full circle with one arc command
const FULL_CIRCLE_NUDGE: f64 = 0.01;

/// Fraction of the run still ahead, clamped to `[0, 1]`.
///
/// A zero total yields `0.0` so a zero-length timer draws nothing.
pub fn fraction_remaining(remaining: Duration, total: Duration) -> f64 {
    if total.is_zero() {
        return 0.0;
    }
    (remaining.as_secs_f64() / total.as_secs_f64()).clamp(0.0, 1.0)
}

/// Sweep angle in degrees for a fraction in `[0, 1]`
pub fn sweep_angle(fraction: f64) -> f64 {
    fraction.clamp(0.0, 1.0) * 360.0
}

/// Describe a circular sector of `angle_deg` degrees as an SVG path.
///
/// - `angle_deg <= 0` returns an empty path; the caller hides the sector.
/// - `angle_deg >= 360` returns a closed full circle drawn as a single arc to
///   a point nudged just left of the start, since an arc whose end equals its
///   start is not drawn at all.
/// - Otherwise the path runs from the center up to 12 o'clock and arcs
///   clockwise. The large-arc flag is set only above 180 degrees.
pub fn describe_arc(cx: f64, cy: f64, r: f64, angle_deg: f64) -> String {
    if angle_deg.is_nan() || angle_deg <= 0.0 {
        return String::new();
    }

    let top_y = cy - r;

    if angle_deg >= 360.0 {
        return format!(
            "M {cx} {top_y} A {r} {r} 0 1 1 {end_x} {top_y} Z",
            end_x = cx - FULL_CIRCLE_NUDGE,
        );
    }

    let large_arc = u8::from(angle_deg > 180.0);
    let radians = angle_deg.to_radians();
    let end_x = cx + r * radians.sin();
    let end_y = cy - r * radians.cos();

    format!("M {cx} {cy} L {cx} {top_y} A {r} {r} 0 {large_arc} 1 {end_x} {end_y} Z")
}

/// Sector path for the widget's fixed circle
pub fn widget_arc(remaining: Duration, total: Duration) -> String {
    let angle = sweep_angle(fraction_remaining(remaining, total));
    describe_arc(CENTER_X, CENTER_Y, RADIUS, angle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_angle_is_empty() {
        assert_eq!(describe_arc(100.0, 100.0, 90.0, 0.0), "");
        assert_eq!(describe_arc(100.0, 100.0, 90.0, -10.0), "");
    }

    #[test]
    fn full_circle_uses_nudged_endpoint() {
        let path = describe_arc(100.0, 100.0, 90.0, 360.0);
        assert_eq!(path, "M 100 10 A 90 90 0 1 1 99.99 10 Z");
        assert_eq!(describe_arc(100.0, 100.0, 90.0, 400.0), path);
    }

    #[test]
    fn half_circle_uses_small_arc_flag() {
        let path = describe_arc(100.0, 100.0, 90.0, 180.0);
        assert!(path.starts_with("M 100 100 L 100 10 A 90 90 0 0 1 "));
        assert_ne!(path, describe_arc(100.0, 100.0, 90.0, 360.0));
    }

    #[test]
    fn large_arc_flag_above_half() {
        let path = describe_arc(100.0, 100.0, 90.0, 270.0);
        assert!(path.contains("A 90 90 0 1 1 10 "));
        assert!(path.ends_with(" Z"));
    }

    #[test]
    fn quarter_ends_at_three_oclock() {
        let path = describe_arc(100.0, 100.0, 90.0, 90.0);
        assert!(path.contains("A 90 90 0 0 1 190 "));
    }

    #[test]
    fn describe_arc_is_pure() {
        for angle in [0.0, 12.5, 180.0, 359.9, 360.0] {
            assert_eq!(
                describe_arc(50.0, 60.0, 40.0, angle),
                describe_arc(50.0, 60.0, 40.0, angle)
            );
        }
    }

    #[test]
    fn fraction_handles_zero_total() {
        assert_eq!(fraction_remaining(Duration::ZERO, Duration::ZERO), 0.0);
        assert_eq!(
            fraction_remaining(Duration::from_secs(5), Duration::from_secs(10)),
            0.5
        );
        assert_eq!(
            fraction_remaining(Duration::from_secs(20), Duration::from_secs(10)),
            1.0
        );
    }

    #[test]
    fn widget_arc_is_full_when_untouched() {
        let total = Duration::from_secs(1200);
        assert_eq!(
            widget_arc(total, total),
            describe_arc(CENTER_X, CENTER_Y, RADIUS, 360.0)
        );
        assert_eq!(widget_arc(Duration::ZERO, total), "");
    }
}
