/// Ring circumference in canvas units: 2π·85, rounded.
pub const CIRCUMFERENCE: f64 = 534.0;

/// Ring radius the circumference above corresponds to.
pub const RING_RADIUS: f64 = 85.0;

/// Stroke-dash offset for the progress ring.
///
/// 0 means a full ring (nothing elapsed), `circumference` an empty one.
pub fn ring_offset(remaining_secs: u32, total_secs: u32, circumference: f64) -> f64 {
    if total_secs == 0 {
        return circumference;
    }
    circumference * (1.0 - remaining_secs as f64 / total_secs as f64)
}

/// Filled share of the ring in `0.0..=1.0`.
pub fn ring_fill(remaining_secs: u32, total_secs: u32) -> f64 {
    let offset = ring_offset(remaining_secs, total_secs, CIRCUMFERENCE);
    (1.0 - offset / CIRCUMFERENCE).clamp(0.0, 1.0)
}

/// Render seconds as `MM:SS`.
pub fn format_time(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
