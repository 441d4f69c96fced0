//! Centralized display formatting utilities.
//!
//! All textual formatting used by the overlay goes through this module so
//! the panel and the effects agree on how clocks and coordinates read.

/// Format a number of whole seconds as `M:SS`.
///
/// # Examples
/// ```
/// use noisefloor_types::formatting::format_track_clock;
/// assert_eq!(format_track_clock(0), "0:00");
/// assert_eq!(format_track_clock(65), "1:05");
/// assert_eq!(format_track_clock(754), "12:34");
/// ```
pub fn format_track_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Format a track position against its length as `M:SS / M:SS`, clamping
/// the position into the track window.
///
/// # Examples
/// ```
/// use noisefloor_types::formatting::format_track_progress;
/// assert_eq!(format_track_progress(30, 180), "0:30 / 3:00");
/// assert_eq!(format_track_progress(200, 180), "3:00 / 3:00");
/// ```
pub fn format_track_progress(position_secs: u64, length_secs: u64) -> String {
    let position = position_secs.min(length_secs);
    format!(
        "{} / {}",
        format_track_clock(position),
        format_track_clock(length_secs)
    )
}

/// Format a coordinate in degrees with its hemisphere suffix.
///
/// Four decimal places, matching a GPS-style readout.
///
/// # Examples
/// ```
/// use noisefloor_types::formatting::format_coordinate;
/// assert_eq!(format_coordinate(48.8566, 'N', 'S'), "48.8566°N");
/// assert_eq!(format_coordinate(-2.3522, 'E', 'W'), "2.3522°W");
/// ```
pub fn format_coordinate(degrees: f64, positive: char, negative: char) -> String {
    let hemisphere = if degrees < 0.0 { negative } else { positive };
    format!("{:.4}°{}", degrees.abs(), hemisphere)
}

/// Truncate a string to `max_chars`, appending `...` when truncated.
/// The kept prefix is trimmed so the ellipsis never follows a space.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", kept.trim_end())
    }
}
