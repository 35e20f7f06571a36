// xcclean-common/src/format.rs
//! Human-readable rendering of sizes and file ages.

use std::time::{Duration, SystemTime};

pub fn format_bytes(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    if size >= GB {
        format!("{:.1}GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.1}MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.1}KB", size as f64 / KB as f64)
    } else {
        format!("{size}B")
    }
}

/// Renders how long ago `modified` was, truncated to the largest whole unit
/// so the output stays short ("3days ago", not "3days 4h 12m 9s ago").
pub fn format_age(modified: SystemTime) -> String {
    match SystemTime::now().duration_since(modified) {
        Ok(age) => {
            let secs = age.as_secs();
            let truncated = if secs >= 86_400 {
                secs - secs % 86_400
            } else if secs >= 3_600 {
                secs - secs % 3_600
            } else if secs >= 60 {
                secs - secs % 60
            } else {
                secs
            };
            format!(
                "{} ago",
                humantime::format_duration(Duration::from_secs(truncated))
            )
        }
        // Modified timestamp in the future (clock skew); treat as fresh.
        Err(_) => "just now".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_picks_unit() {
        assert_eq!(format_bytes(0), "0B");
        assert_eq!(format_bytes(512), "512B");
        assert_eq!(format_bytes(2048), "2.0KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0GB");
    }

    #[test]
    fn format_age_truncates_to_whole_days() {
        let modified = SystemTime::now() - Duration::from_secs(3 * 86_400 + 4 * 3_600);
        assert_eq!(format_age(modified), "3days ago");
    }

    #[test]
    fn format_age_handles_future_timestamps() {
        let modified = SystemTime::now() + Duration::from_secs(600);
        assert_eq!(format_age(modified), "just now");
    }
}
