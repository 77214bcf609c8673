//! Human-readable offline durations.
//!
//! Elapsed minutes escalate through three unit tiers: minutes, hours, days.
//! Each tier keeps only the next-smaller unit as a remainder, so "1 day 1 hour"
//! never carries leftover minutes.

const MINUTES_PER_HOUR: u64 = 60;
const HOURS_PER_DAY: u64 = 24;

/// Format an offline duration given in minutes.
///
/// Absent, zero, negative and NaN inputs all collapse to `"0 minutes"`.
/// Fractional minutes round up, so a device that has been down for 1.2
/// minutes reports "2 minutes".
pub fn format_offline_duration(minutes: Option<f64>) -> String {
    let minutes = match minutes {
        Some(m) if m > 0.0 => m,
        _ => return "0 minutes".to_string(),
    };

    // `as` saturates, which also clamps +inf
    let rounded = minutes.ceil() as u64;

    if rounded < MINUTES_PER_HOUR {
        return unit(rounded, "minute");
    }

    let hours = rounded / MINUTES_PER_HOUR;
    let remaining_minutes = rounded % MINUTES_PER_HOUR;

    if hours < HOURS_PER_DAY {
        return with_remainder(unit(hours, "hour"), remaining_minutes, "minute");
    }

    let days = hours / HOURS_PER_DAY;
    let remaining_hours = hours % HOURS_PER_DAY;

    with_remainder(unit(days, "day"), remaining_hours, "hour")
}

fn unit(count: u64, name: &str) -> String {
    if count == 1 {
        format!("{} {}", count, name)
    } else {
        format!("{} {}s", count, name)
    }
}

fn with_remainder(mut head: String, remainder: u64, name: &str) -> String {
    if remainder > 0 {
        head.push(' ');
        head.push_str(&unit(remainder, name));
    }
    head
}
