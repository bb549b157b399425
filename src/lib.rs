//! # Poker Log Stats
//!
//! Reads a poker room's hand-history export and reports per-player results
//! and playing style.
//!
//! ## Architecture
//!
//! - **reader**: CSV hand-history loading, in either row order
//! - **parse**: Event pattern matching for single log lines
//! - **analyze**: The per-line state engine and final stack reconciliation
//! - **models**: Players, hands, reports, summaries and exports
//! - **calculate**: Derived ratios and percentages
//! - **api**: REST API endpoints
//! - **config**: Configuration loading and validation

pub mod analyze;
pub mod api;
pub mod calculate;
pub mod config;
pub mod models;
pub mod parse;
pub mod reader;

pub use models::*;

use std::time::Duration;

/// Parse a session length such as "3h", "45m" or "90s". A bare number is
/// taken as seconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    let unit_at = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let (digits, unit) = s.split_at(unit_at);

    let seconds_per_unit: u64 = match unit {
        "h" => 3600,
        "m" => 60,
        "s" | "" => 1,
        _ => return None,
    };

    digits
        .parse::<u64>()
        .ok()?
        .checked_mul(seconds_per_unit)
        .map(Duration::from_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration_units() {
        assert_eq!(parse_duration("3h"), Some(Duration::from_secs(3 * 3600)));
        assert_eq!(parse_duration("45m"), Some(Duration::from_secs(45 * 60)));
        assert_eq!(parse_duration("90s"), Some(Duration::from_secs(90)));
    }

    #[test]
    fn test_parse_duration_bare_number_is_seconds() {
        assert_eq!(parse_duration(" 120 "), Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_parse_duration_rejects_garbage() {
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("2.5h"), None);
        assert_eq!(parse_duration("3d"), None);
    }

    #[test]
    fn test_parse_duration_overflow_is_none() {
        assert_eq!(parse_duration("9999999999999999h"), None);
    }
}
