//! Statistics calculation.
//!
//! Pure functions behind every derived player metric:
//! - Zero-safe ratios and percentages
//! - VPIP and fold percentages
//! - Style plane coordinates

use crate::models::StyleCoordinates;

/// Divide, returning 0.0 when the denominator is 0.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Percentage of `part` over `whole`, clamped to [0, 100].
///
/// Counters are attributed at different moments of a hand (hands played at
/// hand start, flops seen at the flop line), so `part` can exceed `whole`.
pub fn percentage(part: f64, whole: f64) -> f64 {
    (ratio(part, whole) * 100.0).clamp(0.0, 100.0)
}

/// Voluntarily-put-in-pot percentage: hands not folded preflop over hands played.
pub fn vpip_percentage(hands_played: u32, folded_preflop: u32) -> f64 {
    percentage(
        hands_played as f64 - folded_preflop as f64,
        hands_played as f64,
    )
}

/// Share of played hands that ended in a fold on any street.
pub fn fold_percentage(hands_played: u32, total_folds: u32) -> f64 {
    percentage(total_folds as f64, hands_played as f64)
}

/// Map VPIP and aggression factor onto the [-1, 1] style plane.
///
/// x is centred on 25% VPIP with a 30 point range, y on an aggression
/// factor of 1.0 with a range of 1.0.
pub fn style_coordinates(vpip: f64, aggression_factor: f64) -> StyleCoordinates {
    StyleCoordinates {
        x: ((vpip - 25.0) / 30.0).clamp(-1.0, 1.0),
        y: (aggression_factor - 1.0).clamp(-1.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(3.0, 2.0), 1.5);
        assert_eq!(ratio(5.0, 0.0), 0.0);
        assert_eq!(ratio(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_percentage_bounds() {
        assert_eq!(percentage(1.0, 4.0), 25.0);
        assert_eq!(percentage(7.0, 0.0), 0.0);
        assert_eq!(percentage(5.0, 2.0), 100.0);
        assert_eq!(percentage(-1.0, 2.0), 0.0);
    }

    #[test]
    fn test_vpip_percentage() {
        assert_eq!(vpip_percentage(10, 7), 30.0);
        assert_eq!(vpip_percentage(0, 0), 0.0);
        // Folded preflop in hands it was not counted as dealt into
        assert_eq!(vpip_percentage(1, 3), 0.0);
    }

    #[test]
    fn test_fold_percentage() {
        assert_eq!(fold_percentage(4, 3), 75.0);
        assert_eq!(fold_percentage(0, 2), 0.0);
    }

    #[test]
    fn test_style_coordinates_centre() {
        let c = style_coordinates(25.0, 1.0);
        assert_eq!(c.x, 0.0);
        assert_eq!(c.y, 0.0);
    }

    #[test]
    fn test_style_coordinates_clamped() {
        let c = style_coordinates(100.0, 0.0);
        assert_eq!(c.x, 1.0);
        assert_eq!(c.y, -1.0);

        let c = style_coordinates(0.0, 10.0);
        assert!((c.x - (-25.0 / 30.0)).abs() < 1e-9);
        assert_eq!(c.y, 1.0);
    }
}
