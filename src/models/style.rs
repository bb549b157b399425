//! Playing-style classification.

use serde::{Deserialize, Serialize};

/// Loose/tight label derived from VPIP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LooseTight {
    #[serde(rename = "Very Loose")]
    VeryLoose,
    #[serde(rename = "Loose")]
    Loose,
    #[serde(rename = "Regular L/T")]
    Regular,
    #[serde(rename = "Tight")]
    Tight,
    #[serde(rename = "Very Tight")]
    VeryTight,
}

impl LooseTight {
    /// Classify a VPIP percentage (0 to 100).
    pub fn from_vpip(vpip: f64) -> Self {
        if vpip > 40.0 {
            LooseTight::VeryLoose
        } else if vpip > 30.0 {
            LooseTight::Loose
        } else if vpip > 20.0 {
            LooseTight::Regular
        } else if vpip > 10.0 {
            LooseTight::Tight
        } else {
            LooseTight::VeryTight
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LooseTight::VeryLoose => "Very Loose",
            LooseTight::Loose => "Loose",
            LooseTight::Regular => "Regular L/T",
            LooseTight::Tight => "Tight",
            LooseTight::VeryTight => "Very Tight",
        }
    }
}

impl std::fmt::Display for LooseTight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Passive/aggressive label derived from the aggression factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassiveAggressive {
    #[serde(rename = "Very Aggressive")]
    VeryAggressive,
    #[serde(rename = "Aggressive")]
    Aggressive,
    #[serde(rename = "Regular P/A")]
    Regular,
    #[serde(rename = "Passive")]
    Passive,
    #[serde(rename = "Very Passive")]
    VeryPassive,
}

impl PassiveAggressive {
    /// Classify an aggression factor (bets and raises per call).
    pub fn from_aggression(aggression_factor: f64) -> Self {
        if aggression_factor > 2.0 {
            PassiveAggressive::VeryAggressive
        } else if aggression_factor > 1.5 {
            PassiveAggressive::Aggressive
        } else if aggression_factor > 1.0 {
            PassiveAggressive::Regular
        } else if aggression_factor > 0.5 {
            PassiveAggressive::Passive
        } else {
            PassiveAggressive::VeryPassive
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PassiveAggressive::VeryAggressive => "Very Aggressive",
            PassiveAggressive::Aggressive => "Aggressive",
            PassiveAggressive::Regular => "Regular P/A",
            PassiveAggressive::Passive => "Passive",
            PassiveAggressive::VeryPassive => "Very Passive",
        }
    }
}

impl std::fmt::Display for PassiveAggressive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Position on the loose/tight (x) and passive/aggressive (y) plane.
/// Both axes are clamped to [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StyleCoordinates {
    pub x: f64,
    pub y: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loose_tight_thresholds() {
        assert_eq!(LooseTight::from_vpip(55.0), LooseTight::VeryLoose);
        assert_eq!(LooseTight::from_vpip(40.0), LooseTight::Loose);
        assert_eq!(LooseTight::from_vpip(30.5), LooseTight::Loose);
        assert_eq!(LooseTight::from_vpip(30.0), LooseTight::Regular);
        assert_eq!(LooseTight::from_vpip(20.0), LooseTight::Tight);
        assert_eq!(LooseTight::from_vpip(10.0), LooseTight::VeryTight);
        assert_eq!(LooseTight::from_vpip(0.0), LooseTight::VeryTight);
    }

    #[test]
    fn test_passive_aggressive_thresholds() {
        assert_eq!(
            PassiveAggressive::from_aggression(3.0),
            PassiveAggressive::VeryAggressive
        );
        assert_eq!(
            PassiveAggressive::from_aggression(2.0),
            PassiveAggressive::Aggressive
        );
        assert_eq!(
            PassiveAggressive::from_aggression(1.5),
            PassiveAggressive::Regular
        );
        assert_eq!(
            PassiveAggressive::from_aggression(1.0),
            PassiveAggressive::Passive
        );
        assert_eq!(
            PassiveAggressive::from_aggression(0.5),
            PassiveAggressive::VeryPassive
        );
    }

    #[test]
    fn test_labels_serialize_as_display_text() {
        let style = (LooseTight::Regular, PassiveAggressive::Regular);
        let json = serde_json::to_string(&style).unwrap();
        assert_eq!(json, r#"["Regular L/T","Regular P/A"]"#);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", LooseTight::VeryTight), "Very Tight");
        assert_eq!(format!("{}", PassiveAggressive::Passive), "Passive");
    }
}
