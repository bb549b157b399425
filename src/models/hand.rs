//! Per-hand context and street bookkeeping.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// A betting round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Street::Preflop => write!(f, "preflop"),
            Street::Flop => write!(f, "flop"),
            Street::Turn => write!(f, "turn"),
            Street::River => write!(f, "river"),
        }
    }
}

/// Counts split by street: folds per street for a player, or hand endings
/// per street for the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetCounts {
    pub preflop: u32,
    pub flop: u32,
    pub turn: u32,
    pub river: u32,
}

impl StreetCounts {
    pub fn increment(&mut self, street: Street) {
        match street {
            Street::Preflop => self.preflop += 1,
            Street::Flop => self.flop += 1,
            Street::Turn => self.turn += 1,
            Street::River => self.river += 1,
        }
    }

    pub fn get(&self, street: Street) -> u32 {
        match street {
            Street::Preflop => self.preflop,
            Street::Flop => self.flop,
            Street::Turn => self.turn,
            Street::River => self.river,
        }
    }

    pub fn total(&self) -> u32 {
        self.preflop + self.flop + self.turn + self.river
    }
}

/// The hand currently being played.
///
/// Board cards are kept only as "street reached" markers.
#[derive(Debug, Clone)]
pub struct CurrentHand {
    /// `None` when the logged number was unreadable
    pub number: Option<u64>,
    /// Players seated at the start plus those dealt cards later
    pub dealt_in: HashSet<PlayerId>,
    pub flop: Option<String>,
    pub turn: Option<String>,
    pub river: Option<String>,
}

impl CurrentHand {
    pub fn new(number: Option<u64>, dealt_in: HashSet<PlayerId>) -> Self {
        Self {
            number,
            dealt_in,
            flop: None,
            turn: None,
            river: None,
        }
    }

    /// Record the cards that opened a street. Preflop has no marker.
    pub fn mark_street(&mut self, street: Street, cards: String) {
        match street {
            Street::Preflop => {}
            Street::Flop => self.flop = Some(cards),
            Street::Turn => self.turn = Some(cards),
            Street::River => self.river = Some(cards),
        }
    }

    /// The street a fold or a hand ending is attributed to, judged by the
    /// first missing marker.
    pub fn street(&self) -> Street {
        if self.flop.is_none() {
            Street::Preflop
        } else if self.turn.is_none() {
            Street::Flop
        } else if self.river.is_none() {
            Street::Turn
        } else {
            Street::River
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_street_follows_first_missing_marker() {
        let mut hand = CurrentHand::new(Some(1), HashSet::new());
        assert_eq!(hand.street(), Street::Preflop);

        hand.mark_street(Street::Flop, "Ah Kd 2c".to_string());
        assert_eq!(hand.street(), Street::Flop);

        hand.mark_street(Street::Turn, "7s".to_string());
        assert_eq!(hand.street(), Street::Turn);

        hand.mark_street(Street::River, "9h".to_string());
        assert_eq!(hand.street(), Street::River);
    }

    #[test]
    fn test_river_without_turn_is_still_turn() {
        let mut hand = CurrentHand::new(Some(2), HashSet::new());
        hand.mark_street(Street::Flop, "Ah Kd 2c".to_string());
        hand.mark_street(Street::River, "9h".to_string());
        assert_eq!(hand.street(), Street::Flop);
    }

    #[test]
    fn test_street_counts() {
        let mut counts = StreetCounts::default();
        counts.increment(Street::Flop);
        counts.increment(Street::Flop);
        counts.increment(Street::River);

        assert_eq!(counts.get(Street::Flop), 2);
        assert_eq!(counts.get(Street::Preflop), 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_street_counts_serialization() {
        let counts = StreetCounts {
            preflop: 1,
            flop: 2,
            turn: 3,
            river: 4,
        };
        let json = serde_json::to_value(counts).unwrap();
        assert_eq!(json["turn"], 3);
    }
}
