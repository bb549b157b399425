//! Analysis results handed to callers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{LooseTight, PassiveAggressive, Player, PlayerId, StreetCounts, StyleCoordinates};

/// Per-player statistics as reported to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerReport {
    pub name: String,
    pub final_stack: f64,
    pub total_buyin: f64,
    pub net_profit: f64,
    pub hands_played: u32,
    pub hands_won: u32,
    /// Pots collected per hand played (a ratio, not a percentage)
    pub win_rate: f64,
    pub vpip: f64,
    /// (loose/tight, passive/aggressive)
    pub style: (LooseTight, PassiveAggressive),
    pub folded_by_street: StreetCounts,
    pub fold_percentage: f64,
    pub style_coordinates: StyleCoordinates,
    pub showdown_percentage: f64,
    pub showdown_win_rate: f64,
    pub aggression_factor: f64,
}

impl From<&Player> for PlayerReport {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            final_stack: player.current_stack,
            total_buyin: player.total_buyin,
            net_profit: player.net_profit(),
            hands_played: player.hands_played,
            hands_won: player.hands_won,
            win_rate: player.win_rate(),
            vpip: player.vpip_percentage(),
            style: player.style(),
            folded_by_street: player.folds,
            fold_percentage: player.fold_percentage(),
            style_coordinates: player.style_coordinates(),
            showdown_percentage: player.showdown_percentage(),
            showdown_win_rate: player.showdown_win_rate(),
            aggression_factor: player.aggression_factor(),
        }
    }
}

/// The full result of one analysis run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub total_hands: u32,
    pub hand_endings: StreetCounts,
    pub players: BTreeMap<PlayerId, PlayerReport>,
}

impl AnalysisReport {
    pub fn player(&self, id: &str) -> Option<&PlayerReport> {
        self.players.get(&PlayerId::from(id))
    }
}
