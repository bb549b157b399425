//! Per-player accumulators and the metrics derived from them.

use serde::{Deserialize, Serialize};

use super::{
    LooseTight, PassiveAggressive, PlayerId, Street, StreetCounts, StyleCoordinates,
};
use crate::calculate;

/// Everything tracked for one player during a single analysis.
///
/// Counters only ever increase. `current_stack` is overwritten, never
/// accumulated, by stack-bearing events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub id: PlayerId,
    pub current_stack: f64,
    pub total_buyin: f64,
    pub total_won: f64,
    pub hands_played: u32,
    pub hands_won: u32,
    pub folds: StreetCounts,
    pub hands_saw_flop: u32,
    pub hands_went_to_showdown: u32,
    pub hands_won_at_showdown: u32,
    pub total_bets_and_raises: u32,
    pub total_calls: u32,
    pub stood_up: bool,
}

impl Player {
    /// A newly seated player; the opening stack is their first buy-in.
    pub fn new(name: String, id: PlayerId, stack: f64) -> Self {
        Self {
            name,
            id,
            current_stack: stack,
            total_buyin: stack,
            total_won: 0.0,
            hands_played: 0,
            hands_won: 0,
            folds: StreetCounts::default(),
            hands_saw_flop: 0,
            hands_went_to_showdown: 0,
            hands_won_at_showdown: 0,
            total_bets_and_raises: 0,
            total_calls: 0,
            stood_up: false,
        }
    }

    /// Apply a join for a player already on record.
    ///
    /// Joining with an empty stack counts as a fresh buy-in; any other join
    /// is a re-stack and only replaces the stack.
    pub fn rejoin(&mut self, stack: f64) {
        if self.current_stack == 0.0 {
            self.total_buyin += stack;
        }
        self.current_stack = stack;
        self.stood_up = false;
    }

    pub fn record_fold(&mut self, street: Street) {
        self.folds.increment(street);
    }

    pub fn net_profit(&self) -> f64 {
        self.current_stack - self.total_buyin
    }

    pub fn vpip_percentage(&self) -> f64 {
        calculate::vpip_percentage(self.hands_played, self.folds.preflop)
    }

    pub fn fold_percentage(&self) -> f64 {
        calculate::fold_percentage(self.hands_played, self.folds.total())
    }

    /// Pots collected per hand played.
    pub fn win_rate(&self) -> f64 {
        calculate::ratio(self.hands_won as f64, self.hands_played as f64)
    }

    /// Share of flops seen that went on to showdown.
    pub fn showdown_percentage(&self) -> f64 {
        calculate::percentage(
            self.hands_went_to_showdown as f64,
            self.hands_saw_flop as f64,
        )
    }

    pub fn showdown_win_rate(&self) -> f64 {
        calculate::percentage(
            self.hands_won_at_showdown as f64,
            self.hands_went_to_showdown as f64,
        )
    }

    /// Bets and raises per call.
    pub fn aggression_factor(&self) -> f64 {
        calculate::ratio(self.total_bets_and_raises as f64, self.total_calls as f64)
    }

    pub fn style(&self) -> (LooseTight, PassiveAggressive) {
        (
            LooseTight::from_vpip(self.vpip_percentage()),
            PassiveAggressive::from_aggression(self.aggression_factor()),
        )
    }

    pub fn style_coordinates(&self) -> StyleCoordinates {
        calculate::style_coordinates(self.vpip_percentage(), self.aggression_factor())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new("Alice".to_string(), PlayerId::from("a1"), 100.0)
    }

    #[test]
    fn test_new_player_buyin_equals_stack() {
        let p = player();
        assert_eq!(p.current_stack, 100.0);
        assert_eq!(p.total_buyin, 100.0);
        assert_eq!(p.net_profit(), 0.0);
    }

    #[test]
    fn test_rejoin_busted_adds_buyin() {
        let mut p = player();
        p.current_stack = 0.0;
        p.rejoin(200.0);
        assert_eq!(p.total_buyin, 300.0);
        assert_eq!(p.current_stack, 200.0);
    }

    #[test]
    fn test_rejoin_with_chips_is_restack() {
        let mut p = player();
        p.current_stack = 40.0;
        p.stood_up = true;
        p.rejoin(40.0);
        assert_eq!(p.total_buyin, 100.0);
        assert_eq!(p.current_stack, 40.0);
        assert!(!p.stood_up);
    }

    #[test]
    fn test_zero_denominators() {
        let p = player();
        assert_eq!(p.vpip_percentage(), 0.0);
        assert_eq!(p.fold_percentage(), 0.0);
        assert_eq!(p.win_rate(), 0.0);
        assert_eq!(p.showdown_percentage(), 0.0);
        assert_eq!(p.showdown_win_rate(), 0.0);
        assert_eq!(p.aggression_factor(), 0.0);
    }

    #[test]
    fn test_derived_metrics() {
        let mut p = player();
        p.hands_played = 10;
        p.hands_won = 2;
        p.record_fold(Street::Preflop);
        p.record_fold(Street::Preflop);
        p.record_fold(Street::Preflop);
        p.record_fold(Street::Turn);
        p.hands_saw_flop = 4;
        p.hands_went_to_showdown = 2;
        p.hands_won_at_showdown = 1;
        p.total_bets_and_raises = 3;
        p.total_calls = 2;
        p.current_stack = 150.0;

        assert_eq!(p.net_profit(), 50.0);
        assert_eq!(p.vpip_percentage(), 70.0);
        assert_eq!(p.fold_percentage(), 40.0);
        assert_eq!(p.win_rate(), 0.2);
        assert_eq!(p.showdown_percentage(), 50.0);
        assert_eq!(p.showdown_win_rate(), 50.0);
        assert_eq!(p.aggression_factor(), 1.5);
        assert_eq!(
            p.style(),
            (LooseTight::VeryLoose, PassiveAggressive::Regular)
        );
    }

    #[test]
    fn test_aggression_without_calls() {
        let mut p = player();
        p.total_bets_and_raises = 7;
        assert_eq!(p.aggression_factor(), 0.0);
        assert_eq!(p.style().1, PassiveAggressive::VeryPassive);
    }
}
