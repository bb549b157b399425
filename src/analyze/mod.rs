//! Hand-history analysis engine.
//!
//! An [`Analyzer`] consumes log lines oldest-first, keeping per-player
//! accumulators, the active-player set and the current hand. A second,
//! newest-first pass ([`reconcile`]) settles final stacks, after which
//! [`Analyzer::finalize`] emits the [`AnalysisReport`].
//!
//! Two counters are attributed at different moments and are kept that way:
//! hands played are credited to the players active at the hand-start line,
//! flops seen to the players active at the flop line.

pub mod reconcile;

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info, trace};

use crate::config::{AnalysisConfig, AppConfig};
use crate::models::{
    AnalysisReport, CurrentHand, Player, PlayerId, PlayerReport, Street, StreetCounts,
};
use crate::parse::{parse_line, ActionKind, LogEvent, ParseError, PlayerRef};
use crate::reader::{LogReader, ReaderError};

pub use reconcile::reconcile_stacks;

/// Errors that abort an analysis run.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to read log: {0}")]
    Reader(#[from] ReaderError),

    #[error("Failed to parse log: {0}")]
    Parse(#[from] ParseError),
}

/// State engine for a single log. Build a fresh one per analysis.
#[derive(Debug)]
pub struct Analyzer {
    config: AnalysisConfig,
    players: HashMap<PlayerId, Player>,
    active: HashSet<PlayerId>,
    current_hand: Option<CurrentHand>,
    /// Most recent lines of the current hand, capped at the showdown window
    hand_lines: VecDeque<String>,
    last_known_stack: HashMap<PlayerId, f64>,
    reconciled: HashMap<PlayerId, f64>,
    total_hands: u32,
    hand_endings: StreetCounts,
}

impl Analyzer {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            players: HashMap::new(),
            active: HashSet::new(),
            current_hand: None,
            hand_lines: VecDeque::with_capacity(config.showdown_window),
            last_known_stack: HashMap::new(),
            reconciled: HashMap::new(),
            total_hands: 0,
            hand_endings: StreetCounts::default(),
        }
    }

    /// Apply one log line, oldest-first.
    pub fn process(&mut self, line: &str) -> Result<(), ParseError> {
        let event = parse_line(line)?;
        trace!(kind = event.kind(), "{}", line);

        // These apply regardless of how the line is handled below.
        match &event {
            LogEvent::NewGame => {
                self.active.clear();
                self.hand_lines.clear();
                debug!("New game, active players reset");
            }
            LogEvent::Street {
                street: Street::Flop,
                ..
            } => self.credit_flop_seen(),
            LogEvent::Fold { player } => {
                self.active.remove(&player.id);
            }
            _ => {}
        }

        if self.current_hand.is_some() && !matches!(event, LogEvent::StandUp { .. }) {
            self.remember_line(line);
        }

        match event {
            LogEvent::HandStart { number } => self.start_hand(number),
            LogEvent::StandUp { player, stack } => self.stand_up(player, stack),
            LogEvent::DealtIn { player } => self.deal_in(player),
            LogEvent::Join { player, stack } => self.join(player, stack),
            LogEvent::StackSnapshot { stacks } => self.apply_snapshot(stacks),
            LogEvent::Showdown { player } => self.showdown(player),
            LogEvent::Action { player, kind } => self.action(player, kind),
            LogEvent::Quit { player, stack } => self.quit(player, stack),
            LogEvent::Collect { player, amount } => self.collect(player, amount),
            LogEvent::Fold { player } => self.attribute_fold(player),
            LogEvent::Street { street, cards } => {
                if let Some(hand) = self.current_hand.as_mut() {
                    hand.mark_street(street, cards);
                }
            }
            LogEvent::HandEnd => self.end_hand(),
            LogEvent::NewGame | LogEvent::Unrecognized => {}
        }

        Ok(())
    }

    /// Run the newest-first stack pass and remember its result for
    /// [`finalize`](Self::finalize). Running it again over the same lines
    /// gives the same stacks.
    pub fn reconcile<'a, I>(&mut self, newest_first: I) -> Result<(), ParseError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.reconciled = reconcile_stacks(newest_first)?;
        Ok(())
    }

    /// Merge reconciled stacks into the players and build the report.
    pub fn finalize(mut self) -> AnalysisReport {
        for (id, stack) in &self.reconciled {
            if let Some(player) = self.players.get_mut(id) {
                player.current_stack = *stack;
            }
        }

        let players = self
            .players
            .values()
            .map(|p| (p.id.clone(), PlayerReport::from(p)))
            .collect();

        info!(
            "Analysis complete: {} hands, {} players",
            self.total_hands,
            self.players.len()
        );

        AnalysisReport {
            total_hands: self.total_hands,
            hand_endings: self.hand_endings,
            players,
        }
    }

    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.get(&PlayerId::from(id))
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.contains(&PlayerId::from(id))
    }

    pub fn current_hand(&self) -> Option<&CurrentHand> {
        self.current_hand.as_ref()
    }

    pub fn last_known_stack(&self, id: &str) -> Option<f64> {
        self.last_known_stack.get(&PlayerId::from(id)).copied()
    }

    pub fn total_hands(&self) -> u32 {
        self.total_hands
    }

    pub fn hand_endings(&self) -> StreetCounts {
        self.hand_endings
    }

    fn remember_line(&mut self, line: &str) {
        self.hand_lines.push_back(line.to_string());
        while self.hand_lines.len() > self.config.showdown_window {
            self.hand_lines.pop_front();
        }
    }

    fn credit_flop_seen(&mut self) {
        for id in &self.active {
            if let Some(player) = self.players.get_mut(id) {
                player.hands_saw_flop += 1;
            }
        }
        debug!("Flop seen by {} active players", self.active.len());
    }

    fn start_hand(&mut self, number: Option<u64>) {
        if let Some(unfinished) = self.current_hand.take() {
            debug!(hand = ?unfinished.number, "Hand never ended, discarding");
        }

        self.total_hands += 1;
        self.hand_lines.clear();

        for id in &self.active {
            if let Some(player) = self.players.get_mut(id) {
                player.hands_played += 1;
            }
        }

        debug!(hand = ?number, "Hand starts with {} players", self.active.len());
        self.current_hand = Some(CurrentHand::new(number, self.active.clone()));
    }

    fn stand_up(&mut self, player: PlayerRef, stack: f64) {
        self.active.remove(&player.id);
        if let Some(p) = self.players.get_mut(&player.id) {
            p.current_stack = stack;
            p.stood_up = true;
            self.last_known_stack.insert(player.id, stack);
        }
    }

    fn deal_in(&mut self, player: PlayerRef) {
        match self.players.get(&player.id) {
            Some(p) if !p.stood_up => {
                if let Some(hand) = self.current_hand.as_mut() {
                    hand.dealt_in.insert(player.id.clone());
                }
                self.active.insert(player.id);
            }
            Some(_) => debug!("{} is standing up, not dealt in", player.id),
            None => {}
        }
    }

    fn join(&mut self, player: PlayerRef, stack: f64) {
        match self.players.entry(player.id.clone()) {
            Entry::Occupied(mut existing) => existing.get_mut().rejoin(stack),
            Entry::Vacant(slot) => {
                debug!("New player {} ({}) with {}", player.name, player.id, stack);
                slot.insert(Player::new(player.name, player.id.clone(), stack));
            }
        }
        self.last_known_stack.insert(player.id.clone(), stack);
        self.active.insert(player.id);
    }

    fn apply_snapshot(&mut self, stacks: Vec<(PlayerRef, f64)>) {
        for (player, stack) in stacks {
            if let Some(p) = self.players.get_mut(&player.id) {
                p.current_stack = stack;
            }
            self.last_known_stack.insert(player.id, stack);
        }
    }

    fn showdown(&mut self, player: PlayerRef) {
        let Some(p) = self.players.get_mut(&player.id) else {
            return;
        };
        p.hands_went_to_showdown += 1;

        // Heuristic: the collection has to be among the last few lines.
        let needle = format!("\"{} @ {}\" collected", player.name, player.id);
        if self.hand_lines.iter().any(|line| line.contains(&needle)) {
            p.hands_won_at_showdown += 1;
        }
    }

    fn action(&mut self, player: PlayerRef, kind: ActionKind) {
        if let Some(p) = self.players.get_mut(&player.id) {
            if kind.is_aggressive() {
                p.total_bets_and_raises += 1;
            } else {
                p.total_calls += 1;
            }
        }
    }

    fn quit(&mut self, player: PlayerRef, stack: f64) {
        if let Some(p) = self.players.get_mut(&player.id) {
            p.current_stack = stack;
            self.active.remove(&player.id);
            self.last_known_stack.insert(player.id, stack);
        }
    }

    fn collect(&mut self, player: PlayerRef, amount: f64) {
        if let Some(p) = self.players.get_mut(&player.id) {
            p.hands_won += 1;
            p.total_won += amount;
        }
    }

    fn attribute_fold(&mut self, player: PlayerRef) {
        let Some(hand) = self.current_hand.as_ref() else {
            return;
        };
        if let Some(p) = self.players.get_mut(&player.id) {
            p.record_fold(hand.street());
        }
    }

    fn end_hand(&mut self) {
        if let Some(hand) = self.current_hand.take() {
            let street = hand.street();
            self.hand_endings.increment(street);
            debug!(
                hand = ?hand.number,
                "Hand ended on the {} with {} players dealt in ({} so far)",
                street,
                hand.dealt_in.len(),
                self.hand_endings.get(street)
            );
        }
    }
}

/// Run both passes over a loaded log.
pub fn analyze(reader: &LogReader, config: AnalysisConfig) -> Result<AnalysisReport, AnalysisError> {
    info!("Analyzing {} log lines", reader.len());

    let mut analyzer = Analyzer::new(config);
    for line in reader.chronological() {
        analyzer.process(line)?;
    }
    analyzer.reconcile(reader.newest_first())?;

    Ok(analyzer.finalize())
}

/// Load a CSV log from disk and analyze it.
pub fn analyze_file(path: &Path, config: &AppConfig) -> Result<AnalysisReport, AnalysisError> {
    let reader = LogReader::from_path(path, &config.reader)?;
    analyze(&reader, config.analysis)
}
