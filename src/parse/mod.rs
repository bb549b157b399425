//! Hand-history line classification.
//!
//! Each raw log line is matched against an ordered table of templates and
//! turned into exactly one [`LogEvent`]. Lines that match nothing become
//! [`LogEvent::Unrecognized`] and are skipped by the engine.
//!
//! Amounts are rendered as `123.45.` in some log contexts, so trailing
//! periods are stripped before parsing. A malformed amount is an error, not
//! an unrecognized line.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use thiserror::Error;

use crate::models::{PlayerId, Street};

/// Errors raised while extracting typed fields from a recognized line.
#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("Invalid amount '{raw}' in line: {line}")]
    InvalidAmount { raw: String, line: String },

    #[error("Malformed stack entry '{entry}' in line: {line}")]
    MalformedStackEntry { entry: String, line: String },
}

/// A `"name @ id"` reference with the quotes stripped.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerRef {
    pub name: String,
    pub id: PlayerId,
}

impl PlayerRef {
    fn new(name: &str, id: &str) -> Self {
        Self {
            name: name.trim_matches('"').to_string(),
            id: PlayerId::from(id.trim().trim_matches('"')),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Bet,
    Raise,
    Call,
}

impl ActionKind {
    /// Bets and raises count toward aggression; calls do not.
    pub fn is_aggressive(&self) -> bool {
        matches!(self, ActionKind::Bet | ActionKind::Raise)
    }
}

/// Every event shape the engine understands.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEvent {
    /// The number is informational; `None` when it does not fit a `u64`.
    HandStart { number: Option<u64> },
    HandEnd,
    /// "The game #N starts." resets active-player tracking.
    NewGame,
    StandUp { player: PlayerRef, stack: f64 },
    DealtIn { player: PlayerRef },
    Street { street: Street, cards: String },
    Fold { player: PlayerRef },
    Join { player: PlayerRef, stack: f64 },
    StackSnapshot { stacks: Vec<(PlayerRef, f64)> },
    Showdown { player: PlayerRef },
    Action { player: PlayerRef, kind: ActionKind },
    Quit { player: PlayerRef, stack: f64 },
    Collect { player: PlayerRef, amount: f64 },
    Unrecognized,
}

impl LogEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            LogEvent::HandStart { .. } => "hand_start",
            LogEvent::HandEnd => "hand_end",
            LogEvent::NewGame => "new_game",
            LogEvent::StandUp { .. } => "stand_up",
            LogEvent::DealtIn { .. } => "dealt_in",
            LogEvent::Street { .. } => "street",
            LogEvent::Fold { .. } => "fold",
            LogEvent::Join { .. } => "join",
            LogEvent::StackSnapshot { .. } => "stack_snapshot",
            LogEvent::Showdown { .. } => "showdown",
            LogEvent::Action { .. } => "action",
            LogEvent::Quit { .. } => "quit",
            LogEvent::Collect { .. } => "collect",
            LogEvent::Unrecognized => "unrecognized",
        }
    }
}

type Extractor = fn(&Captures<'_>, &str) -> Result<LogEvent, ParseError>;

struct Template {
    pattern: Regex,
    extract: Extractor,
}

impl Template {
    fn new(pattern: &str, extract: Extractor) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("hand-history template must compile"),
            extract,
        }
    }
}

/// Templates in precedence order; the first match wins.
static TEMPLATES: Lazy<Vec<Template>> = Lazy::new(|| {
    vec![
        Template::new(r"^The game #(\d+) starts\.", |_, _| Ok(LogEvent::NewGame)),
        Template::new(r"^-- starting hand #(\d+)", |caps, _| {
            Ok(LogEvent::HandStart {
                number: caps[1].parse().ok(),
            })
        }),
        Template::new(r"-- ending hand", |_, _| Ok(LogEvent::HandEnd)),
        Template::new(
            r#"^The player "(.*?) @ (.*?)" stand up with the stack of ([\d.]+)"#,
            |caps, line| {
                Ok(LogEvent::StandUp {
                    player: player_ref(caps),
                    stack: parse_amount(&caps[3], line)?,
                })
            },
        ),
        Template::new(
            r#"^The player "(.*?) @ (.*?)" joined the game with a stack of ([\d.]+)"#,
            |caps, line| {
                Ok(LogEvent::Join {
                    player: player_ref(caps),
                    stack: parse_amount(&caps[3], line)?,
                })
            },
        ),
        Template::new(
            r#"^The player "(.*?) @ (.*?)" quits the game with a stack of ([\d.]+)"#,
            |caps, line| {
                Ok(LogEvent::Quit {
                    player: player_ref(caps),
                    stack: parse_amount(&caps[3], line)?,
                })
            },
        ),
        Template::new(r#"^Dealing down cards to "(.*?) @ (.*?)""#, |caps, _| {
            Ok(LogEvent::DealtIn {
                player: player_ref(caps),
            })
        }),
        Template::new(r"^Player stacks:(.*)", stack_snapshot),
        Template::new(r"^Flop:  \[(.*?)\]", |caps, _| {
            Ok(LogEvent::Street {
                street: Street::Flop,
                cards: caps[1].to_string(),
            })
        }),
        Template::new(r"^Turn: (.*?) \[(.*?)\]", |caps, _| {
            Ok(LogEvent::Street {
                street: Street::Turn,
                cards: caps[2].to_string(),
            })
        }),
        Template::new(r"^River: (.*?) \[(.*?)\]", |caps, _| {
            Ok(LogEvent::Street {
                street: Street::River,
                cards: caps[2].to_string(),
            })
        }),
        Template::new(r#"^(?:The player )?"(.*?) @ (.*?)" folds"#, |caps, _| {
            Ok(LogEvent::Fold {
                player: player_ref(caps),
            })
        }),
        Template::new(
            r#"^"(.*?) @ (.*?)" collected ([\d.]+) from pot"#,
            |caps, line| {
                Ok(LogEvent::Collect {
                    player: player_ref(caps),
                    amount: parse_amount(&caps[3], line)?,
                })
            },
        ),
        Template::new(r#""(.*?) @ (.*?)" shows"#, |caps, _| {
            Ok(LogEvent::Showdown {
                player: player_ref(caps),
            })
        }),
        Template::new(r#""(.*?) @ (.*?)" (raises|bets|calls)"#, |caps, _| {
            let kind = match &caps[3] {
                "raises" => ActionKind::Raise,
                "bets" => ActionKind::Bet,
                _ => ActionKind::Call,
            };
            Ok(LogEvent::Action {
                player: player_ref(caps),
                kind,
            })
        }),
    ]
});

/// One `name @ id (stack)` group of a stack snapshot, with an optional
/// `#seat` prefix and optional quotes.
static STACK_ENTRY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^\s*(?:#\d+\s+)?"?(.*?) @ (.*?)"?\s*\(([^)]*)\)\s*$"#)
        .expect("stack entry pattern must compile")
});

/// Classify one raw log line.
pub fn parse_line(line: &str) -> Result<LogEvent, ParseError> {
    for template in TEMPLATES.iter() {
        if let Some(caps) = template.pattern.captures(line) {
            return (template.extract)(&caps, line);
        }
    }
    Ok(LogEvent::Unrecognized)
}

/// Parse a chip amount, stripping trailing periods first.
pub fn parse_amount(raw: &str, line: &str) -> Result<f64, ParseError> {
    raw.trim_end_matches('.')
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidAmount {
            raw: raw.to_string(),
            line: line.to_string(),
        })
}

fn player_ref(caps: &Captures<'_>) -> PlayerRef {
    PlayerRef::new(&caps[1], &caps[2])
}

fn stack_snapshot(caps: &Captures<'_>, line: &str) -> Result<LogEvent, ParseError> {
    let mut stacks = Vec::new();

    for entry in caps[1].split('|').filter(|part| part.contains('@')) {
        let entry_caps =
            STACK_ENTRY
                .captures(entry)
                .ok_or_else(|| ParseError::MalformedStackEntry {
                    entry: entry.trim().to_string(),
                    line: line.to_string(),
                })?;
        let stack = parse_amount(entry_caps[3].trim(), line)?;
        stacks.push((PlayerRef::new(&entry_caps[1], &entry_caps[2]), stack));
    }

    Ok(LogEvent::StackSnapshot { stacks })
}
