//! Final stack reconciliation.
//!
//! Stack snapshots and quits are only trustworthy by recency, and the
//! forward pass can leave a stale stack behind when joins, snapshots and
//! quits interleave. Walking the log newest-first, the first stack seen for a
//! player is the most recent one in real time and wins.

use std::collections::HashMap;

use tracing::debug;

use crate::models::PlayerId;
use crate::parse::{parse_line, LogEvent, ParseError};

/// Collect the authoritative final stack per player from newest-first lines.
pub fn reconcile_stacks<'a, I>(newest_first: I) -> Result<HashMap<PlayerId, f64>, ParseError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut stacks = HashMap::new();

    for line in newest_first {
        match parse_line(line)? {
            LogEvent::Quit { player, stack } => {
                stacks.entry(player.id).or_insert(stack);
            }
            LogEvent::StackSnapshot { stacks: entries } => {
                for (player, stack) in entries {
                    stacks.entry(player.id).or_insert(stack);
                }
            }
            _ => {}
        }
    }

    debug!("Reconciled final stacks for {} players", stacks.len());
    Ok(stacks)
}
