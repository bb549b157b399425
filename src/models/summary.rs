//! Session-level views over an analysis report.

use std::cmp::Ordering;
use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AnalysisReport, PlayerId, PlayerReport, SessionId, StreetCounts, StyleCoordinates};

/// Ordering used for the session leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    Profit,
    Hands,
    WinRate,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "profit" => Ok(SortKey::Profit),
            "hands" => Ok(SortKey::Hands),
            "winrate" | "win_rate" => Ok(SortKey::WinRate),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// One leaderboard row.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryRow {
    pub id: PlayerId,
    pub name: String,
    pub net_profit: f64,
    pub hands_played: u32,
    pub win_rate: f64,
    pub vpip: f64,
    pub aggression_factor: f64,
}

/// Leaderboard plus table totals for a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub total_hands: u32,
    /// Half the sum of absolute net results, i.e. the money that changed hands.
    pub money_in_play: f64,
    pub biggest_win: f64,
    pub biggest_loss: f64,
    pub hands_per_hour: Option<f64>,
    pub rows: Vec<SummaryRow>,
}

impl SessionSummary {
    pub fn from_report(report: &AnalysisReport, sort: SortKey, duration: Option<Duration>) -> Self {
        let mut rows: Vec<SummaryRow> = report
            .players
            .iter()
            .map(|(id, p)| SummaryRow {
                id: id.clone(),
                name: p.name.clone(),
                net_profit: p.net_profit,
                hands_played: p.hands_played,
                win_rate: p.win_rate,
                vpip: p.vpip,
                aggression_factor: p.aggression_factor,
            })
            .collect();

        rows.sort_by(|a, b| match sort {
            SortKey::Profit => desc(a.net_profit, b.net_profit),
            SortKey::Hands => b.hands_played.cmp(&a.hands_played),
            SortKey::WinRate => desc(a.win_rate, b.win_rate),
        });

        let money_in_play = rows.iter().map(|r| r.net_profit.abs()).sum::<f64>() / 2.0;
        let biggest_win = rows
            .iter()
            .map(|r| r.net_profit)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.max(v))))
            .unwrap_or(0.0);
        let biggest_loss = rows
            .iter()
            .map(|r| r.net_profit)
            .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |a| a.min(v))))
            .unwrap_or(0.0);

        let hands_per_hour = duration
            .filter(|d| !d.is_zero())
            .map(|d| report.total_hands as f64 / (d.as_secs_f64() / 3600.0));

        Self {
            total_hands: report.total_hands,
            money_in_play,
            biggest_win,
            biggest_loss,
            hands_per_hour,
            rows,
        }
    }
}

fn desc(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Money in and out for one player.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFinancial {
    pub buy_in: f64,
    pub final_stack: f64,
    pub net_profit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPerformance {
    pub hands_played: u32,
    pub win_rate: f64,
    pub vpip: f64,
    pub aggression_factor: f64,
    pub showdown_percentage: f64,
    pub showdown_win_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportStyle {
    pub coordinates: StyleCoordinates,
    pub description: (String, String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPlayer {
    pub name: String,
    pub financial: ExportFinancial,
    pub performance: ExportPerformance,
    pub style: ExportStyle,
    pub folding_pattern: StreetCounts,
}

impl From<&PlayerReport> for ExportPlayer {
    fn from(p: &PlayerReport) -> Self {
        Self {
            name: p.name.clone(),
            financial: ExportFinancial {
                buy_in: p.total_buyin,
                final_stack: p.final_stack,
                net_profit: p.net_profit,
            },
            performance: ExportPerformance {
                hands_played: p.hands_played,
                win_rate: p.win_rate,
                vpip: p.vpip,
                aggression_factor: p.aggression_factor,
                showdown_percentage: p.showdown_percentage,
                showdown_win_rate: p.showdown_win_rate,
            },
            style: ExportStyle {
                coordinates: p.style_coordinates,
                description: (p.style.0.to_string(), p.style.1.to_string()),
            },
            folding_pattern: p.folded_by_street,
        }
    }
}

/// Shareable snapshot of one session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionExport {
    pub session_id: SessionId,
    pub session_date: NaiveDate,
    pub total_hands: u32,
    pub hand_endings_by_street: StreetCounts,
    pub players: Vec<ExportPlayer>,
}

impl SessionExport {
    pub fn from_report(report: &AnalysisReport, session_id: SessionId, date: NaiveDate) -> Self {
        Self {
            session_id,
            session_date: date,
            total_hands: report.total_hands,
            hand_endings_by_street: report.hand_endings,
            players: report.players.values().map(ExportPlayer::from).collect(),
        }
    }

    /// File name used when the export is written to disk.
    pub fn filename(&self) -> String {
        format!("poker_session_{}.json", self.session_date.format("%Y-%m-%d"))
    }
}
