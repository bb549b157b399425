use std::path::Path;

use pretty_assertions::assert_eq;

use poker_log_stats::analyze::{analyze, analyze_file};
use poker_log_stats::config::AppConfig;
use poker_log_stats::models::{
    LooseTight, PassiveAggressive, SessionExport, SessionSummary, SortKey, StreetCounts,
};
use poker_log_stats::reader::LogReader;

const FIXTURE: &str = "tests/fixtures/session.csv";

fn fixture() -> &'static Path {
    Path::new(FIXTURE)
}

#[test]
fn test_full_session_report() {
    let report = analyze_file(fixture(), &AppConfig::default()).unwrap();

    assert_eq!(report.total_hands, 2);
    assert_eq!(
        report.hand_endings,
        StreetCounts {
            preflop: 1,
            flop: 1,
            turn: 0,
            river: 0,
        }
    );
    assert_eq!(report.players.len(), 2);

    let alice = report.player("a1").unwrap();
    assert_eq!(alice.name, "Alice");
    assert_eq!(alice.final_stack, 1100.0);
    assert_eq!(alice.total_buyin, 1000.0);
    assert_eq!(alice.net_profit, 100.0);
    assert_eq!(alice.hands_played, 2);
    assert_eq!(alice.hands_won, 1);
    assert_eq!(alice.vpip, 50.0);
    assert_eq!(alice.fold_percentage, 50.0);
    assert_eq!(alice.aggression_factor, 1.0);
    assert_eq!(alice.folded_by_street.preflop, 1);
    assert_eq!(alice.style, (LooseTight::VeryLoose, PassiveAggressive::Passive));

    let bob = report.player("b2").unwrap();
    assert_eq!(bob.final_stack, 910.0);
    assert_eq!(bob.net_profit, -90.0);
    assert_eq!(bob.hands_played, 1);
    assert_eq!(bob.hands_won, 1);
    assert_eq!(bob.folded_by_street.flop, 1);
    assert_eq!(bob.vpip, 100.0);
    assert_eq!(bob.aggression_factor, 0.0);
}

#[test]
fn test_reports_are_deterministic() {
    let reader = LogReader::from_path(fixture(), &AppConfig::default().reader).unwrap();
    let config = AppConfig::default().analysis;

    let first = analyze(&reader, config).unwrap();
    let second = analyze(&reader, config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_session_summary_from_fixture() {
    let report = analyze_file(fixture(), &AppConfig::default()).unwrap();
    let summary = SessionSummary::from_report(
        &report,
        SortKey::Profit,
        Some(std::time::Duration::from_secs(30 * 60)),
    );

    assert_eq!(summary.rows[0].name, "Alice");
    assert_eq!(summary.money_in_play, 95.0);
    assert_eq!(summary.biggest_win, 100.0);
    assert_eq!(summary.biggest_loss, -90.0);
    assert_eq!(summary.hands_per_hour, Some(4.0));
}

#[test]
fn test_session_export_from_fixture() {
    let reader = LogReader::from_path(fixture(), &AppConfig::default().reader).unwrap();
    let report = analyze(&reader, AppConfig::default().analysis).unwrap();
    let date = chrono::NaiveDate::from_ymd_opt(2026, 10, 18).unwrap();

    let export = SessionExport::from_report(&report, reader.digest(), date);
    assert_eq!(export.filename(), "poker_session_2026-10-18.json");

    let json = serde_json::to_value(&export).unwrap();
    assert_eq!(json["totalHands"], 2);
    assert_eq!(json["sessionId"].as_str().unwrap().len(), 16);
    assert_eq!(json["players"].as_array().unwrap().len(), 2);
}
