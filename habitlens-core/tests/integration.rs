//! Integration tests for the habitlens pipeline
//!
//! These tests use fixture files in `tests/fixtures/` to verify the
//! end-to-end flow from CSV bytes to the rendered report.

use chrono::{NaiveDate, Weekday};
use habitlens_core::analytics::{analyze, AdviceCategory, Analysis, RuleThresholds};
use habitlens_core::report::{self, QuickKpis};
use habitlens_core::{ingest, sample, AnalysisSession, Column, Config, Error};
use std::io::Write;
use std::path::PathBuf;

/// Get the path to a fixture file
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn analyze_fixture(name: &str) -> Analysis {
    habitlens_core::logging::init_test();
    let dataset = ingest::load_path(&fixture_path(name)).expect("fixture should load");
    analyze(&dataset, &RuleThresholds::default())
}

fn categories(analysis: &Analysis) -> Vec<AdviceCategory> {
    analysis.recommendations.iter().map(|a| a.category).collect()
}

// ============================================
// Sample week
// ============================================

#[test]
fn test_sample_week_averages() {
    let analysis = analyze_fixture("sample_week.csv");
    let summary = &analysis.summary;

    assert_eq!(summary.record_count, 7);
    assert_eq!(format!("{:.2}", summary.mean(Column::SleepHours).unwrap()), "7.00");
    assert_eq!(format!("{:.2}", summary.mean(Column::Steps).unwrap()), "6271.43");
    assert_eq!(format!("{:.2}", summary.mean(Column::WaterLiters).unwrap()), "2.14");
    assert_eq!(format!("{:.2}", summary.mean(Column::MoodScore).unwrap()), "6.86");

    let kpis = QuickKpis::from_summary(summary);
    assert_eq!(
        kpis.lines(),
        vec![
            ("Avg Sleep (hrs)", "7.00".to_string()),
            ("Avg Steps", "6,271".to_string()),
            ("Avg Water (L)", "2.14".to_string()),
            ("Avg Mood (1–10)", "6.86".to_string()),
        ]
    );
}

#[test]
fn test_sample_week_recommendations() {
    let analysis = analyze_fixture("sample_week.csv");

    assert_eq!(
        categories(&analysis),
        vec![
            AdviceCategory::HealthySleep,
            AdviceCategory::NearTarget,
            AdviceCategory::HydrationOk,
            AdviceCategory::StudyBalanced,
            AdviceCategory::WakeReasonable,
            AdviceCategory::SleepMoodCorrelation,
            AdviceCategory::ActivityMoodCorrelation,
        ]
    );
}

#[test]
fn test_sample_week_insights() {
    let analysis = analyze_fixture("sample_week.csv");
    let lines: Vec<String> = analysis.insights.iter().map(|i| i.to_string()).collect();

    assert_eq!(
        lines,
        vec![
            "Sleep ↔ Mood correlation: 0.98",
            "Steps ↔ Mood correlation: 0.91",
            "Study ↔ Mood correlation: -0.58",
            "Hydration ↔ Mood correlation: 0.90",
            "Highest average mood day: Friday",
        ]
    );
}

#[test]
fn test_sample_week_matches_builtin_sample() {
    let end = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
    let generated = sample::sample_csv(end).unwrap();

    let from_fixture = ingest::load_path(&fixture_path("sample_week.csv")).unwrap();
    let from_sample = ingest::load_bytes(generated.as_bytes()).unwrap();
    assert_eq!(from_fixture, from_sample);
}

#[test]
fn test_sample_week_report() {
    let text = report::render(&analyze_fixture("sample_week.csv"));

    assert!(text.starts_with("Daily Lifestyle & Wellness Report\n"));
    assert!(text.contains(
        "📊 Dataset Averages:\n\
         - Sleep_Hours: 7.00\n\
         - Steps: 6271.43\n\
         - Water (ml): 2142.86\n\
         - Study_Hours: 2.57\n\
         - Mood_Score: 6.86\n"
    ));
    assert!(text.contains("🔎 Correlation (numeric columns):\n"));
    assert!(!text.contains(report::NOT_ENOUGH_COLUMNS));
    assert!(text.ends_with(
        "- 📈 Sleep and Mood show correlation.\n\
         - 🏅 Higher activity correlates with better mood.\n"
    ));
}

// ============================================
// Irregular input
// ============================================

#[test]
fn test_messy_log_loads_with_gaps() {
    let dataset = ingest::load_path(&fixture_path("messy.csv")).unwrap();

    assert_eq!(dataset.len(), 3);
    assert!(dataset.has(Column::WakeHour));
    assert!(!dataset.has(Column::WaterIntakeMl));
    assert!(!dataset.has(Column::StudyHours));

    let second = &dataset.records[1];
    assert_eq!(second.record.mood_score, None);
    assert_eq!(second.record.steps, None);
    assert_eq!(second.wake_minutes, None);
    assert_eq!(second.record.sleep_hours, Some(6.5));
    assert_eq!(second.weekday, Some(Weekday::Tue));

    assert_eq!(dataset.records[0].weekday, Some(Weekday::Mon));
    assert_eq!(dataset.records[0].wake_hour, Some(7.75));
}

#[test]
fn test_messy_log_analysis_uses_complete_pairs() {
    let analysis = analyze_fixture("messy.csv");
    let summary = &analysis.summary;

    assert_eq!(summary.mean(Column::SleepHours), Some(6.5));
    assert_eq!(summary.mean(Column::Steps), Some(6150.0));
    // Only rows 1 and 3 have both sleep and mood
    let r = summary
        .correlation
        .get(Column::SleepHours, Column::MoodScore)
        .unwrap();
    assert!((r - 1.0).abs() < 1e-9, "r = {r}");
    assert_eq!(
        analysis.insights.last().map(|i| i.to_string()),
        Some("Highest average mood day: Wednesday".to_string())
    );
    assert_eq!(
        categories(&analysis),
        vec![
            AdviceCategory::HealthySleep,
            AdviceCategory::NearTarget,
            AdviceCategory::WakeReasonable,
            AdviceCategory::SleepMoodCorrelation,
            AdviceCategory::ActivityMoodCorrelation,
        ]
    );
}

#[test]
fn test_single_numeric_column_cannot_correlate() {
    let analysis = analyze_fixture("date_and_steps.csv");

    assert!(!analysis.summary.correlation.is_computable());
    assert!(analysis.insights.is_empty());
    assert_eq!(categories(&analysis), vec![AdviceCategory::NearTarget]);

    let text = report::render(&analysis);
    assert!(text.contains(report::NOT_ENOUGH_COLUMNS));
}

#[test]
fn test_constant_fractional_sleep_has_no_correlation() {
    let mut csv = String::from("Sleep_Hours,Mood_Score\n");
    for mood in [5, 7, 6, 9, 4, 8, 6] {
        csv.push_str(&format!("7.2,{}\n", mood));
    }
    let dataset = ingest::load_bytes(csv.as_bytes()).unwrap();
    let analysis = analyze(&dataset, &RuleThresholds::default());

    assert!(analysis.insights.is_empty());
    assert!(!categories(&analysis).contains(&AdviceCategory::SleepMoodCorrelation));

    let table = report::MatrixTable(&analysis.summary.correlation).to_string();
    let sleep_row = table.lines().nth(1).unwrap();
    assert!(sleep_row.starts_with("Sleep_Hours"));
    assert_eq!(sleep_row.matches("NaN").count(), 2, "got:\n{}", table);
}

#[test]
fn test_malformed_log_fails_whole_load() {
    let err = ingest::load_path(&fixture_path("malformed.csv")).unwrap_err();
    assert!(matches!(err, Error::Load(_)), "unexpected error: {err}");
    assert!(err.to_string().contains("3 fields, expected 2"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = ingest::load_path(&fixture_path("does-not-exist.csv")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

// ============================================
// Session cache and configuration
// ============================================

#[test]
fn test_session_caches_by_content() {
    let bytes = std::fs::read(fixture_path("sample_week.csv")).unwrap();
    let mut session = AnalysisSession::default();

    session.load_bytes(&bytes).unwrap();
    let first = session.fingerprint().map(str::to_string);
    session.load_bytes(&bytes).unwrap();
    assert_eq!(session.fingerprint().map(str::to_string), first);

    let malformed = std::fs::read(fixture_path("malformed.csv")).unwrap();
    assert!(session.load_bytes(&malformed).is_err());
    assert!(session.dataset().is_none());
}

#[test]
fn test_config_thresholds_change_advice() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[rules]\nsteps_target = 6000.0\n\n[logging]\nlevel = \"debug\"").unwrap();

    let config = Config::load_from(file.path()).unwrap();
    assert_eq!(config.logging.level, "debug");

    let dataset = ingest::load_path(&fixture_path("sample_week.csv")).unwrap();
    let analysis = analyze(&dataset, &config.rules);
    assert_eq!(categories(&analysis)[1], AdviceCategory::ActivityGood);
}
