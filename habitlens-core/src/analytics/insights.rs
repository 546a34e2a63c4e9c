//! Dataset-level insights
//!
//! Turns a [`DatasetSummary`] into readable statements: how strongly each
//! habit correlates with mood, which weekday has the best mood, and the
//! correlation notes appended to the dataset recommendations.

use chrono::Weekday;

use super::rules::{self, AdviceCategory, AdviceItem, MetricSnapshot, RuleThresholds};
use super::summary::DatasetSummary;
use crate::types::{weekday_name, Column};

/// Habit/mood pairs reported as correlation insights, in report order.
pub const MOOD_PAIRS: [(Column, Column, &str); 4] = [
    (Column::SleepHours, Column::MoodScore, "Sleep ↔ Mood"),
    (Column::Steps, Column::MoodScore, "Steps ↔ Mood"),
    (Column::StudyHours, Column::MoodScore, "Study ↔ Mood"),
    (Column::WaterIntakeMl, Column::MoodScore, "Hydration ↔ Mood"),
];

/// A single readable insight.
#[derive(Debug, Clone, PartialEq)]
pub enum Insight {
    /// Pearson r between a habit and mood
    Correlation { label: &'static str, value: f64 },
    /// Weekday with the highest average mood
    BestMoodDay { weekday: Weekday, mean: f64 },
}

impl std::fmt::Display for Insight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Insight::Correlation { label, value } => {
                write!(f, "{} correlation: {:.2}", label, value)
            }
            Insight::BestMoodDay { weekday, .. } => {
                write!(f, "Highest average mood day: {}", weekday_name(*weekday))
            }
        }
    }
}

/// Compose correlation and weekday insights.
pub fn compose(summary: &DatasetSummary) -> Vec<Insight> {
    let mut insights: Vec<Insight> = MOOD_PAIRS
        .iter()
        .filter_map(|(a, b, label)| {
            summary
                .correlation
                .get(*a, *b)
                .map(|value| Insight::Correlation {
                    label: *label,
                    value,
                })
        })
        .collect();

    if let Some((weekday, mean)) = summary.mood_by_weekday.as_ref().and_then(|m| m.highest()) {
        insights.push(Insight::BestMoodDay { weekday, mean });
    }

    insights
}

/// Notes about sleep/mood and activity/mood correlations.
///
/// Sleep counts in either direction (|r|); activity only when positive.
pub fn correlation_notes(summary: &DatasetSummary, t: &RuleThresholds) -> Vec<AdviceItem> {
    let mut notes = Vec::new();
    let matrix = &summary.correlation;

    if let Some(r) = matrix.get(Column::SleepHours, Column::MoodScore) {
        if r.abs() >= t.sleep_mood_correlation {
            notes.push(AdviceItem::new(AdviceCategory::SleepMoodCorrelation));
        }
    }
    if let Some(r) = matrix.get(Column::Steps, Column::MoodScore) {
        if r >= t.activity_mood_correlation {
            notes.push(AdviceItem::new(AdviceCategory::ActivityMoodCorrelation));
        }
    }

    notes
}

/// Metric snapshot built from dataset averages.
pub fn average_snapshot(summary: &DatasetSummary) -> MetricSnapshot {
    MetricSnapshot {
        sleep_hours: summary.mean(Column::SleepHours),
        steps: summary.mean(Column::Steps),
        water_ml: summary.mean(Column::WaterIntakeMl),
        study_hours: summary.mean(Column::StudyHours),
        wake_hour: summary.mean(Column::WakeHour),
        mood: summary.mean(Column::MoodScore),
    }
}

/// Rule-engine advice on the dataset averages, followed by correlation notes.
pub fn dataset_recommendations(summary: &DatasetSummary, t: &RuleThresholds) -> Vec<AdviceItem> {
    let mut advice = rules::evaluate(&average_snapshot(summary), t);
    advice.extend(correlation_notes(summary, t));
    advice
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::summary::{summarize, WeekdayMeans};
    use crate::ingest::load_bytes;

    fn summary_of(csv: &str) -> DatasetSummary {
        summarize(&load_bytes(csv.as_bytes()).unwrap())
    }

    #[test]
    fn test_correlation_insights() {
        let summary = summary_of(
            "Sleep_Hours,Steps,Mood_Score\n6,9000,5\n7,8000,6\n8,7000,7\n",
        );
        let insights = compose(&summary);

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].to_string(), "Sleep ↔ Mood correlation: 1.00");
        assert_eq!(insights[1].to_string(), "Steps ↔ Mood correlation: -1.00");
    }

    #[test]
    fn test_best_mood_day() {
        // 2024-01-01 Monday, 2024-01-05 Friday
        let summary = summary_of("Date,Mood_Score\n2024-01-01,6\n2024-01-05,9\n2024-01-08,8\n");
        let insights = compose(&summary);

        assert_eq!(
            insights,
            vec![Insight::BestMoodDay {
                weekday: Weekday::Fri,
                mean: 9.0
            }]
        );
        assert_eq!(insights[0].to_string(), "Highest average mood day: Friday");
    }

    #[test]
    fn test_no_insights_without_mood() {
        let summary = summary_of("Date,Sleep_Hours,Steps\n2024-01-01,7,100\n2024-01-02,8,200\n");
        assert!(compose(&summary).is_empty());
    }

    #[test]
    fn test_empty_weekday_grouping_is_skipped() {
        let mut summary = summary_of("Date,Mood_Score\n2024-01-01,\n");
        assert!(compose(&summary).is_empty());

        summary.mood_by_weekday = Some(WeekdayMeans::default());
        assert!(compose(&summary).is_empty());
    }

    #[test]
    fn test_correlation_note_thresholds() {
        // Sleep/mood r = +1, steps/mood r = -1
        let summary = summary_of("Sleep_Hours,Steps,Mood_Score\n6,9000,5\n7,8000,6\n8,7000,7\n");
        let notes: Vec<_> = correlation_notes(&summary, &RuleThresholds::default())
            .into_iter()
            .map(|n| n.category)
            .collect();
        // Sleep note uses |r|, activity note needs a positive r
        assert_eq!(notes, vec![AdviceCategory::SleepMoodCorrelation]);

        let negative_sleep = summary_of("Sleep_Hours,Steps,Mood_Score\n8,7000,5\n7,8000,6\n6,9000,7\n");
        let notes: Vec<_> = correlation_notes(&negative_sleep, &RuleThresholds::default())
            .into_iter()
            .map(|n| n.category)
            .collect();
        assert_eq!(
            notes,
            vec![
                AdviceCategory::SleepMoodCorrelation,
                AdviceCategory::ActivityMoodCorrelation
            ]
        );
    }

    #[test]
    fn test_weak_correlation_has_no_note() {
        // r(sleep, mood) is about 0.2
        let summary = summary_of(
            "Sleep_Hours,Mood_Score\n1,1\n2,3\n3,2\n4,5\n5,4\n6,1\n",
        );
        let r = summary
            .correlation
            .get(Column::SleepHours, Column::MoodScore)
            .unwrap();
        assert!(r.abs() < 0.25, "r = {}", r);
        assert!(correlation_notes(&summary, &RuleThresholds::default()).is_empty());
    }

    #[test]
    fn test_dataset_recommendations_order() {
        let summary = summary_of(
            "Sleep_Hours,Steps,Water_Intake_ml,Study_Hours,Wake_Up_Time,Mood_Score\n\
             5,3000,1500,1,05:00,3\n\
             5.5,4000,1600,1.5,05:30,4\n",
        );
        let advice: Vec<_> = dataset_recommendations(&summary, &RuleThresholds::default())
            .into_iter()
            .map(|a| a.category)
            .collect();

        assert_eq!(
            advice,
            vec![
                AdviceCategory::LowSleep,
                AdviceCategory::LowActivity,
                AdviceCategory::HydrationLow,
                AdviceCategory::StudyTooShort,
                AdviceCategory::WakeReasonable,
                AdviceCategory::LowMood,
                AdviceCategory::SleepMoodCorrelation,
                AdviceCategory::ActivityMoodCorrelation,
            ]
        );
    }
}
