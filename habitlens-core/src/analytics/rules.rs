//! Rule-based advice
//!
//! Maps a handful of scalar metrics (one day, or dataset averages) to short
//! advice items. Each metric is checked on its own against fixed bands:
//!
//! | Metric | Low | Middle (inclusive) | High |
//! |--------|-----|--------------------|------|
//! | Sleep hours | < 6 | 6 – 9.5 | > 9.5 |
//! | Steps | < 5000 | 5000 – 7999 | ≥ 8000 |
//! | Water (ml) | < 2000 | 2000 – 4000 | > 4000 |
//! | Study hours | < 2 | 2 – 8 | > 8 |
//! | Wake hour | < 4.5 | 4.5 – 10 | > 10 |
//! | Mood | < 5 | 5 – 7.99 (no advice) | ≥ 8 |
//!
//! The boundaries are [`RuleThresholds`] defaults and can be overridden from
//! the `[rules]` config table.

use serde::Deserialize;

use crate::error::{Error, Result};

pub const SLEEP_LOW_HOURS: f64 = 6.0;
pub const SLEEP_HIGH_HOURS: f64 = 9.5;
pub const STEPS_LOW: f64 = 5000.0;
pub const STEPS_TARGET: f64 = 8000.0;
pub const WATER_LOW_ML: f64 = 2000.0;
pub const WATER_HIGH_ML: f64 = 4000.0;
pub const STUDY_LOW_HOURS: f64 = 2.0;
pub const STUDY_HIGH_HOURS: f64 = 8.0;
pub const WAKE_EARLY_HOUR: f64 = 4.5;
pub const WAKE_LATE_HOUR: f64 = 10.0;
pub const MOOD_LOW: f64 = 5.0;
pub const MOOD_GOOD: f64 = 8.0;
/// Minimum |r| between sleep and mood for the correlation note
pub const SLEEP_MOOD_CORRELATION: f64 = 0.25;
/// Minimum signed r between steps and mood for the correlation note
pub const ACTIVITY_MOOD_CORRELATION: f64 = 0.25;

/// Band boundaries used by [`evaluate`].
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RuleThresholds {
    pub sleep_low: f64,
    pub sleep_high: f64,
    pub steps_low: f64,
    pub steps_target: f64,
    pub water_low: f64,
    pub water_high: f64,
    pub study_low: f64,
    pub study_high: f64,
    pub wake_early: f64,
    pub wake_late: f64,
    pub mood_low: f64,
    pub mood_good: f64,
    pub sleep_mood_correlation: f64,
    pub activity_mood_correlation: f64,
}

impl Default for RuleThresholds {
    fn default() -> Self {
        Self {
            sleep_low: SLEEP_LOW_HOURS,
            sleep_high: SLEEP_HIGH_HOURS,
            steps_low: STEPS_LOW,
            steps_target: STEPS_TARGET,
            water_low: WATER_LOW_ML,
            water_high: WATER_HIGH_ML,
            study_low: STUDY_LOW_HOURS,
            study_high: STUDY_HIGH_HOURS,
            wake_early: WAKE_EARLY_HOUR,
            wake_late: WAKE_LATE_HOUR,
            mood_low: MOOD_LOW,
            mood_good: MOOD_GOOD,
            sleep_mood_correlation: SLEEP_MOOD_CORRELATION,
            activity_mood_correlation: ACTIVITY_MOOD_CORRELATION,
        }
    }
}

impl RuleThresholds {
    /// Check that every band is well ordered.
    pub fn validate(&self) -> Result<()> {
        let bands = [
            ("sleep_low", self.sleep_low, "sleep_high", self.sleep_high),
            ("steps_low", self.steps_low, "steps_target", self.steps_target),
            ("water_low", self.water_low, "water_high", self.water_high),
            ("study_low", self.study_low, "study_high", self.study_high),
            ("wake_early", self.wake_early, "wake_late", self.wake_late),
            ("mood_low", self.mood_low, "mood_good", self.mood_good),
        ];
        for (low_name, low, high_name, high) in bands {
            if low.is_nan() || high.is_nan() || low > high {
                return Err(Error::Config(format!(
                    "rules.{} ({}) must not exceed rules.{} ({})",
                    low_name, low, high_name, high
                )));
            }
        }

        for (name, value) in [
            ("sleep_mood_correlation", self.sleep_mood_correlation),
            ("activity_mood_correlation", self.activity_mood_correlation),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "rules.{} must be between 0 and 1",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// What an advice item is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AdviceCategory {
    LowSleep,
    HealthySleep,
    Oversleep,
    LowActivity,
    NearTarget,
    ActivityGood,
    HydrationLow,
    HydrationOk,
    HydrationHigh,
    StudyTooShort,
    StudyBalanced,
    StudyTooLong,
    WakeTooEarly,
    WakeReasonable,
    WakeTooLate,
    LowMood,
    GoodMood,
    /// Dataset-level: sleep and mood move together (either direction)
    SleepMoodCorrelation,
    /// Dataset-level: more steps go with better mood
    ActivityMoodCorrelation,
}

impl AdviceCategory {
    /// Marker shown in front of the advice text.
    pub fn emoji(&self) -> &'static str {
        match self {
            AdviceCategory::LowSleep => "😴",
            AdviceCategory::Oversleep => "🛌",
            AdviceCategory::LowActivity => "🚶",
            AdviceCategory::NearTarget => "🏃",
            AdviceCategory::HydrationLow | AdviceCategory::HydrationHigh => "💧",
            AdviceCategory::StudyTooShort => "🗓",
            AdviceCategory::StudyTooLong => "🧠",
            AdviceCategory::WakeTooEarly | AdviceCategory::WakeTooLate => "⏰",
            AdviceCategory::LowMood => "🌤",
            AdviceCategory::GoodMood => "🥳",
            AdviceCategory::SleepMoodCorrelation => "📈",
            AdviceCategory::ActivityMoodCorrelation => "🏅",
            AdviceCategory::HealthySleep
            | AdviceCategory::ActivityGood
            | AdviceCategory::HydrationOk
            | AdviceCategory::StudyBalanced
            | AdviceCategory::WakeReasonable => "✅",
        }
    }

    /// The advice itself.
    pub fn text(&self) -> &'static str {
        match self {
            AdviceCategory::LowSleep => "Sleep seems low → aim for 7–8 hours nightly.",
            AdviceCategory::HealthySleep => "Sleep within healthy range — keep it regular.",
            AdviceCategory::Oversleep => "Very long sleep — aim for consistent 7–9 hrs.",
            AdviceCategory::LowActivity => "Steps low → add short walks; target 8k+ steps/day.",
            AdviceCategory::NearTarget => "Almost there — add a 15-min brisk walk.",
            AdviceCategory::ActivityGood => "Activity level good — maintain variety.",
            AdviceCategory::HydrationLow => "Hydration low → aim for 2–3 L/day.",
            AdviceCategory::HydrationOk => "Hydration seems adequate.",
            AdviceCategory::HydrationHigh => "Very high — ensure balance.",
            AdviceCategory::StudyTooShort => "Try Pomodoro (25/5) sessions.",
            AdviceCategory::StudyBalanced => "Study routine balanced.",
            AdviceCategory::StudyTooLong => "Long study hours — take breaks every hour.",
            AdviceCategory::WakeTooEarly => "Very early wake — ensure adequate sleep.",
            AdviceCategory::WakeReasonable => "Wake-up time reasonable.",
            AdviceCategory::WakeTooLate => {
                "Late wake-up — shift earlier for better circadian rhythm."
            }
            AdviceCategory::LowMood => "Low mood — sunlight and short walks can help.",
            AdviceCategory::GoodMood => "Good mood — note and repeat what helps.",
            AdviceCategory::SleepMoodCorrelation => "Sleep and Mood show correlation.",
            AdviceCategory::ActivityMoodCorrelation => {
                "Higher activity correlates with better mood."
            }
        }
    }

    /// Machine-readable identifier (used in JSON output).
    pub fn key(&self) -> &'static str {
        match self {
            AdviceCategory::LowSleep => "low_sleep",
            AdviceCategory::HealthySleep => "healthy_sleep",
            AdviceCategory::Oversleep => "oversleep",
            AdviceCategory::LowActivity => "low_activity",
            AdviceCategory::NearTarget => "near_target",
            AdviceCategory::ActivityGood => "activity_good",
            AdviceCategory::HydrationLow => "hydration_low",
            AdviceCategory::HydrationOk => "hydration_ok",
            AdviceCategory::HydrationHigh => "hydration_high",
            AdviceCategory::StudyTooShort => "study_too_short",
            AdviceCategory::StudyBalanced => "study_balanced",
            AdviceCategory::StudyTooLong => "study_too_long",
            AdviceCategory::WakeTooEarly => "wake_too_early",
            AdviceCategory::WakeReasonable => "wake_reasonable",
            AdviceCategory::WakeTooLate => "wake_too_late",
            AdviceCategory::LowMood => "low_mood",
            AdviceCategory::GoodMood => "good_mood",
            AdviceCategory::SleepMoodCorrelation => "sleep_mood_correlation",
            AdviceCategory::ActivityMoodCorrelation => "activity_mood_correlation",
        }
    }
}

/// One piece of advice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdviceItem {
    pub category: AdviceCategory,
}

impl AdviceItem {
    pub fn new(category: AdviceCategory) -> Self {
        Self { category }
    }

    pub fn text(&self) -> &'static str {
        self.category.text()
    }
}

impl std::fmt::Display for AdviceItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.category.emoji(), self.category.text())
    }
}

/// Metric values fed to the rule engine.
///
/// `None` (or NaN) skips the metric; `mood: None` skips mood entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricSnapshot {
    pub sleep_hours: Option<f64>,
    pub steps: Option<f64>,
    pub water_ml: Option<f64>,
    pub study_hours: Option<f64>,
    pub wake_hour: Option<f64>,
    pub mood: Option<f64>,
}

/// Evaluate every present metric, in the order sleep, steps, hydration,
/// study, wake time, mood.
pub fn evaluate(snapshot: &MetricSnapshot, t: &RuleThresholds) -> Vec<AdviceItem> {
    use AdviceCategory as C;

    let present = |v: Option<f64>| v.filter(|v| !v.is_nan());
    let mut advice = Vec::new();

    if let Some(sleep) = present(snapshot.sleep_hours) {
        advice.push(if sleep < t.sleep_low {
            C::LowSleep
        } else if sleep > t.sleep_high {
            C::Oversleep
        } else {
            C::HealthySleep
        });
    }

    if let Some(steps) = present(snapshot.steps) {
        advice.push(if steps < t.steps_low {
            C::LowActivity
        } else if steps < t.steps_target {
            C::NearTarget
        } else {
            C::ActivityGood
        });
    }

    if let Some(water) = present(snapshot.water_ml) {
        advice.push(if water < t.water_low {
            C::HydrationLow
        } else if water > t.water_high {
            C::HydrationHigh
        } else {
            C::HydrationOk
        });
    }

    if let Some(study) = present(snapshot.study_hours) {
        advice.push(if study > t.study_high {
            C::StudyTooLong
        } else if study < t.study_low {
            C::StudyTooShort
        } else {
            C::StudyBalanced
        });
    }

    if let Some(wake) = present(snapshot.wake_hour) {
        advice.push(if wake > t.wake_late {
            C::WakeTooLate
        } else if wake < t.wake_early {
            C::WakeTooEarly
        } else {
            C::WakeReasonable
        });
    }

    if let Some(mood) = present(snapshot.mood) {
        if mood < t.mood_low {
            advice.push(C::LowMood);
        } else if mood >= t.mood_good {
            advice.push(C::GoodMood);
        }
    }

    advice.into_iter().map(AdviceItem::new).collect()
}
