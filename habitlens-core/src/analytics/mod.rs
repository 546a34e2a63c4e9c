//! Analytics module for habitlens
//!
//! Provides aggregate statistics and advice over a loaded [`Dataset`]:
//! - [`summary`]: means, correlation matrix, weekday groupings, chart series
//! - [`rules`]: threshold-based advice for single values or averages
//! - [`insights`]: correlation and weekday insights, dataset recommendations
//!
//! [`analyze`] runs all of them and bundles the results in an [`Analysis`].

pub mod insights;
pub mod rules;
pub mod summary;

use serde_json::json;

use crate::error::Result;
use crate::types::{weekday_name, Dataset, WEEKDAYS};

pub use insights::{compose, correlation_notes, dataset_recommendations, Insight};
pub use rules::{evaluate, AdviceCategory, AdviceItem, MetricSnapshot, RuleThresholds};
pub use summary::{
    mean, pearson, summarize, ColumnMean, CorrelationMatrix, DatasetSummary, WeekdayMeans,
};

/// Everything computed for one dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub summary: DatasetSummary,
    pub insights: Vec<Insight>,
    /// Dataset-level advice: rules on averages, then correlation notes
    pub recommendations: Vec<AdviceItem>,
}

/// Run the full analysis pass over a dataset.
pub fn analyze(dataset: &Dataset, thresholds: &RuleThresholds) -> Analysis {
    let summary = summarize(dataset);
    let insights = compose(&summary);
    let recommendations = dataset_recommendations(&summary, thresholds);

    tracing::debug!(
        records = summary.record_count,
        insights = insights.len(),
        recommendations = recommendations.len(),
        "Analysis complete"
    );

    Analysis {
        summary,
        insights,
        recommendations,
    }
}

impl Analysis {
    /// JSON view of the analysis, for machine consumers and chart frontends.
    pub fn to_json(&self) -> serde_json::Value {
        let summary = &self.summary;
        let by_weekday = |means: &Option<WeekdayMeans>| {
            means.as_ref().map(|m| {
                WEEKDAYS
                    .iter()
                    .zip(m.means.iter())
                    .map(|(day, mean)| json!({"weekday": weekday_name(*day), "mean": mean}))
                    .collect::<Vec<_>>()
            })
        };

        json!({
            "records": summary.record_count,
            "means": summary.means.iter().map(|m| {
                json!({"column": m.column.header(), "mean": m.mean})
            }).collect::<Vec<_>>(),
            "correlation": {
                "computable": summary.correlation.is_computable(),
                "columns": summary.correlation.columns.iter().map(|c| c.header()).collect::<Vec<_>>(),
                "values": summary.correlation.values,
            },
            "sleep_by_weekday": by_weekday(&summary.sleep_by_weekday),
            "mood_by_weekday": by_weekday(&summary.mood_by_weekday),
            "steps_over_time": summary.steps_over_time.iter().map(|(date, steps)| {
                json!({"date": date.format("%Y-%m-%d").to_string(), "steps": steps})
            }).collect::<Vec<_>>(),
            "water_distribution": summary.water_distribution.iter().map(|(ml, count)| {
                json!({"water_intake_ml": ml, "count": count})
            }).collect::<Vec<_>>(),
            "insights": self.insights.iter().map(|i| i.to_string()).collect::<Vec<_>>(),
            "recommendations": self.recommendations.iter().map(|a| {
                json!({
                    "category": a.category.key(),
                    "emoji": a.category.emoji(),
                    "text": a.text(),
                })
            }).collect::<Vec<_>>(),
        })
    }

    /// Pretty-printed [`Analysis::to_json`].
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.to_json())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::load_bytes;

    #[test]
    fn test_analyze_bundles_results() {
        let csv = "Date,Sleep_Hours,Mood_Score\n2024-01-01,6,5\n2024-01-02,8,8\n";
        let dataset = load_bytes(csv.as_bytes()).unwrap();
        let analysis = analyze(&dataset, &RuleThresholds::default());

        assert_eq!(analysis.summary.record_count, 2);
        assert_eq!(
            analysis.insights.last().map(|i| i.to_string()),
            Some("Highest average mood day: Tuesday".to_string())
        );
        let categories: Vec<_> = analysis.recommendations.iter().map(|a| a.category).collect();
        assert_eq!(
            categories,
            vec![
                AdviceCategory::HealthySleep,
                AdviceCategory::SleepMoodCorrelation
            ]
        );
    }

    #[test]
    fn test_json_shape() {
        let csv = "Date,Steps\n2024-01-01,1000\n2024-01-02,\n";
        let dataset = load_bytes(csv.as_bytes()).unwrap();
        let json = analyze(&dataset, &RuleThresholds::default()).to_json();

        assert_eq!(json["records"], 2);
        assert_eq!(json["means"][0]["column"], "Steps");
        assert_eq!(json["means"][0]["mean"], 1000.0);
        assert_eq!(json["correlation"]["computable"], false);
        assert!(json["mood_by_weekday"].is_null());
        assert_eq!(json["steps_over_time"][0]["date"], "2024-01-01");
        assert_eq!(json["recommendations"][0]["category"], "low_activity");
    }
}
