//! Plain-text report export
//!
//! The report keeps the section order and headers of earlier exports:
//!
//! ```text
//! Daily Lifestyle & Wellness Report
//! ---------------------------------
//!
//! 📊 Dataset Averages:
//! - Sleep_Hours: 7.00
//! ...
//!
//! 🔎 Correlation (numeric columns):
//! <matrix>
//!
//! 📝 Recommendations:
//! - ✅ Sleep within healthy range — keep it regular.
//! ```

use std::fmt;

use crate::analytics::{Analysis, CorrelationMatrix, DatasetSummary};
use crate::format::{format_stat, format_thousands};
use crate::types::Column;

pub const REPORT_TITLE: &str = "Daily Lifestyle & Wellness Report";
pub const NOT_ENOUGH_COLUMNS: &str = "Not enough numeric columns for correlation.";

/// Columns listed under "Dataset Averages", with their labels.
const AVERAGE_LINES: [(Column, &str); 5] = [
    (Column::SleepHours, "Sleep_Hours"),
    (Column::Steps, "Steps"),
    (Column::WaterIntakeMl, "Water (ml)"),
    (Column::StudyHours, "Study_Hours"),
    (Column::MoodScore, "Mood_Score"),
];

/// Render the text report for an analysis.
pub fn render(analysis: &Analysis) -> String {
    Report(analysis).to_string()
}

struct Report<'a>(&'a Analysis);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let analysis = self.0;

        writeln!(f, "{}", REPORT_TITLE)?;
        writeln!(f, "{}", "-".repeat(REPORT_TITLE.len()))?;
        writeln!(f)?;

        writeln!(f, "📊 Dataset Averages:")?;
        for (column, label) in AVERAGE_LINES {
            if let Some(mean) = analysis.summary.mean(column) {
                writeln!(f, "- {}: {:.2}", label, mean)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "🔎 Correlation (numeric columns):")?;
        if analysis.summary.correlation.is_computable() {
            write!(f, "{}", MatrixTable(&analysis.summary.correlation))?;
        } else {
            writeln!(f, "{}", NOT_ENOUGH_COLUMNS)?;
        }

        writeln!(f)?;
        writeln!(f)?;
        writeln!(f, "📝 Recommendations:")?;
        for item in &analysis.recommendations {
            writeln!(f, "- {}", item)?;
        }
        Ok(())
    }
}

/// Correlation matrix as an aligned table, without a trailing newline.
pub struct MatrixTable<'a>(pub &'a CorrelationMatrix);

impl fmt::Display for MatrixTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let matrix = self.0;
        let label_width = matrix
            .columns
            .iter()
            .map(|c| c.header().len())
            .max()
            .unwrap_or(0);
        let widths: Vec<usize> = matrix
            .columns
            .iter()
            .enumerate()
            .map(|(j, c)| {
                matrix
                    .values
                    .iter()
                    .map(|row| format_stat(row[j]).len())
                    .max()
                    .unwrap_or(0)
                    .max(c.header().len())
            })
            .collect();

        write!(f, "{:label_width$}", "")?;
        for (column, width) in matrix.columns.iter().zip(&widths) {
            write!(f, "  {:>width$}", column.header())?;
        }

        for (column, row) in matrix.columns.iter().zip(&matrix.values) {
            writeln!(f)?;
            write!(f, "{:<label_width$}", column.header())?;
            for (value, width) in row.iter().zip(&widths) {
                write!(f, "  {:>width$}", format_stat(*value))?;
            }
        }
        Ok(())
    }
}

/// Headline averages for a dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct QuickKpis {
    pub avg_sleep_hours: Option<f64>,
    pub avg_steps: Option<f64>,
    pub avg_water_liters: Option<f64>,
    pub avg_mood: Option<f64>,
}

impl QuickKpis {
    pub fn from_summary(summary: &DatasetSummary) -> Self {
        Self {
            avg_sleep_hours: summary.mean(Column::SleepHours),
            avg_steps: summary.mean(Column::Steps),
            avg_water_liters: summary.mean(Column::WaterIntakeMl).map(|ml| ml / 1000.0),
            avg_mood: summary.mean(Column::MoodScore),
        }
    }

    /// Labelled display values for the KPIs that are available.
    ///
    /// Steps are truncated to a whole number and grouped by thousands.
    pub fn lines(&self) -> Vec<(&'static str, String)> {
        let mut lines = Vec::new();
        if let Some(v) = self.avg_sleep_hours {
            lines.push(("Avg Sleep (hrs)", format!("{:.2}", v)));
        }
        if let Some(v) = self.avg_steps {
            lines.push(("Avg Steps", format_thousands(v.trunc() as i64)));
        }
        if let Some(v) = self.avg_water_liters {
            lines.push(("Avg Water (L)", format!("{:.2}", v)));
        }
        if let Some(v) = self.avg_mood {
            lines.push(("Avg Mood (1–10)", format!("{:.2}", v)));
        }
        lines
    }
}
