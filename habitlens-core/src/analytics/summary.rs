//! Dataset aggregation
//!
//! Column means, the Pearson correlation matrix, weekday groupings and the
//! series the dashboard charts are drawn from. Every statistic that cannot
//! be computed from the data at hand is `None`, never zero.

use chrono::{NaiveDate, Weekday};

use crate::types::{weekday_index, Column, Dataset, WEEKDAYS};

/// Arithmetic mean over the present values.
pub fn mean(values: &[Option<f64>]) -> Option<f64> {
    let (sum, count) = values
        .iter()
        .flatten()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Pearson correlation over rows where both values are present.
///
/// Needs at least 2 complete rows, and neither side may be constant.
pub fn pearson(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = xs
        .iter()
        .zip(ys)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    // Exact comparison: a rounded mean leaves tiny deviations on a constant side
    let (x0, y0) = pairs[0];
    if pairs.iter().all(|(x, _)| *x == x0) || pairs.iter().all(|(_, y)| *y == y0) {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

/// Mean of one numeric column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnMean {
    pub column: Column,
    /// `None` when the column has no values
    pub mean: Option<f64>,
}

/// Pairwise Pearson correlations between the numeric columns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CorrelationMatrix {
    pub columns: Vec<Column>,
    /// Row-major, `values[i][j]` correlates `columns[i]` with `columns[j]`
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    /// Correlate every pair of numeric columns in the dataset.
    pub fn compute(dataset: &Dataset) -> Self {
        let columns = dataset.numeric_columns();
        let series: Vec<Vec<Option<f64>>> = columns.iter().map(|c| dataset.values(*c)).collect();
        let n = columns.len();

        let mut values = vec![vec![None; n]; n];
        for i in 0..n {
            // A column correlates perfectly with itself whenever r is defined.
            values[i][i] = pearson(&series[i], &series[i]).map(|_| 1.0);
            for j in (i + 1)..n {
                let r = pearson(&series[i], &series[j]);
                values[i][j] = r;
                values[j][i] = r;
            }
        }

        Self { columns, values }
    }

    /// A matrix needs at least two numeric columns to say anything.
    pub fn is_computable(&self) -> bool {
        self.columns.len() >= 2
    }

    /// Correlation between two columns, if both are present and r is defined.
    pub fn get(&self, a: Column, b: Column) -> Option<f64> {
        let i = self.columns.iter().position(|c| *c == a)?;
        let j = self.columns.iter().position(|c| *c == b)?;
        self.values[i][j]
    }
}

/// Mean of a column per weekday, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeekdayMeans {
    pub column: Option<Column>,
    /// Indexed like [`WEEKDAYS`]; `None` for days without values
    pub means: [Option<f64>; 7],
}

impl WeekdayMeans {
    /// Group a numeric column by weekday.
    ///
    /// Returns `None` when the dataset has no weekday or no such column.
    pub fn compute(dataset: &Dataset, column: Column) -> Option<Self> {
        if !dataset.has(Column::Weekday) || !dataset.has(column) {
            return None;
        }

        let mut buckets: [Vec<Option<f64>>; 7] = Default::default();
        for record in &dataset.records {
            if let Some(day) = record.weekday {
                buckets[weekday_index(day)].push(record.numeric(column));
            }
        }

        let mut means = [None; 7];
        for (slot, bucket) in means.iter_mut().zip(buckets.iter()) {
            *slot = mean(bucket);
        }

        Some(Self {
            column: Some(column),
            means,
        })
    }

    /// Weekdays that have a mean, in Monday-first order.
    pub fn entries(&self) -> Vec<(Weekday, f64)> {
        WEEKDAYS
            .iter()
            .zip(self.means.iter())
            .filter_map(|(day, mean)| mean.map(|m| (*day, m)))
            .collect()
    }

    /// Weekday with the highest mean; ties go to the earlier weekday.
    pub fn highest(&self) -> Option<(Weekday, f64)> {
        self.entries()
            .into_iter()
            .fold(None, |best: Option<(Weekday, f64)>, (day, m)| match best {
                Some((_, top)) if m <= top => best,
                _ => Some((day, m)),
            })
    }
}

/// Aggregate statistics over a whole dataset.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DatasetSummary {
    pub record_count: usize,
    /// One entry per numeric column, in schema order
    pub means: Vec<ColumnMean>,
    pub correlation: CorrelationMatrix,
    pub sleep_by_weekday: Option<WeekdayMeans>,
    pub mood_by_weekday: Option<WeekdayMeans>,
    /// (date, steps) sorted by date, for the steps-over-time chart
    pub steps_over_time: Vec<(NaiveDate, i64)>,
    /// (ml, count) ascending by ml, for the water intake distribution chart
    pub water_distribution: Vec<(f64, usize)>,
}

impl DatasetSummary {
    /// Mean of a column, `None` if absent or without values.
    pub fn mean(&self, column: Column) -> Option<f64> {
        self.means
            .iter()
            .find(|m| m.column == column)
            .and_then(|m| m.mean)
    }

    /// Whether the column is part of the summarized dataset.
    pub fn has(&self, column: Column) -> bool {
        self.means.iter().any(|m| m.column == column)
    }
}

/// Compute the full summary of a dataset.
pub fn summarize(dataset: &Dataset) -> DatasetSummary {
    let means = dataset
        .numeric_columns()
        .into_iter()
        .map(|column| ColumnMean {
            column,
            mean: mean(&dataset.values(column)),
        })
        .collect();

    DatasetSummary {
        record_count: dataset.len(),
        means,
        correlation: CorrelationMatrix::compute(dataset),
        sleep_by_weekday: WeekdayMeans::compute(dataset, Column::SleepHours),
        mood_by_weekday: WeekdayMeans::compute(dataset, Column::MoodScore),
        steps_over_time: steps_over_time(dataset),
        water_distribution: water_distribution(dataset),
    }
}

/// Daily steps ordered by date; rows missing either value are skipped.
pub fn steps_over_time(dataset: &Dataset) -> Vec<(NaiveDate, i64)> {
    let mut series: Vec<(NaiveDate, i64)> = dataset
        .records
        .iter()
        .filter_map(|r| Some((r.record.date?, r.record.steps?)))
        .collect();
    series.sort_by_key(|(date, _)| *date);
    series
}

/// How often each water intake value occurs, ascending by value.
pub fn water_distribution(dataset: &Dataset) -> Vec<(f64, usize)> {
    let mut values: Vec<f64> = dataset
        .records
        .iter()
        .filter_map(|r| r.record.water_intake_ml)
        .collect();
    values.sort_by(|a, b| a.total_cmp(b));

    let mut counts: Vec<(f64, usize)> = Vec::new();
    for value in values {
        match counts.last_mut() {
            Some((last, count)) if *last == value => *count += 1,
            _ => counts.push((value, 1)),
        }
    }
    counts
}
