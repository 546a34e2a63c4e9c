//! Core domain types for habitlens
//!
//! A habit log is a table with one row per day. Every recognized column is
//! optional, both per row ([`HabitRecord`] fields are `Option`) and per file
//! (the [`Dataset`] schema lists which columns the input actually had).

use chrono::{NaiveDate, Weekday};

/// Weekdays in report order (Monday first).
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Position of a weekday in [`WEEKDAYS`].
pub fn weekday_index(day: Weekday) -> usize {
    day.num_days_from_monday() as usize
}

/// A column of the habit log, either read from input or derived from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    // Raw input columns
    Date,
    WakeUpTime,
    SleepHours,
    Steps,
    CaloriesBurned,
    WaterIntakeMl,
    StudyHours,
    MoodScore,
    // Derived columns
    WakeMinutes,
    WakeHour,
    Weekday,
    WaterLiters,
}

impl Column {
    /// Columns recognized in input files.
    pub const RAW: [Column; 8] = [
        Column::Date,
        Column::WakeUpTime,
        Column::SleepHours,
        Column::Steps,
        Column::CaloriesBurned,
        Column::WaterIntakeMl,
        Column::StudyHours,
        Column::MoodScore,
    ];

    /// Header name as it appears in CSV files and reports.
    pub fn header(&self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::WakeUpTime => "Wake_Up_Time",
            Column::SleepHours => "Sleep_Hours",
            Column::Steps => "Steps",
            Column::CaloriesBurned => "Calories_Burned",
            Column::WaterIntakeMl => "Water_Intake_ml",
            Column::StudyHours => "Study_Hours",
            Column::MoodScore => "Mood_Score",
            Column::WakeMinutes => "Wake_Minutes",
            Column::WakeHour => "Wake_Hour",
            Column::Weekday => "Weekday",
            Column::WaterLiters => "Water_Liters",
        }
    }

    /// Look up a raw input column by its exact header name.
    pub fn from_header(header: &str) -> Option<Column> {
        Self::RAW.into_iter().find(|c| c.header() == header)
    }

    /// Whether the column holds numbers (and takes part in statistics).
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Column::Date | Column::WakeUpTime | Column::Weekday)
    }

    /// Derived columns computed from this raw column, in schema order.
    pub fn derived(&self) -> &'static [Column] {
        match self {
            Column::Date => &[Column::Weekday],
            Column::WakeUpTime => &[Column::WakeMinutes, Column::WakeHour],
            Column::WaterIntakeMl => &[Column::WaterLiters],
            _ => &[],
        }
    }
}

impl std::fmt::Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.header())
    }
}

/// One logged day, as parsed from input.
///
/// Cells that are empty or fail to parse are `None`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HabitRecord {
    pub date: Option<NaiveDate>,
    /// Raw "HH:MM" wake-up time, kept verbatim
    pub wake_time: Option<String>,
    pub sleep_hours: Option<f64>,
    pub steps: Option<i64>,
    pub calories_burned: Option<f64>,
    pub water_intake_ml: Option<f64>,
    pub study_hours: Option<f64>,
    /// Self-reported mood, 1-10
    pub mood_score: Option<i64>,
}

/// A [`HabitRecord`] plus the fields computed from it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DerivedRecord {
    pub record: HabitRecord,
    /// Minutes since midnight (0-1439)
    pub wake_minutes: Option<u32>,
    /// `wake_minutes / 60`, rounded to 2 decimals
    pub wake_hour: Option<f64>,
    pub weekday: Option<Weekday>,
    pub water_liters: Option<f64>,
}

impl DerivedRecord {
    /// Value of a numeric column for this record.
    ///
    /// Returns `None` for absent values and for non-numeric columns.
    pub fn numeric(&self, column: Column) -> Option<f64> {
        let r = &self.record;
        match column {
            Column::SleepHours => r.sleep_hours,
            Column::Steps => r.steps.map(|v| v as f64),
            Column::CaloriesBurned => r.calories_burned,
            Column::WaterIntakeMl => r.water_intake_ml,
            Column::StudyHours => r.study_hours,
            Column::MoodScore => r.mood_score.map(|v| v as f64),
            Column::WakeMinutes => self.wake_minutes.map(f64::from),
            Column::WakeHour => self.wake_hour,
            Column::WaterLiters => self.water_liters,
            Column::Date | Column::WakeUpTime | Column::Weekday => None,
        }
    }
}

/// An analysis-ready habit log: schema plus derived records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Present columns, input order first, then derived columns
    pub columns: Vec<Column>,
    pub records: Vec<DerivedRecord>,
}

impl Dataset {
    /// Build a dataset from the raw columns present in the input.
    ///
    /// Derived columns are appended for every present source column.
    pub fn new(raw_columns: Vec<Column>, records: Vec<DerivedRecord>) -> Self {
        let mut columns = raw_columns;
        let derived: Vec<Column> = [Column::WakeUpTime, Column::Date, Column::WaterIntakeMl]
            .iter()
            .filter(|c| columns.contains(c))
            .flat_map(|c| c.derived().iter().copied())
            .collect();
        columns.extend(derived);
        Self { columns, records }
    }

    /// Whether the input (or its derivation) provided this column.
    pub fn has(&self, column: Column) -> bool {
        self.columns.contains(&column)
    }

    /// Numeric columns in schema order.
    pub fn numeric_columns(&self) -> Vec<Column> {
        self.columns
            .iter()
            .copied()
            .filter(Column::is_numeric)
            .collect()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All values of a column, with `None` where absent.
    ///
    /// Empty when the column is not part of the schema.
    pub fn values(&self, column: Column) -> Vec<Option<f64>> {
        if !self.has(column) {
            return Vec::new();
        }
        self.records.iter().map(|r| r.numeric(column)).collect()
    }
}
