//! Built-in sample habit log
//!
//! A fixed week of synthetic data covering every recognized column, for
//! trying the tool without a log of your own.

use chrono::{Days, NaiveDate};
use csv::WriterBuilder;

use crate::error::{Error, Result};
use crate::types::{Column, HabitRecord};

const WAKE_TIMES: [&str; 7] = ["06:30", "07:00", "06:45", "07:15", "06:50", "07:10", "07:00"];
const SLEEP_HOURS: [f64; 7] = [7.0, 6.5, 7.5, 6.0, 8.0, 7.2, 6.8];
const STEPS: [i64; 7] = [5000, 4200, 8000, 3000, 10000, 7200, 6500];
const CALORIES: [f64; 7] = [2100.0, 2000.0, 2300.0, 1800.0, 2600.0, 2200.0, 2050.0];
const WATER_ML: [f64; 7] = [2000.0, 1500.0, 2500.0, 1800.0, 3000.0, 2200.0, 2000.0];
const STUDY_HOURS: [f64; 7] = [2.0, 3.0, 1.5, 4.0, 2.5, 3.0, 2.0];
const MOOD: [i64; 7] = [7, 6, 8, 5, 9, 7, 6];

/// The seven sample days, the last one dated `end`.
pub fn sample_records(end: NaiveDate) -> Vec<HabitRecord> {
    (0..7)
        .map(|i| HabitRecord {
            date: Some(end - Days::new(6 - i as u64)),
            wake_time: Some(WAKE_TIMES[i].to_string()),
            sleep_hours: Some(SLEEP_HOURS[i]),
            steps: Some(STEPS[i]),
            calories_burned: Some(CALORIES[i]),
            water_intake_ml: Some(WATER_ML[i]),
            study_hours: Some(STUDY_HOURS[i]),
            mood_score: Some(MOOD[i]),
        })
        .collect()
}

/// The sample log as CSV text, with the standard header row.
pub fn sample_csv(end: NaiveDate) -> Result<String> {
    let mut writer = WriterBuilder::new().from_writer(Vec::new());
    writer.write_record(Column::RAW.iter().map(|c| c.header()))?;

    for record in sample_records(end) {
        let cell = |v: Option<String>| v.unwrap_or_default();
        writer.write_record([
            cell(record.date.map(|d| d.format("%Y-%m-%d").to_string())),
            cell(record.wake_time),
            cell(record.sleep_hours.map(|v| v.to_string())),
            cell(record.steps.map(|v| v.to_string())),
            cell(record.calories_burned.map(|v| v.to_string())),
            cell(record.water_intake_ml.map(|v| v.to_string())),
            cell(record.study_hours.map(|v| v.to_string())),
            cell(record.mood_score.map(|v| v.to_string())),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Load(format!("failed to finish sample CSV: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::Load(format!("sample CSV is not UTF-8: {}", e)))
}
