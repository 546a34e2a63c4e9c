//! habitlens - daily habit log reports
//!
//! Loads a CSV habit log and prints a wellness report, a dashboard-style
//! summary, or quick advice for a single day.
//!
//! Uses XDG Base Directory specification for file locations:
//! - Logs: $XDG_STATE_HOME/habitlens/habitlens.log (~/.local/state/habitlens/habitlens.log)
//! - Config: $XDG_CONFIG_HOME/habitlens/config.toml (~/.config/habitlens/config.toml)

mod preview;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use habitlens_core::analytics::{self, Analysis, MetricSnapshot, RuleThresholds};
use habitlens_core::format::{bar, format_stat};
use habitlens_core::report::{self, QuickKpis};
use habitlens_core::{sample, weekday_name, AnalysisSession, Config, Dataset};

/// Width of the weekday sleep bars, in cells
const BAR_WIDTH: usize = 24;

/// Rows shown in the summary data preview
const PREVIEW_ROWS: usize = 5;

const ALL_GOOD: &str = "Looks good — maintain consistency!";

#[derive(Parser)]
#[command(name = "habitlens")]
#[command(about = "Daily lifestyle and wellness reports from a habit log")]
#[command(version)]
struct Args {
    /// Config file (default: $XDG_CONFIG_HOME/habitlens/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Write the plain-text wellness report for a habit log
    Report {
        /// Habit log (CSV)
        file: PathBuf,

        /// Write the report here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show KPIs, insights and weekday patterns for a habit log
    Summary {
        /// Habit log (CSV)
        file: PathBuf,

        /// Output format: text (default) or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Get advice for a single day's numbers
    Advise {
        /// Hours slept (0-14)
        #[arg(long, default_value_t = 6.0)]
        sleep: f64,

        /// Steps walked (0-50000)
        #[arg(long, default_value_t = 4500, value_parser = clap::value_parser!(u32).range(0..=50_000))]
        steps: u32,

        /// Water intake in ml (0-10000)
        #[arg(long, default_value_t = 1800, value_parser = clap::value_parser!(u32).range(0..=10_000))]
        water: u32,

        /// Study hours (0-16)
        #[arg(long, default_value_t = 3.0)]
        study: f64,

        /// Wake-up hour, e.g. 6.5 for 06:30 (0-23.99)
        #[arg(long, default_value_t = 9.0)]
        wake: f64,

        /// Mood score (1-10); mood advice is skipped when omitted
        #[arg(long, value_parser = clap::value_parser!(u8).range(1..=10))]
        mood: Option<u8>,
    },

    /// Write the built-in sample habit log as CSV
    Sample {
        /// Write the CSV here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Date of the last sample day (default: today)
        #[arg(long)]
        end_date: Option<NaiveDate>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("failed to load configuration")?;

    // Initialize logging
    let _log_guard =
        habitlens_core::logging::init(&config.logging).context("failed to initialize logging")?;

    tracing::info!(
        log = %habitlens_core::logging::log_file_path().display(),
        "habitlens starting"
    );

    match args.command {
        Command::Report { file, output } => cmd_report(&config, &file, output.as_deref()),
        Command::Summary { file, format } => cmd_summary(&config, &file, &format),
        Command::Advise {
            sleep,
            steps,
            water,
            study,
            wake,
            mood,
        } => {
            check_range("sleep", sleep, 0.0, 14.0)?;
            check_range("study", study, 0.0, 16.0)?;
            check_range("wake", wake, 0.0, 23.99)?;
            let snapshot = MetricSnapshot {
                sleep_hours: Some(sleep),
                steps: Some(f64::from(steps)),
                water_ml: Some(f64::from(water)),
                study_hours: Some(study),
                wake_hour: Some(wake),
                mood: mood.map(f64::from),
            };
            cmd_advise(&config.rules, &snapshot);
            Ok(())
        }
        Command::Sample { output, end_date } => {
            let end = end_date.unwrap_or_else(|| chrono::Local::now().date_naive());
            cmd_sample(end, output.as_deref())
        }
    }
}

fn check_range(name: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !(min..=max).contains(&value) {
        bail!("--{} must be between {} and {} (got {})", name, min, max, value);
    }
    Ok(())
}

/// Read a habit log into a fresh session using the configured thresholds.
fn load(config: &Config, file: &Path) -> Result<AnalysisSession> {
    let bytes =
        std::fs::read(file).with_context(|| format!("failed to load {}", file.display()))?;
    let mut session = AnalysisSession::new(config.rules.clone());
    session
        .load_bytes(&bytes)
        .with_context(|| format!("failed to load {}", file.display()))?;
    Ok(session)
}

fn loaded(session: &AnalysisSession) -> Result<(&Dataset, Analysis)> {
    match (session.dataset(), session.analyze()) {
        (Some(dataset), Some(analysis)) => Ok((dataset, analysis)),
        _ => bail!("no habit log loaded"),
    }
}

/// Print to stdout, or write to `output` and say where it went.
fn emit(text: &str, output: Option<&Path>, what: &str) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, text)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "Wrote {}", what);
            println!("{} written to {}", what, path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}

fn cmd_report(config: &Config, file: &Path, output: Option<&Path>) -> Result<()> {
    let session = load(config, file)?;
    let (_, analysis) = loaded(&session)?;
    emit(&report::render(&analysis), output, "Report")
}

fn cmd_summary(config: &Config, file: &Path, format: &str) -> Result<()> {
    let session = load(config, file)?;
    let (dataset, analysis) = loaded(&session)?;

    match format {
        "json" => {
            println!("{}", analysis.to_json_string()?);
            return Ok(());
        }
        "text" => {}
        other => bail!("unknown format '{}' (expected text or json)", other),
    }

    println!("{} ({} days)", report::REPORT_TITLE, dataset.len());
    println!();

    println!("📈 Quick KPIs");
    let kpis = QuickKpis::from_summary(&analysis.summary);
    for (label, value) in kpis.lines() {
        println!("  {:<16} {}", label, value);
    }
    println!();

    println!("💡 Insights");
    if analysis.insights.is_empty() {
        println!("  (not enough data)");
    }
    for insight in &analysis.insights {
        println!("  - {}", insight);
    }

    if let Some(sleep) = &analysis.summary.sleep_by_weekday {
        let max = sleep.entries().iter().map(|(_, v)| *v).fold(0.0, f64::max);
        println!();
        println!("😴 Average sleep by weekday");
        for (day, mean) in habitlens_core::WEEKDAYS.iter().zip(sleep.means) {
            println!(
                "  {:<9} {:>5}  {}",
                weekday_name(*day),
                format_stat(mean),
                mean.map(|v| bar(v, max, BAR_WIDTH)).unwrap_or_default()
            );
        }
    }

    println!();
    println!("📝 Recommendations");
    for item in &analysis.recommendations {
        println!("  - {}", item);
    }

    println!();
    println!("🗒 Data preview");
    for line in preview::render(dataset, PREVIEW_ROWS) {
        println!("  {}", line);
    }

    Ok(())
}

fn cmd_advise(thresholds: &RuleThresholds, snapshot: &MetricSnapshot) {
    let advice = analytics::evaluate(snapshot, thresholds);
    tracing::debug!(items = advice.len(), "Evaluated single-day advice");

    println!("Lifestyle tips:");
    if advice.is_empty() {
        println!("- {}", ALL_GOOD);
    }
    for item in advice {
        println!("- {}", item);
    }
}

fn cmd_sample(end: NaiveDate, output: Option<&Path>) -> Result<()> {
    let csv = sample::sample_csv(end).context("failed to build sample data")?;
    emit(&csv, output, "Sample data")
}
