//! Colorful console output for job control.
//!
//! Provides a custom `tracing` layer that formats job lifecycle events with
//! colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (start, pause, resume, stop, completion)
//! - **DEBUG**: Ignored transitions and worker details
//! - **TRACE**: Individual progress samples

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static JOB_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "chipforge_solver=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the banner and sets up tracing.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(JobConsoleLayer)
            .try_init();
    });
}

// Marks the start of a job for elapsed time tracking.
fn mark_job_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    JOB_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Wall time since the last job started.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = JOB_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
  ____ _     _       _____
 / ___| |__ (_)_ __ |  ___|__  _ __ __ _  ___
| |   | '_ \| | '_ \| |_ / _ \| '__/ _` |/ _ \
| |___| | | | | |_) |  _| (_) | | | (_| |  __/
 \____|_| |_|_| .__/|_|  \___/|_|  \__, |\___|
              |_|                  |___/
"#;

    let version_line = format!("              v{} - Board Job Control\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats job events with colors.
pub struct JobConsoleLayer;

impl<S: Subscriber> Layer<S> for JobConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();

        if !target.starts_with("chipforge_solver") && !target.starts_with("chipforge::") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    job_id: Option<String>,
    board: Option<String>,
    strategy: Option<String>,
    variant: Option<String>,
    error: Option<String>,
    path: Option<String>,
    candidates: Option<u64>,
    results: Option<u64>,
    elapsed_ms: Option<u64>,
    enumerated: Option<u64>,
    total: Option<u64>,
    found: Option<u64>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "job_id" => self.job_id = Some(value),
            "board" => self.board = Some(value),
            "strategy" => self.strategy = Some(value),
            "variant" => self.variant = Some(value),
            "error" => self.error = Some(value),
            "path" => self.path = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "candidates" => self.candidates = Some(value),
            "results" => self.results = Some(value),
            "elapsed_ms" => self.elapsed_ms = Some(value),
            "enumerated" => self.enumerated = Some(value),
            "total" => self.total = Some(value),
            "found" => self.found = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "job_start" => format_job_start(v),
        "job_pause" => format_transition(v, "⏸", "Paused"),
        "job_resume" => format_transition(v, "▶", "Resumed"),
        "job_stop" => format_job_end(v, "Stopped"),
        "job_complete" => format_job_end(v, "Complete"),
        "job_failed" => format_job_failed(v),
        "job_export" => format_job_export(v),
        "job_restore" => format_job_restore(v),
        "strategy_downgrade" => format_downgrade(v),
        "progress" => format_progress(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn short_id(v: &EventVisitor) -> String {
    let id = v.job_id.as_deref().unwrap_or("-");
    id.chars().take(8).collect()
}

fn format_job_start(v: &EventVisitor) -> String {
    mark_job_start();
    let board = v.board.as_deref().unwrap_or("?");
    let strategy = v.strategy.as_deref().unwrap_or("?");
    let candidates = v.candidates.unwrap_or(0);

    format!(
        "{} {} Job {} │ {} │ {} │ {} candidates",
        format_elapsed(),
        "▶".bright_green().bold(),
        short_id(v).bright_black(),
        board.white().bold(),
        strategy.bright_magenta(),
        candidates.to_formatted_string(&Locale::en).bright_yellow()
    )
}

fn format_transition(v: &EventVisitor, icon: &str, label: &str) -> String {
    let elapsed = v.elapsed_ms.unwrap_or(0);
    format!(
        "{} {} {} │ {}",
        format_elapsed(),
        icon.bright_blue(),
        label.white().bold(),
        format_duration_ms(elapsed).yellow()
    )
}

fn format_job_end(v: &EventVisitor, label: &str) -> String {
    let results = v.results.unwrap_or(0);
    let elapsed = v.elapsed_ms.unwrap_or(0);

    let count = if label == "Complete" && results == 0 {
        "none found".bright_yellow().bold().to_string()
    } else {
        format!("{} results", results.to_formatted_string(&Locale::en))
            .bright_green()
            .bold()
            .to_string()
    };

    format!(
        "{} {} {} │ {} │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        label.white().bold(),
        format_duration_ms(elapsed).yellow(),
        count
    )
}

fn format_job_failed(v: &EventVisitor) -> String {
    let error = v.error.as_deref().unwrap_or("unknown error");
    let results = v.results.unwrap_or(0);

    format!(
        "{} {} Search failed │ {} │ {} partial results",
        format_elapsed(),
        "✗".bright_red().bold(),
        error.bright_red(),
        results.to_formatted_string(&Locale::en).white()
    )
}

fn format_job_export(v: &EventVisitor) -> String {
    let path = v.path.as_deref().unwrap_or("?");
    format!(
        "{} {} Exported │ {}",
        format_elapsed(),
        "↓".bright_cyan(),
        path.white()
    )
}

fn format_job_restore(v: &EventVisitor) -> String {
    let board = v.board.as_deref().unwrap_or("?");
    let results = v.results.unwrap_or(0);
    format!(
        "{} {} Restored {} │ {} │ {} results",
        format_elapsed(),
        "↑".bright_cyan(),
        short_id(v).bright_black(),
        board.white().bold(),
        results.to_formatted_string(&Locale::en).bright_green()
    )
}

fn format_downgrade(v: &EventVisitor) -> String {
    let board = v.board.as_deref().unwrap_or("?");
    let variant = v.variant.as_deref().unwrap_or("?");
    format!(
        "{} {} No preset for dictionary({}) on {}, using general search",
        format_elapsed(),
        "!".bright_yellow().bold(),
        variant,
        board.white().bold()
    )
}

fn format_progress(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    let enumerated = v.enumerated.unwrap_or(0);
    let total = v.total.unwrap_or(0);
    let found = v.found.unwrap_or(0);

    format!(
        "{} {} {:>14} / {:<14} │ {} found │ {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        enumerated.to_formatted_string(&Locale::en).white(),
        total.to_formatted_string(&Locale::en).bright_black(),
        found.to_formatted_string(&Locale::en).bright_green(),
        format_percent(enumerated, total).bright_magenta()
    )
}

fn format_percent(done: u64, total: u64) -> String {
    if total == 0 {
        return "  -.-%".to_string();
    }
    let percent = done.min(total) as f64 * 100.0 / total as f64;
    format!("{:>5.1}%", percent)
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else if ms < 3_600_000 {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = ms / 3_600_000;
        let mins = (ms % 3_600_000) / 60_000;
        format!("{}h {}m", hours, mins)
    }
}
