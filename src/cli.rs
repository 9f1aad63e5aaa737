//! Plumbing shared by the `images2pdf` and `pdf2images` binaries.
//!
//! Argument parsing with the two-positional usage contract, logging setup,
//! the terminal progress bar and a few value enums that map onto library
//! types. Only compiled with the `cli` feature.

use crate::config::{ListingOrder, PageSize};
use crate::progress::ConversionProgressCallback;
use clap::error::ErrorKind as ClapErrorKind;
use clap::{CommandFactory, Parser};
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};
use std::io;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

pub fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
pub fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
pub fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
pub fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}
pub fn cyan(s: &str) -> String {
    format!("\x1b[36m{s}\x1b[0m")
}

const TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"];

// ── Argument parsing ─────────────────────────────────────────────────────────

/// Exit status for a failed parse: 0 for `--help` / `--version`, 1 otherwise.
pub fn parse_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// Parse the process arguments into `P`, or exit.
///
/// `--help` and `--version` print to stdout and exit 0. Any other parse
/// failure (most often the wrong number of positionals) prints the usage
/// line to stdout, the reason to stderr, and exits 1.
pub fn parse_args<P: Parser>() -> P {
    match P::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = parse_exit_code(&err);
            if code == 0 {
                let _ = err.print();
            } else {
                println!("{}", P::command().render_usage());
                let reason = err.to_string();
                let first = reason.lines().next().unwrap_or_default();
                eprintln!("{}", red(first));
            }
            std::process::exit(code);
        }
    }
}

// ── Logging ──────────────────────────────────────────────────────────────────

/// Pick the default log level. `RUST_LOG` overrides it in [`init_logging`].
///
/// While the progress bar is on screen, info-level lines would tear it, so
/// only warnings and errors get through.
pub fn default_filter(verbose: bool, quiet: bool, show_progress: bool) -> &'static str {
    if verbose {
        "debug"
    } else if quiet {
        "error"
    } else if show_progress {
        "warn"
    } else {
        "info"
    }
}

/// Install the stderr fmt subscriber.
pub fn init_logging(verbose: bool, quiet: bool, show_progress: bool) {
    let filter = default_filter(verbose, quiet, show_progress);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();
}

// ── CLI progress callback using indicatif ────────────────────────────────────

/// Terminal progress callback: a live bar plus one log line per item.
pub struct CliProgressCallback {
    bar: ProgressBar,
    /// Singular noun for an item, e.g. "image" or "page".
    noun: &'static str,
    /// When the item currently in flight started.
    item_started: Mutex<Instant>,
}

impl CliProgressCallback {
    /// Create a spinner; `on_conversion_start` turns it into a bar once the
    /// item count is known.
    pub fn new_dynamic(noun: &'static str, preparing: &str) -> Arc<Self> {
        let bar = ProgressBar::new(0);

        let spinner_style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(TICKS);

        bar.set_style(spinner_style);
        bar.set_prefix("Preparing");
        bar.set_message(preparing.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));

        Arc::new(Self {
            bar,
            noun,
            item_started: Mutex::new(Instant::now()),
        })
    }

    fn activate_bar(&self, total: usize) {
        let template = format!(
            "{{spinner:.cyan}} {{prefix:.bold}}  \
             [{{bar:42.green/238}}] {{pos:>3}}/{{len}} {}s  \
             ⏱ {{elapsed_precise}}  ETA {{eta_precise}}",
            self.noun
        );
        let progress_style = ProgressStyle::with_template(&template)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▉▊▋▌▍▎▏  ")
            .tick_strings(TICKS);

        self.bar.set_length(total as u64);
        self.bar.set_style(progress_style);
        self.bar.set_prefix("Converting");
        self.bar.reset_eta();
    }

    fn restart_item_clock(&self) -> Duration {
        match self.item_started.lock() {
            Ok(mut started) => {
                let elapsed = started.elapsed();
                *started = Instant::now();
                elapsed
            }
            Err(_) => Duration::ZERO,
        }
    }
}

impl ConversionProgressCallback for CliProgressCallback {
    fn on_conversion_start(&self, total: usize) {
        self.activate_bar(total);
        self.restart_item_clock();
        self.bar.println(format!(
            "{} {}",
            cyan("◆"),
            bold(&format!("Starting conversion of {total} {}s…", self.noun))
        ));
    }

    fn on_item_complete(&self, index: usize, total: usize, bytes: usize) {
        let elapsed = self.restart_item_clock();
        let noun = capitalise(self.noun);
        self.bar.println(format!(
            "  {} {} {:>3}/{:<3}  {:<12}  {}",
            green("✓"),
            noun,
            index + 1,
            total,
            dim(&format!("{:>10}", HumanBytes(bytes as u64).to_string())),
            dim(&format!("{:.1}s", elapsed.as_secs_f64())),
        ));
        self.bar.inc(1);
    }

    fn on_conversion_complete(&self, total: usize) {
        self.bar.finish_and_clear();
        eprintln!(
            "{} {} {}s converted",
            green("✔"),
            bold(&total.to_string()),
            self.noun
        );
    }
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

// ── Value enums ──────────────────────────────────────────────────────────────

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageSizeArg {
    Letter,
    Legal,
    A4,
}

impl From<PageSizeArg> for PageSize {
    fn from(v: PageSizeArg) -> Self {
        match v {
            PageSizeArg::Letter => PageSize::Letter,
            PageSizeArg::Legal => PageSize::Legal,
            PageSizeArg::A4 => PageSize::A4,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderArg {
    /// Oldest first by creation time (modification time where unavailable).
    Created,
    /// Oldest first by modification time.
    Modified,
    /// By file name.
    Name,
}

impl From<OrderArg> for ListingOrder {
    fn from(v: OrderArg) -> Self {
        match v {
            OrderArg::Created => ListingOrder::CreationTime,
            OrderArg::Modified => ListingOrder::ModificationTime,
            OrderArg::Name => ListingOrder::Name,
        }
    }
}
