//! CLI argument definitions for events2pdf.

use std::path::PathBuf;

use clap::{ColorChoice, Parser, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use tracing::level_filters::LevelFilter;

use e2p_cli::logging::{LogConfig, LogFormat};
use e2p_ingest::ConfigOverrides;
use e2p_model::{Orientation, PageSize};

#[derive(Parser)]
#[command(
    name = "events2pdf",
    version,
    about = "Render an event feed into a multi-column PDF schedule",
    long_about = "Render an event feed into a printable multi-column PDF schedule.\n\n\
                  Events are read from a JSON file, standard input, or a URL, grouped\n\
                  into day sections and laid out after a cover page. Settings come from\n\
                  events2pdf_conf.json; flags given here take precedence."
)]
pub struct Cli {
    /// Input: JSON file, `-` for stdin, or an http(s) URL.
    #[arg(short = 'i', long = "input", value_name = "SOURCE")]
    pub input: Option<String>,

    /// Output: PDF file path, or `-` for stdout.
    #[arg(short = 'o', long = "output", value_name = "SINK")]
    pub output: Option<String>,

    /// Configuration file (default: events2pdf_conf.json).
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Font family: Helvetica, Times or Courier.
    #[arg(short = 'f', long = "font", value_name = "NAME")]
    pub font: Option<String>,

    /// Font size in points.
    #[arg(short = 's', long = "font-size", value_name = "POINTS")]
    pub font_size: Option<f32>,

    /// Portrait page orientation.
    #[arg(short = 'p', long = "portrait")]
    pub portrait: bool,

    /// Letter page size.
    #[arg(short = 'l', long = "letter")]
    pub letter: bool,

    /// Print a per-section event count table to stderr.
    #[arg(long = "summary")]
    pub summary: bool,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(long = "log-format", value_enum, default_value = "pretty")]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Config values given on the command line.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            input: self.input.clone(),
            output: self.output.clone(),
            font: self.font.clone(),
            font_size: self.font_size,
            page_orientation: self.portrait.then_some(Orientation::Portrait),
            page_size: self.letter.then_some(PageSize::Letter),
        }
    }

    /// Logging setup from the log flags. `--log-level` beats `-v`/`-q`, and
    /// either one turns off `RUST_LOG`. Auto color only applies to a
    /// terminal stderr.
    pub fn log_config(&self, stderr_is_terminal: bool) -> LogConfig {
        let explicit = self.log_level.map(LevelFilter::from);
        LogConfig {
            level_filter: explicit.unwrap_or_else(|| self.verbosity.tracing_level_filter()),
            use_env_filter: explicit.is_none() && !self.verbosity.is_present(),
            format: self.log_format.into(),
            log_file: self.log_file.clone(),
            with_ansi: match self.color.color {
                ColorChoice::Always => true,
                ColorChoice::Never => false,
                ColorChoice::Auto => stderr_is_terminal && self.log_file.is_none(),
            },
            ..LogConfig::default()
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(format: LogFormatArg) -> Self {
        match format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_flags_map_to_overrides() {
        let cli = Cli::parse_from([
            "events2pdf", "-i", "feed.json", "-o", "-", "-f", "Times", "-s", "9", "-p", "-l",
        ]);
        let overrides = cli.overrides();
        assert_eq!(overrides.input.as_deref(), Some("feed.json"));
        assert_eq!(overrides.output.as_deref(), Some("-"));
        assert_eq!(overrides.font.as_deref(), Some("Times"));
        assert_eq!(overrides.font_size, Some(9.0));
        assert_eq!(overrides.page_orientation, Some(Orientation::Portrait));
        assert_eq!(overrides.page_size, Some(PageSize::Letter));
    }

    #[test]
    fn absent_flags_leave_config_alone() {
        let cli = Cli::parse_from(["events2pdf"]);
        assert_eq!(cli.overrides(), ConfigOverrides::default());
        assert!(cli.config.is_none());
        assert!(!cli.summary);
    }

    #[test]
    fn log_level_flag_beats_verbosity_and_env() {
        let cli = Cli::parse_from(["events2pdf", "-q", "--log-level", "debug"]);
        let config = cli.log_config(true);
        assert_eq!(config.level_filter, LevelFilter::DEBUG);
        assert!(!config.use_env_filter);
    }

    #[test]
    fn default_logging_defers_to_env() {
        let cli = Cli::parse_from(["events2pdf"]);
        let config = cli.log_config(true);
        assert_eq!(config.level_filter, LevelFilter::WARN);
        assert!(config.use_env_filter);
        assert!(config.with_ansi);
        assert_eq!(config.format, LogFormat::Pretty);
    }

    #[test]
    fn log_file_disables_auto_color() {
        let cli = Cli::parse_from([
            "events2pdf", "--log-file", "run.log", "--log-format", "json",
        ]);
        let config = cli.log_config(true);
        assert!(!config.with_ansi);
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.log_file, Some(PathBuf::from("run.log")));
    }
}
