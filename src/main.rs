// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result, anyhow};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::app_controller::{Controller, Mode};
use crate::workspace::Workspace;

mod app_config;
mod app_controller;
mod compose;
mod errors;
mod file_utils;
mod math_protect;
mod rendering;
mod translation_merger;
mod workspace;

/// CLI Wrapper for Mode to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliMode {
    Dual,
    Summary,
    All,
}

impl From<CliMode> for Mode {
    fn from(cli_mode: CliMode) -> Self {
        match cli_mode {
            CliMode::Dual => Mode::Dual,
            CliMode::Summary => Mode::Summary,
            CliMode::All => Mode::All,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate review PDFs for a workspace (default command)
    #[command(alias = "generate")]
    Generate(GenerateArgs),

    /// Generate shell completions for dualdoc
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    /// Workspace directory (contains papers/, translations/, output/)
    #[arg(value_name = "WORKSPACE")]
    workspace: PathBuf,

    /// What to generate
    #[arg(value_enum, default_value = "all")]
    mode: CliMode,

    /// Process only this paper (name without the .pdf extension)
    #[arg(short, long)]
    paper: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// dualdoc - bilingual paper review PDF generator
///
/// Merges page-by-page translations of academic papers and composes
/// side-by-side "original | translation" spread PDFs, plus optional
/// one-shot summary PDFs from condensed markdown files.
#[derive(Parser, Debug)]
#[command(name = "dualdoc")]
#[command(version = "1.0.0")]
#[command(about = "Bilingual paper review PDF generator")]
#[command(long_about = "dualdoc pairs each page of a source paper with its rendered translation.

EXAMPLES:
    dualdoc ./reviews                      # Spreads and summaries for every paper
    dualdoc ./reviews dual                 # Spread PDFs only
    dualdoc ./reviews summary              # Summary PDFs only
    dualdoc ./reviews all -p attention     # One paper only
    dualdoc --log-level debug ./reviews    # Verbose processing log
    dualdoc completions bash > dualdoc.bash

WORKSPACE LAYOUT:
    papers/<name>.pdf             source papers
    translations/<name>_p*.md     page-by-page translations with <!-- PAGE N --> markers
    <name>_annotated.md           condensed summary source
    output/                       generated artifacts

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config-path. If the config file doesn't exist, a default
    one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Workspace directory (contains papers/, translations/, output/)
    #[arg(value_name = "WORKSPACE")]
    workspace: Option<PathBuf>,

    /// What to generate
    #[arg(value_enum, default_value = "all")]
    mode: CliMode,

    /// Process only this paper (name without the .pdf extension)
    #[arg(short, long)]
    paper: Option<String>,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color code for log level
    fn color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S%.3f");
            let color = Self::color_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "{}{} {:5} {}\x1B[0m",
                color,
                now,
                record.level(),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

fn main() -> Result<()> {
    // Initialize the logger once with info level by default
    // We'll update the level after loading the config if needed
    CustomLogger::init(LevelFilter::Info)?;

    // Parse command line arguments using clap
    let cli = CommandLineOptions::parse();

    // Handle subcommands
    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "dualdoc", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Generate(args)) => run_generate(args),
        None => {
            // Default behavior - use top-level args for backwards compatibility
            let workspace = cli.workspace.ok_or_else(|| {
                anyhow!("WORKSPACE is required when no subcommand is specified")
            })?;

            let generate_args = GenerateArgs {
                workspace,
                mode: cli.mode,
                paper: cli.paper,
                config_path: cli.config_path,
                log_level: cli.log_level,
            };
            run_generate(generate_args)
        }
    }
}

fn run_generate(options: GenerateArgs) -> Result<()> {
    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let config_log_level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level_filter(&config_log_level));
    }

    // Load or create configuration
    let config_path = &options.config_path;
    let config = if Path::new(config_path).exists() {
        // Load existing configuration
        let file = File::open(config_path)
            .context(format!("Failed to open config file: {}", config_path))?;

        let reader = BufReader::new(file);
        let mut config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", config_path))?;

        // Update log level in config if specified via command line
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        config
    } else {
        // Create default configuration if not exists
        warn!("Config file not found at '{}', creating default config.", config_path);

        let mut config = Config::default();

        // Apply command line log level to default config if specified
        if let Some(log_level) = &options.log_level {
            config.log_level = log_level.clone().into();
        }

        // Save default config
        let config_json = serde_json::to_string_pretty(&config)
            .context("Failed to serialize default config to JSON")?;

        std::fs::write(config_path, config_json)
            .context(format!("Failed to write default config to file: {}", config_path))?;

        config
    };

    // Validate the configuration after loading and overriding
    config.validate().context("Configuration validation failed")?;

    // If log level was not set via command line, update it from config now
    if options.log_level.is_none() {
        // Just update the max level without reinitializing the logger
        log::set_max_level(level_filter(&config.log_level));
    }

    if !options.workspace.is_dir() {
        return Err(anyhow!("Workspace does not exist: {:?}", options.workspace));
    }

    let workspace = Workspace::new(&options.workspace);
    let controller = Controller::with_config(config)?;
    controller.run(&workspace, options.mode.clone().into(), options.paper.as_deref())
}
