// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{info, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use readme_translator::app_config::{self, Config, TranslationProvider};
use readme_translator::Controller;

/// CLI Wrapper for TranslationProvider to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliTranslationProvider {
    Google,
    #[value(name = "libretranslate")]
    LibreTranslate,
}

impl From<CliTranslationProvider> for TranslationProvider {
    fn from(cli_provider: CliTranslationProvider) -> Self {
        match cli_provider {
            CliTranslationProvider::Google => TranslationProvider::Google,
            CliTranslationProvider::LibreTranslate => TranslationProvider::LibreTranslate,
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
    /// Translate the README and publish it (default command)
    Translate(TranslateArgs),

    /// Generate shell completions for readme-translator
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
struct TranslateArgs {
    /// Target language identifier (e.g. 'fr', 'de', 'zh-CN')
    #[arg(short, long, env = "INPUT_LANG")]
    target_language: Option<String>,

    /// Repository root containing the README
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Translation provider to use
    #[arg(short, long, value_enum)]
    provider: Option<CliTranslationProvider>,

    /// Write the translation without creating a branch, commit or pull request
    #[arg(long)]
    no_publish: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "readme-translator.json")]
    config_path: PathBuf,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// readme-translator - translate a README and open a pull request with the result
#[derive(Parser, Debug)]
#[command(name = "readme-translator")]
#[command(version)]
#[command(about = "Translate a repository README while preserving its Markdown structure")]
#[command(long_about = "readme-translator finds README.md in the repository root, translates its text
(never code, links or markup), writes readme/README.<lang>.md and publishes it on the
branch readme-translation-<lang> with a pull request.

EXAMPLES:
    readme-translator                           # Translate to zh-CN and open a PR
    readme-translator -t fr                     # Translate to French
    readme-translator -t de --no-publish        # Only write readme/README.de.md
    readme-translator -p libretranslate -t es   # Use a LibreTranslate instance
    readme-translator completions bash > readme-translator.bash

CONFIGURATION:
    Settings are read from readme-translator.json when it exists; command line
    options override it. The target language can also come from INPUT_LANG.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    translate: TranslateArgs,
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

    // @returns: Emoji and ANSI color for log level
    fn decoration_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("❌ ", "1;31"),
            Level::Warn => ("🚧 ", "1;33"),
            Level::Info => (" ", "1;32"),
            Level::Debug => ("🔍 ", "1;36"),
            Level::Trace => ("📋 ", "1;35"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (emoji, color) = Self::decoration_for_level(record.level());

            let mut stderr = std::io::stderr();
            let _ = writeln!(stderr, "\x1B[{}m{} {} {}\x1B[0m", color, now, emoji, record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Trace is the ceiling; the effective level is set once the config is known
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "readme-translator", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Translate(args)) => run_translate(args).await,
        None => run_translate(cli.translate).await,
    }
}

async fn run_translate(options: TranslateArgs) -> Result<()> {
    let mut config = Config::load_or_default(&options.config_path)?;

    if let Some(target_language) = &options.target_language {
        let target_language = target_language.trim();
        // Actions pass unset inputs as empty strings
        if !target_language.is_empty() {
            config.target_language = target_language.to_string();
        }
    }
    if let Some(root) = &options.root {
        config.root_dir = root.clone();
    }
    if let Some(provider) = &options.provider {
        config.translation.provider = provider.clone().into();
    }
    if options.no_publish {
        config.publish.enabled = false;
    }
    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }

    log::set_max_level(level_filter(&config.log_level));

    let controller = Controller::from_config(config)
        .context("Configuration validation failed")?;
    log::debug!(
        "Provider: {}, output directory: {}",
        controller.config().translation.provider.display_name(),
        controller.config().output_dir().display()
    );
    let report = controller.run().await
        .map_err(|e| anyhow!("Translation run failed: {}", e))?;

    info!("Output: {}", report.artifact_path.display());
    match &report.publish {
        Some(publish) => info!("Branch: {} ({})", publish.branch, publish.pull_request_url),
        None => info!("Branch: not published"),
    }

    Ok(())
}
