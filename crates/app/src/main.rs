use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{Clock, QuizLoopService, QuizSettings};
use storage::repository::{BankLocation, Storage};
use tracing::info;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidCount { raw: String },
    InvalidTimeLimit { raw: String },
    InvalidBank { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidCount { raw } => write!(f, "invalid --count value: {raw}"),
            ArgsError::InvalidTimeLimit { raw } => {
                write!(f, "invalid --time-limit value: {raw}")
            }
            ArgsError::InvalidBank { raw } => write!(f, "invalid --bank value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

struct DesktopApp {
    quiz_loop: Arc<QuizLoopService>,
}

impl UiApp for DesktopApp {
    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }
}

struct Args {
    bank: BankLocation,
    settings: QuizSettings,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--bank <path|url>] [--count <n>] [--time-limit <secs>]");
    eprintln!("  cargo run -p app -- check [--bank <path|url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --bank {}", BankLocation::DEFAULT_PATH);
    eprintln!("  --count 10");
    eprintln!("  --time-limit 5400   (0 disables the timer)");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_BANK, QUIZ_TITLE, QUIZ_SAMPLE_SIZE, QUIZ_TIME_LIMIT_SECS, QUIZ_STRICT_MULTI");
    eprintln!("  RUST_LOG (default: info)");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Ui,
    Check,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "ui" => Some(Self::Ui),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut bank = match std::env::var("QUIZ_BANK") {
            Ok(raw) => parse_bank(raw)?,
            Err(_) => BankLocation::default(),
        };
        let mut settings = QuizSettings::from_env();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--bank" => {
                    let value = require_value(args, "--bank")?;
                    bank = parse_bank(value)?;
                }
                "--count" => {
                    let value = require_value(args, "--count")?;
                    let count = value
                        .parse::<usize>()
                        .ok()
                        .filter(|count| *count > 0)
                        .ok_or(ArgsError::InvalidCount { raw: value })?;
                    settings = settings.with_sample_size(count);
                }
                "--time-limit" => {
                    let value = require_value(args, "--time-limit")?;
                    let secs = value
                        .parse::<u64>()
                        .map_err(|_| ArgsError::InvalidTimeLimit { raw: value.clone() })?;
                    settings = settings.with_time_limit_secs(secs);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { bank, settings })
    }
}

fn parse_bank(raw: String) -> Result<BankLocation, ArgsError> {
    BankLocation::parse(&raw).map_err(|_| ArgsError::InvalidBank { raw })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: launching UI when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Ui,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Ui,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let mut iter = argv.into_iter();
    let parsed = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    info!(bank = %parsed.bank, sample_size = parsed.settings.sample_size, "starting quiz app");
    let storage = Storage::from_location(&parsed.bank);
    let quiz_loop = Arc::new(QuizLoopService::new(
        Clock::default_clock(),
        Arc::clone(&storage.bank),
        parsed.settings,
    ));

    match cmd {
        Command::Ui => {
            let title = quiz_loop.settings().title.clone();
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp { quiz_loop });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title(title)
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
        Command::Check => {
            let report = quiz_loop.inspect_bank().await?;
            for err in &report.rejected {
                eprintln!("rejected: {err}");
            }
            println!(
                "{}: {} usable question(s), {} rejected",
                parsed.bank,
                report.usable,
                report.rejected.len()
            );
            if report.usable == 0 {
                return Err(services::QuizError::EmptyBank.into());
            }
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
