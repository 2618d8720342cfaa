use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::{ConfigIssue, ConfigLoad, QuizConfig};
use services::{HttpQuestionBank, QuestionBank, SampleQuestionBank};
use tracing_subscriber::{EnvFilter, fmt as log_fmt, layer::SubscriberExt, util::SubscriberInitExt};
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    EmptyValue { flag: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::EmptyValue { flag } => write!(f, "{flag} cannot be empty"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    let value = args.next().ok_or(ArgsError::MissingValue { flag })?;
    if value.trim().is_empty() {
        return Err(ArgsError::EmptyValue { flag });
    }
    Ok(value)
}

struct DesktopApp {
    config: Arc<QuizConfig>,
    bank: Arc<dyn QuestionBank>,
    issues: Vec<ConfigIssue>,
}

impl UiApp for DesktopApp {
    fn config(&self) -> Arc<QuizConfig> {
        Arc::clone(&self.config)
    }

    fn question_bank(&self) -> Arc<dyn QuestionBank> {
        Arc::clone(&self.bank)
    }

    fn config_issues(&self) -> Vec<ConfigIssue> {
        self.issues.clone()
    }
}

#[derive(Debug, Default, PartialEq, Eq)]
struct Args {
    endpoint: Option<String>,
    bank: Option<String>,
    sample: bool,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- ui    [--endpoint <url>] [--bank <name>] [--sample]");
    eprintln!("  cargo run -p app -- check [--endpoint <url>] [--bank <name>] [--sample]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --endpoint <url>  grading endpoint (overrides QUIZ_ENDPOINT_URL)");
    eprintln!("  --bank <name>     question bank / sheet name (overrides QUIZ_QUESTION_BANK)");
    eprintln!("  --sample          use the built-in sample questions");
    eprintln!();
    eprintln!("Environment (also read from .env):");
    eprintln!("  QUIZ_ENDPOINT_URL, QUIZ_PASS_THRESHOLD, QUIZ_QUESTION_COUNT,");
    eprintln!("  QUIZ_QUESTION_BANK, QUIZ_TIME_LIMIT_SECS, QUIZ_REQUEST_TIMEOUT_SECS,");
    eprintln!("  QUIZ_SAMPLE_LATENCY_MS, RUST_LOG");
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
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--endpoint" => parsed.endpoint = Some(require_value(args, "--endpoint")?),
                "--bank" => parsed.bank = Some(require_value(args, "--bank")?),
                "--sample" => parsed.sample = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }
        Ok(parsed)
    }
}

/// Apply command-line overrides and re-check the result.
fn resolve_config(load: ConfigLoad, args: &Args) -> (QuizConfig, Vec<ConfigIssue>) {
    let mut config = load.config;
    if let Some(endpoint) = &args.endpoint {
        config = config.with_endpoint_url(endpoint.as_str());
    }
    if let Some(bank) = &args.bank {
        config = config.with_question_bank(bank.as_str());
    }

    // Parse problems only show up while loading; everything else is re-validated.
    let mut issues: Vec<ConfigIssue> = load
        .issues
        .into_iter()
        .filter(|issue| matches!(issue, ConfigIssue::InvalidNumber { .. }))
        .collect();
    issues.extend(
        config
            .validate()
            .into_iter()
            .filter(|issue| !(args.sample && *issue == ConfigIssue::MissingEndpoint)),
    );
    (config, issues)
}

fn sample_bank(config: &QuizConfig) -> SampleQuestionBank {
    SampleQuestionBank::new(config.pass_threshold()).with_latency(config.sample_latency())
}

fn build_bank(
    config: &QuizConfig,
    force_sample: bool,
) -> Result<Arc<dyn QuestionBank>, Box<dyn std::error::Error>> {
    if force_sample || !config.has_endpoint() {
        tracing::info!(
            latency_ms = config.sample_latency().as_millis() as u64,
            "using built-in sample questions"
        );
        return Ok(Arc::new(sample_bank(config)));
    }
    tracing::info!(endpoint = config.endpoint_url(), "using remote question bank");
    Ok(Arc::new(HttpQuestionBank::from_config(config)?))
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(log_fmt::layer().with_target(false))
        .init();
}

fn print_check(config: &QuizConfig, issues: &[ConfigIssue]) {
    let endpoint = if config.has_endpoint() {
        config.endpoint_url()
    } else {
        "(none, sample questions)"
    };
    let time_limit = if config.is_time_limited() {
        quiz_core::time::phrase(config.time_limit_secs())
    } else {
        "none".to_string()
    };
    println!("endpoint:        {endpoint}");
    println!("question bank:   {}", config.question_bank());
    println!("question count:  {}", config.question_count());
    println!("pass threshold:  {}", config.pass_threshold());
    println!("time limit:      {time_limit}");
    println!("request timeout: {}s", config.request_timeout().as_secs());
    if !config.has_endpoint() {
        println!("sample latency:  {}ms", config.sample_latency().as_millis());
    }
    if issues.is_empty() {
        println!("no problems found");
    } else {
        println!();
        for issue in issues {
            println!("warning: {issue}");
        }
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

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
    let args = Args::parse(&mut iter).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let (config, issues) = resolve_config(QuizConfig::from_env(), &args);

    match cmd {
        Command::Check => {
            print_check(&config, &issues);
            if !issues.is_empty() {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Ui => {
            init_tracing();
            for issue in &issues {
                tracing::warn!("{issue}");
            }

            let bank = build_bank(&config, args.sample)?;
            let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
                config: Arc::new(config),
                bank,
                issues,
            });
            let context = build_app_context(&app);

            // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
            // Explicitly disable it so the app doesn't behave like a modal window.
            let desktop_cfg = DesktopConfig::new().with_window(
                WindowBuilder::new()
                    .with_title("Quiz Challenge")
                    .with_always_on_top(false),
            );

            LaunchBuilder::desktop()
                .with_cfg(desktop_cfg)
                .with_context(context)
                .launch(App);
            Ok(())
        }
    }
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
