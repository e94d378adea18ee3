//! Domain Finder - check a domain and discover available alternatives
//!
//! Thin front end over [`AvailabilityResolver::check`]: collects the domain,
//! runs the check and renders the result as text or JSON.

use clap::{ArgAction, Parser};
use domain_finder::{
    Availability, AvailabilityResolver, CheckConfig, CheckResult, DomainFinderError, Result,
    WhoisClient,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Check whether a domain is taken and suggest alternatives
#[derive(Parser, Debug)]
#[command(name = "domain-finder", version, about)]
struct Cli {
    /// Domain to check, e.g. example.com (prompted for when omitted)
    domain: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Per-lookup timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Maximum number of lookups in flight
    #[arg(long, value_name = "N")]
    concurrency: Option<usize>,

    /// Maximum number of suggestions (at most 10)
    #[arg(long, value_name = "N")]
    limit: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = domain_finder::init() {
        eprintln!("{}", e.user_message());
        process::exit(1);
    }

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{}", e.user_message());
            process::exit(1);
        }
    }
}

/// `RUST_LOG` wins; otherwise the `-v` count picks the level
fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Run one check; `Ok(false)` means the result carries an error
async fn run(cli: Cli) -> Result<bool> {
    let config = build_config(&cli)?;

    let domain = match cli.domain {
        Some(domain) => domain,
        None => prompt_domain()?,
    };

    let lookup = Arc::new(WhoisClient::with_timeout(config.lookup_timeout));
    let resolver = AvailabilityResolver::with_config(lookup, config);

    let spinner = (!cli.json).then(|| start_spinner(&domain));
    let result = resolver.check(&domain).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result.to_response())?);
    } else {
        display_result(&result);
    }

    Ok(!result.is_error())
}

fn build_config(cli: &Cli) -> Result<CheckConfig> {
    let mut config = CheckConfig::from_env()?;

    if let Some(secs) = cli.timeout {
        if secs == 0 {
            return Err(DomainFinderError::cli("--timeout must be greater than zero"));
        }
        config = config.with_timeout(Duration::from_secs(secs));
    }
    if let Some(concurrency) = cli.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(limit) = cli.limit {
        config = config.with_suggestion_limit(limit);
    }

    Ok(config)
}

fn prompt_domain() -> Result<String> {
    let domain = inquire::Text::new("Domain name (e.g. example.com):").prompt()?;
    Ok(domain)
}

fn start_spinner(domain: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(format!("Checking {}...", domain.trim()));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn display_result(result: &CheckResult) {
    if let Some(error) = &result.error {
        eprintln!("❌ {}", error);
        return;
    }

    match result.available() {
        Some(true) => println!("✅ {} is available", result.domain),
        Some(false) => println!("❌ {} is taken", result.domain),
        None => println!("⚠️  {} could not be checked", result.domain),
    }

    if result.suggestions.is_empty() {
        return;
    }

    println!();
    println!("💡 Suggestions ({}):", result.suggestions.len());
    println!("─────────────────");
    for (name, outcome) in result.suggestion_outcomes() {
        let marker = match outcome {
            Availability::Available => "✅",
            Availability::Taken => "❌",
            Availability::Indeterminate(_) => "⚠️ ",
        };
        println!("{} {} - {}", marker, name, outcome);
    }
}
