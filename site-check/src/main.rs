//! Site Check CLI Application
//!
//! A command-line interface for checking reachability and latency of a list
//! of URLs. This CLI application provides a user-friendly front end to the
//! site-check-lib library: argument parsing, config layering, progress
//! display, and table/CSV/JSON output.

mod ui;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::Parser;
use site_check_lib::{
    load_env_config, ConfigManager, EnvConfig, FileConfig, ProbeConfig, ProbeResult, SiteChecker,
};
use std::io::BufRead;
use std::process;
use std::time::Duration;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Yellow.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// CLI arguments for site-check
#[derive(Parser, Debug)]
#[command(name = "site-check")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Check reachability and latency of a list of URLs")]
#[command(
    long_about = "Check reachability and latency of a list of URLs with concurrent HTTP probes.\n\nScheme is optional (example.com becomes https://example.com). Every URL yields one result row, success or failure, ranked reachable-and-fastest first."
)]
#[command(styles = STYLES)]
pub struct Args {
    /// URLs to check (scheme optional)
    #[arg(value_name = "URLS", help_heading = "Input")]
    pub urls: Vec<String>,

    /// Input file with URLs, one per line; use '-' for stdin.
    /// Blank lines and '#' comments are skipped.
    #[arg(
        short = 'f',
        long = "file",
        value_name = "FILE",
        help_heading = "Input"
    )]
    pub file: Option<String>,

    /// Max concurrent probes (default: 30, max: 100)
    #[arg(
        short = 'c',
        long = "concurrency",
        value_name = "N",
        help_heading = "Performance"
    )]
    pub concurrency: Option<usize>,

    /// Per-request timeout in seconds (default: 10, range: 1-30)
    #[arg(
        short = 't',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "Performance"
    )]
    pub timeout: Option<u64>,

    /// Return the first response as-is instead of following redirects
    #[arg(long = "no-redirects", help_heading = "Protocol")]
    pub no_redirects: bool,

    /// Disable TLS certificate verification
    #[arg(short = 'k', long = "insecure", help_heading = "Protocol")]
    pub insecure: bool,

    /// Output results in JSON format
    #[arg(short = 'j', long = "json", help_heading = "Output Format")]
    pub json: bool,

    /// Output results in CSV format (url,final_url,status,latency_ms,ok,error)
    #[arg(long = "csv", help_heading = "Output Format")]
    pub csv: bool,

    /// Add a header block with run parameters to the text output
    #[arg(short = 'p', long = "pretty", help_heading = "Output Format")]
    pub pretty: bool,

    /// Use specific config file instead of automatic discovery
    #[arg(long = "config", value_name = "FILE", help_heading = "Configuration")]
    pub config: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long = "verbose", help_heading = "Configuration")]
    pub verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Validate arguments
    if let Err(e) = validate_args(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }

    // Set up logging if verbose
    if args.verbose {
        use tracing_subscriber::EnvFilter;
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("site_check=debug,site_check_lib=debug"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    // Run the checks
    if let Err(e) = run_site_check(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Validate command line arguments
fn validate_args(args: &Args) -> Result<(), String> {
    // Must have either URLs or a file
    if args.urls.is_empty() && args.file.is_none() {
        return Err("You must specify URLs or a file with --file".to_string());
    }

    // Can't have multiple output formats
    if args.json && args.csv {
        return Err("Cannot specify multiple output formats (--json, --csv)".to_string());
    }

    // Pretty is a text-mode refinement
    if args.pretty && (args.json || args.csv) {
        return Err("--pretty only applies to the default text output".to_string());
    }

    // Validate ranges for explicitly supplied values
    if let Some(concurrency) = args.concurrency {
        if !(1..=100).contains(&concurrency) {
            return Err("Concurrency must be between 1 and 100".to_string());
        }
    }
    if let Some(timeout) = args.timeout {
        if !(1..=30).contains(&timeout) {
            return Err("Timeout must be between 1 and 30 seconds".to_string());
        }
    }

    Ok(())
}

/// Main checking logic
async fn run_site_check(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    // Build configuration: defaults < config file < environment < CLI flags
    let config = build_config(&args)?;

    // Gather raw input lines from positional args and/or file
    let raw_urls = gather_urls(&args)?;
    let targets = site_check_lib::prepare_targets(&raw_urls);
    if targets.is_empty() {
        eprintln!("No URLs to check.");
        return Ok(());
    }

    let structured = args.json || args.csv;
    if args.pretty && !structured {
        ui::print_header(targets.len(), config.concurrency, config.timeout);
    }

    let checker = SiteChecker::with_config(config);
    let counter = if structured {
        None
    } else {
        Some(ui::ProgressCounter::new())
    };

    let start = std::time::Instant::now();
    let results = checker
        .run_checks_with_progress(&raw_urls, |progress| {
            if let Some(counter) = &counter {
                counter.update(progress);
            }
        })
        .await?;
    let duration = start.elapsed();

    if let Some(counter) = &counter {
        counter.finish();
    }

    display_results(&results, &args, duration)?;

    Ok(())
}

/// Build the probe configuration with layered precedence.
fn build_config(args: &Args) -> Result<ProbeConfig, Box<dyn std::error::Error>> {
    let mut config = ProbeConfig::default();

    // Config file (explicit path is a hard error when unreadable;
    // discovery failures are not)
    let manager = ConfigManager::new(args.verbose);
    let file_config = match &args.config {
        Some(path) => manager.load_file(path)?,
        None => match manager.discover_and_load() {
            Ok(file_config) => file_config,
            Err(e) => {
                // A broken discovered file falls back to defaults, but
                // never silently under --verbose.
                if args.verbose {
                    eprintln!("Warning: ignoring discovered config file: {}", e);
                }
                FileConfig::default()
            }
        },
    };
    config = merge_file_config_into_probe_config(config, &file_config);

    // Environment variables
    config = apply_environment_config(config, &load_env_config());

    // CLI flags win
    config = apply_cli_args_to_config(config, args);

    Ok(config)
}

/// Apply config-file defaults onto the probe configuration.
fn merge_file_config_into_probe_config(
    mut config: ProbeConfig,
    file_config: &FileConfig,
) -> ProbeConfig {
    if let Some(defaults) = &file_config.defaults {
        if let Some(concurrency) = defaults.concurrency {
            config = config.with_concurrency(concurrency);
        }
        if let Some(timeout) = defaults.timeout {
            config = config.with_timeout(Duration::from_secs(timeout));
        }
        if let Some(follow) = defaults.follow_redirects {
            config = config.with_follow_redirects(follow);
        }
        if let Some(verify) = defaults.verify_tls {
            config = config.with_verify_tls(verify);
        }
    }
    config
}

/// Apply environment overrides onto the probe configuration.
fn apply_environment_config(mut config: ProbeConfig, env_config: &EnvConfig) -> ProbeConfig {
    if let Some(concurrency) = env_config.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(timeout) = env_config.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }
    if let Some(follow) = env_config.follow_redirects {
        config = config.with_follow_redirects(follow);
    }
    if let Some(verify) = env_config.verify_tls {
        config = config.with_verify_tls(verify);
    }
    config
}

/// Apply explicit CLI flags onto the probe configuration. Flags always win.
fn apply_cli_args_to_config(mut config: ProbeConfig, args: &Args) -> ProbeConfig {
    if let Some(concurrency) = args.concurrency {
        config = config.with_concurrency(concurrency);
    }
    if let Some(timeout) = args.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }
    if args.no_redirects {
        config = config.with_follow_redirects(false);
    }
    if args.insecure {
        config = config.with_verify_tls(false);
    }
    config
}

/// Collect raw URL lines from positional arguments and/or the input file.
fn gather_urls(args: &Args) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let mut urls = args.urls.clone();

    if let Some(file_path) = &args.file {
        urls.extend(read_urls_from_file(file_path)?);
    }

    Ok(urls)
}

/// Read URL lines from a file (or stdin for "-").
///
/// Blank lines and `#` comments are skipped here for early feedback; the
/// library applies the same filtering again before probing.
fn read_urls_from_file(file_path: &str) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::Path;

    let mut urls = Vec::new();

    let mut push_line = |line: &str| {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return;
        }
        // Strip inline comments; fragments are dropped by normalization
        // anyway, so losing text after '#' never changes a probe target.
        let url_part = trimmed.split('#').next().unwrap_or("").trim();
        if !url_part.is_empty() {
            urls.push(url_part.to_string());
        }
    };

    if file_path == "-" {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            push_line(&line?);
        }
    } else {
        let path = Path::new(file_path);
        if !path.exists() {
            return Err(format!("File not found: {}", file_path).into());
        }
        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            push_line(&line?);
        }
    }

    if urls.is_empty() {
        return Err("No URLs found in the input file.".into());
    }

    Ok(urls)
}

fn display_results(
    results: &[ProbeResult],
    args: &Args,
    duration: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.json {
        display_json_results(results)?;
    } else if args.csv {
        display_csv_results(results);
    } else {
        display_text_results(results, duration);
    }

    Ok(())
}

/// Display results in JSON format
fn display_json_results(results: &[ProbeResult]) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(results)?;
    println!("{}", json);
    Ok(())
}

/// Display results in CSV format.
///
/// Field order is the stable serialization contract:
/// `url, final_url, status, latency_ms, ok, error`. Status is empty on
/// transport failure; `ok` is a `true`/`false` literal.
fn display_csv_results(results: &[ProbeResult]) {
    println!("url,final_url,status,latency_ms,ok,error");

    for result in results {
        let status = result
            .status
            .map(|code| code.to_string())
            .unwrap_or_default();

        println!(
            "{},{},{},{},{},{}",
            csv_escape(&result.url),
            csv_escape(&result.final_url),
            status,
            result.latency_ms,
            result.ok,
            csv_escape(&result.error),
        );
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Display results in human-readable text format
fn display_text_results(results: &[ProbeResult], duration: Duration) {
    for result in results {
        ui::print_result(result);
    }

    println!();
    ui::print_summary(results, duration);
}

// site-check/src/main.rs tests module
