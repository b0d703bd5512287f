mod categories;
mod config;
mod filter;
mod labels;
mod models;
mod normalize;
mod performance;
mod report;
mod source;
mod summary;
mod timeseries;
mod window;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use config::Config;
use filter::JobFilter;
use labels::truncate_label;
use models::{JobStatus, SearchRecord};
use report::{build_report, StatsReport};
use std::path::PathBuf;
use tracing::info;
use window::WindowRange;

#[derive(Parser)]
#[command(name = "jobdash")]
#[command(about = "Statistics for automated job-search crawls")]
struct Cli {
    /// Config file (defaults to the per-user config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Crawler API base URL, e.g. http://localhost:5000/api
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Read jobs from an exported JSON file instead of the API
    #[arg(long, global = true, requires = "searches_file")]
    jobs_file: Option<PathBuf>,

    /// Read searches from an exported JSON file instead of the API
    #[arg(long, global = true, requires = "jobs_file")]
    searches_file: Option<PathBuf>,

    /// Verbose logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show dashboard statistics
    Stats {
        /// Time window (7d, 30d, 90d)
        #[arg(short, long)]
        range: Option<String>,

        /// Evaluate as of this RFC 3339 timestamp instead of now
        #[arg(long)]
        now: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// List jobs
    Jobs {
        /// Filter by status (new, saved, applied, interview, rejected, all)
        #[arg(short, long)]
        status: Option<String>,

        /// Text to look for in title or company
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Filter by company
        #[arg(short, long)]
        company: Option<String>,

        /// Filter by location
        #[arg(short, long)]
        location: Option<String>,

        /// Number of jobs to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },

    /// List configured searches
    Searches {
        /// Only show active searches
        #[arg(short, long)]
        active: bool,
    },

    /// Print the effective configuration
    Config,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn parse_now(now: Option<&str>) -> Result<DateTime<Utc>> {
    match now {
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .with_context(|| format!("Invalid --now timestamp '{}'", raw)),
        None => Ok(Utc::now()),
    }
}

fn parse_status_filter(status: Option<&str>) -> Result<Option<JobStatus>> {
    match status.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(raw) => match JobStatus::parse(raw) {
            JobStatus::Unclassified => Err(anyhow!(
                "Unknown status '{}'. Available: new, saved, applied, interview, rejected, all",
                raw
            )),
            status => Ok(Some(status)),
        },
    }
}

fn search_row(search: &SearchRecord) -> String {
    let platforms: Vec<&str> = search.platforms.iter().map(|p| p.label()).collect();
    let job_types: Vec<&str> = search.job_types.iter().map(|t| t.label()).collect();
    format!(
        "{:<6} {:<22} {:<26} {:<18} {:>8} {:>6} {:>6}",
        search.id.to_string(),
        truncate_label(&search.keywords, 19),
        truncate_label(&or_dash(&platforms.join(", ")), 23),
        truncate_label(&or_dash(&job_types.join(", ")), 15),
        search
            .duration_minutes
            .map(|m| format!("{} min", m))
            .unwrap_or_else(|| "-".to_string()),
        if search.is_active { "yes" } else { "no" },
        search
            .total_jobs
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string())
    )
}

fn or_dash(s: &str) -> String {
    if s.is_empty() { "-".to_string() } else { s.to_string() }
}

fn print_report(report: &StatsReport, source: &str) {
    println!("Statistics for the last {} days ({})", report.range.days(), source);
    println!();
    println!("  Total jobs:        {}", report.stats.total_jobs);
    println!("  Active searches:   {}", report.stats.active_searches);
    println!("  Application rate:  {}%", report.stats.success_rate);
    println!("  Average per day:   {}", report.stats.average_jobs_per_day);
    println!("  Found today:       {}", report.today_jobs);

    println!("\n{:<12} {:>6} {:>12}", "DAY", "JOBS", "CUMULATIVE");
    println!("{}", "-".repeat(32));
    for bucket in &report.jobs_over_time {
        println!("{:<12} {:>6} {:>12}", bucket.label, bucket.count, bucket.cumulative);
    }

    println!("\n{:<14} {:>6}", "STATUS", "JOBS");
    println!("{}", "-".repeat(21));
    if report.jobs_by_status.is_empty() {
        println!("(no classified jobs)");
    }
    for entry in &report.jobs_by_status {
        println!("{:<14} {:>6}", entry.label, entry.count);
    }

    println!("\n{:<24} {:>6}", "COMPANY", "JOBS");
    println!("{}", "-".repeat(31));
    for entry in &report.jobs_by_company {
        println!("{:<24} {:>6}", entry.label, entry.count);
    }

    println!("\n{:<19} {:>6} {:>8}", "SEARCH", "JOBS", "ACTIVE");
    println!("{}", "-".repeat(35));
    if report.search_performance.is_empty() {
        println!("(no searches configured)");
    }
    for entry in &report.search_performance {
        println!(
            "{:<19} {:>6} {:>8}",
            entry.label,
            entry.match_count,
            if entry.active { "yes" } else { "no" }
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api_url = url;
    }

    match cli.command {
        Commands::Stats { range, now, json } => {
            let range = match range {
                Some(token) => token.parse::<WindowRange>()?,
                None => config.range(),
            };
            let now = parse_now(now.as_deref())?;
            let locale = config.chrono_locale();

            let source = source::open_source(&config, cli.jobs_file, cli.searches_file)?;
            let jobs = source.fetch_jobs()?;
            let searches = source.fetch_searches()?;
            info!(jobs = jobs.len(), searches = searches.len(), %range, "building report");

            let report = build_report(&jobs, &searches, range, now, locale);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report, &source.describe());
            }
        }

        Commands::Jobs {
            status,
            search,
            company,
            location,
            limit,
        } => {
            let filter = JobFilter {
                status: parse_status_filter(status.as_deref())?,
                search,
                company,
                location,
            };

            let source = source::open_source(&config, cli.jobs_file, cli.searches_file)?;
            let jobs = source.fetch_jobs()?;
            let matching = filter.apply(&jobs);

            if matching.is_empty() {
                println!("No jobs found.");
            } else {
                println!("{:<6} {:<12} {:<30} {:<20} {:<16}", "ID", "STATUS", "TITLE", "COMPANY", "LOCATION");
                println!("{}", "-".repeat(88));
                for job in matching.iter().take(limit) {
                    println!(
                        "{:<6} {:<12} {:<30} {:<20} {:<16}",
                        job.id.to_string(),
                        job.status.label(),
                        truncate_label(&job.title, 27),
                        truncate_label(job.company.as_deref().unwrap_or("-"), 17),
                        truncate_label(job.location.as_deref().unwrap_or("-"), 13)
                    );
                }
                println!(
                    "\n{} job{} found",
                    matching.len(),
                    if matching.len() > 1 { "s" } else { "" }
                );
            }
        }

        Commands::Searches { active } => {
            let source = source::open_source(&config, cli.jobs_file, cli.searches_file)?;
            let searches: Vec<SearchRecord> = source
                .fetch_searches()?
                .into_iter()
                .filter(|s| !active || s.is_active)
                .collect();

            if searches.is_empty() {
                println!("No searches found.");
            } else {
                println!(
                    "{:<6} {:<22} {:<26} {:<18} {:>8} {:>6} {:>6}",
                    "ID", "KEYWORDS", "PLATFORMS", "TYPES", "DURATION", "ACTIVE", "JOBS"
                );
                println!("{}", "-".repeat(100));
                for search in &searches {
                    println!("{}", search_row(search));
                }
                println!(
                    "\n{} search{} ({} active)",
                    searches.len(),
                    if searches.len() > 1 { "es" } else { "" },
                    searches.iter().filter(|s| s.is_active).count()
                );
            }
        }

        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            if let Some(path) = Config::default_path() {
                println!("\nDefault config file: {}", path.display());
            }
        }
    }

    Ok(())
}
