use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use dora_metrics::aggregator::{DoraAggregator, MetricsRequest};
use dora_metrics::config::AppConfig;
use dora_metrics::metrics::{developer_monthly_stats, summarize_pull_requests};
use dora_metrics::period::ReportPeriod;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "dora-metrics")]
#[command(about = "Deployment frequency and lead time metrics from GitHub activity")]
struct Cli {
    /// Path to a TOML config file (defaults to ./dora-metrics.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute deployment frequency and lead time
    Metrics(RangeArgs),
    /// List merged pull requests with volume stats
    PullRequests {
        #[command(flatten)]
        range: RangeArgs,

        /// Restrict the per-developer breakdown to one author
        #[arg(long)]
        developer: Option<String>,
    },
    /// List repositories of an organization or user
    Repos {
        #[arg(long)]
        account: String,
    },
}

#[derive(Args)]
struct RangeArgs {
    /// Organization or user owning the repositories
    #[arg(long)]
    org: String,

    /// Repository name (repeatable)
    #[arg(long = "repo", required = true)]
    repos: Vec<String>,

    /// Start date, YYYY-MM-DD
    #[arg(long, requires = "to", conflicts_with = "period")]
    from: Option<String>,

    /// End date (inclusive), YYYY-MM-DD
    #[arg(long, requires = "from", conflicts_with = "period")]
    to: Option<String>,

    /// Predefined reporting window ending before today
    #[arg(long, value_enum)]
    period: Option<PeriodArg>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PeriodArg {
    LastWeek,
    LastMonth,
}

impl RangeArgs {
    fn into_request(self) -> Result<MetricsRequest, Box<dyn std::error::Error>> {
        let (from_date, to_date) = match (self.from, self.to, self.period) {
            (Some(from), Some(to), _) => (from, to),
            (_, _, Some(period)) => {
                let period = match period {
                    PeriodArg::LastWeek => ReportPeriod::LastWeek,
                    PeriodArg::LastMonth => ReportPeriod::LastMonth,
                };
                let range = period.range_before(Utc::now().date_naive());
                (range.from.to_string(), range.to.to_string())
            }
            _ => return Err("either --from/--to or --period is required".into()),
        };

        Ok(MetricsRequest {
            org: self.org,
            repos: self.repos,
            from_date,
            to_date,
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dora_metrics=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref())?;
    info!("Configuration loaded");

    let aggregator = DoraAggregator::from_config(&config)?;

    let output = match cli.command {
        Commands::Metrics(args) => {
            let request = args.into_request()?;
            let metrics = aggregator.compute(&request).await?;
            serde_json::to_value(metrics)?
        }
        Commands::PullRequests { range, developer } => {
            let request = range.into_request()?;
            let prs = aggregator.fetch_merged_prs(&request).await?;
            let stats = summarize_pull_requests(&prs);
            let by_developer = developer_monthly_stats(&prs, developer.as_deref());
            serde_json::json!({
                "total_prs": prs.len(),
                "stats": stats,
                "by_developer": by_developer,
                "prs": prs,
            })
        }
        Commands::Repos { account } => {
            let repos = aggregator.fetcher().list_repositories(&account).await?;
            serde_json::to_value(repos)?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
