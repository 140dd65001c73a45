mod report;

use clap::Parser;
use praisecheck_core::AppConfig;
use praisecheck_scraper::HttpFetcher;
use tracing_subscriber::EnvFilter;

use crate::report::{write_report, ReportFormat};

#[derive(Debug, Parser)]
#[command(name = "praisecheck")]
#[command(about = "Rank dealership reviews by how overly positive they read")]
struct Cli {
    /// Number of review pages to scan, starting at page 0
    #[arg(long)]
    pages: Option<u32>,

    /// How many top reviews to report
    #[arg(long)]
    rank_size: Option<usize>,

    /// Review page URL prefix; the page index is appended
    #[arg(long)]
    page_url_template: Option<String>,

    /// URL of the positive-word lexicon
    #[arg(long)]
    lexicon_url: Option<String>,

    /// Maximum page requests in flight at once
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
    concurrency: Option<u16>,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    format: ReportFormat,
}

impl Cli {
    /// Overrides configuration values with any flags given on the command line.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(pages) = self.pages {
            config.page_count = pages;
        }
        if let Some(rank_size) = self.rank_size {
            config.rank_size = rank_size;
        }
        if let Some(template) = &self.page_url_template {
            config.page_url_template.clone_from(template);
        }
        if let Some(url) = &self.lexicon_url {
            config.lexicon_url.clone_from(url);
        }
        if let Some(concurrency) = self.concurrency {
            config.max_concurrent_fetches = usize::from(concurrency);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = praisecheck_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    cli.apply(&mut config);
    tracing::debug!(?config, "resolved configuration");

    let fetcher = HttpFetcher::new(config.request_timeout_secs, &config.user_agent)?;
    let ranked = match praisecheck_sentiment::run_review_ranking(&fetcher, &config).await {
        Ok(ranked) => ranked,
        Err(e) => {
            tracing::error!(error = %e, "review ranking failed");
            return Err(e.into());
        }
    };

    write_report(
        &mut std::io::stdout().lock(),
        &ranked,
        config.rank_size,
        cli.format,
    )?;

    Ok(())
}
