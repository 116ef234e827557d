mod extract;
mod store;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "globenews-cli")]
#[command(about = "Globe news operator commands")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run one extraction pass against randomly sampled news sources
    Extract,
    /// Enrich and store the results of a news search
    Ingest {
        /// Search phrase passed to the news source
        #[arg(long)]
        query: String,
        /// Only include articles published on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,
        /// List what the search returned without enriching or storing anything
        #[arg(long)]
        dry_run: bool,
    },
    /// Print a random sample of stored articles
    Sample {
        /// Number of articles to print
        #[arg(long, short, default_value = "5")]
        n: i64,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("globenews-cli: pass --help to list commands");
        return Ok(());
    };

    let config = globenews_core::load_app_config()?;
    globenews_core::logging::init(&config)?;

    let pool_config = globenews_db::PoolConfig::from_app_config(&config);
    let pool = globenews_db::connect_pool(&config.database_url, pool_config).await?;

    match command {
        Commands::Extract => extract::run_extract(&config, pool).await?,
        Commands::Ingest {
            query,
            from,
            dry_run,
        } => extract::run_ingest(&config, pool, &query, from, dry_run).await?,
        Commands::Sample { n } => store::run_sample(&pool, n).await?,
        Commands::Migrate => store::run_migrate(&pool).await?,
    }

    Ok(())
}
