//! Commands that drive the enrichment pipeline by hand.

use chrono::NaiveDate;
use globenews_core::{slugify, AppConfig};
use globenews_newsapi::NewsApiClient;
use globenews_pipeline::{build_pipeline, RunReport};
use sqlx::PgPool;

pub(crate) async fn run_extract(config: &AppConfig, pool: PgPool) -> anyhow::Result<()> {
    let pipeline = build_pipeline(config, pool)?;
    let report = pipeline.run().await;
    print_report(&report);
    Ok(())
}

pub(crate) async fn run_ingest(
    config: &AppConfig,
    pool: PgPool,
    query: &str,
    from: Option<NaiveDate>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let Some(api_key) = config.news_api_key.as_deref() else {
        anyhow::bail!("NEWS_API_KEY must be set to search for articles");
    };
    let client = NewsApiClient::new(api_key, config.http_timeout_secs)?;
    let articles = client.search(query, from).await?;

    if dry_run {
        println!("{} article(s) matched '{query}' (dry run)", articles.len());
        for article in &articles {
            println!("  {:<60} {}", slugify(&article.title), article.source.name);
        }
        return Ok(());
    }

    let pipeline = build_pipeline(config, pool)?;
    let report = pipeline.process_articles(articles).await;
    print_report(&report);
    Ok(())
}

fn print_report(report: &RunReport) {
    println!("fetched         {}", report.fetched);
    println!("inserted        {}", report.inserted);
    println!("duplicates      {}", report.duplicates);
    println!("no place        {}", report.no_place);
    println!("geocode failed  {}", report.geocode_failed);
    println!("insert failed   {}", report.insert_failed);
    println!("lookup failed   {}", report.lookup_failed);
    println!("invalid title   {}", report.invalid_title);
}
