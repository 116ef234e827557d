use sqlx::PgPool;

pub(crate) async fn run_sample(pool: &PgPool, n: i64) -> anyhow::Result<()> {
    if n <= 0 {
        anyhow::bail!("--n must be positive, got {n}");
    }

    let total = globenews_db::count_articles(pool).await?;
    let articles = globenews_db::sample_articles(pool, n).await?;
    if articles.is_empty() {
        println!("no articles stored yet");
        return Ok(());
    }

    println!("{} of {total} stored article(s)", articles.len());
    println!("{:<10}{:<11}{:<50}SOURCE", "LAT", "LONG", "SLUG");
    for article in &articles {
        println!(
            "{:<10.3}{:<11.3}{:<50}{}",
            article.latlong.lat, article.latlong.long, article.slug, article.article.source.name
        );
    }
    Ok(())
}

pub(crate) async fn run_migrate(pool: &PgPool) -> anyhow::Result<()> {
    let applied = globenews_db::run_migrations(pool).await?;
    println!("applied {applied} migration(s)");
    Ok(())
}
