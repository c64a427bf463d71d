use weekmenu::Config;

pub async fn migrate(config: Config) -> anyhow::Result<()> {
    tracing::info!(url = %config.database.url, "Migrating database");

    let pool = weekmenu::create_pool(&config.database.url, 1).await?;
    weekmenu_db::migrate(&pool).await?;
    pool.close().await;

    tracing::info!("Migrations applied");

    Ok(())
}
