use sqlx_migrator::{Info, Migrate, Migrator, Plan, vec_box};

mod m0001;
pub mod table;

pub fn migrator() -> Result<Migrator<sqlx::Sqlite>, sqlx_migrator::Error> {
    let mut migrator = Migrator::default();
    migrator.add_migrations(vec_box![m0001::Migration])?;

    Ok(migrator)
}

/// Applies every pending migration.
pub async fn migrate(pool: &sqlx::SqlitePool) -> anyhow::Result<()> {
    let migrator = migrator()?;
    let mut conn = pool.acquire().await?;
    migrator.run(&mut *conn, &Plan::apply_all()).await?;

    Ok(())
}
