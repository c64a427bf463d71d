use clap::Subcommand;
use weekmenu::{Config, schedule::SqliteScheduleStore};
use weekmenu_week::IsoWeek;

#[derive(Subcommand)]
pub enum WeekCommand {
    /// Add the week starting on the Monday of an ISO week
    Add {
        /// ISO week-year
        year: String,
        /// ISO week number (1-53)
        week: String,
    },
    /// List known weeks
    List,
}

pub async fn run(config: Config, command: WeekCommand) -> anyhow::Result<()> {
    let pool = weekmenu::create_pool(&config.database.url, 1).await?;
    let store = SqliteScheduleStore::new(pool.clone());

    match command {
        WeekCommand::Add { year, week } => {
            let key = IsoWeek::parse(&year, &week)?;
            let start = key.start();
            let id = store.add_week(start).await?;

            tracing::info!(week = %key, start_date = %start, id, "Week added");
            println!("{id}\t{start}\t{key}");
        }
        WeekCommand::List => {
            for row in store.list_weeks().await? {
                println!("{}\t{}", row.id, row.start_date);
            }
        }
    }

    pool.close().await;

    Ok(())
}
