//! Schedule store backed by the SQLite `week` table.

use async_trait::async_trait;
use sea_query::{Expr, ExprTrait, OnConflict, Order, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};
use weekmenu_db::table::Week;
use weekmenu_navigation::{ScheduleStore, WeekId};
use weekmenu_week::WeekStart;

#[derive(Debug, Clone, FromRow)]
pub struct WeekRow {
    pub id: WeekId,
    pub start_date: String,
}

#[derive(Clone)]
pub struct SqliteScheduleStore {
    pool: SqlitePool,
}

impl SqliteScheduleStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a week unless one already starts on `start`, returning its id either way.
    pub async fn add_week(&self, start: WeekStart) -> anyhow::Result<WeekId> {
        let statement = Query::insert()
            .into_table(Week::Table)
            .columns([Week::StartDate])
            .values([start.to_string().into()])?
            .on_conflict(OnConflict::column(Week::StartDate).do_nothing().to_owned())
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        self.find_week_id(start)
            .await?
            .ok_or_else(|| anyhow::anyhow!("week {start} missing after insert"))
    }

    pub async fn list_weeks(&self) -> anyhow::Result<Vec<WeekRow>> {
        let statement = Query::select()
            .columns([Week::Id, Week::StartDate])
            .from(Week::Table)
            .order_by(Week::StartDate, Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        Ok(sqlx::query_as_with::<_, WeekRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?)
    }
}

#[async_trait]
impl ScheduleStore for SqliteScheduleStore {
    async fn find_week_id(&self, start: WeekStart) -> anyhow::Result<Option<WeekId>> {
        let statement = Query::select()
            .column(Week::Id)
            .from(Week::Table)
            .and_where(Expr::col(Week::StartDate).eq(start.to_string()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);

        let id = sqlx::query_scalar_with::<_, WeekId, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(id)
    }
}
