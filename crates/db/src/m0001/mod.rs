mod week;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "weekmenu",
    "m0001",
    vec_box![],
    vec_box![week::CreateTable, week::CreateUk1]
);
