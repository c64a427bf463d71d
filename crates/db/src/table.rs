use sea_query::Iden;

#[derive(Iden, Clone)]
#[iden = "weeks"]
pub enum Week {
    Table,
    Id,
    StartDate,
}
