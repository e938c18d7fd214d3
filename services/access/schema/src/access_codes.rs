use sea_orm::entity::prelude::*;

/// Numeric visitor access code, valid for a time-of-day window on the day it
/// was generated. Rows older than 30 days are purged at service start.
///
/// Column names match the table created by earlier deployments.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "access_codes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub code: String,
    #[sea_orm(column_type = "Text")]
    pub visitor_name: String,
    #[sea_orm(column_type = "Text")]
    pub visit_host: String,
    pub start_time: chrono::NaiveTime,
    pub end_time: chrono::NaiveTime,
    #[sea_orm(column_type = "Text")]
    pub location: String,
    #[sea_orm(column_type = "Text")]
    pub generated_by: String,
    pub generation_timestamp: chrono::NaiveDateTime,
    pub used: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
