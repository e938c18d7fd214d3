use anyhow::Context as _;
use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, SqlErr, sea_query::Expr,
};

use securevisit_access_schema::access_codes;
use securevisit_core::sea_ext::FilterByDay;

use crate::domain::repository::AccessCodeRepository;
use crate::domain::types::{AccessCode, CodeFilter, VisitWindow};
use crate::error::AccessServiceError;

// ── AccessCode repository ─────────────────────────────────────────────────────

/// sea-orm backed store. Each call checks a connection out of the pool and
/// returns it when the statement finishes, on success and error alike.
#[derive(Clone)]
pub struct DbAccessCodeRepository {
    pub db: DatabaseConnection,
}

impl AccessCodeRepository for DbAccessCodeRepository {
    async fn insert(&self, record: &AccessCode) -> Result<(), AccessServiceError> {
        let result = access_codes::ActiveModel {
            code: Set(record.code.clone()),
            visitor_name: Set(record.visitor_name.clone()),
            visit_host: Set(record.visit_host.clone()),
            start_time: Set(record.window.valid_from()),
            end_time: Set(record.window.valid_until()),
            location: Set(record.location.clone()),
            generated_by: Set(record.issued_by.clone()),
            generation_timestamp: Set(record.issued_at),
            used: Set(record.used),
        }
        .insert(&self.db)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(AccessServiceError::DuplicateKey)
            }
            Err(err) => Err(anyhow::Error::new(err).context("insert access code").into()),
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<AccessCode>, AccessServiceError> {
        let model = access_codes::Entity::find_by_id(code.to_owned())
            .one(&self.db)
            .await
            .context("find access code by code")?;
        Ok(model.map(access_code_from_model))
    }

    async fn list(&self, filter: &CodeFilter) -> Result<Vec<AccessCode>, AccessServiceError> {
        let mut query = access_codes::Entity::find();
        if let Some(min_issued_at) = filter.min_issued_at {
            query = query.filter(access_codes::Column::GenerationTimestamp.gte(min_issued_at));
        }
        if let Some(day) = filter.issued_on {
            query = query.filter_on_day(access_codes::Column::GenerationTimestamp, day);
        }
        let models = query
            .order_by_desc(access_codes::Column::GenerationTimestamp)
            .all(&self.db)
            .await
            .context("list access codes")?;
        Ok(models.into_iter().map(access_code_from_model).collect())
    }

    async fn mark_used(&self, code: &str) -> Result<(), AccessServiceError> {
        // update_many so a missing row is a no-op rather than RecordNotUpdated.
        access_codes::Entity::update_many()
            .col_expr(access_codes::Column::Used, Expr::value(true))
            .filter(access_codes::Column::Code.eq(code))
            .exec(&self.db)
            .await
            .context("mark access code used")?;
        Ok(())
    }

    async fn delete_issued_before(&self, cutoff: NaiveDateTime) -> Result<u64, AccessServiceError> {
        let result = access_codes::Entity::delete_many()
            .filter(access_codes::Column::GenerationTimestamp.lt(cutoff))
            .exec(&self.db)
            .await
            .context("delete access codes past retention")?;
        Ok(result.rows_affected)
    }
}

fn access_code_from_model(model: access_codes::Model) -> AccessCode {
    AccessCode {
        code: model.code,
        visitor_name: model.visitor_name,
        visit_host: model.visit_host,
        location: model.location,
        issued_by: model.generated_by,
        window: VisitWindow::from_stored(model.start_time, model.end_time),
        issued_at: model.generation_timestamp,
        used: model.used,
    }
}
