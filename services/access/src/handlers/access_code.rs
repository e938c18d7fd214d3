use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{AccessCode, ListOptions, ListedAccessCode, VerificationResult};
use crate::error::AccessServiceError;
use crate::operator::{AdminOperator, SecurityOperator};
use crate::state::AppState;
use crate::usecase::access_code::{
    IssueAccessCodeInput, IssueAccessCodeUseCase, ListAccessCodesUseCase, VerifyAccessCodeUseCase,
};
use crate::usecase::generator::RandomDigits;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct AccessCodeResponse {
    pub code: String,
    pub visitor_name: String,
    pub visit_host: String,
    pub location: String,
    pub issued_by: String,
    #[serde(serialize_with = "securevisit_core::serde::to_hh_mm")]
    pub valid_from: NaiveTime,
    #[serde(serialize_with = "securevisit_core::serde::to_hh_mm")]
    pub valid_until: NaiveTime,
    #[serde(serialize_with = "securevisit_core::serde::to_local_seconds")]
    pub issued_at: NaiveDateTime,
    pub used: bool,
}

impl From<AccessCode> for AccessCodeResponse {
    fn from(record: AccessCode) -> Self {
        Self {
            valid_from: record.window.valid_from(),
            valid_until: record.window.valid_until(),
            code: record.code,
            visitor_name: record.visitor_name,
            visit_host: record.visit_host,
            location: record.location,
            issued_by: record.issued_by,
            issued_at: record.issued_at,
            used: record.used,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VerifyAccessCodeResponse {
    Approved {
        was_already_used: bool,
        access_code: AccessCodeResponse,
    },
    Expired,
    NotFound,
}

impl From<VerificationResult> for VerifyAccessCodeResponse {
    fn from(result: VerificationResult) -> Self {
        match result {
            VerificationResult::Approved {
                record,
                was_already_used,
            } => Self::Approved {
                was_already_used,
                access_code: record.into(),
            },
            VerificationResult::Expired => Self::Expired,
            VerificationResult::NotFound => Self::NotFound,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListedAccessCodeResponse {
    #[serde(flatten)]
    pub access_code: AccessCodeResponse,
    pub is_active: bool,
}

impl From<ListedAccessCode> for ListedAccessCodeResponse {
    fn from(row: ListedAccessCode) -> Self {
        Self {
            access_code: row.record.into(),
            is_active: row.is_active,
        }
    }
}

// ── POST /access-codes ───────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct IssueAccessCodeRequest {
    pub visitor_name: String,
    pub visit_host: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(deserialize_with = "securevisit_core::serde::time_of_day")]
    pub valid_from: NaiveTime,
    #[serde(deserialize_with = "securevisit_core::serde::time_of_day")]
    pub valid_until: NaiveTime,
}

pub async fn issue_access_code(
    AdminOperator(operator): AdminOperator,
    State(state): State<AppState>,
    Json(body): Json<IssueAccessCodeRequest>,
) -> Result<(StatusCode, Json<AccessCodeResponse>), AccessServiceError> {
    let location = body
        .location
        .filter(|l| !l.trim().is_empty())
        .or_else(|| state.default_location.clone())
        .unwrap_or_default();

    let usecase = IssueAccessCodeUseCase {
        access_codes: state.access_code_repo(),
        clock: state.clock(),
        source: RandomDigits,
    };
    let record = usecase
        .execute(IssueAccessCodeInput {
            visitor_name: body.visitor_name,
            visit_host: body.visit_host,
            location,
            issued_by: operator.display_name,
            valid_from: body.valid_from,
            valid_until: body.valid_until,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(record.into())))
}

// ── POST /access-codes/verify ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct VerifyAccessCodeRequest {
    pub code: String,
}

pub async fn verify_access_code(
    SecurityOperator(_operator): SecurityOperator,
    State(state): State<AppState>,
    Json(body): Json<VerifyAccessCodeRequest>,
) -> Result<Json<VerifyAccessCodeResponse>, AccessServiceError> {
    if body.code.trim().is_empty() {
        return Err(AccessServiceError::EmptyField("code"));
    }
    let usecase = VerifyAccessCodeUseCase {
        access_codes: state.access_code_repo(),
        clock: state.clock(),
    };
    let result = usecase.execute(&body.code).await?;
    Ok(Json(result.into()))
}

// ── GET /access-codes ────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ListAccessCodesQuery {
    pub include_expired: Option<bool>,
    pub days_to_keep: Option<u32>,
    pub date: Option<NaiveDate>,
}

impl From<ListAccessCodesQuery> for ListOptions {
    fn from(query: ListAccessCodesQuery) -> Self {
        let defaults = ListOptions::default();
        Self {
            include_expired: query.include_expired.unwrap_or(defaults.include_expired),
            days_to_keep: query.days_to_keep.unwrap_or(defaults.days_to_keep),
            filter_date: query.date,
        }
    }
}

pub async fn list_access_codes(
    AdminOperator(_operator): AdminOperator,
    State(state): State<AppState>,
    Query(query): Query<ListAccessCodesQuery>,
) -> Result<Json<Vec<ListedAccessCodeResponse>>, AccessServiceError> {
    let usecase = ListAccessCodesUseCase {
        access_codes: state.access_code_repo(),
        clock: state.clock(),
    };
    let rows = usecase.execute(query.into()).await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}
