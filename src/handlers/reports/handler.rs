//! Report handling handler implementations

use axum::{extract::State, Json};
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::{
        extract::{ApiJson, ApiPath, ApiQuery},
        require_admin,
    },
    middleware::{AuthenticatedUser, ClientIp},
    models::UserReport,
    services::{Actor, ReportService, StatsService},
    state::AppState,
};

use super::{
    request::{HandleReportRequest, ListReportsQuery},
    response::{HandleReportResponse, ReportDetailResponse, ReportListResponse},
};

/// List user reports with filters
pub async fn list_reports(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ApiQuery(query): ApiQuery<ListReportsQuery>,
) -> AppResult<Json<ReportListResponse>> {
    require_admin(&auth_user)?;

    let filter = query.to_filter()?;
    let pagination = query.pagination();

    let (reports, total) = ReportService::list_reports(
        state.db(),
        &filter,
        query.sort_by.unwrap_or_default(),
        query.sort_order.unwrap_or_default(),
        pagination,
    )
    .await?;

    Ok(Json(ReportListResponse {
        reports,
        total,
        page: pagination.page,
        per_page: pagination.per_page,
    }))
}

/// Get report details
pub async fn get_report(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ReportDetailResponse>> {
    require_admin(&auth_user)?;

    let detail = ReportService::get_report_detail(state.db(), &id).await?;

    Ok(Json(detail))
}

/// Start investigating a report
pub async fn investigate_report(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ClientIp(ip): ClientIp,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<UserReport>> {
    require_admin(&auth_user)?;

    let actor = Actor::new(auth_user.id, ip);
    let report = ReportService::start_investigation(state.db(), &actor, &id).await?;
    StatsService::invalidate(state.redis()).await;

    Ok(Json(report))
}

/// Resolve or dismiss a report
pub async fn handle_report(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ClientIp(ip): ClientIp,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<HandleReportRequest>,
) -> AppResult<Json<HandleReportResponse>> {
    require_admin(&auth_user)?;
    payload.validate()?;

    let actor = Actor::new(auth_user.id, ip);
    let outcome = ReportService::handle_report(state.db(), &actor, &id, &payload).await?;
    StatsService::invalidate(state.redis()).await;

    Ok(Json(outcome))
}
