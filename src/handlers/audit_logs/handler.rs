//! Audit log handler implementations

use axum::{extract::State, Json};

use crate::{
    error::AppResult,
    handlers::{extract::ApiQuery, require_admin},
    middleware::AuthenticatedUser,
    services::AuditService,
    state::AppState,
};

use super::{request::ListAdminLogsQuery, response::AdminLogListResponse};

/// List audit entries
pub async fn list_logs(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ApiQuery(query): ApiQuery<ListAdminLogsQuery>,
) -> AppResult<Json<AdminLogListResponse>> {
    require_admin(&auth_user)?;

    let filter = query.to_filter()?;
    let pagination = query.pagination();

    let (logs, total) = AuditService::list(state.db(), &filter, pagination).await?;

    Ok(Json(AdminLogListResponse {
        logs,
        total,
        page: pagination.page,
        per_page: pagination.per_page,
    }))
}
