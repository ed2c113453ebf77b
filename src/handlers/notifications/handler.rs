//! Notification handler implementations

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    handlers::{
        extract::{ApiPath, ApiQuery},
        require_admin,
    },
    middleware::AuthenticatedUser,
    services::NotificationService,
    state::AppState,
};

use super::{
    request::ListNotificationsQuery,
    response::{MarkAllReadResponse, NotificationListResponse},
};

/// List notifications for the current admin
pub async fn list_notifications(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ApiQuery(query): ApiQuery<ListNotificationsQuery>,
) -> AppResult<Json<NotificationListResponse>> {
    require_admin(&auth_user)?;

    let pagination = query.pagination();
    let (notifications, total, unread) =
        NotificationService::list(state.db(), &auth_user.id, query.unread_only, pagination)
            .await?;

    Ok(Json(NotificationListResponse {
        notifications,
        total,
        unread,
        page: pagination.page,
        per_page: pagination.per_page,
    }))
}

/// Mark one notification read
pub async fn mark_read(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<StatusCode> {
    require_admin(&auth_user)?;

    NotificationService::mark_read(state.db(), &id, &auth_user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Mark all notifications read
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<MarkAllReadResponse>> {
    require_admin(&auth_user)?;

    let updated = NotificationService::mark_all_read(state.db(), &auth_user.id).await?;

    Ok(Json(MarkAllReadResponse { updated }))
}
