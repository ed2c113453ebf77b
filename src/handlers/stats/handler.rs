//! Statistics handler implementations

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::AppResult,
    handlers::{extract::ApiQuery, require_admin},
    middleware::AuthenticatedUser,
    services::StatsService,
    state::AppState,
};

use super::{
    request::TrendsQuery,
    response::{DashboardStatsResponse, TrendsResponse},
};

/// Dashboard counters
pub async fn get_dashboard_stats(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
) -> AppResult<Json<DashboardStatsResponse>> {
    require_admin(&auth_user)?;

    let stats = StatsService::get_dashboard(
        state.db(),
        state.redis(),
        state.moderation(),
        &auth_user.id,
    )
    .await?;

    Ok(Json(stats))
}

/// Activity trends
pub async fn get_trends(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ApiQuery(query): ApiQuery<TrendsQuery>,
) -> AppResult<Json<TrendsResponse>> {
    require_admin(&auth_user)?;
    query.validate()?;

    let trends = StatsService::get_trends(state.db(), query.days()).await?;

    Ok(Json(trends))
}
