//! Article moderation handler implementations

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
    models::Article,
    services::{Actor, ArticleService, StatsService},
    state::AppState,
};

use super::{
    request::{
        ApproveArticleRequest, BulkModerationRequest, FeatureArticleRequest, ListArticlesQuery,
        RejectArticleRequest,
    },
    response::{ArticleDetailResponse, ArticleListResponse, BulkModerationResponse},
};

/// List articles with filters
pub async fn list_articles(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ApiQuery(query): ApiQuery<ListArticlesQuery>,
) -> AppResult<Json<ArticleListResponse>> {
    require_admin(&auth_user)?;

    let filter = query.to_filter(state.moderation().ai_flag_threshold)?;
    let pagination = query.pagination();

    let (articles, total) = ArticleService::list_articles(
        state.db(),
        &filter,
        query.sort_by.unwrap_or_default(),
        query.sort_order.unwrap_or_default(),
        pagination,
    )
    .await?;

    Ok(Json(ArticleListResponse {
        articles,
        total,
        page: pagination.page,
        per_page: pagination.per_page,
    }))
}

/// Get article details
pub async fn get_article(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ApiPath(id): ApiPath<Uuid>,
) -> AppResult<Json<ArticleDetailResponse>> {
    require_admin(&auth_user)?;

    let detail = ArticleService::get_article_detail(
        state.db(),
        &id,
        state.moderation().ai_flag_threshold,
    )
    .await?;

    Ok(Json(detail))
}

/// Approve an article
pub async fn approve_article(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ClientIp(ip): ClientIp,
    ApiPath(id): ApiPath<Uuid>,
    payload: Option<ApiJson<ApproveArticleRequest>>,
) -> AppResult<Json<Article>> {
    require_admin(&auth_user)?;
    let payload = payload.map(|ApiJson(p)| p).unwrap_or_default();
    payload.validate()?;

    let actor = Actor::new(auth_user.id, ip);
    let article =
        ArticleService::approve_article(state.db(), &actor, &id, payload.note.as_deref()).await?;
    StatsService::invalidate(state.redis()).await;

    Ok(Json(article))
}

/// Reject an article
pub async fn reject_article(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ClientIp(ip): ClientIp,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<RejectArticleRequest>,
) -> AppResult<Json<Article>> {
    require_admin(&auth_user)?;
    payload.validate()?;

    let actor = Actor::new(auth_user.id, ip);
    let article = ArticleService::reject_article(state.db(), &actor, &id, &payload.reason).await?;
    StatsService::invalidate(state.redis()).await;

    Ok(Json(article))
}

/// Feature or un-feature an article
pub async fn feature_article(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ClientIp(ip): ClientIp,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(payload): ApiJson<FeatureArticleRequest>,
) -> AppResult<Json<Article>> {
    require_admin(&auth_user)?;
    payload.validate()?;

    let actor = Actor::new(auth_user.id, ip);
    let article = ArticleService::set_featured(
        state.db(),
        &actor,
        &id,
        &payload,
        state.moderation(),
    )
    .await?;
    StatsService::invalidate(state.redis()).await;

    Ok(Json(article))
}

/// Approve or reject several articles at once
pub async fn bulk_moderate(
    State(state): State<AppState>,
    auth_user: AuthenticatedUser,
    ClientIp(ip): ClientIp,
    ApiJson(payload): ApiJson<BulkModerationRequest>,
) -> AppResult<Json<BulkModerationResponse>> {
    require_admin(&auth_user)?;
    payload.validate()?;

    let actor = Actor::new(auth_user.id, ip);
    let result = ArticleService::bulk_moderate(
        state.db(),
        &actor,
        &payload,
        state.moderation().max_bulk_ids,
    )
    .await?;
    StatsService::invalidate(state.redis()).await;

    Ok(Json(result))
}
