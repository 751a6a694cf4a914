//! Request handlers.
//!
//! Handlers extract the transport pieces (path, bearer credential, signature header, body) and
//! hand them to the core services; every decision about validity is made there.

use crate::error::ApiResult;
use crate::AppState;
use api_shared::auth::{bearer_token, SIGNATURE_HEADER};
use api_shared::{
    DeletedRes, ErrorRes, HealthRes, HealthService, PostListRes, PostReq, PostRes, TagCreatedRes,
    TagListRes, TagRemovedRes, TagReq, VerifyReq, VerifyRes, WebhookRes,
};
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::Json,
};

fn credential(headers: &HeaderMap) -> Option<&str> {
    bearer_token(
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok()),
    )
}

fn signature(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for monitoring and load balancers.
#[axum::debug_handler]
pub async fn health() -> Json<HealthRes> {
    Json(HealthService::check_health())
}

// ============================================================================
// PUBLIC READS
// ============================================================================

#[utoipa::path(
    get,
    path = "/posts",
    responses(
        (status = 200, description = "Published posts, newest first", body = PostListRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_published_posts(State(state): State<AppState>) -> ApiResult<Json<PostListRes>> {
    Ok(Json(state.admin.list_published()?.into()))
}

#[utoipa::path(
    get,
    path = "/posts/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Published post", body = PostRes),
        (status = 404, description = "No such published post", body = ErrorRes),
        (status = 500, description = "Internal server error", body = ErrorRes)
    )
)]
/// Fetch one published post. Drafts are reported as missing.
#[axum::debug_handler]
pub async fn get_published_post(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<PostRes>> {
    Ok(Json(state.admin.get_published(&slug)?.into()))
}

// ============================================================================
// ADMIN
// ============================================================================

#[utoipa::path(
    post,
    path = "/admin/verify",
    request_body(content = VerifyReq, description = "Optional; the bearer header is used without it"),
    responses(
        (status = 200, description = "Credential accepted", body = VerifyRes),
        (status = 401, description = "Missing or invalid credential", body = ErrorRes)
    )
)]
/// Check a credential without side effects.
///
/// The token may come in the body (`{"token": ...}`) or as a bearer header.
#[axum::debug_handler]
pub async fn verify(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Option<Json<VerifyReq>>,
) -> ApiResult<Json<VerifyRes>> {
    let body_token = payload.and_then(|Json(req)| req.token);
    let credential = body_token.as_deref().or_else(|| credential(&headers));
    state.admin.verify(credential)?;
    Ok(Json(VerifyRes { valid: true }))
}

#[utoipa::path(
    get,
    path = "/admin/posts",
    responses(
        (status = 200, description = "All posts including drafts", body = PostListRes),
        (status = 401, description = "Missing or invalid credential", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_posts(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<PostListRes>> {
    Ok(Json(state.admin.list_all(credential(&headers))?.into()))
}

#[utoipa::path(
    get,
    path = "/admin/posts/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post, draft or not", body = PostRes),
        (status = 401, description = "Missing or invalid credential", body = ErrorRes),
        (status = 404, description = "No such post", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn get_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> ApiResult<Json<PostRes>> {
    Ok(Json(state.admin.get(credential(&headers), &slug)?.into()))
}

#[utoipa::path(
    post,
    path = "/admin/posts",
    request_body = PostReq,
    responses(
        (status = 201, description = "Post created", body = PostRes),
        (status = 400, description = "Invalid request", body = ErrorRes),
        (status = 401, description = "Missing or invalid credential", body = ErrorRes),
        (status = 409, description = "Slug already taken", body = ErrorRes)
    )
)]
/// Create a post.
///
/// The credential is checked before the body is decoded, so an unauthorised caller learns
/// nothing about payload validity.
#[axum::debug_handler]
pub async fn create_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<PostReq>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PostRes>)> {
    let credential = credential(&headers);
    state.admin.verify(credential)?;

    let Json(req) = payload?;
    let document = state.admin.create(credential, req.into_draft(None)?)?;
    Ok((StatusCode::CREATED, Json(document.into())))
}

#[utoipa::path(
    put,
    path = "/admin/posts/{slug}",
    params(("slug" = String, Path, description = "Current post slug")),
    request_body = PostReq,
    responses(
        (status = 200, description = "Post replaced, possibly under a new slug", body = PostRes),
        (status = 400, description = "Invalid request", body = ErrorRes),
        (status = 401, description = "Missing or invalid credential", body = ErrorRes),
        (status = 404, description = "No such post", body = ErrorRes),
        (status = 409, description = "New slug already taken", body = ErrorRes)
    )
)]
/// Replace a post. A `slug` in the body that differs from the path renames the post.
#[axum::debug_handler]
pub async fn update_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
    payload: Result<Json<PostReq>, JsonRejection>,
) -> ApiResult<Json<PostRes>> {
    let credential = credential(&headers);
    state.admin.verify(credential)?;

    let Json(req) = payload?;
    let draft = req.into_draft(Some(&slug))?;
    Ok(Json(state.admin.update(credential, &slug, draft)?.into()))
}

#[utoipa::path(
    delete,
    path = "/admin/posts/{slug}",
    params(("slug" = String, Path, description = "Post slug")),
    responses(
        (status = 200, description = "Post deleted", body = DeletedRes),
        (status = 401, description = "Missing or invalid credential", body = ErrorRes),
        (status = 404, description = "No such post", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(slug): Path<String>,
) -> ApiResult<Json<DeletedRes>> {
    state.admin.delete(credential(&headers), &slug)?;
    Ok(Json(DeletedRes {
        success: true,
        message: format!("Post {slug} deleted"),
        slug,
    }))
}

#[utoipa::path(
    get,
    path = "/admin/tags",
    responses(
        (status = 200, description = "Tags in use with post counts", body = TagListRes),
        (status = 401, description = "Missing or invalid credential", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn list_tags(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> ApiResult<Json<TagListRes>> {
    let tags = state.admin.list_tags(credential(&headers))?;
    Ok(Json(TagListRes {
        tags: tags.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(
    post,
    path = "/admin/tags",
    request_body = TagReq,
    responses(
        (status = 200, description = "Tag name is free", body = TagCreatedRes),
        (status = 400, description = "Blank tag name", body = ErrorRes),
        (status = 401, description = "Missing or invalid credential", body = ErrorRes),
        (status = 409, description = "Tag already in use", body = ErrorRes)
    )
)]
/// Check a new tag name.
///
/// Tags are derived from posts, so nothing is stored: the tag appears once a post uses it.
#[axum::debug_handler]
pub async fn create_tag(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<TagReq>, JsonRejection>,
) -> ApiResult<Json<TagCreatedRes>> {
    let credential = credential(&headers);
    state.admin.verify(credential)?;

    let Json(req) = payload?;
    let name = state.admin.check_new_tag(credential, &req.name)?;
    Ok(Json(TagCreatedRes {
        message: format!("Tag {name} will be available once a post uses it"),
        name: name.into_string(),
    }))
}

#[utoipa::path(
    delete,
    path = "/admin/tags/{tag}",
    params(("tag" = String, Path, description = "Tag name")),
    responses(
        (status = 200, description = "Tag stripped from every post", body = TagRemovedRes),
        (status = 401, description = "Missing or invalid credential", body = ErrorRes),
        (status = 404, description = "No post carries the tag", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn delete_tag(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(tag): Path<String>,
) -> ApiResult<Json<TagRemovedRes>> {
    let updated = state.admin.remove_tag(credential(&headers), &tag)?;
    Ok(Json(TagRemovedRes {
        message: format!("Tag {tag} removed from {updated} post(s)"),
        name: tag,
        updated,
    }))
}

// ============================================================================
// WEBHOOK
// ============================================================================

#[utoipa::path(
    post,
    path = "/webhook/posts",
    request_body(content = String, description = "Signed JSON post payload", content_type = "application/json"),
    params(("x-webhook-signature" = String, Header, description = "sha256=<hex HMAC of the raw body>")),
    responses(
        (status = 201, description = "Post published", body = WebhookRes),
        (status = 400, description = "Malformed payload", body = ErrorRes),
        (status = 401, description = "Invalid signature", body = ErrorRes),
        (status = 409, description = "Slug already taken", body = ErrorRes)
    )
)]
/// Publish a post pushed by an automated publisher.
///
/// The body is taken as raw bytes: the signature covers exactly what was sent.
#[axum::debug_handler]
pub async fn webhook_publish(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<WebhookRes>)> {
    let receipt = state.webhooks.publish(&body, signature(&headers))?;
    Ok((StatusCode::CREATED, Json(receipt.into())))
}

#[utoipa::path(
    put,
    path = "/webhook/posts",
    request_body(content = String, description = "Signed JSON post payload naming an existing slug", content_type = "application/json"),
    params(("x-webhook-signature" = String, Header, description = "sha256=<hex HMAC of the raw body>")),
    responses(
        (status = 200, description = "Post replaced", body = WebhookRes),
        (status = 400, description = "Malformed payload", body = ErrorRes),
        (status = 401, description = "Invalid signature", body = ErrorRes),
        (status = 404, description = "No such post", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn webhook_replace(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<WebhookRes>> {
    Ok(Json(state.webhooks.replace(&body, signature(&headers))?.into()))
}

#[utoipa::path(
    delete,
    path = "/webhook/posts",
    request_body(content = String, description = "Signed JSON payload `{\"slug\": ...}`", content_type = "application/json"),
    params(("x-webhook-signature" = String, Header, description = "sha256=<hex HMAC of the raw body>")),
    responses(
        (status = 200, description = "Post retracted", body = WebhookRes),
        (status = 401, description = "Invalid signature", body = ErrorRes),
        (status = 404, description = "No such post", body = ErrorRes)
    )
)]
#[axum::debug_handler]
pub async fn webhook_retract(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<WebhookRes>> {
    Ok(Json(state.webhooks.retract(&body, signature(&headers))?.into()))
}

