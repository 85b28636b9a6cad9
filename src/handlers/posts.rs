use axum::{
    extract::{Path, State},
    Extension, Json,
};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::handlers::params::require_title;
use crate::models::post::{CreatePostRequest, NewPost, Post, PostChanges};
use crate::store::{RecordKind, RecordStore};
use crate::AppState;

pub async fn list_posts<S: RecordStore>(
    State(state): State<AppState<S>>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<Post>>> {
    let posts = state.store.posts_for_owner(auth_user.id).await?;
    Ok(Json(posts))
}

pub async fn get_post<S: RecordStore>(
    State(state): State<AppState<S>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> AppResult<Json<Post>> {
    let post = state
        .store
        .posts_for_owner(auth_user.id)
        .await?
        .into_iter()
        .find(|p| p.id == post_id)
        .ok_or(AppError::NotFound("Post not found".into()))?;

    Ok(Json(post))
}

pub async fn create_post<S: RecordStore>(
    State(state): State<AppState<S>>,
    Extension(auth_user): Extension<AuthUser>,
    Json(body): Json<CreatePostRequest>,
) -> AppResult<Json<Post>> {
    let title = require_title(&body.title, "Post")?;

    let post = state
        .store
        .insert_post(NewPost {
            owner_id: auth_user.id,
            title,
            content: body.content,
            status: body.status.unwrap_or_default(),
        })
        .await?;

    tracing::info!(owner_id = %auth_user.id, post_id = %post.id, status = ?post.status, "Post created");
    Ok(Json(post))
}

pub async fn update_post<S: RecordStore>(
    State(state): State<AppState<S>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
    Json(mut changes): Json<PostChanges>,
) -> AppResult<Json<Post>> {
    if let Some(title) = changes.title.take() {
        changes.title = Some(require_title(&title, "Post")?);
    }

    let post = state
        .store
        .update_post(auth_user.id, post_id, changes)
        .await?;

    Ok(Json(post))
}

pub async fn delete_post<S: RecordStore>(
    State(state): State<AppState<S>>,
    Extension(auth_user): Extension<AuthUser>,
    Path(post_id): Path<Uuid>,
) -> AppResult<Json<serde_json::Value>> {
    state
        .store
        .delete_by_id(RecordKind::Post, auth_user.id, post_id)
        .await?;

    Ok(Json(serde_json::json!({ "deleted": true, "id": post_id })))
}

pub async fn list_public_posts<S: RecordStore>(
    State(state): State<AppState<S>>,
) -> AppResult<Json<Vec<Post>>> {
    let posts = state.store.published_posts().await?;
    Ok(Json(posts))
}

/// One author's public blog.
pub async fn list_author_posts<S: RecordStore>(
    State(state): State<AppState<S>>,
    Path(owner_id): Path<Uuid>,
) -> AppResult<Json<Vec<Post>>> {
    let posts = state.store.published_posts_for_owner(owner_id).await?;
    Ok(Json(posts))
}

/// Drafts are indistinguishable from missing posts here.
pub async fn get_public_post<S: RecordStore>(
    State(state): State<AppState<S>>,
    Path(post_id): Path<Uuid>,
) -> AppResult<Json<Post>> {
    let post = state
        .store
        .published_posts()
        .await?
        .into_iter()
        .find(|p| p.id == post_id)
        .ok_or(AppError::NotFound("Post not found".into()))?;

    Ok(Json(post))
}
