use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, Result},
    models::{CreatePostRequest, Post, PostDetail, PostDetailsParams, PostId, UpdatePostRequest},
    AppState,
};

/// Create posts in a thread
///
/// Accepts a JSON array of `{author, message, parent}`. The whole batch is
/// created atomically, in order, so later entries may reply to earlier ones.
pub async fn create_posts(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
    Json(reqs): Json<Vec<CreatePostRequest>>,
) -> Result<(StatusCode, Json<Vec<Post>>)> {
    let max_batch = state.config.posts.max_posts_per_batch;
    if reqs.len() > max_batch {
        return Err(AppError::BadRequest(format!(
            "Too many posts in one request (max {})",
            max_batch
        )));
    }

    if reqs.iter().any(|r| r.author.trim().is_empty()) {
        return Err(AppError::BadRequest("Post author is required".to_string()));
    }

    let thread = state.db.get_thread(&slug_or_id).await?;
    let posts = state.db.create_posts(&thread, &reqs).await?;

    tracing::info!(thread_id = thread.id, count = posts.len(), "Created posts");

    Ok((StatusCode::CREATED, Json(posts)))
}

/// Get a post by ID
///
/// `?related=thread` also attaches the owning thread. Users and forums are
/// not served here, so other `related` values are ignored.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Query(params): Query<PostDetailsParams>,
) -> Result<Json<PostDetail>> {
    let post = state.db.get_post(id).await?;

    let thread = if params.wants("thread") {
        Some(state.db.get_thread(&post.thread_id.to_string()).await?)
    } else {
        None
    };

    Ok(Json(PostDetail { post, thread }))
}

/// Edit a post's message
///
/// An empty message leaves the post untouched and returns it as stored.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<PostId>,
    Json(req): Json<UpdatePostRequest>,
) -> Result<Json<Post>> {
    if req.message.is_empty() {
        return Ok(Json(state.db.get_post(id).await?));
    }

    let post = state.db.update_post(id, &req.message).await?;
    tracing::info!(post_id = post.id, "Edited post");

    Ok(Json(post))
}
