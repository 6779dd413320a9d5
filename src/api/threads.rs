use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppError, Result},
    models::{CreateThreadRequest, Post, Thread, UpdateThreadRequest},
    tree::{self, ThreadPostsParams},
    AppState,
};

/// Open a thread in a forum
///
/// Forums are not managed by this service; `forum` is stored as given.
pub async fn create_thread(
    State(state): State<AppState>,
    Path(forum): Path<String>,
    Json(req): Json<CreateThreadRequest>,
) -> Result<(StatusCode, Json<Thread>)> {
    if req.author.trim().is_empty() || req.title.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Thread author and title are required".to_string(),
        ));
    }

    let thread = state.db.create_thread(&forum, &req).await?;
    tracing::info!(thread_id = thread.id, forum = %thread.forum, "Created thread");

    Ok((StatusCode::CREATED, Json(thread)))
}

/// Update a thread's title and/or message
pub async fn update_thread(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
    Json(req): Json<UpdateThreadRequest>,
) -> Result<Json<Thread>> {
    let thread = state.db.update_thread(&slug_or_id, &req).await?;
    Ok(Json(thread))
}

/// Get thread details
pub async fn get_thread(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
) -> Result<Json<Thread>> {
    let thread = state.db.get_thread(&slug_or_id).await?;
    Ok(Json(thread))
}

/// Get one page of a thread's posts
///
/// Query parameters (all optional, malformed values fall back to defaults):
/// - sort: "flat" (default), "tree" or "parent_tree"
/// - limit: page size; counts root discussions for parent_tree
/// - since: id of the last post of the previous page
/// - desc: "true" for newest first
pub async fn get_thread_posts(
    State(state): State<AppState>,
    Path(slug_or_id): Path<String>,
    Query(params): Query<ThreadPostsParams>,
) -> Result<Json<Vec<Post>>> {
    let thread = state.db.get_thread(&slug_or_id).await?;
    let query = params.normalize();

    let snapshot = state.db.get_thread_posts(thread.id).await?;
    let snapshot_len = snapshot.len();
    let indexed = tree::index_posts(snapshot)?;
    let page = tree::page(&indexed, &query);

    tracing::debug!(
        thread_id = thread.id,
        sort = query.mode.as_str(),
        limit = ?query.limit,
        since = ?query.since,
        desc = query.desc,
        "Paged {} of {} posts",
        page.len(),
        snapshot_len
    );

    Ok(Json(page))
}
