//! Health blog articles shown on the patient dashboard.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::store::models::BlogPost;
use crate::AppState;

use super::error::ApiError;

#[derive(Debug, serde::Serialize)]
pub struct ListBlogPostsResponse {
    pub posts: Vec<BlogPost>,
    pub total: usize,
}

/// List published articles, newest first
///
/// GET /api/blogs
pub async fn list_posts(State(state): State<Arc<AppState>>) -> Json<ListBlogPostsResponse> {
    let mut posts: Vec<BlogPost> = state
        .store
        .blog_posts
        .iter()
        .map(|entry| entry.clone())
        .collect();
    posts.sort_by(|a, b| b.published_at.cmp(&a.published_at).then_with(|| a.id.cmp(&b.id)));
    let total = posts.len();

    Json(ListBlogPostsResponse { posts, total })
}

/// GET /api/blogs/:id
pub async fn get_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<BlogPost>, ApiError> {
    state
        .store
        .blog_posts
        .get(&id)
        .map(|entry| Json(entry.clone()))
        .ok_or_else(|| ApiError::not_found("Blog post not found"))
}
