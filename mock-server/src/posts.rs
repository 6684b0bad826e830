//! Handlers for the `/posts` routes.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::state::{SharedState, StoredComment, StoredPost};
use crate::wire;
use crate::{error, ApiResult, SessionUser};

fn paginate<T>(views: Vec<T>, page: u32, limit: u32) -> wire::Paginated<T> {
    let page = page.max(1);
    let total = views.len() as u64;
    let start = (page as usize - 1) * limit as usize;
    let items = views.into_iter().skip(start).take(limit as usize).collect();
    wire::Paginated {
        items,
        page,
        limit,
        total,
    }
}

fn media_kind(content_type: Option<&str>) -> Option<wire::MediaKind> {
    let content_type = content_type?;
    if content_type.starts_with("image/") {
        Some(wire::MediaKind::Image)
    } else if content_type.starts_with("video/") {
        Some(wire::MediaKind::Video)
    } else {
        None
    }
}

/// Read a post form: a `content` text field plus any number of `files`
/// parts. The first file becomes the post's media; bytes are dropped
/// and replaced by a generated URL.
async fn read_post_form(
    mut multipart: Multipart,
) -> Result<(String, Option<wire::Media>), (StatusCode, Json<wire::Message>)> {
    let mut content = String::new();
    let mut media = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| error(StatusCode::BAD_REQUEST, err.to_string()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("content") => {
                content = field
                    .text()
                    .await
                    .map_err(|err| error(StatusCode::BAD_REQUEST, err.to_string()))?;
            }
            Some("files") => {
                let kind = media_kind(field.content_type())
                    .ok_or_else(|| error(StatusCode::BAD_REQUEST, "unsupported media type"))?;
                field
                    .bytes()
                    .await
                    .map_err(|err| error(StatusCode::BAD_REQUEST, err.to_string()))?;
                if media.is_none() {
                    media = Some(wire::Media {
                        url: format!("/media/{}", Uuid::new_v4()),
                        media_type: kind,
                    });
                }
            }
            _ => {}
        }
    }

    Ok((content, media))
}

pub(crate) async fn list(
    State(state): State<SharedState>,
    Query(query): Query<wire::PageQuery>,
) -> Json<wire::Paginated<wire::Post>> {
    let store = state.store.read().await;
    let views = store
        .posts_newest_first()
        .into_iter()
        .map(|post| store.post_view(post))
        .collect();
    Json(paginate(
        views,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(10),
    ))
}

pub(crate) async fn list_by_user(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
    Query(query): Query<wire::PageQuery>,
) -> Json<wire::Paginated<wire::Post>> {
    let store = state.store.read().await;
    let views = store
        .posts_newest_first()
        .into_iter()
        .filter(|post| post.author_id == user_id)
        .map(|post| store.post_view(post))
        .collect();
    Json(paginate(
        views,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(10),
    ))
}

pub(crate) async fn get_by_id(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<wire::Post>> {
    let store = state.store.read().await;
    let post = store
        .posts
        .get(&id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "post not found"))?;
    Ok(Json(store.post_view(post)))
}

pub(crate) async fn create(
    State(state): State<SharedState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    multipart: Multipart,
) -> ApiResult<(StatusCode, Json<wire::Post>)> {
    let (content, media) = read_post_form(multipart).await?;

    let mut store = state.store.write().await;
    let id = store.next_id();
    let post = StoredPost {
        id,
        author_id: user_id,
        content,
        media,
        created_at: Utc::now(),
    };
    let view = store.post_view(&post);
    store.posts.insert(id, post);
    Ok((StatusCode::CREATED, Json(view)))
}

pub(crate) async fn update(
    State(state): State<SharedState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> ApiResult<Json<wire::Post>> {
    let (content, media) = read_post_form(multipart).await?;

    let mut store = state.store.write().await;
    let snapshot = {
        let post = store
            .posts
            .get_mut(&id)
            .ok_or_else(|| error(StatusCode::NOT_FOUND, "post not found"))?;
        if post.author_id != user_id {
            return Err(error(StatusCode::FORBIDDEN, "not the author"));
        }
        post.content = content;
        if media.is_some() {
            post.media = media;
        }
        post.clone()
    };
    Ok(Json(store.post_view(&snapshot)))
}

pub(crate) async fn delete(
    State(state): State<SharedState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<wire::Message>> {
    let mut store = state.store.write().await;
    let post = store
        .posts
        .get(&id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "post not found"))?;
    if post.author_id != user_id {
        return Err(error(StatusCode::FORBIDDEN, "not the author"));
    }

    store.posts.remove(&id);
    store.comments.retain(|_, comment| comment.post_id != id);
    store.likes.remove(&id);
    Ok(Json(wire::Message {
        message: "post deleted".to_string(),
    }))
}

pub(crate) async fn like(
    State(state): State<SharedState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<wire::Message>> {
    let mut store = state.store.write().await;
    if !store.posts.contains_key(&id) {
        return Err(error(StatusCode::NOT_FOUND, "post not found"));
    }

    // Liking twice is a no-op, not an error.
    let likers = store.likes.entry(id).or_default();
    if !likers.contains(&user_id) {
        likers.push(user_id);
    }
    Ok(Json(wire::Message {
        message: "post liked".to_string(),
    }))
}

pub(crate) async fn unlike(
    State(state): State<SharedState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    Path(id): Path<i64>,
) -> ApiResult<Json<wire::Message>> {
    let mut store = state.store.write().await;
    if !store.posts.contains_key(&id) {
        return Err(error(StatusCode::NOT_FOUND, "post not found"));
    }

    if let Some(likers) = store.likes.get_mut(&id) {
        likers.retain(|liker| *liker != user_id);
    }
    Ok(Json(wire::Message {
        message: "post unliked".to_string(),
    }))
}

pub(crate) async fn list_likers(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(query): Query<wire::PageQuery>,
) -> ApiResult<Json<wire::Paginated<wire::UserSummary>>> {
    let store = state.store.read().await;
    if !store.posts.contains_key(&id) {
        return Err(error(StatusCode::NOT_FOUND, "post not found"));
    }

    let views = store
        .likes
        .get(&id)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
        .map(|liker| store.user_summary(*liker))
        .collect();
    Ok(Json(paginate(
        views,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(20),
    )))
}

pub(crate) async fn comment(
    State(state): State<SharedState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    Path(id): Path<i64>,
    Json(input): Json<wire::NewComment>,
) -> ApiResult<(StatusCode, Json<wire::Comment>)> {
    let mut store = state.store.write().await;
    if !store.posts.contains_key(&id) {
        return Err(error(StatusCode::NOT_FOUND, "post not found"));
    }

    let comment_id = store.next_id();
    let comment = StoredComment {
        id: comment_id,
        post_id: id,
        author_id: user_id,
        content: input.content,
        created_at: Utc::now(),
    };
    let view = store.comment_view(&comment);
    store.comments.insert(comment_id, comment);
    Ok((StatusCode::CREATED, Json(view)))
}

pub(crate) async fn list_comments(
    State(state): State<SharedState>,
    Path(id): Path<i64>,
    Query(query): Query<wire::PageQuery>,
) -> ApiResult<Json<wire::Paginated<wire::Comment>>> {
    let store = state.store.read().await;
    if !store.posts.contains_key(&id) {
        return Err(error(StatusCode::NOT_FOUND, "post not found"));
    }

    // Comment threads read oldest-first.
    let mut comments: Vec<&StoredComment> = store
        .comments
        .values()
        .filter(|comment| comment.post_id == id)
        .collect();
    comments.sort_by_key(|comment| comment.id);
    let views = comments
        .into_iter()
        .map(|comment| store.comment_view(comment))
        .collect();
    Ok(Json(paginate(
        views,
        query.page.unwrap_or(1),
        query.limit.unwrap_or(10),
    )))
}

pub(crate) async fn delete_comment(
    State(state): State<SharedState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> ApiResult<Json<wire::Message>> {
    let mut store = state.store.write().await;
    let comment = store
        .comments
        .get(&comment_id)
        .filter(|comment| comment.post_id == post_id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "comment not found"))?;
    if comment.author_id != user_id {
        return Err(error(StatusCode::FORBIDDEN, "not the author"));
    }

    store.comments.remove(&comment_id);
    Ok(Json(wire::Message {
        message: "comment deleted".to_string(),
    }))
}
