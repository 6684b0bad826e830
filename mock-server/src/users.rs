//! Handlers for the `/users` routes.

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use uuid::Uuid;

use crate::state::SharedState;
use crate::wire;
use crate::{error, ApiResult, SessionUser};

pub(crate) async fn profile(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<wire::Profile>> {
    let store = state.store.read().await;
    let user = store
        .users
        .get(&user_id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "user not found"))?;
    Ok(Json(store.profile_view(user)))
}

pub(crate) async fn update_profile(
    State(state): State<SharedState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    Json(input): Json<wire::ProfileUpdate>,
) -> ApiResult<Json<wire::Profile>> {
    let mut store = state.store.write().await;
    let snapshot = {
        let user = store
            .users
            .get_mut(&user_id)
            .ok_or_else(|| error(StatusCode::NOT_FOUND, "user not found"))?;
        if let Some(username) = input.username {
            user.username = username;
        }
        if let Some(display_name) = input.display_name {
            user.display_name = Some(display_name);
        }
        if let Some(bio) = input.bio {
            user.bio = Some(bio);
        }
        user.clone()
    };
    Ok(Json(store.profile_view(&snapshot)))
}

pub(crate) async fn upload_profile(
    State(state): State<SharedState>,
    Extension(SessionUser(user_id)): Extension<SessionUser>,
    mut multipart: Multipart,
) -> ApiResult<Json<wire::UploadedImage>> {
    let mut url = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| error(StatusCode::BAD_REQUEST, err.to_string()))?
    {
        let name = field.name().map(str::to_string);
        if name.as_deref() != Some("profileImage") {
            continue;
        }
        let is_image = field
            .content_type()
            .is_some_and(|content_type| content_type.starts_with("image/"));
        if !is_image {
            return Err(error(StatusCode::BAD_REQUEST, "profile image must be an image"));
        }
        field
            .bytes()
            .await
            .map_err(|err| error(StatusCode::BAD_REQUEST, err.to_string()))?;
        url = Some(format!("/media/{}", Uuid::new_v4()));
    }

    let url = url.ok_or_else(|| error(StatusCode::BAD_REQUEST, "profileImage file required"))?;

    let mut store = state.store.write().await;
    let user = store
        .users
        .get_mut(&user_id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "user not found"))?;
    user.profile_image = Some(url.clone());
    Ok(Json(wire::UploadedImage { profile_image: url }))
}

pub(crate) async fn posts(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
    Query(query): Query<wire::LimitQuery>,
) -> ApiResult<Json<Vec<wire::Post>>> {
    let store = state.store.read().await;
    if !store.users.contains_key(&user_id) {
        return Err(error(StatusCode::NOT_FOUND, "user not found"));
    }

    let limit = query.limit.unwrap_or(10) as usize;
    let views = store
        .posts_newest_first()
        .into_iter()
        .filter(|post| post.author_id == user_id)
        .take(limit)
        .map(|post| store.post_view(post))
        .collect();
    Ok(Json(views))
}

pub(crate) async fn groups(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
) -> ApiResult<Json<Vec<wire::Group>>> {
    let store = state.store.read().await;
    if !store.users.contains_key(&user_id) {
        return Err(error(StatusCode::NOT_FOUND, "user not found"));
    }

    Ok(Json(store.groups.get(&user_id).cloned().unwrap_or_default()))
}
