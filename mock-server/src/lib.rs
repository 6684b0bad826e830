//! In-memory stand-in for the social network API.
//!
//! # Overview
//!
//! Serves the `/posts` and `/users` routes with state held in process
//! memory. Sessions are cookie-based: the first request from a client
//! creates a user and sets a `session` cookie, and every later request
//! carrying that cookie acts as the same user. Alongside the store, the
//! server records every request it receives so tests can assert the
//! exact method, target and content type a client sent.
//!
//! Ids are sequential and shared across users, posts and comments, so
//! the very first session user is always id 1.

use axum::extract::{Request, State};
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use tokio::net::TcpListener;

mod posts;
mod state;
mod users;
mod wire;

pub use state::{AppState, RequestRecord, SharedState};

const SESSION_COOKIE: &str = "session";

/// User id the session middleware resolved for the current request.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SessionUser(pub i64);

pub(crate) type ApiResult<T> = Result<T, (StatusCode, Json<wire::Message>)>;

pub(crate) fn error(
    status: StatusCode,
    message: impl Into<String>,
) -> (StatusCode, Json<wire::Message>) {
    (
        status,
        Json(wire::Message {
            message: message.into(),
        }),
    )
}

fn session_cookie(headers: &HeaderMap) -> Option<i64> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        if name == SESSION_COOKIE {
            value.parse().ok()
        } else {
            None
        }
    })
}

/// Records the request, then resolves its session: an unknown or absent
/// session cookie mints a fresh user and answers with `Set-Cookie`.
async fn track(State(state): State<SharedState>, mut request: Request, next: Next) -> Response {
    let record = RequestRecord {
        method: request.method().to_string(),
        target: request
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| request.uri().path().to_string()),
        content_type: request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    };
    state.requests.lock().await.push(record);

    let claimed = session_cookie(request.headers());
    let valid = match claimed {
        Some(id) => state
            .store
            .read()
            .await
            .users
            .contains_key(&id)
            .then_some(id),
        None => None,
    };
    let (user_id, fresh) = match valid {
        Some(id) => (id, false),
        None => (state.store.write().await.add_session_user(), true),
    };
    request.extensions_mut().insert(SessionUser(user_id));

    let mut response = next.run(request).await;
    if fresh {
        if let Ok(value) = format!("{SESSION_COOKIE}={user_id}; Path=/; HttpOnly").parse() {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

pub fn app(state: SharedState) -> Router {
    Router::new()
        .route("/posts", get(posts::list).post(posts::create))
        .route(
            "/posts/{id}",
            get(posts::get_by_id).put(posts::update).delete(posts::delete),
        )
        .route("/posts/user/{user_id}", get(posts::list_by_user))
        .route(
            "/posts/{id}/like",
            get(posts::list_likers).post(posts::like).delete(posts::unlike),
        )
        .route("/posts/{id}/comment", post(posts::comment))
        .route("/posts/{id}/comments", get(posts::list_comments))
        .route(
            "/posts/{id}/comments/{comment_id}",
            delete(posts::delete_comment),
        )
        .route("/users/{id}/profile", get(users::profile))
        .route("/users/profile", put(users::update_profile))
        .route("/users/upload-profile", post(users::upload_profile))
        .route("/users/{id}/posts", get(users::posts))
        .route("/users/{id}/groups", get(users::groups))
        .layer(middleware::from_fn_with_state(state.clone(), track))
        .with_state(state)
}

/// Serve a fresh, empty instance on the listener.
pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app(AppState::new())).await
}

/// Serve an already-assembled router, for callers that hold on to the
/// state or wrap the app in extra layers first.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}
