//! In-memory store behind the mock API.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};

use crate::wire;

/// One request as the server saw it, kept so tests can assert exactly
/// what a client put on the wire.
#[derive(Debug, Clone)]
pub struct RequestRecord {
    pub method: String,
    /// Path plus query string.
    pub target: String,
    pub content_type: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct StoredUser {
    pub id: i64,
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
}

#[derive(Debug, Clone)]
pub(crate) struct StoredPost {
    pub id: i64,
    pub author_id: i64,
    pub content: String,
    pub media: Option<wire::Media>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub(crate) struct StoredComment {
    pub id: i64,
    pub post_id: i64,
    pub author_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Everything lives behind one lock; handler bodies are short and the
/// server only ever backs tests.
#[derive(Debug, Default)]
pub(crate) struct Store {
    next_id: i64,
    pub users: HashMap<i64, StoredUser>,
    pub posts: HashMap<i64, StoredPost>,
    pub comments: HashMap<i64, StoredComment>,
    /// Post id to liker user ids, in like order.
    pub likes: HashMap<i64, Vec<i64>>,
    /// User id to group memberships.
    pub groups: HashMap<i64, Vec<wire::Group>>,
}

impl Store {
    pub fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    /// Register a user for a brand-new session. Every user starts out
    /// in the seeded `general` group.
    pub fn add_session_user(&mut self) -> i64 {
        let id = self.next_id();
        self.users.insert(
            id,
            StoredUser {
                id,
                username: format!("user{id}"),
                display_name: None,
                bio: None,
                profile_image: None,
            },
        );
        self.groups.insert(
            id,
            vec![wire::Group {
                id: 1,
                name: "general".to_string(),
            }],
        );
        id
    }

    pub fn user_summary(&self, user_id: i64) -> wire::UserSummary {
        match self.users.get(&user_id) {
            Some(user) => wire::UserSummary {
                id: user.id,
                username: user.username.clone(),
                profile_image: user.profile_image.clone(),
            },
            None => wire::UserSummary {
                id: user_id,
                username: format!("user{user_id}"),
                profile_image: None,
            },
        }
    }

    pub fn post_view(&self, post: &StoredPost) -> wire::Post {
        wire::Post {
            id: post.id,
            author: self.user_summary(post.author_id),
            content: post.content.clone(),
            media: post.media.clone(),
            like_count: self.likes.get(&post.id).map_or(0, Vec::len) as u32,
            comment_count: self
                .comments
                .values()
                .filter(|comment| comment.post_id == post.id)
                .count() as u32,
            created_at: post.created_at,
        }
    }

    pub fn comment_view(&self, comment: &StoredComment) -> wire::Comment {
        wire::Comment {
            id: comment.id,
            post_id: comment.post_id,
            author: self.user_summary(comment.author_id),
            content: comment.content.clone(),
            created_at: comment.created_at,
        }
    }

    pub fn profile_view(&self, user: &StoredUser) -> wire::Profile {
        wire::Profile {
            id: user.id,
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            bio: user.bio.clone(),
            profile_image: user.profile_image.clone(),
        }
    }

    /// Posts newest-first, the order every listing serves.
    pub fn posts_newest_first(&self) -> Vec<&StoredPost> {
        let mut posts: Vec<&StoredPost> = self.posts.values().collect();
        posts.sort_by(|a, b| b.id.cmp(&a.id));
        posts
    }
}

#[derive(Debug)]
pub struct AppState {
    pub(crate) store: RwLock<Store>,
    pub(crate) requests: Mutex<Vec<RequestRecord>>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new() -> SharedState {
        Arc::new(Self {
            store: RwLock::new(Store::default()),
            requests: Mutex::new(Vec::new()),
        })
    }

    /// Snapshot of every request received so far, in arrival order.
    pub async fn recorded_requests(&self) -> Vec<RequestRecord> {
        self.requests.lock().await.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_sequential_across_entity_kinds() {
        let mut store = Store::default();
        let user = store.add_session_user();
        let post = store.next_id();
        let comment = store.next_id();

        assert_eq!(user, 1);
        assert_eq!(post, 2);
        assert_eq!(comment, 3);
    }

    #[test]
    fn session_users_start_in_the_general_group() {
        let mut store = Store::default();
        let user = store.add_session_user();

        let groups = store.groups.get(&user).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].name, "general");
    }

    #[test]
    fn post_view_counts_likes_and_comments() {
        let mut store = Store::default();
        let author = store.add_session_user();
        let post_id = store.next_id();
        store.posts.insert(
            post_id,
            StoredPost {
                id: post_id,
                author_id: author,
                content: "hello".to_string(),
                media: None,
                created_at: Utc::now(),
            },
        );
        store.likes.insert(post_id, vec![author]);
        let comment_id = store.next_id();
        store.comments.insert(
            comment_id,
            StoredComment {
                id: comment_id,
                post_id,
                author_id: author,
                content: "first".to_string(),
                created_at: Utc::now(),
            },
        );

        let view = store.post_view(&store.posts[&post_id]);
        assert_eq!(view.like_count, 1);
        assert_eq!(view.comment_count, 1);
        assert_eq!(view.author.username, "user1");
    }
}
