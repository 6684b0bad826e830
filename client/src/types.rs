//! Data shapes exchanged with the API.
//!
//! Responses decode verbatim: field names map 1:1 onto the wire's
//! camelCase keys and no field is renamed, dropped or computed locally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Author embedded in posts, comments and like listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Kind of media attached to a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaType {
    Image,
    Video,
}

/// Media attachment as served: a URL plus its kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
}

/// A post as served, author and counters included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub author: UserSummary,
    pub content: String,
    #[serde(default)]
    pub media: Option<Media>,
    pub like_count: u32,
    pub comment_count: u32,
    pub created_at: DateTime<Utc>,
}

/// A comment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author: UserSummary,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A user's full profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// Partial profile update; omitted fields stay unchanged on the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

/// Group membership entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

/// Server acknowledgement for deletes, likes and unlikes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}

/// Response to a profile image upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub profile_image: String,
}

/// Offset-style paging pair sent as `?page&limit` on listing calls.
///
/// Every listing method takes `Option<Page>`; `None` applies that
/// resource's default so the query string is always fully explicit on
/// the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub page: u32,
    pub limit: u32,
}

impl Page {
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }
}

/// One page of a listing plus the paging echo and the overall total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub limit: u32,
    pub total: u64,
}

/// A file to attach to a post or profile, sent as one multipart part.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Payload for creating a post. Files travel as multipart parts under
/// the `files` field.
#[derive(Debug, Clone, Default)]
pub struct NewPost {
    pub content: String,
    pub files: Vec<MediaFile>,
}

/// Payload for replacing a post's content, with the same multipart
/// contract as creation. Attaching no files keeps the existing media.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub content: String,
    pub files: Vec<MediaFile>,
}

/// Payload for commenting on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    pub content: String,
}

impl NewComment {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_decodes_camel_case_wire_fields() {
        let raw = r#"{
            "id": 42,
            "author": {"id": 7, "username": "ada", "profileImage": null},
            "content": "hi",
            "media": {"url": "/media/abc", "type": "IMAGE"},
            "likeCount": 3,
            "commentCount": 1,
            "createdAt": "2024-05-01T12:30:00Z"
        }"#;

        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.id, 42);
        assert_eq!(post.author.username, "ada");
        assert_eq!(post.content, "hi");
        assert_eq!(post.like_count, 3);
        assert_eq!(post.comment_count, 1);

        let media = post.media.unwrap();
        assert_eq!(media.url, "/media/abc");
        assert_eq!(media.media_type, MediaType::Image);
    }

    #[test]
    fn post_without_media_decodes_even_when_key_is_absent() {
        let raw = r#"{
            "id": 1,
            "author": {"id": 2, "username": "bo"},
            "content": "plain",
            "likeCount": 0,
            "commentCount": 0,
            "createdAt": "2024-05-01T12:30:00Z"
        }"#;

        let post: Post = serde_json::from_str(raw).unwrap();
        assert!(post.media.is_none());
        assert!(post.author.profile_image.is_none());
    }

    #[test]
    fn media_kind_uses_uppercase_wire_names() {
        let media = Media {
            url: "/media/clip".to_string(),
            media_type: MediaType::Video,
        };

        let value = serde_json::to_value(&media).unwrap();
        assert_eq!(value["type"], "VIDEO");
        assert_eq!(value["url"], "/media/clip");
    }

    #[test]
    fn profile_update_omits_unset_fields() {
        let update = ProfileUpdate {
            display_name: Some("Ada".to_string()),
            ..ProfileUpdate::default()
        };

        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["displayName"], "Ada");
        assert!(value.get("username").is_none());
        assert!(value.get("bio").is_none());
    }

    #[test]
    fn paginated_echoes_paging_and_total() {
        let raw = r#"{"items": [{"id": 9, "name": "general"}], "page": 2, "limit": 5, "total": 11}"#;

        let page: Paginated<Group> = serde_json::from_str(raw).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].name, "general");
        assert_eq!(page.page, 2);
        assert_eq!(page.limit, 5);
        assert_eq!(page.total, 11);
    }
}
