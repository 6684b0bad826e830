//! Profile and user operations.

use reqwest::multipart::Form;
use reqwest::Request;

use crate::error::ApiError;
use crate::http::{file_part, Http};
use crate::types::{Group, MediaFile, Post, Profile, ProfileUpdate, UploadedImage};

/// Default number of posts returned by the per-user preview listing.
const DEFAULT_POSTS_LIMIT: u32 = 10;

/// Access to the `/users` routes, obtained from
/// [`SocialApi::profile`](crate::SocialApi::profile).
pub struct ProfileApi<'a> {
    http: &'a Http,
}

impl<'a> ProfileApi<'a> {
    pub(crate) fn new(http: &'a Http) -> Self {
        Self { http }
    }

    /// `GET /users/{id}/profile`
    pub async fn get(&self, user_id: i64) -> Result<Profile, ApiError> {
        let request = self.get_request(user_id)?;
        self.http.run(request).await
    }

    fn get_request(&self, user_id: i64) -> Result<Request, ApiError> {
        self.http.build_get(&format!("/users/{user_id}/profile"))
    }

    /// `PUT /users/profile`
    ///
    /// Applies to whichever user the transport's credentials identify.
    pub async fn update(&self, update: &ProfileUpdate) -> Result<Profile, ApiError> {
        let request = self.update_request(update)?;
        self.http.run(request).await
    }

    fn update_request(&self, update: &ProfileUpdate) -> Result<Request, ApiError> {
        self.http.build_put_json("/users/profile", update)
    }

    /// `POST /users/upload-profile` (multipart)
    pub async fn upload_image(&self, image: MediaFile) -> Result<UploadedImage, ApiError> {
        let request = self.upload_image_request(image)?;
        self.http.run(request).await
    }

    fn upload_image_request(&self, image: MediaFile) -> Result<Request, ApiError> {
        let form = Form::new().part("profileImage", file_part(image)?);
        self.http.build_post_form("/users/upload-profile", form)
    }

    /// `GET /users/{id}/posts?limit`
    pub async fn list_posts(&self, user_id: i64, limit: Option<u32>) -> Result<Vec<Post>, ApiError> {
        let request = self.list_posts_request(user_id, limit)?;
        self.http.run(request).await
    }

    fn list_posts_request(&self, user_id: i64, limit: Option<u32>) -> Result<Request, ApiError> {
        self.http.build_get_query(
            &format!("/users/{user_id}/posts"),
            &[("limit", limit.unwrap_or(DEFAULT_POSTS_LIMIT))],
        )
    }

    /// `GET /users/{id}/groups`
    pub async fn list_groups(&self, user_id: i64) -> Result<Vec<Group>, ApiError> {
        let request = self.list_groups_request(user_id)?;
        self.http.run(request).await
    }

    fn list_groups_request(&self, user_id: i64) -> Result<Request, ApiError> {
        self.http.build_get(&format!("/users/{user_id}/groups"))
    }
}

#[cfg(test)]
mod tests {
    use reqwest::header::CONTENT_TYPE;

    use super::*;

    fn http() -> Http {
        Http::new("http://localhost:3000").unwrap()
    }

    #[test]
    fn profile_lookup_targets_the_user_route() {
        let http = http();
        let request = ProfileApi::new(&http).get_request(5).unwrap();

        assert_eq!(request.method(), "GET");
        assert_eq!(
            request.url().as_str(),
            "http://localhost:3000/users/5/profile"
        );
    }

    #[test]
    fn update_puts_json_to_the_session_route() {
        let http = http();
        let update = ProfileUpdate {
            bio: Some("hello".to_string()),
            ..ProfileUpdate::default()
        };
        let request = ProfileApi::new(&http).update_request(&update).unwrap();

        assert_eq!(request.method(), "PUT");
        assert_eq!(request.url().as_str(), "http://localhost:3000/users/profile");
        assert_eq!(request.headers()[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn upload_sends_multipart_to_the_upload_route() {
        let http = http();
        let image = MediaFile {
            file_name: "me.png".to_string(),
            content_type: "image/png".to_string(),
            bytes: vec![0x89, 0x50],
        };
        let request = ProfileApi::new(&http).upload_image_request(image).unwrap();

        assert_eq!(request.method(), "POST");
        assert_eq!(
            request.url().as_str(),
            "http://localhost:3000/users/upload-profile"
        );
        let content_type = request.headers()[CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("multipart/form-data"));
    }

    #[test]
    fn post_preview_defaults_to_limit_10() {
        let http = http();
        let request = ProfileApi::new(&http).list_posts_request(5, None).unwrap();

        assert_eq!(
            request.url().as_str(),
            "http://localhost:3000/users/5/posts?limit=10"
        );
    }

    #[test]
    fn explicit_post_preview_limit_is_passed_through() {
        let http = http();
        let request = ProfileApi::new(&http)
            .list_posts_request(5, Some(3))
            .unwrap();

        assert_eq!(
            request.url().as_str(),
            "http://localhost:3000/users/5/posts?limit=3"
        );
    }

    #[test]
    fn group_listing_takes_no_query() {
        let http = http();
        let request = ProfileApi::new(&http).list_groups_request(5).unwrap();

        assert_eq!(
            request.url().as_str(),
            "http://localhost:3000/users/5/groups"
        );
    }
}
