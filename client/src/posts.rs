//! Post operations.
//!
//! One method per server route. Each method builds exactly one request,
//! runs it, and returns the decoded body; nothing is cached, retried or
//! reshaped. Listing calls always send an explicit `?page&limit` pair,
//! falling back to the resource default when the caller passes `None`.

use reqwest::multipart::Form;
use reqwest::Request;

use crate::error::ApiError;
use crate::http::{file_part, Http};
use crate::types::{
    Ack, Comment, MediaFile, NewComment, NewPost, Page, Paginated, Post, PostUpdate, UserSummary,
};

/// Default paging for post and comment listings.
const DEFAULT_PAGE: Page = Page { page: 1, limit: 10 };
/// Default paging for like listings.
const LIKERS_PAGE: Page = Page { page: 1, limit: 20 };

fn attach(mut form: Form, files: Vec<MediaFile>) -> Result<Form, ApiError> {
    for file in files {
        form = form.part("files", file_part(file)?);
    }
    Ok(form)
}

/// Access to the `/posts` routes, obtained from
/// [`SocialApi::posts`](crate::SocialApi::posts).
pub struct PostsApi<'a> {
    http: &'a Http,
}

impl<'a> PostsApi<'a> {
    pub(crate) fn new(http: &'a Http) -> Self {
        Self { http }
    }

    /// `GET /posts?page&limit`
    pub async fn list(&self, page: Option<Page>) -> Result<Paginated<Post>, ApiError> {
        let request = self.list_request(page)?;
        self.http.run(request).await
    }

    fn list_request(&self, page: Option<Page>) -> Result<Request, ApiError> {
        self.http
            .build_get_query("/posts", &page.unwrap_or(DEFAULT_PAGE))
    }

    /// `GET /posts/{id}`
    pub async fn get(&self, id: i64) -> Result<Post, ApiError> {
        let request = self.get_request(id)?;
        self.http.run(request).await
    }

    fn get_request(&self, id: i64) -> Result<Request, ApiError> {
        self.http.build_get(&format!("/posts/{id}"))
    }

    /// `GET /posts/user/{user_id}?page&limit`
    pub async fn list_by_user(
        &self,
        user_id: i64,
        page: Option<Page>,
    ) -> Result<Paginated<Post>, ApiError> {
        let request = self.list_by_user_request(user_id, page)?;
        self.http.run(request).await
    }

    fn list_by_user_request(&self, user_id: i64, page: Option<Page>) -> Result<Request, ApiError> {
        self.http
            .build_get_query(&format!("/posts/user/{user_id}"), &page.unwrap_or(DEFAULT_PAGE))
    }

    /// `POST /posts` (multipart)
    pub async fn create(&self, new_post: NewPost) -> Result<Post, ApiError> {
        let request = self.create_request(new_post)?;
        self.http.run(request).await
    }

    fn create_request(&self, new_post: NewPost) -> Result<Request, ApiError> {
        let form = attach(Form::new().text("content", new_post.content), new_post.files)?;
        self.http.build_post_form("/posts", form)
    }

    /// `PUT /posts/{id}` (multipart)
    pub async fn update(&self, id: i64, update: PostUpdate) -> Result<Post, ApiError> {
        let request = self.update_request(id, update)?;
        self.http.run(request).await
    }

    fn update_request(&self, id: i64, update: PostUpdate) -> Result<Request, ApiError> {
        let form = attach(Form::new().text("content", update.content), update.files)?;
        self.http.build_put_form(&format!("/posts/{id}"), form)
    }

    /// `DELETE /posts/{id}`
    pub async fn delete(&self, id: i64) -> Result<Ack, ApiError> {
        let request = self.delete_request(id)?;
        self.http.run(request).await
    }

    fn delete_request(&self, id: i64) -> Result<Request, ApiError> {
        self.http.build_delete(&format!("/posts/{id}"))
    }

    /// `POST /posts/{id}/like`
    pub async fn like(&self, id: i64) -> Result<Ack, ApiError> {
        let request = self.like_request(id)?;
        self.http.run(request).await
    }

    fn like_request(&self, id: i64) -> Result<Request, ApiError> {
        self.http.build_post_empty(&format!("/posts/{id}/like"))
    }

    /// `DELETE /posts/{id}/like`
    pub async fn unlike(&self, id: i64) -> Result<Ack, ApiError> {
        let request = self.unlike_request(id)?;
        self.http.run(request).await
    }

    fn unlike_request(&self, id: i64) -> Result<Request, ApiError> {
        self.http.build_delete(&format!("/posts/{id}/like"))
    }

    /// `GET /posts/{id}/like?page&limit`
    pub async fn list_likers(
        &self,
        id: i64,
        page: Option<Page>,
    ) -> Result<Paginated<UserSummary>, ApiError> {
        let request = self.list_likers_request(id, page)?;
        self.http.run(request).await
    }

    fn list_likers_request(&self, id: i64, page: Option<Page>) -> Result<Request, ApiError> {
        self.http
            .build_get_query(&format!("/posts/{id}/like"), &page.unwrap_or(LIKERS_PAGE))
    }

    /// `POST /posts/{id}/comment`
    pub async fn comment(&self, id: i64, comment: &NewComment) -> Result<Comment, ApiError> {
        let request = self.comment_request(id, comment)?;
        self.http.run(request).await
    }

    fn comment_request(&self, id: i64, comment: &NewComment) -> Result<Request, ApiError> {
        self.http
            .build_post_json(&format!("/posts/{id}/comment"), comment)
    }

    /// `GET /posts/{id}/comments?page&limit`
    pub async fn list_comments(
        &self,
        id: i64,
        page: Option<Page>,
    ) -> Result<Paginated<Comment>, ApiError> {
        let request = self.list_comments_request(id, page)?;
        self.http.run(request).await
    }

    fn list_comments_request(&self, id: i64, page: Option<Page>) -> Result<Request, ApiError> {
        self.http
            .build_get_query(&format!("/posts/{id}/comments"), &page.unwrap_or(DEFAULT_PAGE))
    }

    /// `DELETE /posts/{post_id}/comments/{comment_id}`
    pub async fn delete_comment(&self, post_id: i64, comment_id: i64) -> Result<Ack, ApiError> {
        let request = self.delete_comment_request(post_id, comment_id)?;
        self.http.run(request).await
    }

    fn delete_comment_request(&self, post_id: i64, comment_id: i64) -> Result<Request, ApiError> {
        self.http
            .build_delete(&format!("/posts/{post_id}/comments/{comment_id}"))
    }
}
