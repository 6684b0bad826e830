//! Client-side access layer for the social network's HTTP API.
//!
//! # Overview
//!
//! [`SocialApi`] is the single entry point. It owns one configured
//! transport and exposes the API as two resource groups: [`PostsApi`]
//! for the `/posts` routes and [`ProfileApi`] for the `/users` routes.
//! Every method maps to exactly one server route and one request.
//!
//! # Design
//!
//! - Calls go straight through: no caching, no retries, no request
//!   coalescing. Callers decide their own recovery policy.
//! - Errors pass through untranslated. A non-2xx response surfaces as
//!   [`ApiError::Status`] with the raw status code and body.
//! - Credentials are ambient. The transport keeps a cookie store, so a
//!   session the server establishes on one call rides along on all
//!   later calls from the same [`SocialApi`].
//! - Listing calls always put an explicit `page` and `limit` on the
//!   wire; passing `None` applies the resource's documented default.
//! - Media uploads are multipart. Post files travel under the `files`
//!   field and avatar uploads under `profileImage`; only those calls
//!   set a multipart content type.

pub mod client;
pub mod error;
pub mod posts;
pub mod profile;
pub mod types;

mod http;

pub use client::SocialApi;
pub use error::ApiError;
pub use posts::PostsApi;
pub use profile::ProfileApi;
pub use types::{
    Ack, Comment, Group, Media, MediaFile, MediaType, NewComment, NewPost, Page, Paginated, Post,
    PostUpdate, Profile, ProfileUpdate, UploadedImage, UserSummary,
};
