//! Entry point tying the resource modules to one transport.

use crate::error::ApiError;
use crate::http::Http;
use crate::posts::PostsApi;
use crate::profile::ProfileApi;

/// Handle to the API: owns the configured transport and hands out
/// per-resource accessors that share it.
///
/// The base URL is fixed at construction. Credentials are ambient:
/// cookies the server sets on any call are replayed on every later call
/// made through the same handle.
///
/// ```no_run
/// # async fn demo() -> Result<(), social_client::ApiError> {
/// let api = social_client::SocialApi::new("http://localhost:3000")?;
/// let feed = api.posts().list(None).await?;
/// println!("{} posts", feed.total);
/// # Ok(())
/// # }
/// ```
pub struct SocialApi {
    http: Http,
}

impl SocialApi {
    /// Connect to the API at `base_url` with a fresh cookie-holding
    /// transport. A trailing slash on the base URL is ignored.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            http: Http::new(base_url)?,
        })
    }

    /// Connect reusing a caller-configured `reqwest::Client`.
    ///
    /// Cookie-based credentials only flow if the given client has its
    /// cookie store enabled.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            http: Http::with_client(base_url, client),
        }
    }

    /// Post operations.
    pub fn posts(&self) -> PostsApi<'_> {
        PostsApi::new(&self.http)
    }

    /// Profile and user operations.
    pub fn profile(&self) -> ProfileApi<'_> {
        ProfileApi::new(&self.http)
    }
}
