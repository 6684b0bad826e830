//! Thin facade over the HTTP transport.
//!
//! # Design
//! Resource modules never touch `reqwest` directly: each operation asks
//! the facade to build a request against the configured base URL, then
//! hands it back for execution. Keeping construction separate from
//! execution lets unit tests inspect the exact request an operation
//! produces without any network in play.
//!
//! The facade adds no behavior of its own: no retries, no timeouts, no
//! header rewriting. Credentials ride along ambiently via the client's
//! cookie store, which persists any `Set-Cookie` the server issues and
//! replays it on subsequent calls.

use reqwest::multipart::{Form, Part};
use reqwest::{Method, Request, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::types::MediaFile;

/// Transport configuration shared by every resource call.
pub(crate) struct Http {
    client: reqwest::Client,
    base_url: String,
}

impl Http {
    /// Build a facade with its own cookie-holding client.
    pub(crate) fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .map_err(ApiError::Client)?;
        Ok(Self::with_client(base_url, client))
    }

    /// Build a facade on a caller-supplied client.
    pub(crate) fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
    }

    fn finish(builder: RequestBuilder) -> Result<Request, ApiError> {
        builder.build().map_err(|err| ApiError::Payload(err.to_string()))
    }

    pub(crate) fn build_get(&self, path: &str) -> Result<Request, ApiError> {
        Self::finish(self.builder(Method::GET, path))
    }

    pub(crate) fn build_get_query<Q>(&self, path: &str, query: &Q) -> Result<Request, ApiError>
    where
        Q: Serialize + ?Sized,
    {
        Self::finish(self.builder(Method::GET, path).query(query))
    }

    pub(crate) fn build_post_empty(&self, path: &str) -> Result<Request, ApiError> {
        Self::finish(self.builder(Method::POST, path))
    }

    pub(crate) fn build_post_json<B>(&self, path: &str, body: &B) -> Result<Request, ApiError>
    where
        B: Serialize + ?Sized,
    {
        Self::finish(self.builder(Method::POST, path).json(body))
    }

    pub(crate) fn build_post_form(&self, path: &str, form: Form) -> Result<Request, ApiError> {
        Self::finish(self.builder(Method::POST, path).multipart(form))
    }

    pub(crate) fn build_put_json<B>(&self, path: &str, body: &B) -> Result<Request, ApiError>
    where
        B: Serialize + ?Sized,
    {
        Self::finish(self.builder(Method::PUT, path).json(body))
    }

    pub(crate) fn build_put_form(&self, path: &str, form: Form) -> Result<Request, ApiError> {
        Self::finish(self.builder(Method::PUT, path).multipart(form))
    }

    pub(crate) fn build_delete(&self, path: &str) -> Result<Request, ApiError> {
        Self::finish(self.builder(Method::DELETE, path))
    }

    /// Execute a built request and decode the 2xx body.
    ///
    /// Non-2xx responses become [`ApiError::Status`] with the body text
    /// passed through untouched.
    pub(crate) async fn run<T>(&self, request: Request) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self
            .client
            .execute(request)
            .await
            .map_err(ApiError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json().await.map_err(ApiError::Decode)
    }
}

/// Turn an attachment into a multipart part with its own content type.
pub(crate) fn file_part(file: MediaFile) -> Result<Part, ApiError> {
    Part::bytes(file.bytes)
        .file_name(file.file_name)
        .mime_str(&file.content_type)
        .map_err(|err| ApiError::Payload(err.to_string()))
}
