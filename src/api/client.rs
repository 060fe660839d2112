//! HTTP client for the posts collection

use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::Value;

use crate::common::{Error, Result};

use super::types::{NewPost, Post, PostPatch};

/// A response as received: status plus the undecoded body
///
/// The body is only parsed on request, so a check can assert on the
/// status of an error page that is not JSON.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub url: String,
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Decode the body as JSON; an empty body decodes to `Value::Null`
    pub fn json(&self) -> Result<Value> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&self.body).map_err(|e| Error::invalid_body(&self.url, &e))
    }
}

/// Client for `{base_url}/posts` and `{base_url}/posts/{id}`
#[derive(Debug, Clone)]
pub struct PostsClient {
    http: reqwest::Client,
    base_url: String,
}

impl PostsClient {
    /// Build a client; `timeout` of `None` keeps reqwest's default
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(Error::ClientBuild)?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn collection_url(&self) -> String {
        format!("{}/posts", self.base_url)
    }

    pub fn item_url(&self, id: u64) -> String {
        format!("{}/posts/{}", self.base_url, id)
    }

    /// GET the whole collection
    pub async fn list(&self) -> Result<ApiResponse> {
        let url = self.collection_url();
        self.send(Method::GET, &url, |req| req).await
    }

    /// GET one post
    pub async fn get(&self, id: u64) -> Result<ApiResponse> {
        let url = self.item_url(id);
        self.send(Method::GET, &url, |req| req).await
    }

    /// POST a new post to the collection
    pub async fn create(&self, post: &NewPost) -> Result<ApiResponse> {
        let url = self.collection_url();
        self.send(Method::POST, &url, |req| req.json(post)).await
    }

    /// PUT a full record at `post.id`
    pub async fn replace(&self, post: &Post) -> Result<ApiResponse> {
        let url = self.item_url(post.id);
        self.send(Method::PUT, &url, |req| req.json(post)).await
    }

    /// PATCH the given fields of one post
    pub async fn patch(&self, id: u64, patch: &PostPatch) -> Result<ApiResponse> {
        let url = self.item_url(id);
        self.send(Method::PATCH, &url, |req| req.json(patch)).await
    }

    /// DELETE one post
    pub async fn delete(&self, id: u64) -> Result<ApiResponse> {
        let url = self.item_url(id);
        self.send(Method::DELETE, &url, |req| req).await
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        build: impl FnOnce(RequestBuilder) -> RequestBuilder,
    ) -> Result<ApiResponse> {
        tracing::debug!(%method, url, "sending request");

        let response = build(self.http.request(method.clone(), url))
            .send()
            .await
            .map_err(|e| Error::transport(&e))?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| Error::transport(&e))?;

        tracing::debug!(
            %method,
            url,
            status = status.as_u16(),
            len = bytes.len(),
            "received response"
        );

        Ok(ApiResponse {
            url: url.to_string(),
            status,
            body: bytes.to_vec(),
        })
    }
}
