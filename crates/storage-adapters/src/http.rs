//! REST client for the portal backend.
//!
//! Routes:
//! - `GET    /api/reviews/{id}`
//! - `DELETE /api/reviews/{id}`
//! - `GET    /api/reviews/{id}/comments`
//! - `POST   /api/reviews/{id}/comments`
//! - `PATCH  /api/comments/{id}`
//! - `DELETE /api/comments/{id}`

use std::time::Duration;

use async_trait::async_trait;
use domains::{
    Comment, CommentId, CommentRepo, DomainError, NewComment, Result, Review, ReviewId, ReviewRepo,
};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, instrument};

pub struct HttpCommentRepo {
    client: Client,
    base_url: String,
    access_token: Option<SecretString>,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Serialize)]
struct ContentPatch<'a> {
    content: &'a str,
}

impl HttpCommentRepo {
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        access_token: Option<SecretString>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Upstream(format!("building HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            access_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.access_token {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => {
                debug!("no access token configured; sending anonymous request");
                builder
            }
        }
    }

    async fn send(&self, builder: RequestBuilder, kind: &str, id: String) -> Result<Response> {
        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| status.to_string());
        Err(match status {
            StatusCode::NOT_FOUND => DomainError::NotFound(kind.to_string(), id),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DomainError::Unauthorized(message),
            _ => DomainError::Upstream(format!("{kind} {id}: {message}")),
        })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| DomainError::Upstream(format!("decoding response: {e}")))
    }
}

fn transport(e: reqwest::Error) -> DomainError {
    DomainError::Upstream(format!("request failed: {e}"))
}

#[async_trait]
impl ReviewRepo for HttpCommentRepo {
    #[instrument(skip(self))]
    async fn get_review(&self, id: ReviewId) -> Result<Review> {
        let req = self.request(Method::GET, &format!("/api/reviews/{id}"));
        let response = self.send(req, "Review", id.to_string()).await?;
        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn delete_review(&self, id: ReviewId) -> Result<()> {
        let req = self.request(Method::DELETE, &format!("/api/reviews/{id}"));
        self.send(req, "Review", id.to_string()).await?;
        Ok(())
    }
}

#[async_trait]
impl CommentRepo for HttpCommentRepo {
    #[instrument(skip(self))]
    async fn list_comments(&self, review_id: ReviewId) -> Result<Vec<Comment>> {
        let req = self.request(Method::GET, &format!("/api/reviews/{review_id}/comments"));
        let response = self.send(req, "Review", review_id.to_string()).await?;
        Self::decode(response).await
    }

    #[instrument(skip(self, comment))]
    async fn create_comment(&self, review_id: ReviewId, comment: NewComment) -> Result<()> {
        let req = self
            .request(Method::POST, &format!("/api/reviews/{review_id}/comments"))
            .json(&comment);
        self.send(req, "Review", review_id.to_string()).await?;
        Ok(())
    }

    #[instrument(skip(self, content))]
    async fn update_comment(&self, id: CommentId, content: String) -> Result<Comment> {
        let req = self
            .request(Method::PATCH, &format!("/api/comments/{id}"))
            .json(&ContentPatch { content: &content });
        let response = self.send(req, "Comment", id.to_string()).await?;
        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn delete_comment(&self, id: CommentId) -> Result<()> {
        let req = self.request(Method::DELETE, &format!("/api/comments/{id}"));
        self.send(req, "Comment", id.to_string()).await?;
        Ok(())
    }
}
