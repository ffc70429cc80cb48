//! WordPress REST API client.
//!
//! Thin wrapper over `reqwest` for the three resources a publish touches:
//! tags (search-or-create), categories (suggestion listing), and posts
//! (create or update). All calls use basic auth with the application
//! password. There is no retry or timeout policy; any transport failure or
//! non-success status aborts the publish.

use reqwest::{RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::credentials::Credentials;
use crate::error::{Error, Result};

/// A draft post as sent to the posts resource.
#[derive(Debug, Clone, Serialize)]
pub struct PostDraft {
    /// Post title.
    pub title: String,
    /// Gutenberg block payload.
    pub content: String,
    /// Always "draft"; published posts are out of scope.
    pub status: &'static str,
    /// Resolved tag ids, omitted when empty.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<u64>,
    /// Suggested category id, omitted when none was found.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<u64>>,
}

/// The fields of a post response the publish flow consumes.
#[derive(Debug, Clone, Deserialize)]
pub struct PostResponse {
    /// Remote post identifier.
    pub id: u64,
    /// Public link to the post.
    pub link: String,
}

/// A tag or category term as returned by the term listings.
#[derive(Debug, Clone, Deserialize)]
pub struct Term {
    /// Term identifier.
    pub id: u64,
    /// Term display name.
    pub name: String,
}

/// Client for a single WordPress site.
pub struct WpClient {
    creds: Credentials,
    client: reqwest::Client,
}

impl WpClient {
    /// Create a client from resolved credentials.
    pub fn new(creds: Credentials) -> Self {
        Self {
            creds,
            client: reqwest::Client::new(),
        }
    }

    /// Site base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.creds.base_url
    }

    /// Build a REST endpoint URL under `/wp-json/wp/v2/`.
    fn api_url(&self, resource: &str) -> String {
        format!("{}/wp-json/wp/v2/{}", self.creds.base_url, resource)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.basic_auth(&self.creds.username, Some(&self.creds.app_password))
    }

    /// Resolve tag names to ids, creating tags that do not exist yet.
    ///
    /// Resolution is best effort: a tag whose search and create calls both
    /// come back non-success is skipped with a warning rather than
    /// aborting the publish. Transport failures still abort.
    pub async fn resolve_tags(&self, names: &[String]) -> Result<Vec<u64>> {
        let mut ids = Vec::new();

        for name in names {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }

            let response = self
                .authed(self.client.get(self.api_url("tags")))
                .query(&[("search", name)])
                .send()
                .await?;

            if response.status().is_success() {
                let existing: Vec<Term> = response.json().await?;
                if let Some(tag) = existing
                    .iter()
                    .find(|t| t.name.to_lowercase() == name.to_lowercase())
                {
                    debug!(tag = name, id = tag.id, "found existing tag");
                    ids.push(tag.id);
                    continue;
                }
            }

            let response = self
                .authed(self.client.post(self.api_url("tags")))
                .json(&serde_json::json!({ "name": name }))
                .send()
                .await?;

            if response.status() == StatusCode::CREATED {
                let created: Term = response.json().await?;
                debug!(tag = name, id = created.id, "created tag");
                ids.push(created.id);
            } else {
                warn!(tag = name, status = %response.status(), "tag not resolved, skipping");
            }
        }

        Ok(ids)
    }

    /// Suggest a category: the first listed category whose name is not
    /// "uncategorized", else the first listed one. Returns `None` (with a
    /// warning) when the listing fails or is empty.
    pub async fn suggest_category(&self) -> Result<Option<Term>> {
        let response = self
            .authed(self.client.get(self.api_url("categories")))
            .query(&[("per_page", "10")])
            .send()
            .await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "category listing failed, publishing without one");
            return Ok(None);
        }

        let categories: Vec<Term> = response.json().await?;
        let suggestion = categories
            .iter()
            .find(|c| c.name.to_lowercase() != "uncategorized")
            .or_else(|| categories.first())
            .cloned();

        Ok(suggestion)
    }

    /// Create a new draft post.
    pub async fn create_post(&self, draft: &PostDraft) -> Result<PostResponse> {
        self.write_post(self.api_url("posts"), draft).await
    }

    /// Update an existing post in place.
    pub async fn update_post(&self, post_id: u64, draft: &PostDraft) -> Result<PostResponse> {
        self.write_post(self.api_url(&format!("posts/{post_id}")), draft)
            .await
    }

    async fn write_post(&self, url: String, draft: &PostDraft) -> Result<PostResponse> {
        let response = self
            .authed(self.client.post(url))
            .json(draft)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> WpClient {
        WpClient::new(Credentials {
            base_url: "https://blog.example".to_string(),
            username: "alice".to_string(),
            app_password: "pw".to_string(),
        })
    }

    #[test]
    fn test_api_url() {
        let client = test_client();
        assert_eq!(
            client.api_url("tags"),
            "https://blog.example/wp-json/wp/v2/tags"
        );
        assert_eq!(
            client.api_url("posts/42"),
            "https://blog.example/wp-json/wp/v2/posts/42"
        );
    }

    #[test]
    fn test_draft_serialization_skips_empty_taxonomies() {
        let draft = PostDraft {
            title: "T".to_string(),
            content: "<!-- wp:paragraph -->".to_string(),
            status: "draft",
            tags: vec![],
            categories: None,
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["status"], "draft");
        assert!(json.get("tags").is_none());
        assert!(json.get("categories").is_none());
    }

    #[test]
    fn test_draft_serialization_includes_taxonomies() {
        let draft = PostDraft {
            title: "T".to_string(),
            content: String::new(),
            status: "draft",
            tags: vec![3, 9],
            categories: Some(vec![7]),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["tags"], serde_json::json!([3, 9]));
        assert_eq!(json["categories"], serde_json::json!([7]));
    }

    // Live integration test (requires real credentials, run manually).
    #[tokio::test]
    #[ignore]
    async fn test_suggest_category_integration() {
        let creds = Credentials::resolve().expect("credentials must be set");
        let client = WpClient::new(creds);
        let suggestion = client.suggest_category().await.unwrap();
        println!("suggested category: {suggestion:?}");
    }
}
