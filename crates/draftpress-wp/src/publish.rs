//! Publish orchestration.
//!
//! Ties the converter and the REST client together: read the source file,
//! split off the title, convert the body to block markup, resolve
//! taxonomies, create or update the remote draft, and persist the
//! file→post-id mapping. Remote calls are sequential and blocking on each
//! await; any failure aborts the publish outright, and taxonomy side
//! effects already applied (created tags) are not rolled back.

use std::path::Path;

use serde::Serialize;
use tokio::fs;
use tracing::info;

use draftpress_blocks::{extract_title, markdown_to_blocks};

use crate::client::{PostDraft, WpClient};
use crate::error::{Error, Result};
use crate::mapping::PostMap;

/// Whether the publish created a new post or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishAction {
    Created,
    Updated,
}

impl PublishAction {
    fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
        }
    }
}

/// Structured result of a successful publish, reported as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct PublishReport {
    pub success: bool,
    pub message: String,
    pub title: String,
    pub post_id: u64,
    pub post_url: String,
    pub edit_url: String,
    pub status: &'static str,
    pub action: PublishAction,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

/// Structured result of a failed publish, reported as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl FailureReport {
    /// Build the failure report for an error. API errors carry the raw
    /// response body as a separate detail field.
    pub fn from_error(err: &Error) -> Self {
        let details = match err {
            Error::Api { body, .. } if !body.is_empty() => Some(body.clone()),
            _ => None,
        };
        Self {
            success: false,
            error: err.to_string(),
            details,
        }
    }
}

/// Publish a markdown file as a WordPress draft, creating or updating the
/// remote post based on the mapping next to the file.
pub async fn publish(client: &WpClient, path: &Path, tag_names: &[String]) -> Result<PublishReport> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Err(Error::not_found(format!("File not found: {}", path.display())));
    }

    let content = fs::read_to_string(path).await?;
    let (title, body) = extract_title(&content);
    let payload = markdown_to_blocks(&body);

    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let dir = dir.unwrap_or_else(|| Path::new("."));
    let mut mapping = PostMap::load(dir).await?;
    let file_key = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| Error::not_found(format!("File not found: {}", path.display())))?;
    let existing = mapping.get(file_key);

    let tags = if tag_names.is_empty() {
        Vec::new()
    } else {
        client.resolve_tags(tag_names).await?
    };
    let category = client.suggest_category().await?;

    let draft = PostDraft {
        title: title.clone(),
        content: payload,
        status: "draft",
        tags,
        categories: category.as_ref().map(|c| vec![c.id]),
    };

    let (post, action) = match existing {
        Some(post_id) => {
            info!(post_id, file = file_key, "updating existing draft");
            (client.update_post(post_id, &draft).await?, PublishAction::Updated)
        }
        None => {
            info!(file = file_key, "creating new draft");
            (client.create_post(&draft).await?, PublishAction::Created)
        }
    };

    mapping.insert(file_key, post.id);
    mapping.save().await?;

    Ok(PublishReport {
        success: true,
        message: format!("Post {} as draft", action.as_str()),
        title,
        post_id: post.id,
        post_url: post.link,
        edit_url: format!(
            "{}/wp-admin/post.php?post={}&action=edit",
            client.base_url(),
            post.id
        ),
        status: "draft",
        action,
        category: category.map(|c| c.name),
        tags: tag_names.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::Credentials;

    fn offline_client() -> WpClient {
        WpClient::new(Credentials {
            base_url: "https://blog.example".to_string(),
            username: "alice".to_string(),
            app_password: "pw".to_string(),
        })
    }

    #[tokio::test]
    async fn test_missing_file_fails_before_any_network_call() {
        let client = offline_client();
        let err = publish(&client, Path::new("/no/such/file.md"), &[])
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(err.to_string().contains("/no/such/file.md"));
    }

    #[test]
    fn test_report_serialization() {
        let report = PublishReport {
            success: true,
            message: "Post created as draft".to_string(),
            title: "My Post".to_string(),
            post_id: 42,
            post_url: "https://blog.example/?p=42".to_string(),
            edit_url: "https://blog.example/wp-admin/post.php?post=42&action=edit".to_string(),
            status: "draft",
            action: PublishAction::Created,
            category: Some("Engineering".to_string()),
            tags: vec!["rust".to_string()],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["action"], "created");
        assert_eq!(json["post_id"], 42);
        assert_eq!(json["category"], "Engineering");
    }

    #[test]
    fn test_failure_report_for_api_error_carries_details() {
        let err = Error::Api {
            status: reqwest::StatusCode::BAD_REQUEST,
            body: "{\"code\":\"rest_invalid_param\"}".to_string(),
        };
        let report = FailureReport::from_error(&err);
        assert!(!report.success);
        assert!(report.error.contains("400"));
        assert_eq!(
            report.details.as_deref(),
            Some("{\"code\":\"rest_invalid_param\"}")
        );
    }

    #[test]
    fn test_failure_report_for_precondition_has_no_details() {
        let err = Error::credentials("WORDPRESS_URL");
        let report = FailureReport::from_error(&err);
        assert!(report.details.is_none());
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("details").is_none());
    }
}
