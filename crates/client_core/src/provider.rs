use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::debug;

use shared::{
    domain::UserId,
    protocol::{AccessGroupsRequest, GroupItem, RecommendationResult},
};

/// Fixed logical endpoint path, appended to the configured base URL.
pub const ACCESS_GROUPS_PATH: &str = "/api/access-groups";

/// Delay before the canned payload is served in place of a failed live
/// call. Matches the reference demo timing.
pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_millis(1500);

/// Ways a fetch can fail. The workflow treats them all the same; the
/// distinction exists for logs and tests.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("failed to reach recommendation endpoint: {0}")]
    Transport(String),
    #[error("recommendation endpoint returned status {0}")]
    Status(u16),
    #[error("invalid recommendation payload: {0}")]
    InvalidPayload(String),
    #[error("no recommendation endpoint configured")]
    Unconfigured,
}

/// Capability that turns an identifier into a recommendation. The
/// workflow never cares which implementation answers.
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    async fn fetch(&self, user_id: &UserId) -> Result<RecommendationResult, ProviderError>;
}

/// Stand-in when no endpoint is configured; every fetch fails, which
/// routes the workflow onto its fallback path.
pub struct MissingRecommendationProvider;

#[async_trait]
impl RecommendationProvider for MissingRecommendationProvider {
    async fn fetch(&self, _user_id: &UserId) -> Result<RecommendationResult, ProviderError> {
        Err(ProviderError::Unconfigured)
    }
}

/// Live endpoint client. Posts the trimmed identifier as JSON and
/// decodes the response body; any non-success status or transport
/// failure maps to a uniform error with no per-status handling.
pub struct HttpRecommendationProvider {
    http: Client,
    base_url: String,
}

impl HttpRecommendationProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RecommendationProvider for HttpRecommendationProvider {
    async fn fetch(&self, user_id: &UserId) -> Result<RecommendationResult, ProviderError> {
        let url = format!("{}{ACCESS_GROUPS_PATH}", self.base_url.trim_end_matches('/'));
        debug!(user_id = %user_id, %url, "recommendation: posting access-group request");

        let response = self
            .http
            .post(url)
            .json(&AccessGroupsRequest {
                user_id: user_id.clone(),
            })
            .send()
            .await
            .map_err(|err| ProviderError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        response
            .json()
            .await
            .map_err(|err| ProviderError::InvalidPayload(err.to_string()))
    }
}

/// Serves the fixed demo payload after a simulated service delay.
/// Stands behind the same interface as the live provider, so swapping
/// one for the other never touches the workflow state machine.
pub struct StaticFallbackProvider {
    delay: Duration,
    template: RecommendationResult,
}

impl StaticFallbackProvider {
    pub fn new(delay: Duration, template: RecommendationResult) -> Self {
        Self { delay, template }
    }

    /// The demo payload at the reference timing.
    pub fn demo() -> Self {
        Self::new(DEFAULT_FALLBACK_DELAY, demo_payload())
    }

    pub fn demo_with_delay(delay: Duration) -> Self {
        Self::new(delay, demo_payload())
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl RecommendationProvider for StaticFallbackProvider {
    async fn fetch(&self, user_id: &UserId) -> Result<RecommendationResult, ProviderError> {
        tokio::time::sleep(self.delay).await;
        let mut result = self.template.clone();
        result.user_id = user_id.clone();
        Ok(result)
    }
}

/// The canned Finance-department payload served when the live endpoint
/// is unavailable. The identifier is filled in per request.
pub fn demo_payload() -> RecommendationResult {
    RecommendationResult {
        user_id: UserId(String::new()),
        department: "Finance".to_string(),
        essential: vec![
            GroupItem::new("VS Code"),
            GroupItem::new("Xcode"),
            GroupItem::new("Postman"),
            GroupItem::new("AWS CLI"),
        ],
        optional: vec![
            GroupItem::new("Node Package Manager"),
            GroupItem::new("Figma"),
            GroupItem::new("Adobe Illustrator"),
            GroupItem::new("Google Classroom"),
            GroupItem::new("Terraform"),
            GroupItem::ai_suggested("DB Access"),
            GroupItem::ai_suggested("Databrick Access"),
        ],
    }
}

#[cfg(test)]
#[path = "tests/provider_tests.rs"]
mod tests;
