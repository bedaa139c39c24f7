use std::sync::Arc;

use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::core::config::BugzillaConfig;
use crate::core::error::{BugzillaRestError, Result};
use crate::features::attachments::models::{AttachmentSubmission, SubmissionBuilder};
use crate::features::attachments::services::{
    classify_response, AttachmentRequestBuilder, FlagEncoder,
};
use crate::modules::source::{read_source, AttachmentSource};

/// Client for the Bugzilla REST attachment endpoint
pub struct BugzillaRestClient {
    http_client: reqwest::Client,
    base_url: String,
    request_builder: AttachmentRequestBuilder,
}

impl BugzillaRestClient {
    pub fn new(config: BugzillaConfig) -> Result<Self> {
        let request_builder = AttachmentRequestBuilder::new(config.credentials.clone());
        Self::build(config, request_builder)
    }

    pub fn with_flag_encoder(
        config: BugzillaConfig,
        flag_encoder: Arc<dyn FlagEncoder>,
    ) -> Result<Self> {
        let request_builder =
            AttachmentRequestBuilder::with_flag_encoder(config.credentials.clone(), flag_encoder);
        Self::build(config, request_builder)
    }

    fn build(config: BugzillaConfig, request_builder: AttachmentRequestBuilder) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| BugzillaRestError::Config(format!("Failed to build HTTP client: {}", e)))?;

        tracing::debug!(
            "Bugzilla REST client for {} (anonymous: {})",
            config.base_url,
            config.credentials.is_anonymous()
        );

        Ok(Self {
            http_client,
            base_url: config.base_url,
            request_builder,
        })
    }

    /// POST one attachment and return the ids the server created
    pub async fn post_attachment(&self, submission: &AttachmentSubmission) -> Result<Vec<u64>> {
        let request = self.request_builder.build(submission)?;
        let url = format!("{}{}", self.base_url, request.path);

        tracing::info!(
            "Posting attachment '{}' to bug {}",
            submission.file_name(),
            submission.bug_id()
        );

        let response = self
            .http_client
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(request.body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Attachment request to {} failed: {}", url, e);
                BugzillaRestError::Transport(e)
            })?;

        let status = response.status().as_u16();
        let path = response.url().path().to_string();
        let body = response.bytes().await.map_err(|e| {
            tracing::error!("Failed to read response body from {}: {}", url, e);
            BugzillaRestError::Transport(e)
        })?;

        let result = classify_response(status, &path, &body);
        if result.is_success() {
            tracing::info!("Bugzilla accepted attachment for bug {}", submission.bug_id());
        } else {
            tracing::warn!("Attachment submission to {} failed: {:?}", path, result);
        }

        result.into_result()
    }

    /// Validate metadata, buffer the source on the blocking pool, then post it
    pub async fn submit(
        &self,
        builder: SubmissionBuilder,
        source: Arc<dyn AttachmentSource>,
    ) -> Result<Vec<u64>> {
        builder.check()?;

        let data = tokio::task::spawn_blocking(move || read_source(&*source))
            .await
            .map_err(|e| {
                tracing::error!("Reading attachment source did not complete: {}", e);
                BugzillaRestError::Join(e)
            })??;

        let submission = builder.build(data)?;
        self.post_attachment(&submission).await
    }
}
