use std::sync::Arc;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;
use time::PrimitiveDateTime;
use tracing::debug;

use tempo_core::{EntryDraft, Project, ProjectDraft, SegmentType, SegmentTypeDraft, TimeEntry};

use crate::api_url::ApiUrl;
use crate::config::ClientConfig;
use crate::dto::{
    ProjectPayload, ProjectsResponse, SegmentTypePayload, SegmentTypesResponse, TimeEntriesResponse,
    TimeEntryPayload,
};
use crate::session::{CredentialError, TokenProvider, SCOPES};

/// Failures of the repository client, normalized to a single shape.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The identity provider could not supply a credential. No request was
    /// sent.
    #[error("credential error: {0}")]
    Credential(#[from] CredentialError),
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("api error: status {status}{}", .message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Api { status: u16, message: Option<String> },
    /// The response body could not be decoded.
    #[error("failed to parse response: {0}")]
    Parsing(String),
}

/// Repository client for time entries, projects, and segment types.
///
/// Constructed from an explicit session (the token provider) rather than
/// ambient state; every request acquires a bearer credential before it is
/// sent. The client never retries — a failure surfaces immediately and the
/// caller decides whether to offer a manual retry.
pub struct TimesheetClient {
    http: Client,
    base_url: ApiUrl,
    audience: String,
    tokens: Arc<dyn TokenProvider>,
}

impl TimesheetClient {
    pub fn new(
        config: &ClientConfig,
        tokens: Arc<dyn TokenProvider>,
    ) -> Result<Self, ClientError> {
        let http = Client::builder()
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: ApiUrl::new(config.api_url.trim_end_matches('/')),
            audience: config.audience.clone(),
            tokens,
        })
    }

    fn endpoint(&self, path: &str) -> ApiUrl {
        self.base_url.append_path(path)
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response, ClientError> {
        let token = self.tokens.access_token(&self.audience, SCOPES).await?;

        debug!(call = call_name, "sending request");
        let response = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ClientError::Transport(format!("{}: {}", call_name, e)))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.ok().filter(|body| !body.is_empty());
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, ClientError> {
        let response = self.send(request, call_name).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Parsing(format!("{}: {}", call_name, e)))
    }

    async fn send_without_body(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<(), ClientError> {
        let response = self.send(request, call_name).await?;
        let _ = response.bytes().await;
        Ok(())
    }

    /// Time entries inside the inclusive datetime window.
    pub async fn time_entries(
        &self,
        from: PrimitiveDateTime,
        to: PrimitiveDateTime,
    ) -> Result<Vec<TimeEntry>, ClientError> {
        let url = self.endpoint("/api/me/timeentries").with_window(from, to);
        let response: TimeEntriesResponse = self
            .get_json(self.http.get(url.as_ref()), "GET /api/me/timeentries")
            .await?;
        Ok(response.time_entries)
    }

    pub async fn create_time_entry(&self, draft: &EntryDraft) -> Result<(), ClientError> {
        let url = self.endpoint("/api/me/timeentries");
        self.send_without_body(
            self.http
                .post(url.as_ref())
                .json(&TimeEntryPayload::from(draft)),
            "POST /api/me/timeentries",
        )
        .await
    }

    /// Replace every mutable field of an entry.
    pub async fn update_time_entry(&self, id: i64, draft: &EntryDraft) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("/api/me/timeentries/{}", id));
        self.send_without_body(
            self.http
                .put(url.as_ref())
                .json(&TimeEntryPayload::from(draft)),
            "PUT /api/me/timeentries/:id",
        )
        .await
    }

    /// Delete an entry. This is the one hard delete in the API; the caller
    /// is expected to have confirmed it with the user.
    pub async fn delete_time_entry(&self, id: i64) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("/api/me/timeentries/{}", id));
        self.send_without_body(self.http.delete(url.as_ref()), "DELETE /api/me/timeentries/:id")
            .await
    }

    /// Project codes filtered by visibility.
    pub async fn projects(&self, visible: bool) -> Result<Vec<Project>, ClientError> {
        let url = self.endpoint("/api/me/projects").with_visibility(visible);
        let response: ProjectsResponse = self
            .get_json(self.http.get(url.as_ref()), "GET /api/me/projects")
            .await?;
        Ok(response.projects)
    }

    pub async fn create_project(&self, draft: &ProjectDraft) -> Result<(), ClientError> {
        let url = self.endpoint("/api/me/projects");
        self.send_without_body(
            self.http
                .post(url.as_ref())
                .json(&ProjectPayload::from(draft)),
            "POST /api/me/projects",
        )
        .await
    }

    /// Replace a project; visibility toggling is an update with the flag
    /// flipped.
    pub async fn update_project(&self, id: i64, draft: &ProjectDraft) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("/api/me/projects/{}", id));
        self.send_without_body(
            self.http
                .put(url.as_ref())
                .json(&ProjectPayload::from(draft)),
            "PUT /api/me/projects/:id",
        )
        .await
    }

    /// Segment types filtered by visibility.
    pub async fn segment_types(&self, visible: bool) -> Result<Vec<SegmentType>, ClientError> {
        let url = self.endpoint("/api/me/segmenttypes").with_visibility(visible);
        let response: SegmentTypesResponse = self
            .get_json(self.http.get(url.as_ref()), "GET /api/me/segmenttypes")
            .await?;
        Ok(response.segment_types)
    }

    pub async fn create_segment_type(&self, draft: &SegmentTypeDraft) -> Result<(), ClientError> {
        let url = self.endpoint("/api/me/segmenttypes");
        self.send_without_body(
            self.http
                .post(url.as_ref())
                .json(&SegmentTypePayload::from(draft)),
            "POST /api/me/segmenttypes",
        )
        .await
    }

    pub async fn update_segment_type(
        &self,
        id: i64,
        draft: &SegmentTypeDraft,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&format!("/api/me/segmenttypes/{}", id));
        self.send_without_body(
            self.http
                .put(url.as_ref())
                .json(&SegmentTypePayload::from(draft)),
            "PUT /api/me/segmenttypes/:id",
        )
        .await
    }
}
