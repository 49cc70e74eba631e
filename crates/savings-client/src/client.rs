//! Savings API client implementation

use std::time::Duration;

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use savings_core::{Project, ProjectPatch, ProjectView, Settings, SettingsPatch, Totals};

use crate::{Error, Result};

/// Default server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed async client for the Savings Calculator API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Debug, Clone)]
pub struct SavingsClient {
    http: reqwest::Client,
    base: Url,
}

impl SavingsClient {
    /// Create a client for the server at `base_url` (e.g.
    /// `http://localhost:4000`).
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| Error::InvalidUrl {
            url: base_url.to_string(),
            message: e.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(Error::InvalidUrl {
                url: base_url.to_string(),
                message: "URL cannot be a base".to_string(),
            });
        }
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, base })
    }

    /// The server address this client talks to.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `GET /api/settings`
    pub async fn settings(&self) -> Result<Settings> {
        let resp = self.http.get(self.endpoint(&["settings"])?).send().await?;
        decode(resp).await
    }

    /// `POST /api/settings`
    pub async fn update_settings(&self, patch: &SettingsPatch) -> Result<Settings> {
        let resp = self
            .http
            .post(self.endpoint(&["settings"])?)
            .json(patch)
            .send()
            .await?;
        decode(resp).await
    }

    /// `GET /api/projects`
    pub async fn list_projects(&self) -> Result<Vec<ProjectView>> {
        let resp = self.http.get(self.endpoint(&["projects"])?).send().await?;
        decode(resp).await
    }

    /// `GET /api/projects/{id}`
    pub async fn get_project(&self, id: &str) -> Result<ProjectView> {
        let resp = self
            .http
            .get(self.endpoint(&["projects", id])?)
            .send()
            .await?;
        decode(resp).await
    }

    /// `POST /api/projects`: insert, or replace the record with the same id.
    pub async fn upsert_project(&self, project: &Project) -> Result<ProjectView> {
        tracing::debug!(id = %project.id, "Upserting project");
        let resp = self
            .http
            .post(self.endpoint(&["projects"])?)
            .json(project)
            .send()
            .await?;
        decode(resp).await
    }

    /// `PUT /api/projects/{id}`
    pub async fn patch_project(&self, id: &str, patch: &ProjectPatch) -> Result<ProjectView> {
        tracing::debug!(id, "Patching project");
        let resp = self
            .http
            .put(self.endpoint(&["projects", id])?)
            .json(patch)
            .send()
            .await?;
        decode(resp).await
    }

    /// `DELETE /api/projects/{id}`; succeeds whether or not the id existed.
    pub async fn delete_project(&self, id: &str) -> Result<()> {
        tracing::debug!(id, "Deleting project");
        let resp = self
            .http
            .delete(self.endpoint(&["projects", id])?)
            .send()
            .await?;
        let _: Value = decode(resp).await?;
        Ok(())
    }

    /// `GET /api/summary`
    pub async fn summary(&self) -> Result<Totals> {
        let resp = self.http.get(self.endpoint(&["summary"])?).send().await?;
        decode(resp).await
    }

    /// `{base}/api/{segments...}` with each segment percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidUrl {
                url: self.base.to_string(),
                message: "URL cannot be a base".to_string(),
            })?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }
}

/// Decode a success body, or turn an error body into [`Error::Api`].
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }

    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<Value>(&text)
        .ok()
        .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
        .unwrap_or(text);
    tracing::debug!(status = status.as_u16(), %message, "API request failed");
    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}
