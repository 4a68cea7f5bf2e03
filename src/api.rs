use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::model::{File, FilesResponse, Project, ProjectsResponse};

pub const TOKEN_HEADER: &str = "X-Figma-Token";

/// Requests wait as long as the server takes; large files can be slow to export.
pub const REQUEST_TIMEOUT: Option<Duration> = None;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("request to {url} failed: {source}")]
  Transport {
    url: String,
    #[source]
    source: reqwest::Error
  },
  #[error("{url} answered {status}: {body}")]
  Status {
    url: String,
    status: u16,
    body: String
  },
  #[error("unexpected response body from {url}: {source}")]
  Decode {
    url: String,
    #[source]
    source: serde_json::Error
  },
  #[error("token cannot be sent as a header value")]
  InvalidToken
}

/// The three read-only endpoints this tool needs.
pub trait FigmaApi {
  fn list_projects(&self, team_id: &str, token: &str) -> Result<Vec<Project>, ApiError>;
  fn list_files(&self, project_id: &str, token: &str) -> Result<Vec<File>, ApiError>;
  /// Full document of a file, untouched, so it can be written back out verbatim.
  fn get_file(&self, file_key: &str, token: &str) -> Result<Value, ApiError>;
}

pub struct HttpClient {
  pub base_url: String,
  client: Client
}

impl HttpClient {
  pub fn new(base_url: &str) -> Result<Self, ApiError> {
    let client = Client::builder()
      .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
      .timeout(REQUEST_TIMEOUT)
      .build()
      .map_err(|source| ApiError::Transport { url: base_url.to_string(), source })?;

    Ok(Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      client
    })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/v1/{}", self.base_url, path.trim_start_matches('/'))
  }

  fn get<T: DeserializeOwned>(&self, path: &str, token: &str) -> Result<T, ApiError> {
    let url = self.url(path);
    let mut headers = HeaderMap::new();
    let value = HeaderValue::from_str(token).map_err(|_| ApiError::InvalidToken)?;
    headers.insert(TOKEN_HEADER, value);

    debug!(%url, "GET");
    let resp = self.client
      .get(&url)
      .headers(headers)
      .send()
      .map_err(|source| ApiError::Transport { url: url.clone(), source })?;

    let status = resp.status();
    let body = resp.text().map_err(|source| ApiError::Transport { url: url.clone(), source })?;
    if !status.is_success() {
      return Err(ApiError::Status { url, status: status.as_u16(), body });
    }

    debug!(%url, status = status.as_u16(), bytes = body.len(), "response");
    serde_json::from_str(&body).map_err(|source| ApiError::Decode { url, source })
  }
}

impl FigmaApi for HttpClient {
  fn list_projects(&self, team_id: &str, token: &str) -> Result<Vec<Project>, ApiError> {
    let resp: ProjectsResponse = self.get(&format!("teams/{team_id}/projects"), token)?;
    Ok(resp.projects)
  }

  fn list_files(&self, project_id: &str, token: &str) -> Result<Vec<File>, ApiError> {
    let resp: FilesResponse = self.get(&format!("projects/{project_id}/files"), token)?;
    Ok(resp.files)
  }

  fn get_file(&self, file_key: &str, token: &str) -> Result<Value, ApiError> {
    self.get(&format!("files/{file_key}"), token)
  }
}
