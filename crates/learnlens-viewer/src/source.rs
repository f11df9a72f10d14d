//! Where learning paths come from.
//!
//! [`PathSource`] is the only seam between the session and the outside world.
//! The viewer ships two implementations: [`HttpPathSource`] posts to the
//! generation backend, [`FilePathSource`] replays a saved response.
//!
//! Every failure is mapped to [`ViewerError::LinkInterrupted`] with a
//! [`TransportCause`] describing what went wrong underneath.

use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, TransportCause, ViewerError};
use crate::path::{GenerateRequest, LearningPath};

/// Produces a learning path for a request.
#[async_trait]
pub trait PathSource: Send + Sync {
    /// Fetches the path for `request`.
    ///
    /// # Errors
    ///
    /// Returns `ViewerError::LinkInterrupted` if no path could be obtained.
    async fn fetch(&self, request: &GenerateRequest) -> Result<LearningPath>;
}

// ============================================================================
// HttpPathSource
// ============================================================================

/// Posts requests to `POST {apiUrl}/api/create-path`.
#[derive(Debug, Clone)]
pub struct HttpPathSource {
    client: Client,
    endpoint: String,
}

impl HttpPathSource {
    /// Creates a source posting to `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Creates a source for the backend named in `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.create_path_url())
    }

    /// The endpoint requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PathSource for HttpPathSource {
    async fn fetch(&self, request: &GenerateRequest) -> Result<LearningPath> {
        debug!(endpoint = %self.endpoint, topic = %request.topic, "Posting generation request");

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| ViewerError::link_interrupted(TransportCause::Network(e.to_string())))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ViewerError::link_interrupted(TransportCause::Status(
                status.as_u16(),
            )));
        }

        response
            .json::<LearningPath>()
            .await
            .map_err(|e| ViewerError::link_interrupted(TransportCause::Decode(e.to_string())))
    }
}

// ============================================================================
// FilePathSource
// ============================================================================

/// Reads a saved `create-path` response from disk, whatever the request.
#[derive(Debug, Clone)]
pub struct FilePathSource {
    path: PathBuf,
}

impl FilePathSource {
    /// Creates a source reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl PathSource for FilePathSource {
    async fn fetch(&self, request: &GenerateRequest) -> Result<LearningPath> {
        debug!(file = %self.path.display(), topic = %request.topic, "Reading saved learning path");

        let contents = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ViewerError::link_interrupted(TransportCause::Source(format!(
                "{}: {e}",
                self.path.display()
            )))
        })?;

        LearningPath::from_json(&contents)
            .map_err(|e| ViewerError::link_interrupted(TransportCause::Decode(e.to_string())))
    }
}
