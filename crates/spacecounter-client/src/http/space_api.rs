//! HTTP client for the space endpoints.
//!
//! Every call is a JSON `POST <server>/api/<namespace>/<operation>` carrying
//! `{ "spaceID": ... }` (key omitted when there is no identifier). Failures are
//! returned as-is; there is no retry.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use spacecounter_core::{RepoResult, SpaceId, SpaceRepository, SyncConfig};
use tracing::debug;

pub const SPACE_EXISTS: &str = "spaceExists";
pub const CREATE_SPACE: &str = "createSpace";

#[derive(Debug, thiserror::Error)]
pub enum SpaceApiError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("{operation} request failed: {source}")]
    Transport {
        operation: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{operation} returned status {status}")]
    Status {
        operation: &'static str,
        status: StatusCode,
    },

    #[error("{operation} returned an unexpected body: {source}")]
    Decode {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Serialize)]
struct SpaceRequest<'a> {
    #[serde(rename = "spaceID", skip_serializing_if = "Option::is_none")]
    space_id: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpaceExistsResponse {
    space_exists: bool,
}

#[derive(Debug, Deserialize)]
struct CreateSpaceResponse {
    #[serde(rename = "spaceID")]
    space_id: String,
}

/// Client for the space server's `spaceExists` / `createSpace` endpoints
#[derive(Clone)]
pub struct HttpSpaceClient {
    config: SyncConfig,
    client: reqwest::Client,
}

impl HttpSpaceClient {
    pub fn new(config: SyncConfig) -> Result<Self, SpaceApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(concat!("spacecounter/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SpaceApiError::Client)?;

        Ok(Self { config, client })
    }

    pub async fn space_exists(&self, space_id: &SpaceId) -> Result<bool, SpaceApiError> {
        let response: SpaceExistsResponse = self.post_json(SPACE_EXISTS, Some(space_id)).await?;
        Ok(response.space_exists)
    }

    pub async fn create_space(&self) -> Result<SpaceId, SpaceApiError> {
        let response: CreateSpaceResponse = self.post_json(CREATE_SPACE, None).await?;
        Ok(SpaceId::new(response.space_id))
    }

    /// POST the space request body and decode the JSON reply.
    ///
    /// The body is decoded regardless of status; a non-2xx status is only
    /// reported when the body doesn't decode either.
    async fn post_json<T: DeserializeOwned>(
        &self,
        operation: &'static str,
        space_id: Option<&SpaceId>,
    ) -> Result<T, SpaceApiError> {
        let url = self.config.api_url(operation);
        debug!(url = %url, space_id = ?space_id.map(SpaceId::as_str), "[SpaceApi] POST {}", operation);

        let response = self
            .client
            .post(&url)
            .json(&SpaceRequest {
                space_id: space_id.map(SpaceId::as_str),
            })
            .send()
            .await
            .map_err(|source| SpaceApiError::Transport { operation, source })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|source| SpaceApiError::Transport { operation, source })?;

        match serde_json::from_slice::<T>(&body) {
            Ok(parsed) => Ok(parsed),
            Err(_) if !status.is_success() => Err(SpaceApiError::Status { operation, status }),
            Err(source) => Err(SpaceApiError::Decode { operation, source }),
        }
    }
}

#[async_trait]
impl SpaceRepository for HttpSpaceClient {
    async fn exists(&self, id: &SpaceId) -> RepoResult<bool> {
        Ok(self.space_exists(id).await?)
    }

    async fn create(&self) -> RepoResult<SpaceId> {
        Ok(self.create_space().await?)
    }
}
