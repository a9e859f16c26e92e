//! Client for the device's HTTP endpoint.
//!
//! The endpoint is an external collaborator; this module is the only place
//! that knows its routes and payload shapes. Failures come back as a tagged
//! [`EndpointError`] so callers can tell a transport fault from a response
//! that parsed as JSON but had the wrong shape.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use shared::{
    domain::SlotIndex,
    protocol::{StatusResponse, StoredRecord, TradeStartRequest, TradeStartResponse},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EndpointError {
    /// Network-level failure: unreachable device, HTTP error status, or a
    /// body that is not JSON at all.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The device answered with JSON of an unexpected shape.
    #[error("unexpected response shape: {0}")]
    Schema(String),
}

impl From<reqwest::Error> for EndpointError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[async_trait]
pub trait DeviceEndpoint: Send + Sync {
    async fn fetch_status(&self) -> Result<StatusResponse, EndpointError>;
    async fn fetch_roster(&self) -> Result<Vec<StoredRecord>, EndpointError>;
    async fn start_trade(&self, slot: SlotIndex) -> Result<TradeStartResponse, EndpointError>;
}

/// [`DeviceEndpoint`] over the device's real HTTP API.
pub struct HttpDeviceEndpoint {
    http: Client,
    device_url: String,
}

impl HttpDeviceEndpoint {
    pub fn new(device_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            device_url: device_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, EndpointError> {
        let body = self
            .http
            .get(format!("{}{path}", self.device_url))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_payload(&body)
    }
}

fn parse_payload<T: DeserializeOwned>(body: &str) -> Result<T, EndpointError> {
    serde_json::from_str(body).map_err(|err| match err.classify() {
        serde_json::error::Category::Data => EndpointError::Schema(err.to_string()),
        _ => EndpointError::Transport(format!("response body is not JSON: {err}")),
    })
}

#[async_trait]
impl DeviceEndpoint for HttpDeviceEndpoint {
    async fn fetch_status(&self) -> Result<StatusResponse, EndpointError> {
        self.get_json("/api/status").await
    }

    async fn fetch_roster(&self) -> Result<Vec<StoredRecord>, EndpointError> {
        self.get_json("/api/pokemon/list").await
    }

    async fn start_trade(&self, slot: SlotIndex) -> Result<TradeStartResponse, EndpointError> {
        let body = self
            .http
            .post(format!("{}/api/trade/start", self.device_url))
            .form(&TradeStartRequest { slot })
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        parse_payload(&body)
    }
}

#[cfg(test)]
#[path = "tests/endpoint_tests.rs"]
mod tests;
