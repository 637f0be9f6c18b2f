//! Read-only client for the kiosk backend.

use std::time::Duration;

use reqwest::{Client, Url};
use room_grid::{FetchError, RoomList, RoomSchedule};

const ROOMS_PATH: &str = "api/get-rooms/";

/// HTTP client bound to one backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    client: Client,
}

impl ApiClient {
    /// A zero `timeout` means requests never time out.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut base = Url::parse(base_url)
            .map_err(|e| anyhow::anyhow!("Invalid base URL '{}': {}", base_url, e))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let mut builder = Client::builder();
        if !timeout.is_zero() {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self { base, client })
    }

    pub fn rooms_url(&self) -> Result<Url, FetchError> {
        self.base
            .join(ROOMS_PATH)
            .map_err(|e| FetchError::Transport(e.to_string()))
    }

    pub fn schedule_url(&self, room_id: u64) -> Result<Url, FetchError> {
        self.base
            .join(&format!("api/room-schedule/{}/", room_id))
            .map_err(|e| FetchError::Transport(e.to_string()))
    }

    async fn get_text(&self, url: Url) -> Result<String, FetchError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }
        response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))
    }

    pub async fn rooms(&self) -> Result<RoomList, FetchError> {
        let body = self.get_text(self.rooms_url()?).await?;
        Ok(RoomList::from_json(&body)?)
    }

    pub async fn room_schedule(&self, room_id: u64) -> Result<RoomSchedule, FetchError> {
        let body = self.get_text(self.schedule_url(room_id)?).await?;
        Ok(RoomSchedule::from_json(&body)?)
    }
}
