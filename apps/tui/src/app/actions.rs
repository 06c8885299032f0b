use crate::net::JmaClient;
use serde_json::Value;

/// Side-effect boundary between the UI state and the network.
///
/// Fetch failures are recovered here: the error is logged once to stderr
/// and the caller receives an absent value, never an `Err`.
#[derive(Debug)]
pub struct AppActions {
    client: JmaClient,
}

impl AppActions {
    pub fn new() -> Self {
        Self {
            client: JmaClient::new(),
        }
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: JmaClient::with_base_url(base_url),
        }
    }

    pub fn client(&self) -> &JmaClient {
        &self.client
    }

    pub async fn load_area_hierarchy(&self) -> Option<Value> {
        match self.client.fetch_area_hierarchy().await {
            Ok(doc) => Some(doc),
            Err(e) => {
                eprintln!("Error fetching area data: {e}");
                None
            }
        }
    }

    pub async fn load_forecast(&self, area_code: &str) -> Option<Value> {
        match self.client.fetch_forecast(area_code).await {
            Ok(doc) => Some(doc),
            Err(e) => {
                eprintln!("Error fetching forecast data for {area_code}: {e}");
                None
            }
        }
    }
}

impl Default for AppActions {
    fn default() -> Self {
        Self::new()
    }
}
