use crate::domain::model::Activity;
use crate::domain::ports::PlacesProvider;
use crate::utils::error::{PlanError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Fixed demo candidates for Ashland, OR.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubPlaces;

#[async_trait]
impl PlacesProvider for StubPlaces {
    async fn sample_candidates(&self) -> Result<Vec<Activity>> {
        Ok(vec![
            Activity::restaurant("Cozy Café").with_cost(25.0).with_minutes(60),
            Activity::park("Lithia Park Walk").with_cost(0.0).with_minutes(45),
        ])
    }
}

/// Candidates listed up front, e.g. in a config file.
#[derive(Debug, Clone, Default)]
pub struct StaticPlaces {
    activities: Vec<Activity>,
}

impl StaticPlaces {
    pub fn new(activities: Vec<Activity>) -> Self {
        Self { activities }
    }
}

#[async_trait]
impl PlacesProvider for StaticPlaces {
    async fn sample_candidates(&self) -> Result<Vec<Activity>> {
        Ok(self.activities.clone())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PlacesPayload {
    List(Vec<Activity>),
    Wrapped { activities: Vec<Activity> },
}

/// Fetches candidates from a JSON endpoint returning either an array of
/// activities or `{"activities": [...]}`.
pub struct HttpPlaces {
    client: Client,
    endpoint: String,
}

impl HttpPlaces {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        Self::with_timeout(endpoint, Self::DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let endpoint = endpoint.into();
        validate_url("places.endpoint", &endpoint)?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl PlacesProvider for HttpPlaces {
    async fn sample_candidates(&self) -> Result<Vec<Activity>> {
        tracing::debug!("Requesting candidates from: {}", self.endpoint);
        let response = self.client.get(&self.endpoint).send().await?;

        tracing::debug!("Places response status: {}", response.status());
        if !response.status().is_success() {
            return Err(PlanError::provider(
                "places",
                format!("{} returned {}", self.endpoint, response.status()),
            ));
        }

        let body = response.bytes().await?;
        let payload: PlacesPayload = serde_json::from_slice(&body)?;
        let activities = match payload {
            PlacesPayload::List(activities) => activities,
            PlacesPayload::Wrapped { activities } => activities,
        };

        tracing::debug!("Received {} candidates", activities.len());
        Ok(activities)
    }
}
