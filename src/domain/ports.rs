use crate::domain::model::{Activity, Itinerary, UserInput, Weather};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of candidate activities (points of interest).
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn sample_candidates(&self) -> Result<Vec<Activity>>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn summary(&self, location: &str) -> Result<Weather>;
}

#[async_trait]
pub trait MapsProvider: Send + Sync {
    async fn travel_minutes(&self, origin: &str, destination: &str) -> Result<u32>;
}

pub trait InputCollector: Send + Sync {
    fn collect(&self) -> Result<UserInput>;
}

/// Renders a built itinerary into a document. Must not mutate it.
pub trait Exporter: Send + Sync {
    fn export(&self, itinerary: &Itinerary) -> Result<Vec<u8>>;
    fn file_name(&self) -> &str;
}

pub trait Explainer: Send + Sync {
    fn explain(&self, itinerary: &Itinerary) -> String;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}
