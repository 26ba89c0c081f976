use crate::domain::model::Weather;
use crate::domain::ports::WeatherProvider;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Reports the same conditions everywhere. Defaults to clouds.
#[derive(Debug, Clone, Copy)]
pub struct StubWeather {
    weather: Weather,
}

impl StubWeather {
    pub fn new(weather: Weather) -> Self {
        Self { weather }
    }
}

impl Default for StubWeather {
    fn default() -> Self {
        Self::new(Weather::Clouds)
    }
}

#[async_trait]
impl WeatherProvider for StubWeather {
    async fn summary(&self, location: &str) -> Result<Weather> {
        tracing::debug!("Stub weather for {}: {}", location, self.weather);
        Ok(self.weather)
    }
}
