use crate::domain::ports::MapsProvider;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Every trip takes the same number of minutes (10 unless configured).
#[derive(Debug, Clone, Copy)]
pub struct StubMaps {
    minutes: u32,
}

impl StubMaps {
    pub fn new(minutes: u32) -> Self {
        Self { minutes }
    }
}

impl Default for StubMaps {
    fn default() -> Self {
        Self::new(10)
    }
}

#[async_trait]
impl MapsProvider for StubMaps {
    async fn travel_minutes(&self, _origin: &str, _destination: &str) -> Result<u32> {
        Ok(self.minutes)
    }
}
