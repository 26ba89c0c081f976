pub mod constraints;
pub mod generator;
pub mod itinerary;
pub mod scoring;
pub mod session;

pub use crate::domain::model::{Activity, ActivityKind, Itinerary, UserInput, Weather};
pub use crate::domain::ports::{
    Explainer, Exporter, MapsProvider, PlacesProvider, Storage, WeatherProvider,
};
pub use crate::utils::error::Result;
