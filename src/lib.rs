pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::storage::LocalStorage;
pub use crate::config::{toml_config::TomlConfig, ConfigProvider};
pub use crate::core::constraints::{BudgetCeiling, Constraint, ConstraintSet};
pub use crate::core::generator::{PlanGenerator, PlannerOptions, SelectionStrategy};
pub use crate::core::itinerary::ItineraryAssembler;
pub use crate::core::scoring::{BudgetFriendlyPolicy, ScoringPolicy};
pub use crate::core::session::{PlanOutcome, PlanSession};
pub use crate::domain::model::{Activity, ActivityKind, Itinerary, UserInput, Weather};
pub use crate::utils::error::{PlanError, Result};
