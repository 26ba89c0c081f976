pub mod toml_config;

use crate::adapters::export::ExportFormat;
use crate::core::constraints::Setting;
use crate::core::generator::PlannerOptions;
use crate::core::scoring::PolicyKind;
use crate::domain::model::{Activity, UserInput, Weather};
use std::time::Duration;

#[cfg(feature = "cli")]
use crate::core::generator::SelectionStrategy;
#[cfg(feature = "cli")]
use crate::domain::model::{BudgetLevel, Mode};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{
    validate_iso_datetime, validate_non_empty_string, validate_non_negative, validate_path,
    validate_positive_number, validate_url, Validate,
};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// Where candidate activities come from.
#[derive(Debug, Clone, PartialEq)]
pub enum PlacesSource {
    Stub,
    Static(Vec<Activity>),
    Http { endpoint: String, timeout: Duration },
}

/// Everything needed to wire a planner, whichever front-end supplied it.
pub trait ConfigProvider: Send + Sync {
    fn user_input(&self) -> Option<UserInput>;
    fn planner_options(&self) -> PlannerOptions;
    fn policy(&self) -> PolicyKind;
    fn max_cost(&self) -> Option<f64>;
    fn max_minutes(&self) -> Option<u32>;
    fn setting(&self) -> Option<Setting>;
    fn places_source(&self) -> PlacesSource;
    fn stub_weather(&self) -> Weather;
    fn stub_travel_minutes(&self) -> u32;
    fn export_format(&self) -> ExportFormat;
    fn output_path(&self) -> &str;
    fn monitoring_enabled(&self) -> bool;
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "date-planner")]
#[command(about = "Plan a short outing from a handful of candidate activities")]
pub struct CliConfig {
    #[arg(long, help = "Load settings from a TOML file instead of flags")]
    pub config: Option<String>,

    #[arg(long, help = "Where the outing starts; enables weather-aware ranking")]
    pub location: Option<String>,

    #[arg(long, help = "ISO-8601 start time (defaults to now)")]
    pub datetime: Option<String>,

    #[arg(long, value_enum, default_value = "medium")]
    pub budget: BudgetLevel,

    #[arg(long, value_delimiter = ',')]
    pub accessibility: Vec<String>,

    #[arg(long, value_enum, default_value = "romantic")]
    pub mode: Mode,

    #[arg(long)]
    pub atmosphere: Option<String>,

    #[arg(long, help = "Per-activity cost ceiling")]
    pub max_cost: Option<f64>,

    #[arg(long, help = "Per-activity duration limit in minutes")]
    pub max_minutes: Option<u32>,

    #[arg(long, value_enum)]
    pub setting: Option<Setting>,

    #[arg(long, value_enum, default_value = "budget-friendly")]
    pub policy: PolicyKind,

    #[arg(long, value_enum, default_value = "ranked")]
    pub selection: SelectionStrategy,

    #[arg(long, default_value = "3")]
    pub max_items: usize,

    #[arg(long, default_value = "6")]
    pub working_set: usize,

    #[arg(long, help = "JSON endpoint returning candidate activities")]
    pub places_endpoint: Option<String>,

    #[arg(long, default_value = "10")]
    pub places_timeout_seconds: u64,

    #[arg(long, value_enum, default_value = "clouds")]
    pub weather: Weather,

    #[arg(long, default_value = "10")]
    pub travel_minutes: u32,

    #[arg(long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log stage timings and memory use")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn user_input(&self) -> Option<UserInput> {
        let location = self.location.clone()?;
        let datetime = self
            .datetime
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format("%Y-%m-%dT%H:%M:%S").to_string());

        Some(UserInput {
            location,
            datetime,
            budget_level: self.budget,
            accessibility_needs: self.accessibility.iter().cloned().collect(),
            mode: self.mode,
            preferred_atmosphere: self.atmosphere.clone(),
        })
    }

    fn planner_options(&self) -> PlannerOptions {
        PlannerOptions {
            working_set: self.working_set,
            max_items: self.max_items,
            selection: self.selection,
        }
    }

    fn policy(&self) -> PolicyKind {
        self.policy
    }

    fn max_cost(&self) -> Option<f64> {
        self.max_cost
    }

    fn max_minutes(&self) -> Option<u32> {
        self.max_minutes
    }

    fn setting(&self) -> Option<Setting> {
        self.setting
    }

    fn places_source(&self) -> PlacesSource {
        match &self.places_endpoint {
            Some(endpoint) => PlacesSource::Http {
                endpoint: endpoint.clone(),
                timeout: Duration::from_secs(self.places_timeout_seconds),
            },
            None => PlacesSource::Stub,
        }
    }

    fn stub_weather(&self) -> Weather {
        self.weather
    }

    fn stub_travel_minutes(&self) -> u32 {
        self.travel_minutes
    }

    fn export_format(&self) -> ExportFormat {
        self.format
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitor
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;
        validate_positive_number("max_items", self.max_items, 1)?;
        validate_positive_number("working_set", self.working_set, 1)?;

        if let Some(location) = &self.location {
            validate_non_empty_string("location", location)?;
        }
        if let Some(datetime) = &self.datetime {
            validate_iso_datetime("datetime", datetime)?;
        }
        if let Some(max_cost) = self.max_cost {
            validate_non_negative("max_cost", max_cost)?;
        }
        if let Some(endpoint) = &self.places_endpoint {
            validate_url("places_endpoint", endpoint)?;
        }
        Ok(())
    }
}
