use crate::adapters::export::ExportFormat;
use crate::config::{ConfigProvider, PlacesSource};
use crate::core::constraints::Setting;
use crate::core::generator::{PlannerOptions, SelectionStrategy};
use crate::core::scoring::PolicyKind;
use crate::domain::model::{Activity, UserInput, Weather};
use crate::utils::error::{PlanError, Result};
use crate::utils::validation::{
    validate_non_negative, validate_path, validate_positive_number, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub planner: PlannerSection,
    pub input: Option<UserInput>,
    #[serde(default)]
    pub constraints: ConstraintsSection,
    #[serde(default)]
    pub places: PlacesSection,
    #[serde(default)]
    pub providers: ProvidersSection,
    #[serde(default)]
    pub output: OutputSection,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerSection {
    pub max_items: usize,
    pub working_set: usize,
    pub selection: SelectionStrategy,
    pub policy: PolicyKind,
}

impl Default for PlannerSection {
    fn default() -> Self {
        let options = PlannerOptions::default();
        Self {
            max_items: options.max_items,
            working_set: options.working_set,
            selection: options.selection,
            policy: PolicyKind::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConstraintsSection {
    pub max_cost: Option<f64>,
    pub max_minutes: Option<u32>,
    pub setting: Option<Setting>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacesKind {
    #[default]
    Stub,
    Static,
    Http,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlacesSection {
    #[serde(default)]
    pub source: PlacesKind,
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersSection {
    pub weather: Weather,
    pub travel_minutes: u32,
}

impl Default for ProvidersSection {
    fn default() -> Self {
        Self {
            weather: Weather::Clouds,
            travel_minutes: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub path: String,
    pub format: ExportFormat,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: "./output".to_string(),
            format: ExportFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PlanError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PlanError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unset variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PlanError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("output.path", &self.output.path)?;
        validate_positive_number("planner.max_items", self.planner.max_items, 1)?;
        validate_positive_number("planner.working_set", self.planner.working_set, 1)?;

        if let Some(input) = &self.input {
            input.validate()?;
        }

        if let Some(max_cost) = self.constraints.max_cost {
            validate_non_negative("constraints.max_cost", max_cost)?;
        }

        match self.places.source {
            PlacesKind::Http => {
                let endpoint = crate::utils::validation::validate_required_field(
                    "places.endpoint",
                    &self.places.endpoint,
                )?;
                validate_url("places.endpoint", endpoint)?;
            }
            PlacesKind::Static => {
                for activity in &self.places.activities {
                    activity.validate()?;
                }
            }
            PlacesKind::Stub => {}
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn user_input(&self) -> Option<UserInput> {
        self.input.clone()
    }

    fn planner_options(&self) -> PlannerOptions {
        PlannerOptions {
            working_set: self.planner.working_set,
            max_items: self.planner.max_items,
            selection: self.planner.selection,
        }
    }

    fn policy(&self) -> PolicyKind {
        self.planner.policy
    }

    fn max_cost(&self) -> Option<f64> {
        self.constraints.max_cost
    }

    fn max_minutes(&self) -> Option<u32> {
        self.constraints.max_minutes
    }

    fn setting(&self) -> Option<Setting> {
        self.constraints.setting
    }

    fn places_source(&self) -> PlacesSource {
        match self.places.source {
            PlacesKind::Stub => PlacesSource::Stub,
            PlacesKind::Static => PlacesSource::Static(self.places.activities.clone()),
            PlacesKind::Http => PlacesSource::Http {
                endpoint: self.places.endpoint.clone().unwrap_or_default(),
                timeout: Duration::from_secs(self.places.timeout_seconds.unwrap_or(10)),
            },
        }
    }

    fn stub_weather(&self) -> Weather {
        self.providers.weather
    }

    fn stub_travel_minutes(&self) -> u32 {
        self.providers.travel_minutes
    }

    fn export_format(&self) -> ExportFormat {
        self.output.format
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BudgetLevel, Mode};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert!(config.validate().is_ok());
        assert_eq!(config.planner_options(), PlannerOptions::default());
        assert_eq!(config.policy(), PolicyKind::BudgetFriendly);
        assert_eq!(config.places_source(), PlacesSource::Stub);
        assert_eq!(config.user_input(), None);
        assert_eq!(config.output_path(), "./output");
        assert!(!config.monitoring_enabled());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[planner]
max_items = 2
working_set = 4
selection = "input_order"
policy = "weather_aware"

[input]
location = "Ashland, OR"
datetime = "2025-11-01T19:00:00"
budget_level = "low"
accessibility_needs = ["wheelchair"]
mode = "platonic"

[constraints]
max_cost = 30.0
max_minutes = 90
setting = "indoor"

[places]
source = "static"

[[places.activities]]
name = "Cozy Café"
kind = "restaurant"
estimated_cost = 25.0
typical_minutes = 60

[[places.activities]]
name = "Schneider Museum"
kind = "museum"

[providers]
weather = "rain"
travel_minutes = 7

[output]
path = "./plans"
format = "bundle"

[monitoring]
enabled = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());

        let options = config.planner_options();
        assert_eq!(options.max_items, 2);
        assert_eq!(options.working_set, 4);
        assert_eq!(options.selection, SelectionStrategy::InputOrder);
        assert_eq!(config.policy(), PolicyKind::WeatherAware);

        let input = config.user_input().unwrap();
        assert_eq!(input.budget_level, BudgetLevel::Low);
        assert_eq!(input.mode, Mode::Platonic);
        assert!(input.accessibility_needs.contains("wheelchair"));

        assert_eq!(config.max_cost(), Some(30.0));
        assert_eq!(config.max_minutes(), Some(90));
        assert_eq!(config.setting(), Some(Setting::Indoor));
        assert_eq!(config.stub_weather(), Weather::Rain);
        assert_eq!(config.stub_travel_minutes(), 7);
        assert_eq!(config.export_format(), ExportFormat::Bundle);
        assert!(config.monitoring_enabled());

        match config.places_source() {
            PlacesSource::Static(activities) => {
                assert_eq!(activities.len(), 2);
                assert_eq!(activities[0].estimated_cost, Some(25.0));
                assert_eq!(activities[1], Activity::museum("Schneider Museum"));
            }
            other => panic!("expected static places, got {:?}", other),
        }
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("DATE_PLANNER_TEST_ENDPOINT", "https://places.example.com/nearby");

        let toml_content = r#"
[places]
source = "http"
endpoint = "${DATE_PLANNER_TEST_ENDPOINT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(
            config.places_source(),
            PlacesSource::Http {
                endpoint: "https://places.example.com/nearby".to_string(),
                timeout: Duration::from_secs(10),
            }
        );
    }

    #[test]
    fn test_http_source_requires_endpoint() {
        let config = TomlConfig::from_toml_str("[places]\nsource = \"http\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(PlanError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let config = TomlConfig::from_toml_str("[constraints]\nmax_cost = -1.0\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str("[planner]\nmax_items = 0\n").unwrap();
        assert!(config.validate().is_err());

        let config = TomlConfig::from_toml_str(
            "[input]\nlocation = \"Ashland, OR\"\ndatetime = \"soon\"\n",
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_a_config_error() {
        let err = TomlConfig::from_toml_str("[planner\nmax_items = 3").unwrap_err();
        assert!(matches!(err, PlanError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[planner]\npolicy = \"mode_aware\"").unwrap();

        let config = TomlConfig::from_file(file.path()).unwrap();
        assert_eq!(config.policy(), PolicyKind::ModeAware);
    }
}
