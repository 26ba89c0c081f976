use crate::adapters::explain::SummaryExplainer;
use crate::adapters::input::StaticInputCollector;
use crate::adapters::maps::StubMaps;
use crate::adapters::places::{HttpPlaces, StaticPlaces, StubPlaces};
use crate::adapters::storage::LocalStorage;
use crate::adapters::weather::StubWeather;
use crate::config::{ConfigProvider, PlacesSource};
use crate::core::constraints::{BudgetCeiling, ConstraintSet, MaxDuration, SettingConstraint};
use crate::core::generator::PlanGenerator;
use crate::core::session::PlanSession;
use crate::domain::model::UserInput;
use crate::domain::ports::{InputCollector, PlacesProvider};
use crate::utils::error::Result;
use std::sync::Arc;

pub fn build_places(source: PlacesSource) -> Result<Arc<dyn PlacesProvider>> {
    let places: Arc<dyn PlacesProvider> = match source {
        PlacesSource::Stub => Arc::new(StubPlaces),
        PlacesSource::Static(activities) => Arc::new(StaticPlaces::new(activities)),
        PlacesSource::Http { endpoint, timeout } => {
            Arc::new(HttpPlaces::with_timeout(endpoint, timeout)?)
        }
    };
    Ok(places)
}

/// Preferences for this run, passed through the input collector so they are
/// validated before planning starts.
pub fn collect_input<C: ConfigProvider>(config: &C) -> Result<Option<UserInput>> {
    config
        .user_input()
        .map(|input| StaticInputCollector::new(input).collect())
        .transpose()
}

/// Constraints implied by the user's preferences plus any explicit limits.
pub fn build_constraints<C: ConfigProvider>(config: &C) -> Result<ConstraintSet> {
    let mut constraints = match config.user_input() {
        Some(input) => ConstraintSet::for_input(&input)?,
        None => ConstraintSet::new(),
    };

    if let Some(max_cost) = config.max_cost() {
        constraints.push(BudgetCeiling::new(max_cost)?);
    }
    if let Some(max_minutes) = config.max_minutes() {
        constraints.push(MaxDuration::new(max_minutes)?);
    }
    if let Some(setting) = config.setting() {
        constraints.push(SettingConstraint::new(setting));
    }

    tracing::debug!("Registered constraints: {:?}", constraints);
    Ok(constraints)
}

pub fn build_generator<C: ConfigProvider>(config: &C) -> Result<PlanGenerator> {
    let generator = PlanGenerator::new(
        build_places(config.places_source())?,
        Arc::new(StubWeather::new(config.stub_weather())),
        Arc::new(StubMaps::new(config.stub_travel_minutes())),
        config.policy().build(),
    )
    .with_constraints(build_constraints(config)?)
    .with_options(config.planner_options())?;

    Ok(generator)
}

pub fn build_session<C: ConfigProvider>(config: &C) -> Result<PlanSession<LocalStorage>> {
    let generator = build_generator(config)?;
    let exporter = config.export_format().build(Box::new(SummaryExplainer));
    let storage = LocalStorage::new(config.output_path().to_string());

    Ok(PlanSession::new_with_monitoring(
        generator,
        Box::new(SummaryExplainer),
        exporter,
        storage,
        config.monitoring_enabled(),
    ))
}
