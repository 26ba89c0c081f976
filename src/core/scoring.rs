//! Scoring strategies. A policy scores a whole candidate set; larger is better.

use crate::core::constraints::{setting_of, Setting};
use crate::domain::model::{Activity, ActivityKind, Mode, Weather};
use crate::utils::error::Result;
use crate::utils::validation::validate_non_negative;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What the planner knows about the outing when ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RankingContext {
    pub weather: Option<Weather>,
    pub mode: Option<Mode>,
}

pub trait ScoringPolicy: Send + Sync {
    fn score(&self, activities: &[Activity]) -> f64;

    /// Context-aware variant; policies that ignore context keep the default.
    fn score_in_context(&self, activities: &[Activity], _context: &RankingContext) -> f64 {
        self.score(activities)
    }

    fn name(&self) -> &str;
}

/// Prefers the cheapest set. Unknown costs count as 0, matching `BudgetCeiling`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BudgetFriendlyPolicy;

impl ScoringPolicy for BudgetFriendlyPolicy {
    fn score(&self, activities: &[Activity]) -> f64 {
        -activities
            .iter()
            .map(|a| a.estimated_cost.unwrap_or(0.0))
            .sum::<f64>()
    }

    fn name(&self) -> &str {
        "budget_friendly"
    }
}

/// Adjusts a base policy for the forecast: outdoor items lose points in rain
/// or snow and gain a little in sunshine.
pub struct WeatherAwarePolicy {
    base: Box<dyn ScoringPolicy>,
    weight: f64,
}

impl WeatherAwarePolicy {
    pub const DEFAULT_WEIGHT: f64 = 50.0;

    pub fn new(base: Box<dyn ScoringPolicy>) -> Self {
        Self {
            base,
            weight: Self::DEFAULT_WEIGHT,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Result<Self> {
        validate_non_negative("weather_weight", weight)?;
        self.weight = weight;
        Ok(self)
    }

    fn adjustment(&self, activities: &[Activity], weather: Weather) -> f64 {
        let outdoor = activities
            .iter()
            .filter(|a| setting_of(a) == Some(Setting::Outdoor))
            .count() as f64;

        match weather {
            Weather::Rain | Weather::Snow => -self.weight * outdoor,
            Weather::Sunny => self.weight * 0.2 * outdoor,
            Weather::Clouds => 0.0,
        }
    }
}

impl ScoringPolicy for WeatherAwarePolicy {
    fn score(&self, activities: &[Activity]) -> f64 {
        self.base.score(activities)
    }

    fn score_in_context(&self, activities: &[Activity], context: &RankingContext) -> f64 {
        let base = self.base.score_in_context(activities, context);
        match context.weather {
            Some(weather) => base + self.adjustment(activities, weather),
            None => base,
        }
    }

    fn name(&self) -> &str {
        "weather_aware"
    }
}

/// Rewards variants that suit the outing mode.
pub struct ModeAwarePolicy {
    base: Box<dyn ScoringPolicy>,
    bonus: f64,
}

impl ModeAwarePolicy {
    pub const DEFAULT_BONUS: f64 = 15.0;

    pub fn new(base: Box<dyn ScoringPolicy>) -> Self {
        Self {
            base,
            bonus: Self::DEFAULT_BONUS,
        }
    }

    fn fits(mode: Mode, activity: &Activity) -> bool {
        match (mode, &activity.kind) {
            (Mode::Romantic, ActivityKind::Restaurant { .. })
            | (Mode::Romantic, ActivityKind::Concert { .. }) => true,
            (Mode::Platonic, ActivityKind::Park { .. })
            | (Mode::Platonic, ActivityKind::Museum { .. }) => true,
            _ => false,
        }
    }
}

impl ScoringPolicy for ModeAwarePolicy {
    fn score(&self, activities: &[Activity]) -> f64 {
        self.base.score(activities)
    }

    fn score_in_context(&self, activities: &[Activity], context: &RankingContext) -> f64 {
        let base = self.base.score_in_context(activities, context);
        let Some(mode) = context.mode else {
            return base;
        };
        let fitting = activities.iter().filter(|a| Self::fits(mode, a)).count() as f64;
        base + self.bonus * fitting
    }

    fn name(&self) -> &str {
        "mode_aware"
    }
}

/// Config-facing policy names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    #[default]
    BudgetFriendly,
    WeatherAware,
    ModeAware,
}

impl PolicyKind {
    /// Context-aware kinds wrap the budget-friendly policy.
    pub fn build(&self) -> Box<dyn ScoringPolicy> {
        match self {
            PolicyKind::BudgetFriendly => Box::new(BudgetFriendlyPolicy),
            PolicyKind::WeatherAware => Box::new(WeatherAwarePolicy::new(Box::new(BudgetFriendlyPolicy))),
            PolicyKind::ModeAware => Box::new(ModeAwarePolicy::new(Box::new(BudgetFriendlyPolicy))),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PolicyKind::BudgetFriendly => "budget_friendly",
            PolicyKind::WeatherAware => "weather_aware",
            PolicyKind::ModeAware => "mode_aware",
        };
        f.write_str(label)
    }
}
