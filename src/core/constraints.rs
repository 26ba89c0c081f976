//! Predicates that exclude unsuitable candidates before ranking.
//!
//! Missing attributes are treated leniently: an activity with unknown cost or
//! duration passes a ceiling, because "unknown" is not evidence of a
//! violation. Scoring uses the same convention (see `core::scoring`).

use crate::domain::model::{Activity, ActivityKind, UserInput};
use crate::utils::error::{PlanError, Result};
use crate::utils::validation::validate_non_negative;
use serde::{Deserialize, Serialize};
use std::fmt;

pub trait Constraint: Send + Sync {
    fn is_satisfied_by(&self, activity: &Activity) -> bool;

    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Any plain predicate can be registered as a constraint.
impl<F> Constraint for F
where
    F: Fn(&Activity) -> bool + Send + Sync,
{
    fn is_satisfied_by(&self, activity: &Activity) -> bool {
        self(activity)
    }

    fn name(&self) -> &str {
        "predicate"
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetCeiling {
    max_cost: f64,
}

impl BudgetCeiling {
    pub fn new(max_cost: f64) -> Result<Self> {
        validate_non_negative("max_cost", max_cost)?;
        Ok(Self { max_cost })
    }

    pub fn max_cost(&self) -> f64 {
        self.max_cost
    }
}

impl Constraint for BudgetCeiling {
    fn is_satisfied_by(&self, activity: &Activity) -> bool {
        activity.estimated_cost.unwrap_or(0.0) <= self.max_cost
    }

    fn name(&self) -> &str {
        "budget_ceiling"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxDuration {
    max_minutes: u32,
}

impl MaxDuration {
    pub fn new(max_minutes: u32) -> Result<Self> {
        if max_minutes == 0 {
            return Err(PlanError::InvalidConfigValueError {
                field: "max_minutes".to_string(),
                value: max_minutes.to_string(),
                reason: "Value must be at least 1".to_string(),
            });
        }
        Ok(Self { max_minutes })
    }
}

impl Constraint for MaxDuration {
    fn is_satisfied_by(&self, activity: &Activity) -> bool {
        activity
            .typical_minutes
            .map_or(true, |minutes| minutes <= self.max_minutes)
    }

    fn name(&self) -> &str {
        "max_duration"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Setting {
    Indoor,
    Outdoor,
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Setting::Indoor => f.write_str("indoor"),
            Setting::Outdoor => f.write_str("outdoor"),
        }
    }
}

/// Where an activity takes place, if the variant tells us.
pub fn setting_of(activity: &Activity) -> Option<Setting> {
    match activity.kind {
        ActivityKind::Park { .. } => Some(Setting::Outdoor),
        ActivityKind::Restaurant { .. } | ActivityKind::Museum { .. } => Some(Setting::Indoor),
        ActivityKind::Concert { .. } => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingConstraint {
    allowed: Setting,
}

impl SettingConstraint {
    pub fn new(allowed: Setting) -> Self {
        Self { allowed }
    }
}

impl Constraint for SettingConstraint {
    fn is_satisfied_by(&self, activity: &Activity) -> bool {
        setting_of(activity).map_or(true, |setting| setting == self.allowed)
    }

    fn name(&self) -> &str {
        "setting"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessibilityConstraint {
    wheelchair: bool,
    seating: bool,
}

impl AccessibilityConstraint {
    /// Recognizes `wheelchair` and `seating`; anything else is logged and ignored.
    pub fn from_needs<'a>(needs: impl IntoIterator<Item = &'a String>) -> Self {
        let mut constraint = Self::default();
        for need in needs {
            match need.trim().to_ascii_lowercase().as_str() {
                "wheelchair" | "step_free" | "step-free" => constraint.wheelchair = true,
                "seating" | "seated" => constraint.seating = true,
                other => tracing::warn!("Ignoring unrecognized accessibility need: {}", other),
            }
        }
        constraint
    }

    pub fn is_empty(&self) -> bool {
        !self.wheelchair && !self.seating
    }
}

impl Constraint for AccessibilityConstraint {
    fn is_satisfied_by(&self, activity: &Activity) -> bool {
        match activity.kind {
            ActivityKind::Park {
                paved_paths: Some(false),
            } => !self.wheelchair,
            ActivityKind::Concert {
                standing_room: Some(true),
            } => !self.wheelchair && !self.seating,
            _ => true,
        }
    }

    fn name(&self) -> &str {
        "accessibility"
    }
}

/// Ordered conjunction of constraints. An empty set accepts everything.
#[derive(Default)]
pub struct ConstraintSet {
    constraints: Vec<Box<dyn Constraint>>,
}

impl ConstraintSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, constraint: impl Constraint + 'static) -> Self {
        self.push(constraint);
        self
    }

    pub fn push(&mut self, constraint: impl Constraint + 'static) {
        self.constraints.push(Box::new(constraint));
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Name of the first constraint that rejects `activity`, if any.
    pub fn first_violation(&self, activity: &Activity) -> Option<&str> {
        self.constraints
            .iter()
            .find(|c| !c.is_satisfied_by(activity))
            .map(|c| c.name())
    }

    /// Budget ceiling from the budget level plus any accessibility needs.
    pub fn for_input(input: &UserInput) -> Result<Self> {
        let mut set = Self::new().with(BudgetCeiling::new(input.budget_level.ceiling())?);
        let accessibility = AccessibilityConstraint::from_needs(&input.accessibility_needs);
        if !accessibility.is_empty() {
            set.push(accessibility);
        }
        Ok(set)
    }
}

impl Constraint for ConstraintSet {
    fn is_satisfied_by(&self, activity: &Activity) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied_by(activity))
    }

    fn name(&self) -> &str {
        "all_of"
    }
}

impl fmt::Debug for ConstraintSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.constraints.iter().map(|c| c.name()))
            .finish()
    }
}
