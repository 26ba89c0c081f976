use crate::utils::error::{PlanError, Result};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// One candidate outing item.
///
/// Every optional field means "unknown" when absent. Decision logic lives in
/// constraints and scoring policies, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typical_minutes: Option<u32>,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ActivityKind {
    Restaurant {
        #[serde(default)]
        cuisine: Option<String>,
    },
    Park {
        #[serde(default)]
        paved_paths: Option<bool>,
    },
    Museum {
        #[serde(default = "ticket_required_default")]
        ticket_required: Option<bool>,
    },
    Concert {
        #[serde(default)]
        standing_room: Option<bool>,
    },
}

fn ticket_required_default() -> Option<bool> {
    Some(true)
}

impl ActivityKind {
    pub fn label(&self) -> &'static str {
        match self {
            ActivityKind::Restaurant { .. } => "restaurant",
            ActivityKind::Park { .. } => "park",
            ActivityKind::Museum { .. } => "museum",
            ActivityKind::Concert { .. } => "concert",
        }
    }
}

impl Activity {
    pub fn new(name: impl Into<String>, kind: ActivityKind) -> Self {
        Self {
            name: name.into(),
            estimated_cost: None,
            typical_minutes: None,
            kind,
        }
    }

    pub fn restaurant(name: impl Into<String>) -> Self {
        Self::new(name, ActivityKind::Restaurant { cuisine: None })
    }

    pub fn park(name: impl Into<String>) -> Self {
        Self::new(name, ActivityKind::Park { paved_paths: None })
    }

    pub fn museum(name: impl Into<String>) -> Self {
        Self::new(
            name,
            ActivityKind::Museum {
                ticket_required: ticket_required_default(),
            },
        )
    }

    pub fn concert(name: impl Into<String>) -> Self {
        Self::new(name, ActivityKind::Concert { standing_room: None })
    }

    pub fn with_cost(mut self, cost: f64) -> Self {
        self.estimated_cost = Some(cost);
        self
    }

    pub fn with_minutes(mut self, minutes: u32) -> Self {
        self.typical_minutes = Some(minutes);
        self
    }
}

impl Validate for Activity {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PlanError::InvalidActivityError {
                name: self.name.clone(),
                reason: "name cannot be empty".to_string(),
            });
        }

        if let Some(cost) = self.estimated_cost {
            if !cost.is_finite() || cost < 0.0 {
                return Err(PlanError::InvalidActivityError {
                    name: self.name.clone(),
                    reason: format!("estimated cost must be non-negative, got {}", cost),
                });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TravelLeg {
    pub from: String,
    pub to: String,
    pub minutes: u32,
}

/// The finished plan. Only an assembler can grow one, and deserializing
/// recomputes the total, so the cost total always matches the items it holds.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "ItineraryRecord")]
pub struct Itinerary {
    pub(crate) items: Vec<Activity>,
    pub(crate) total_estimated_cost: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub(crate) travel_legs: Vec<TravelLeg>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) notes: Option<String>,
}

/// Wire shape of an itinerary. A stored `total_estimated_cost` is ignored.
#[derive(Deserialize)]
struct ItineraryRecord {
    #[serde(default)]
    items: Vec<Activity>,
    #[serde(default)]
    travel_legs: Vec<TravelLeg>,
    #[serde(default)]
    notes: Option<String>,
}

impl From<ItineraryRecord> for Itinerary {
    fn from(record: ItineraryRecord) -> Self {
        let total_estimated_cost = record
            .items
            .iter()
            .filter_map(|a| a.estimated_cost)
            .fold(0.0, |total, cost| total + cost);
        Self {
            items: record.items,
            total_estimated_cost,
            travel_legs: record.travel_legs,
            notes: record.notes,
        }
    }
}

impl Itinerary {
    pub fn items(&self) -> &[Activity] {
        &self.items
    }

    pub fn total_estimated_cost(&self) -> f64 {
        self.total_estimated_cost
    }

    pub fn travel_legs(&self) -> &[TravelLeg] {
        &self.travel_legs
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn names(&self) -> Vec<&str> {
        self.items.iter().map(|a| a.name.as_str()).collect()
    }

    /// Items whose cost is unknown; they contribute nothing to the total.
    pub fn unknown_cost_count(&self) -> usize {
        self.items
            .iter()
            .filter(|a| a.estimated_cost.is_none())
            .count()
    }

    /// Known activity durations plus travel between them.
    pub fn total_minutes(&self) -> u64 {
        let activities: u64 = self
            .items
            .iter()
            .filter_map(|a| a.typical_minutes)
            .map(u64::from)
            .sum();
        let travel: u64 = self.travel_legs.iter().map(|leg| u64::from(leg.minutes)).sum();
        activities + travel
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Sunny,
    Rain,
    Clouds,
    Snow,
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Weather::Sunny => "sunny",
            Weather::Rain => "rain",
            Weather::Clouds => "clouds",
            Weather::Snow => "snow",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum BudgetLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl BudgetLevel {
    /// Per-activity spending ceiling implied by the level.
    pub fn ceiling(&self) -> f64 {
        match self {
            BudgetLevel::Low => 30.0,
            BudgetLevel::Medium => 60.0,
            BudgetLevel::High => 120.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    #[default]
    Romantic,
    Platonic,
}

/// Preferences handed over by a front-end. Validation is the collector's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    pub location: String,
    pub datetime: String,
    #[serde(default)]
    pub budget_level: BudgetLevel,
    #[serde(default)]
    pub accessibility_needs: BTreeSet<String>,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub preferred_atmosphere: Option<String>,
}

impl Validate for UserInput {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_non_empty_string("input.location", &self.location)?;
        crate::utils::validation::validate_iso_datetime("input.datetime", &self.datetime)?;
        Ok(())
    }
}
