use crate::domain::model::{BudgetLevel, Mode, UserInput};
use crate::domain::ports::InputCollector;
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Hands back preferences fixed at construction, validated on every collect.
#[derive(Debug, Clone)]
pub struct StaticInputCollector {
    input: UserInput,
}

impl StaticInputCollector {
    pub fn new(input: UserInput) -> Self {
        Self { input }
    }
}

impl Default for StaticInputCollector {
    fn default() -> Self {
        Self::new(UserInput {
            location: "Ashland, OR".to_string(),
            datetime: "2025-11-01T19:00:00".to_string(),
            budget_level: BudgetLevel::Medium,
            accessibility_needs: Default::default(),
            mode: Mode::Romantic,
            preferred_atmosphere: Some("cozy".to_string()),
        })
    }
}

impl InputCollector for StaticInputCollector {
    fn collect(&self) -> Result<UserInput> {
        self.input.validate()?;
        Ok(self.input.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_collector_yields_valid_input() {
        let input = StaticInputCollector::default().collect().unwrap();
        assert_eq!(input.location, "Ashland, OR");
        assert_eq!(input.preferred_atmosphere.as_deref(), Some("cozy"));
    }

    #[test]
    fn test_collector_rejects_bad_datetime() {
        let mut input = StaticInputCollector::default().collect().unwrap();
        input.datetime = "someday".to_string();
        assert!(StaticInputCollector::new(input).collect().is_err());
    }
}
