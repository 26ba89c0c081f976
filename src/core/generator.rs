use crate::core::constraints::{Constraint, ConstraintSet};
use crate::core::itinerary::ItineraryAssembler;
use crate::core::scoring::{RankingContext, ScoringPolicy};
use crate::domain::model::{Activity, Itinerary, UserInput};
use crate::domain::ports::{MapsProvider, PlacesProvider, WeatherProvider};
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, Validate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Greedy best-first by policy score, ties to the earlier candidate.
    #[default]
    Ranked,
    /// Keep provider order and take the first `max_items`.
    InputOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerOptions {
    /// Survivors considered for ranking, in provider order.
    pub working_set: usize,
    /// Upper bound on itinerary length.
    pub max_items: usize,
    pub selection: SelectionStrategy,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            working_set: 6,
            max_items: 3,
            selection: SelectionStrategy::Ranked,
        }
    }
}

impl Validate for PlannerOptions {
    fn validate(&self) -> Result<()> {
        validate_positive_number("planner.max_items", self.max_items, 1)?;
        validate_positive_number("planner.working_set", self.working_set, 1)?;
        Ok(())
    }
}

/// Runs collect → filter → rank → assemble. Holds no per-run state, so one
/// generator can serve concurrent requests.
pub struct PlanGenerator {
    places: Arc<dyn PlacesProvider>,
    weather: Arc<dyn WeatherProvider>,
    maps: Arc<dyn MapsProvider>,
    scoring: Box<dyn ScoringPolicy>,
    constraints: ConstraintSet,
    options: PlannerOptions,
}

impl PlanGenerator {
    pub fn new(
        places: Arc<dyn PlacesProvider>,
        weather: Arc<dyn WeatherProvider>,
        maps: Arc<dyn MapsProvider>,
        scoring: Box<dyn ScoringPolicy>,
    ) -> Self {
        Self {
            places,
            weather,
            maps,
            scoring,
            constraints: ConstraintSet::new(),
            options: PlannerOptions::default(),
        }
    }

    pub fn with_constraint(mut self, constraint: impl Constraint + 'static) -> Self {
        self.constraints.push(constraint);
        self
    }

    pub fn with_constraints(mut self, constraints: ConstraintSet) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_options(mut self, options: PlannerOptions) -> Result<Self> {
        options.validate()?;
        self.options = options;
        Ok(self)
    }

    pub fn options(&self) -> &PlannerOptions {
        &self.options
    }

    pub fn policy_name(&self) -> &str {
        self.scoring.name()
    }

    /// Plans without user context: no weather lookup, no starting location.
    pub async fn generate(&self) -> Result<Itinerary> {
        self.run(None).await
    }

    /// Plans for `input`: weather at its location feeds ranking and the first
    /// travel leg starts from it.
    pub async fn generate_for(&self, input: &UserInput) -> Result<Itinerary> {
        self.run(Some(input)).await
    }

    async fn run(&self, input: Option<&UserInput>) -> Result<Itinerary> {
        let candidates = self.collect_candidates().await?;
        let filtered = self.apply_constraints(candidates);
        let context = self.ranking_context(input).await?;
        let chosen = self.rank_and_select(filtered, &context);
        let itinerary = self.assemble(chosen, input, &context).await?;

        tracing::info!(
            "Planned {} activities, estimated cost {:.2}",
            itinerary.len(),
            itinerary.total_estimated_cost()
        );
        Ok(itinerary)
    }

    async fn collect_candidates(&self) -> Result<Vec<Activity>> {
        let candidates = self.places.sample_candidates().await?;
        for candidate in &candidates {
            candidate.validate()?;
        }
        tracing::debug!("Collected {} candidates", candidates.len());
        Ok(candidates)
    }

    fn apply_constraints(&self, candidates: Vec<Activity>) -> Vec<Activity> {
        let total = candidates.len();
        let kept: Vec<Activity> = candidates
            .into_iter()
            .filter(|candidate| match self.constraints.first_violation(candidate) {
                Some(rule) => {
                    tracing::debug!("Rejected '{}' by {}", candidate.name, rule);
                    false
                }
                None => true,
            })
            .collect();
        tracing::debug!("{} of {} candidates passed {} constraints", kept.len(), total, self.constraints.len());
        kept
    }

    async fn ranking_context(&self, input: Option<&UserInput>) -> Result<RankingContext> {
        let Some(input) = input else {
            return Ok(RankingContext::default());
        };

        let weather = self.weather.summary(&input.location).await?;
        tracing::debug!("Weather at {}: {}", input.location, weather);
        Ok(RankingContext {
            weather: Some(weather),
            mode: Some(input.mode),
        })
    }

    fn rank_and_select(&self, mut items: Vec<Activity>, context: &RankingContext) -> Vec<Activity> {
        items.truncate(self.options.working_set);

        match self.options.selection {
            SelectionStrategy::InputOrder => {
                items.truncate(self.options.max_items);
                items
            }
            SelectionStrategy::Ranked => self.select_greedy(items, context),
        }
    }

    fn select_greedy(&self, mut remaining: Vec<Activity>, context: &RankingContext) -> Vec<Activity> {
        let limit = self.options.max_items.min(remaining.len());
        let mut selected: Vec<Activity> = Vec::with_capacity(limit);

        while selected.len() < limit {
            let mut best: Option<(usize, f64)> = None;
            for (index, candidate) in remaining.iter().enumerate() {
                selected.push(candidate.clone());
                let score = self.scoring.score_in_context(&selected, context);
                selected.pop();

                // strict comparison keeps the earliest candidate on ties
                if best.map_or(true, |(_, top)| score > top) {
                    best = Some((index, score));
                }
            }

            let Some((index, score)) = best else {
                break;
            };
            let pick = remaining.remove(index);
            tracing::debug!("Selected '{}' (set score {:.2})", pick.name, score);
            selected.push(pick);
        }

        selected
    }

    async fn assemble(
        &self,
        chosen: Vec<Activity>,
        input: Option<&UserInput>,
        context: &RankingContext,
    ) -> Result<Itinerary> {
        let mut assembler = ItineraryAssembler::new();
        let mut previous: Option<String> = input.map(|i| i.location.clone());

        for activity in chosen {
            if let Some(origin) = previous.as_deref() {
                let minutes = self.maps.travel_minutes(origin, &activity.name).await?;
                assembler.add_travel_leg(origin, activity.name.clone(), minutes);
            }
            previous = Some(activity.name.clone());
            assembler.add_activity(activity);
        }

        if let (Some(input), Some(weather)) = (input, context.weather) {
            assembler.set_notes(format!("Forecast for {}: {}", input.location, weather));
        }

        Ok(assembler.into_itinerary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constraints::BudgetCeiling;
    use crate::core::scoring::{BudgetFriendlyPolicy, WeatherAwarePolicy};
    use crate::domain::model::{BudgetLevel, Mode, Weather};
    use crate::utils::error::PlanError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockPlaces {
        candidates: Vec<Activity>,
    }

    #[async_trait]
    impl PlacesProvider for MockPlaces {
        async fn sample_candidates(&self) -> Result<Vec<Activity>> {
            Ok(self.candidates.clone())
        }
    }

    struct FailingPlaces;

    #[async_trait]
    impl PlacesProvider for FailingPlaces {
        async fn sample_candidates(&self) -> Result<Vec<Activity>> {
            Err(PlanError::provider("places", "service unavailable"))
        }
    }

    struct MockWeather {
        weather: Weather,
        calls: AtomicUsize,
    }

    impl MockWeather {
        fn new(weather: Weather) -> Self {
            Self {
                weather,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl WeatherProvider for MockWeather {
        async fn summary(&self, _location: &str) -> Result<Weather> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.weather)
        }
    }

    struct FixedMaps(u32);

    #[async_trait]
    impl MapsProvider for FixedMaps {
        async fn travel_minutes(&self, _origin: &str, _destination: &str) -> Result<u32> {
            Ok(self.0)
        }
    }

    fn cafe() -> Activity {
        Activity::restaurant("Cozy Café").with_cost(25.0).with_minutes(60)
    }

    fn walk() -> Activity {
        Activity::park("Lithia Park Walk").with_cost(0.0).with_minutes(45)
    }

    fn generator_with(candidates: Vec<Activity>) -> PlanGenerator {
        PlanGenerator::new(
            Arc::new(MockPlaces { candidates }),
            Arc::new(MockWeather::new(Weather::Clouds)),
            Arc::new(FixedMaps(10)),
            Box::new(BudgetFriendlyPolicy),
        )
    }

    fn input() -> UserInput {
        UserInput {
            location: "Ashland, OR".to_string(),
            datetime: "2025-11-01T19:00:00".to_string(),
            budget_level: BudgetLevel::Medium,
            accessibility_needs: Default::default(),
            mode: Mode::Romantic,
            preferred_atmosphere: Some("cozy".to_string()),
        }
    }

    #[tokio::test]
    async fn test_both_candidates_fit_budget_of_30() {
        let generator = generator_with(vec![cafe(), walk()])
            .with_constraint(BudgetCeiling::new(30.0).unwrap());

        let itinerary = generator.generate().await.unwrap();

        // ranked selection puts the free walk first; InputOrder keeps provider order
        assert_eq!(itinerary.names(), vec!["Lithia Park Walk", "Cozy Café"]);
        assert_eq!(itinerary.total_estimated_cost(), 25.0);
    }

    #[tokio::test]
    async fn test_input_order_selection_keeps_provider_order() {
        let options = PlannerOptions {
            selection: SelectionStrategy::InputOrder,
            ..PlannerOptions::default()
        };
        let generator = generator_with(vec![cafe(), walk()])
            .with_constraint(BudgetCeiling::new(30.0).unwrap())
            .with_options(options)
            .unwrap();

        let itinerary = generator.generate().await.unwrap();

        assert_eq!(itinerary.names(), vec!["Cozy Café", "Lithia Park Walk"]);
        assert_eq!(itinerary.total_estimated_cost(), 25.0);
    }

    #[tokio::test]
    async fn test_budget_of_10_keeps_only_the_walk() {
        let generator = generator_with(vec![cafe(), walk()])
            .with_constraint(BudgetCeiling::new(10.0).unwrap());

        let itinerary = generator.generate().await.unwrap();

        assert_eq!(itinerary.names(), vec!["Lithia Park Walk"]);
        assert_eq!(itinerary.total_estimated_cost(), 0.0);
    }

    #[tokio::test]
    async fn test_ranked_selection_prefers_cheaper_items() {
        let candidates = vec![
            Activity::restaurant("Steakhouse").with_cost(80.0),
            Activity::museum("Schneider Museum").with_cost(10.0),
            Activity::concert("Jazz Night").with_cost(35.0),
            walk(),
            Activity::restaurant("Taqueria").with_cost(15.0),
        ];
        let itinerary = generator_with(candidates).generate().await.unwrap();

        assert_eq!(
            itinerary.names(),
            vec!["Lithia Park Walk", "Schneider Museum", "Taqueria"]
        );
        assert_eq!(itinerary.total_estimated_cost(), 25.0);
    }

    #[tokio::test]
    async fn test_ties_keep_candidate_order() {
        let candidates = vec![
            Activity::park("North Trail").with_cost(5.0),
            Activity::park("South Trail").with_cost(5.0),
            Activity::park("East Trail").with_cost(5.0),
            Activity::park("West Trail").with_cost(5.0),
        ];
        let itinerary = generator_with(candidates).generate().await.unwrap();
        assert_eq!(
            itinerary.names(),
            vec!["North Trail", "South Trail", "East Trail"]
        );
    }

    #[tokio::test]
    async fn test_working_set_bounds_the_ranked_pool() {
        let mut candidates: Vec<Activity> = (1..=6)
            .map(|i| Activity::museum(format!("Gallery {}", i)).with_cost(50.0))
            .collect();
        // seventh candidate is cheapest but outside the working set
        candidates.push(Activity::park("Free Park").with_cost(0.0));

        let itinerary = generator_with(candidates).generate().await.unwrap();

        assert_eq!(itinerary.len(), 3);
        assert!(!itinerary.names().contains(&"Free Park"));
    }

    #[tokio::test]
    async fn test_selection_is_bounded_and_deterministic() {
        let candidates: Vec<Activity> = (0..10)
            .map(|i| Activity::restaurant(format!("Spot {}", i)).with_cost((i % 4) as f64))
            .collect();
        let generator = generator_with(candidates);

        let first = generator.generate().await.unwrap();
        let second = generator.generate().await.unwrap();

        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_empty_candidates_yield_empty_itinerary() {
        let itinerary = generator_with(vec![]).generate().await.unwrap();
        assert!(itinerary.is_empty());
        assert_eq!(itinerary.total_estimated_cost(), 0.0);
    }

    #[tokio::test]
    async fn test_everything_filtered_yields_empty_itinerary() {
        let generator = generator_with(vec![cafe()]).with_constraint(|_: &Activity| false);
        let itinerary = generator.generate().await.unwrap();
        assert!(itinerary.is_empty());
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let generator = PlanGenerator::new(
            Arc::new(FailingPlaces),
            Arc::new(MockWeather::new(Weather::Sunny)),
            Arc::new(FixedMaps(10)),
            Box::new(BudgetFriendlyPolicy),
        );

        let err = generator.generate().await.unwrap_err();
        assert!(matches!(err, PlanError::ProviderError { .. }));
    }

    #[tokio::test]
    async fn test_malformed_candidate_fails_fast() {
        let generator = generator_with(vec![cafe(), Activity::park("Bad Park").with_cost(-3.0)]);
        let err = generator.generate().await.unwrap_err();
        assert!(matches!(err, PlanError::InvalidActivityError { .. }));
    }

    #[tokio::test]
    async fn test_generate_without_input_skips_weather() {
        let weather = Arc::new(MockWeather::new(Weather::Rain));
        let generator = PlanGenerator::new(
            Arc::new(MockPlaces {
                candidates: vec![cafe(), walk()],
            }),
            weather.clone(),
            Arc::new(FixedMaps(10)),
            Box::new(BudgetFriendlyPolicy),
        );

        let itinerary = generator.generate().await.unwrap();

        assert_eq!(weather.calls.load(Ordering::SeqCst), 0);
        assert_eq!(itinerary.notes(), None);
        assert_eq!(itinerary.travel_legs().len(), 1);
        assert_eq!(itinerary.total_minutes(), 60 + 45 + 10);
    }

    #[tokio::test]
    async fn test_rain_demotes_the_park_for_weather_aware_policy() {
        let weather = Arc::new(MockWeather::new(Weather::Rain));
        let generator = PlanGenerator::new(
            Arc::new(MockPlaces {
                candidates: vec![walk(), cafe()],
            }),
            weather.clone(),
            Arc::new(FixedMaps(12)),
            Box::new(WeatherAwarePolicy::new(Box::new(BudgetFriendlyPolicy))),
        );

        let itinerary = generator.generate_for(&input()).await.unwrap();

        assert_eq!(weather.calls.load(Ordering::SeqCst), 1);
        assert_eq!(itinerary.names(), vec!["Cozy Café", "Lithia Park Walk"]);
        assert_eq!(itinerary.notes(), Some("Forecast for Ashland, OR: rain"));

        let legs = itinerary.travel_legs();
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].from, "Ashland, OR");
        assert_eq!(legs[0].to, "Cozy Café");
        assert_eq!(legs[1].from, "Cozy Café");
        assert_eq!(legs[1].minutes, 12);
    }

    #[tokio::test]
    async fn test_concurrent_generation_shares_one_generator() {
        let generator = Arc::new(generator_with(vec![cafe(), walk()]));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let generator = generator.clone();
                tokio::spawn(async move { generator.generate().await })
            })
            .collect();

        for handle in handles {
            let itinerary = handle.await.unwrap().unwrap();
            assert_eq!(itinerary.total_estimated_cost(), 25.0);
        }
    }

    #[test]
    fn test_invalid_options_rejected_at_construction() {
        let options = PlannerOptions {
            max_items: 0,
            ..PlannerOptions::default()
        };
        assert!(generator_with(vec![]).with_options(options).is_err());
    }
}
