use crate::core::generator::PlanGenerator;
use crate::domain::model::{Itinerary, UserInput};
use crate::domain::ports::{Explainer, Exporter, Storage};
use crate::utils::error::Result;
use crate::utils::monitor::StageMonitor;

#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub itinerary: Itinerary,
    pub explanation: String,
    pub output_path: String,
}

/// Drives one planning request end to end: generate, explain, export, store.
pub struct PlanSession<S: Storage> {
    generator: PlanGenerator,
    explainer: Box<dyn Explainer>,
    exporter: Box<dyn Exporter>,
    storage: S,
    monitor: StageMonitor,
}

impl<S: Storage> PlanSession<S> {
    pub fn new(
        generator: PlanGenerator,
        explainer: Box<dyn Explainer>,
        exporter: Box<dyn Exporter>,
        storage: S,
    ) -> Self {
        Self::new_with_monitoring(generator, explainer, exporter, storage, false)
    }

    pub fn new_with_monitoring(
        generator: PlanGenerator,
        explainer: Box<dyn Explainer>,
        exporter: Box<dyn Exporter>,
        storage: S,
        monitor_enabled: bool,
    ) -> Self {
        Self {
            generator,
            explainer,
            exporter,
            storage,
            monitor: StageMonitor::new(monitor_enabled),
        }
    }

    pub fn monitor(&self) -> &StageMonitor {
        &self.monitor
    }

    pub async fn run(&self, input: Option<&UserInput>) -> Result<PlanOutcome> {
        self.monitor.begin();
        tracing::info!("Generating plan with {} policy", self.generator.policy_name());
        let itinerary = match input {
            Some(input) => self.generator.generate_for(input).await?,
            None => self.generator.generate().await?,
        };
        self.monitor.mark("generate");

        let explanation = self.explainer.explain(&itinerary);
        self.monitor.mark("explain");

        let document = self.exporter.export(&itinerary)?;
        tracing::debug!(
            "Exported {} ({} bytes)",
            self.exporter.file_name(),
            document.len()
        );
        self.monitor.mark("export");

        let output_path = self
            .storage
            .write_file(self.exporter.file_name(), &document)
            .await?;
        self.monitor.mark("store");
        self.monitor.log_final_stats();

        Ok(PlanOutcome {
            itinerary,
            explanation,
            output_path,
        })
    }
}
