use crate::domain::model::{Activity, Itinerary};
use crate::domain::ports::{Explainer, Exporter};
use crate::utils::error::{PlanError, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
    Bundle,
}

impl ExportFormat {
    pub fn build(&self, explainer: Box<dyn Explainer>) -> Box<dyn Exporter> {
        match self {
            ExportFormat::Json => Box::new(JsonExporter::default()),
            ExportFormat::Csv => Box::new(CsvExporter),
            ExportFormat::Bundle => Box::new(BundleExporter::new(explainer)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonExporter {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Exporter for JsonExporter {
    fn export(&self, itinerary: &Itinerary) -> Result<Vec<u8>> {
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(itinerary)?
        } else {
            serde_json::to_vec(itinerary)?
        };
        Ok(bytes)
    }

    fn file_name(&self) -> &str {
        "itinerary.json"
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    order: usize,
    name: &'a str,
    kind: &'static str,
    estimated_cost: Option<f64>,
    typical_minutes: Option<u32>,
}

impl<'a> CsvRow<'a> {
    fn new(order: usize, activity: &'a Activity) -> Self {
        Self {
            order,
            name: &activity.name,
            kind: activity.kind.label(),
            estimated_cost: activity.estimated_cost,
            typical_minutes: activity.typical_minutes,
        }
    }
}

/// One row per activity; unknown values are left empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvExporter;

impl Exporter for CsvExporter {
    fn export(&self, itinerary: &Itinerary) -> Result<Vec<u8>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(["order", "name", "kind", "estimated_cost", "typical_minutes"])?;
        for (index, activity) in itinerary.items().iter().enumerate() {
            writer.serialize(CsvRow::new(index + 1, activity))?;
        }

        writer
            .into_inner()
            .map_err(|e| PlanError::IoError(std::io::Error::other(e.to_string())))
    }

    fn file_name(&self) -> &str {
        "itinerary.csv"
    }
}

/// Zip archive with the CSV, the JSON and a plain-text explanation.
pub struct BundleExporter {
    explainer: Box<dyn Explainer>,
}

impl BundleExporter {
    pub fn new(explainer: Box<dyn Explainer>) -> Self {
        Self { explainer }
    }
}

impl Exporter for BundleExporter {
    fn export(&self, itinerary: &Itinerary) -> Result<Vec<u8>> {
        let csv = CsvExporter.export(itinerary)?;
        let json = JsonExporter::default().export(itinerary)?;
        let explanation = self.explainer.explain(itinerary);

        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

        zip.start_file::<_, ()>("itinerary.csv", FileOptions::default())?;
        zip.write_all(&csv)?;

        zip.start_file::<_, ()>("itinerary.json", FileOptions::default())?;
        zip.write_all(&json)?;

        zip.start_file::<_, ()>("explanation.txt", FileOptions::default())?;
        zip.write_all(explanation.as_bytes())?;

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }

    fn file_name(&self) -> &str {
        "itinerary.zip"
    }
}
