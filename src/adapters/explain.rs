use crate::domain::model::Itinerary;
use crate::domain::ports::Explainer;

/// Plain-text justification of a finished itinerary.
#[derive(Debug, Clone, Copy, Default)]
pub struct SummaryExplainer;

impl Explainer for SummaryExplainer {
    fn explain(&self, itinerary: &Itinerary) -> String {
        if itinerary.is_empty() {
            return "No activities matched the current constraints.".to_string();
        }

        let mut lines = vec![format!(
            "Selected based on fit and balance: {}.",
            itinerary.names().join(", ")
        )];

        let unknown = itinerary.unknown_cost_count();
        let mut cost_line = format!("Estimated cost: {:.2}", itinerary.total_estimated_cost());
        if unknown > 0 {
            cost_line.push_str(&format!(
                " plus {} item{} with unknown cost",
                unknown,
                if unknown == 1 { "" } else { "s" }
            ));
        }
        lines.push(cost_line);

        let minutes = itinerary.total_minutes();
        if minutes > 0 {
            lines.push(format!("Estimated time: about {} minutes", minutes));
        }

        if let Some(notes) = itinerary.notes() {
            lines.push(notes.to_string());
        }

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::itinerary::ItineraryAssembler;
    use crate::domain::model::Activity;

    #[test]
    fn test_explains_selected_activities() {
        let mut assembler = ItineraryAssembler::new();
        assembler.add_activity(Activity::restaurant("Cozy Café").with_cost(25.0).with_minutes(60));
        assembler.add_activity(Activity::concert("Jazz Night"));
        let itinerary = assembler.build();

        let text = SummaryExplainer.explain(&itinerary);

        assert!(text.starts_with("Selected based on fit and balance: Cozy Café, Jazz Night."));
        assert!(text.contains("Estimated cost: 25.00 plus 1 item with unknown cost"));
        assert!(text.contains("about 60 minutes"));
        // explaining must leave the itinerary untouched
        assert_eq!(itinerary, assembler.build());
    }

    #[test]
    fn test_explains_very_long_activities() {
        let mut assembler = ItineraryAssembler::new();
        assembler.add_activity(Activity::park("Endless Trail").with_minutes(u32::MAX));
        assembler.add_activity(Activity::park("Rose Garden").with_minutes(10));

        let text = SummaryExplainer.explain(&assembler.build());

        let expected = u64::from(u32::MAX) + 10;
        assert!(text.contains(&format!("about {} minutes", expected)));
    }

    #[test]
    fn test_explains_empty_itinerary() {
        let text = SummaryExplainer.explain(&Itinerary::default());
        assert_eq!(text, "No activities matched the current constraints.");
    }
}
