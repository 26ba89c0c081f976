use crate::domain::model::{Activity, Itinerary, TravelLeg};

/// Incrementally builds an [`Itinerary`].
///
/// `build` hands out a snapshot, so an itinerary already returned to a caller
/// never changes when the assembler keeps growing or is reset.
#[derive(Debug, Default)]
pub struct ItineraryAssembler {
    itinerary: Itinerary,
}

impl ItineraryAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_activity(&mut self, activity: Activity) {
        if let Some(cost) = activity.estimated_cost {
            self.itinerary.total_estimated_cost += cost;
        }
        self.itinerary.items.push(activity);
    }

    pub fn add_travel_leg(&mut self, from: impl Into<String>, to: impl Into<String>, minutes: u32) {
        self.itinerary.travel_legs.push(TravelLeg {
            from: from.into(),
            to: to.into(),
            minutes,
        });
    }

    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.itinerary.notes = Some(notes.into());
    }

    pub fn len(&self) -> usize {
        self.itinerary.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itinerary.items.is_empty()
    }

    pub fn build(&self) -> Itinerary {
        self.itinerary.clone()
    }

    pub fn into_itinerary(self) -> Itinerary {
        self.itinerary
    }

    pub fn reset(&mut self) {
        self.itinerary = Itinerary::default();
    }
}
