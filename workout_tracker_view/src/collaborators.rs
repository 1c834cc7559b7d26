//! The outside world as the reconciler sees it. The browser binding implements these over
//! Leaflet and the DOM, tests implement them with recording doubles.

use std::time::Duration;

use workout_tracker_data_management::{Field, ValidationError};
use workout_tracker_lib::{workout::ActivityInput, Coordinates, WorkoutId, WorkoutKind};

use crate::{
    event::EventSink,
    presentation::{ListEntry, Popup},
};

/// One shot position lookup. Must answer with exactly one
/// `LocationResolved` or `LocationFailed` event.
pub trait Geolocation {
    fn request_position(&mut self, sink: EventSink);
}

pub trait MapWidget {
    /// Handle the widget uses to find a marker again. Markers are anchored by reference, not by id.
    type Marker;

    fn set_view(&mut self, center: Coordinates, zoom: f64);

    /// Animated move to `center`.
    fn pan_to(&mut self, center: Coordinates, zoom: f64);

    fn add_marker(&mut self, at: Coordinates, popup: &Popup) -> Self::Marker;

    fn remove_marker(&mut self, marker: Self::Marker);

    /// Reports `MapClicked` events.
    fn subscribe_clicks(&mut self, sink: EventSink);
}

pub trait WorkoutForm {
    /// Reveal the form and focus the distance field.
    fn show(&mut self);

    fn read(&self) -> RawWorkoutInput;

    /// Show the cadence or elevation field, whichever belongs to `kind`.
    fn show_fields_for(&mut self, kind: WorkoutKind);

    /// Empty every input.
    fn clear(&mut self);

    /// Hide the form, keeping it out of layout for `transition` so the list doesn't jump.
    fn hide(&mut self, transition: Duration);

    /// Reports `FormSubmitted` and `KindToggled` events.
    fn subscribe(&mut self, sink: EventSink);
}

pub trait WorkoutList {
    /// Insert directly after the form, so the newest entry is on top.
    fn insert(&mut self, entry: &ListEntry);

    fn remove(&mut self, id: &WorkoutId);

    fn clear(&mut self);

    /// Reports `WorkoutSelected` and `DeleteRequested` events.
    fn subscribe(&mut self, sink: EventSink);
}

/// Blocking user notification.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Form values as typed, before any coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawWorkoutInput {
    pub kind: String,
    pub distance: String,
    pub duration: String,
    pub cadence: String,
    pub elevation: String,
}

/// Parsed form values, ready for the store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedWorkoutInput {
    pub distance_km: f64,
    pub duration_min: f64,
    pub activity: ActivityInput,
}

fn number(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

impl RawWorkoutInput {
    /// Unparsable numbers become NaN and are rejected by store validation.
    /// Only an unknown kind is rejected here.
    pub fn parse(&self) -> Result<ParsedWorkoutInput, ValidationError> {
        let kind: WorkoutKind = self.kind.parse().map_err(|_| ValidationError::new(vec![Field::Kind]))?;

        let activity = match kind {
            WorkoutKind::Running => ActivityInput::Running { cadence_spm: number(&self.cadence) },
            WorkoutKind::Cycling => ActivityInput::Cycling { elevation_gain_m: number(&self.elevation) },
        };

        Ok(ParsedWorkoutInput {
            distance_km: number(&self.distance),
            duration_min: number(&self.duration),
            activity,
        })
    }
}
