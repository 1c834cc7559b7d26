use chrono::{DateTime, Local, TimeZone};
use workout_tracker_lib::{workout::ActivityInput, Coordinates, Workout, WorkoutId};

use crate::{Field, NotFoundError, ValidationError};

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.
}

/// Checks everything a workout needs before it can be constructed.
/// Elevation gain may be negative, only its magnitude has to be positive.
pub fn validate(coordinates: Coordinates, distance_km: f64, duration_min: f64, input: &ActivityInput) -> Result<(), ValidationError> {
    let mut fields = Vec::new();

    if !coordinates.is_finite() {
        fields.push(Field::Coordinates);
    }
    if !is_positive(distance_km) {
        fields.push(Field::Distance);
    }
    if !is_positive(duration_min) {
        fields.push(Field::Duration);
    }

    match input {
        ActivityInput::Running { cadence_spm } => {
            if !is_positive(*cadence_spm) {
                fields.push(Field::Cadence);
            }
        }
        ActivityInput::Cycling { elevation_gain_m } => {
            if !is_positive(elevation_gain_m.abs()) {
                fields.push(Field::ElevationGain);
            }
        }
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(fields))
    }
}

/// The authoritative, ordered workout collection.
/// Insertion order is display order and persistence order.
#[derive(Debug, Clone, Default)]
pub struct WorkoutStore {
    workouts: Vec<Workout>,
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamps the workout with the local clock, so the description names the user's day.
    pub fn create(&mut self, coordinates: Coordinates, distance_km: f64, duration_min: f64, input: ActivityInput) -> Result<&Workout, ValidationError> {
        self.create_at(coordinates, distance_km, duration_min, input, Local::now())
    }

    pub fn create_at<Tz: TimeZone>(
        &mut self,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        input: ActivityInput,
        created_at: DateTime<Tz>,
    ) -> Result<&Workout, ValidationError> {
        validate(coordinates, distance_km, duration_min, &input)?;

        let id = self.fresh_id();
        self.workouts.push(Workout::new(id, created_at, coordinates, distance_km, duration_min, input));

        let index = self.workouts.len() - 1;
        Ok(&self.workouts[index])
    }

    /// Removes the workout and hands it back so views can clean up after it.
    pub fn delete(&mut self, id: &WorkoutId) -> Result<Workout, NotFoundError> {
        let index = self.workouts.iter()
            .position(|workout| workout.id() == id)
            .ok_or_else(|| NotFoundError(id.clone()))?;

        Ok(self.workouts.remove(index))
    }

    pub fn find_by_id(&self, id: &WorkoutId) -> Option<&Workout> {
        self.workouts.iter().find(|workout| workout.id() == id)
    }

    /// Bumps the interaction counter of a workout. Not a structural change.
    pub fn record_interaction(&mut self, id: &WorkoutId) -> Option<u32> {
        self.workouts.iter_mut()
            .find(|workout| workout.id() == id)
            .map(Workout::record_interaction)
    }

    pub fn all(&self) -> &[Workout] {
        &self.workouts
    }

    /// Swaps the whole collection in one step. Only used when hydrating from storage.
    pub fn replace_all(&mut self, workouts: Vec<Workout>) {
        self.workouts = workouts;
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }

    fn fresh_id(&self) -> WorkoutId {
        loop {
            let id = WorkoutId::generate();
            if self.find_by_id(&id).is_none() {
                return id;
            }
        }
    }
}
