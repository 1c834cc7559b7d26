use std::fmt;

use thiserror::Error;
use workout_tracker_lib::WorkoutId;

/// An input field of the workout form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Kind,
    Coordinates,
    Distance,
    Duration,
    Cadence,
    ElevationGain,
}

impl Field {
    fn rule(&self) -> &'static str {
        match self {
            Field::Kind => "kind must be running or cycling",
            Field::Coordinates => "location must be a finite coordinate",
            Field::Distance => "distance must be a positive number",
            Field::Duration => "duration must be a positive number",
            Field::Cadence => "cadence must be a positive number",
            Field::ElevationGain => "elevation gain must be a non-zero number",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Kind => "kind",
            Field::Coordinates => "coordinates",
            Field::Distance => "distance",
            Field::Duration => "duration",
            Field::Cadence => "cadence",
            Field::ElevationGain => "elevation gain",
        })
    }
}

/// One or more inputs were non-finite or non-positive for the selected kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid workout: {}", rules(.fields))]
pub struct ValidationError {
    pub fields: Vec<Field>,
}

impl ValidationError {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    pub fn contains(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }
}

fn rules(fields: &[Field]) -> String {
    fields.iter().map(Field::rule).collect::<Vec<_>>().join(", ")
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No workout with id {0}")]
pub struct NotFoundError(pub WorkoutId);

/// A persisted blob, or a record inside it, could not be turned back into workouts.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Malformed workout blob: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Record {id} has unknown kind '{kind}'")]
    UnknownKind { id: String, kind: String },

    #[error("Record {id} is missing {field}")]
    MissingField { id: String, field: Field },

    #[error("Record {id} is invalid: {source}")]
    Invalid { id: String, source: ValidationError },

    #[error("Record {0} repeats an id already loaded")]
    DuplicateId(WorkoutId),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode workouts: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum WorkoutError {
    #[error("Could not find your position!")]
    LocationUnavailable(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}
