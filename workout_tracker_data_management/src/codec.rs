//! Converts the workout list to and from the plain JSON blob kept in storage.
//!
//! Storage only keeps plain data, so every record carries its `type` tag and is turned back into a
//! real [`Workout`] variant on decode. A record that cannot be re-hydrated is dropped on its own,
//! a blob that cannot be parsed at all decodes as an empty history.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use workout_tracker_lib::{
    workout::{ActivityInput, WorkoutCommon},
    Coordinates, Cycling, Running, Workout, WorkoutId, WorkoutKind,
};

use crate::{store::validate, DecodeError, Field, StorageError};

/// Data-only projection of a workout, as it looks in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutRecord {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: String,
    pub date: DateTime<Utc>,
    pub coords: Coordinates,
    pub distance: f64,
    pub duration: f64,
    pub description: String,
    #[serde(default)]
    pub clicks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cadence: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pace: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elevation_gain: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

impl From<&Workout> for WorkoutRecord {
    fn from(workout: &Workout) -> Self {
        let (cadence, pace, elevation_gain, speed) = match workout {
            Workout::Running(running) => (Some(running.cadence_spm()), Some(running.pace_min_per_km()), None, None),
            Workout::Cycling(cycling) => (None, None, Some(cycling.elevation_gain_m()), Some(cycling.speed_km_per_h())),
        };

        Self {
            kind: workout.kind().as_str().to_owned(),
            id: workout.id().to_string(),
            date: workout.created_at(),
            coords: workout.coordinates(),
            distance: workout.distance_km(),
            duration: workout.duration_min(),
            description: workout.description().to_owned(),
            clicks: workout.interaction_count(),
            cadence,
            pace,
            elevation_gain,
            speed,
        }
    }
}

impl TryFrom<WorkoutRecord> for Workout {
    type Error = DecodeError;

    /// Re-attaches variant behavior using the stored tag. Frozen metrics are taken as stored and
    /// only derived from the inputs when the record predates them.
    fn try_from(record: WorkoutRecord) -> Result<Self, Self::Error> {
        let kind: WorkoutKind = record.kind.parse().map_err(|_| DecodeError::UnknownKind {
            id: record.id.clone(),
            kind: record.kind.clone(),
        })?;

        let missing = |field| DecodeError::MissingField { id: record.id.clone(), field };
        let input = match kind {
            WorkoutKind::Running => ActivityInput::Running {
                cadence_spm: record.cadence.ok_or_else(|| missing(Field::Cadence))?,
            },
            WorkoutKind::Cycling => ActivityInput::Cycling {
                elevation_gain_m: record.elevation_gain.ok_or_else(|| missing(Field::ElevationGain))?,
            },
        };

        validate(record.coords, record.distance, record.duration, &input).map_err(|source| DecodeError::Invalid {
            id: record.id.clone(),
            source,
        })?;

        let common = WorkoutCommon::restore(
            WorkoutId::from(record.id),
            record.date,
            record.coords,
            record.distance,
            record.duration,
            record.description,
            record.clicks,
        );

        Ok(match input {
            ActivityInput::Running { cadence_spm } => {
                let pace = record.pace.unwrap_or(record.duration / record.distance);
                Workout::Running(Running::restore(common, cadence_spm, pace))
            }
            ActivityInput::Cycling { elevation_gain_m } => {
                let speed = record.speed.unwrap_or(record.distance / (record.duration / 60.));
                Workout::Cycling(Cycling::restore(common, elevation_gain_m, speed))
            }
        })
    }
}

pub fn encode(workouts: &[Workout]) -> Result<String, StorageError> {
    let records: Vec<WorkoutRecord> = workouts.iter().map(WorkoutRecord::from).collect();
    Ok(serde_json::to_string(&records)?)
}

/// Never fails. A missing or unreadable blob is an empty history.
pub fn decode(blob: Option<&str>) -> Vec<Workout> {
    let Some(blob) = blob else {
        tracing::debug!("No stored workouts");
        return Vec::new();
    };

    match try_decode(blob) {
        Ok(workouts) => workouts,
        Err(err) => {
            tracing::warn!("Discarding stored workouts: {err}");
            Vec::new()
        }
    }
}

fn try_decode(blob: &str) -> Result<Vec<Workout>, DecodeError> {
    let values: Vec<serde_json::Value> = serde_json::from_str(blob)?;
    let mut workouts = Vec::with_capacity(values.len());
    let mut seen = HashSet::new();

    for value in values {
        // First record with an id wins
        let workout = serde_json::from_value::<WorkoutRecord>(value)
            .map_err(DecodeError::from)
            .and_then(Workout::try_from)
            .and_then(|workout| {
                if seen.insert(workout.id().clone()) {
                    Ok(workout)
                } else {
                    Err(DecodeError::DuplicateId(workout.id().clone()))
                }
            });

        match workout {
            Ok(workout) => workouts.push(workout),
            Err(err) => tracing::warn!("Skipping stored workout: {err}"),
        }
    }

    Ok(workouts)
}
