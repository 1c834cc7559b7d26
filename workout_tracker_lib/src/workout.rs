use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{coordinates::Coordinates, workout_id::WorkoutId};

// Indexed by zero based month
pub const MONTHS: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutKind {
    Running,
    Cycling,
}

impl WorkoutKind {
    pub const ALL: [WorkoutKind; 2] = [WorkoutKind::Running, WorkoutKind::Cycling];

    /// Tag used in storage, the form select and css class names.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "running",
            WorkoutKind::Cycling => "cycling",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "Running",
            WorkoutKind::Cycling => "Cycling",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            WorkoutKind::Running => "🏃‍♂️",
            WorkoutKind::Cycling => "🚴‍♀️",
        }
    }
}

impl fmt::Display for WorkoutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown workout kind '{0}'")]
pub struct UnknownKind(pub String);

impl FromStr for WorkoutKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "running" => Ok(WorkoutKind::Running),
            "cycling" => Ok(WorkoutKind::Cycling),
            other => Err(UnknownKind(other.to_owned())),
        }
    }
}

/// "Running on April 14", on the calendar of `created_at`'s time zone.
pub fn describe<Tz: TimeZone>(kind: WorkoutKind, created_at: &DateTime<Tz>) -> String {
    format!("{} on {} {}", kind.label(), MONTHS[created_at.month0() as usize], created_at.day())
}

/// The variant specific part of a new workout, as entered by the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActivityInput {
    Running { cadence_spm: f64 },
    Cycling { elevation_gain_m: f64 },
}

impl ActivityInput {
    pub fn kind(&self) -> WorkoutKind {
        match self {
            ActivityInput::Running { .. } => WorkoutKind::Running,
            ActivityInput::Cycling { .. } => WorkoutKind::Cycling,
        }
    }
}

/// A frozen derived metric together with its display unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metric {
    pub value: f64,
    pub unit: &'static str,
}

/// Fields shared by both variants.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutCommon {
    id: WorkoutId,
    created_at: DateTime<Utc>,
    coordinates: Coordinates,
    distance_km: f64,
    duration_min: f64,
    description: String,
    interaction_count: u32,
}

impl WorkoutCommon {
    fn new<Tz: TimeZone>(kind: WorkoutKind, id: WorkoutId, created_at: DateTime<Tz>, coordinates: Coordinates, distance_km: f64, duration_min: f64) -> Self {
        Self {
            id,
            description: describe(kind, &created_at),
            created_at: created_at.with_timezone(&Utc),
            coordinates,
            distance_km,
            duration_min,
            interaction_count: 0,
        }
    }

    /// Rebuilds the shared fields from stored values. The description is taken as stored, not re-derived.
    pub fn restore(
        id: WorkoutId,
        created_at: DateTime<Utc>,
        coordinates: Coordinates,
        distance_km: f64,
        duration_min: f64,
        description: String,
        interaction_count: u32,
    ) -> Self {
        Self {
            id,
            created_at,
            coordinates,
            distance_km,
            duration_min,
            description,
            interaction_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Running {
    common: WorkoutCommon,
    cadence_spm: f64,
    pace_min_per_km: f64,
}

impl Running {
    pub fn new<Tz: TimeZone>(id: WorkoutId, created_at: DateTime<Tz>, coordinates: Coordinates, distance_km: f64, duration_min: f64, cadence_spm: f64) -> Self {
        Self {
            common: WorkoutCommon::new(WorkoutKind::Running, id, created_at, coordinates, distance_km, duration_min),
            cadence_spm,
            pace_min_per_km: duration_min / distance_km,
        }
    }

    pub fn restore(common: WorkoutCommon, cadence_spm: f64, pace_min_per_km: f64) -> Self {
        Self {
            common,
            cadence_spm,
            pace_min_per_km,
        }
    }

    pub fn cadence_spm(&self) -> f64 {
        self.cadence_spm
    }

    pub fn pace_min_per_km(&self) -> f64 {
        self.pace_min_per_km
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cycling {
    common: WorkoutCommon,
    elevation_gain_m: f64,
    speed_km_per_h: f64,
}

impl Cycling {
    pub fn new<Tz: TimeZone>(id: WorkoutId, created_at: DateTime<Tz>, coordinates: Coordinates, distance_km: f64, duration_min: f64, elevation_gain_m: f64) -> Self {
        Self {
            common: WorkoutCommon::new(WorkoutKind::Cycling, id, created_at, coordinates, distance_km, duration_min),
            elevation_gain_m,
            speed_km_per_h: distance_km / (duration_min / 60.),
        }
    }

    pub fn restore(common: WorkoutCommon, elevation_gain_m: f64, speed_km_per_h: f64) -> Self {
        Self {
            common,
            elevation_gain_m,
            speed_km_per_h,
        }
    }

    pub fn elevation_gain_m(&self) -> f64 {
        self.elevation_gain_m
    }

    pub fn speed_km_per_h(&self) -> f64 {
        self.speed_km_per_h
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Workout {
    Running(Running),
    Cycling(Cycling),
}

impl Workout {
    /// Builds the variant matching `input`. Never fails, inputs are validated by the store beforehand.
    /// The description follows the calendar of `created_at`, the stored timestamp is UTC.
    pub fn new<Tz: TimeZone>(id: WorkoutId, created_at: DateTime<Tz>, coordinates: Coordinates, distance_km: f64, duration_min: f64, input: ActivityInput) -> Self {
        match input {
            ActivityInput::Running { cadence_spm } => {
                Workout::Running(Running::new(id, created_at, coordinates, distance_km, duration_min, cadence_spm))
            }
            ActivityInput::Cycling { elevation_gain_m } => {
                Workout::Cycling(Cycling::new(id, created_at, coordinates, distance_km, duration_min, elevation_gain_m))
            }
        }
    }

    fn common(&self) -> &WorkoutCommon {
        match self {
            Workout::Running(running) => &running.common,
            Workout::Cycling(cycling) => &cycling.common,
        }
    }

    fn common_mut(&mut self) -> &mut WorkoutCommon {
        match self {
            Workout::Running(running) => &mut running.common,
            Workout::Cycling(cycling) => &mut cycling.common,
        }
    }

    pub fn kind(&self) -> WorkoutKind {
        match self {
            Workout::Running(_) => WorkoutKind::Running,
            Workout::Cycling(_) => WorkoutKind::Cycling,
        }
    }

    pub fn id(&self) -> &WorkoutId {
        &self.common().id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.common().created_at
    }

    pub fn coordinates(&self) -> Coordinates {
        self.common().coordinates
    }

    pub fn distance_km(&self) -> f64 {
        self.common().distance_km
    }

    pub fn duration_min(&self) -> f64 {
        self.common().duration_min
    }

    pub fn description(&self) -> &str {
        &self.common().description
    }

    pub fn interaction_count(&self) -> u32 {
        self.common().interaction_count
    }

    /// The frozen pace (running) or speed (cycling).
    pub fn metric(&self) -> Metric {
        match self {
            Workout::Running(running) => Metric {
                value: running.pace_min_per_km,
                unit: "min/km",
            },
            Workout::Cycling(cycling) => Metric {
                value: cycling.speed_km_per_h,
                unit: "km/h",
            },
        }
    }

    /// Returns the new count.
    pub fn record_interaction(&mut self) -> u32 {
        let common = self.common_mut();
        common.interaction_count = common.interaction_count.saturating_add(1);
        common.interaction_count
    }
}
