pub mod coordinates;
pub mod workout;
pub mod workout_id;

pub use coordinates::Coordinates;
pub use workout::{describe, ActivityInput, Cycling, Metric, Running, UnknownKind, Workout, WorkoutCommon, WorkoutKind, MONTHS};
pub use workout_id::WorkoutId;
