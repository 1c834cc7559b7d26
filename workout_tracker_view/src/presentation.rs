use workout_tracker_lib::{Workout, WorkoutId, WorkoutKind};

#[derive(Debug, Clone, PartialEq)]
pub struct PopupStyle {
    pub max_width: f64,
    pub min_width: f64,
    pub auto_close: bool,
    pub close_on_click: bool,
}

/// Marker popup for one workout.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub content: String,
    pub class_name: String,
    pub style: PopupStyle,
}

impl Popup {
    pub fn for_workout(workout: &Workout, style: &PopupStyle) -> Self {
        Self {
            content: format!("{} {}", workout.kind().icon(), workout.description()),
            class_name: format!("{}-popup", workout.kind()),
            style: style.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stat {
    pub icon: &'static str,
    pub value: String,
    pub unit: &'static str,
}

impl Stat {
    fn new(icon: &'static str, value: String, unit: &'static str) -> Self {
        Self { icon, value, unit }
    }
}

/// What a list entry shows. Carries the id so clicks can be routed back.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntry {
    pub id: WorkoutId,
    pub kind: WorkoutKind,
    pub title: String,
    pub stats: Vec<Stat>,
}

impl From<&Workout> for ListEntry {
    fn from(workout: &Workout) -> Self {
        let metric = workout.metric();
        let mut stats = vec![
            Stat::new(workout.kind().icon(), workout.distance_km().to_string(), "km"),
            Stat::new("⏱", workout.duration_min().to_string(), "min"),
            Stat::new("⚡️", format!("{:.1}", metric.value), metric.unit),
        ];

        match workout {
            Workout::Running(running) => stats.push(Stat::new("🦶🏼", running.cadence_spm().to_string(), "spm")),
            Workout::Cycling(cycling) => stats.push(Stat::new("⛰", cycling.elevation_gain_m().to_string(), "m")),
        }

        Self {
            id: workout.id().clone(),
            kind: workout.kind(),
            title: workout.description().to_owned(),
            stats,
        }
    }
}
