use chrono::{DateTime, Local, TimeZone};
use workout_tracker_lib::{workout::ActivityInput, Coordinates, Workout, WorkoutId};

use crate::{
    codec,
    storage::KeyValueStore,
    store::WorkoutStore,
    NotFoundError, StorageError, ValidationError, STORAGE_KEY,
};

/// The public interface for workout data: the store plus the storage it is mirrored into.
/// Every mutation rewrites the whole persisted list before returning.
pub struct WorkoutManager<S: KeyValueStore> {
    store: WorkoutStore,
    storage: S,
    key: String,
}

impl<S: KeyValueStore> WorkoutManager<S> {
    /// Hydrates from `storage`. Missing or unreadable data starts an empty history.
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, STORAGE_KEY)
    }

    pub fn load_with_key(storage: S, key: &str) -> Self {
        let mut store = WorkoutStore::new();
        store.replace_all(codec::decode(storage.get(key).as_deref()));
        tracing::info!("Loaded {} workouts", store.len());

        Self {
            store,
            storage,
            key: key.to_owned(),
        }
    }

    pub fn store(&self) -> &WorkoutStore {
        &self.store
    }

    pub fn workouts(&self) -> &[Workout] {
        self.store.all()
    }

    pub fn find(&self, id: &WorkoutId) -> Option<&Workout> {
        self.store.find_by_id(id)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

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
        let id = self.store.create_at(coordinates, distance_km, duration_min, input, created_at)?.id().clone();
        tracing::info!("Created {} workout {id}", input.kind());
        self.persist_or_log();

        let index = self.store.len() - 1;
        Ok(&self.store.all()[index])
    }

    pub fn delete(&mut self, id: &WorkoutId) -> Result<Workout, NotFoundError> {
        let removed = self.store.delete(id)?;
        tracing::info!("Deleted workout {id}");
        self.persist_or_log();
        Ok(removed)
    }

    pub fn record_interaction(&mut self, id: &WorkoutId) -> Option<u32> {
        let count = self.store.record_interaction(id)?;
        self.persist_or_log();
        Some(count)
    }

    /// Rewrites the whole list under the storage key.
    pub fn persist(&mut self) -> Result<(), StorageError> {
        let blob = codec::encode(self.store.all())?;
        self.storage.set(&self.key, &blob)
    }

    // The in-memory store keeps the change, the next successful write carries it
    fn persist_or_log(&mut self) {
        if let Err(err) = self.persist() {
            tracing::error!("Failed to persist workouts: {err}");
        }
    }
}
