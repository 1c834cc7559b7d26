use const_format::concatcp;

pub mod codec;
pub mod error;
pub mod storage;
pub mod store;
mod workout_manager;

pub use error::*;
pub use workout_manager::*;

/// Key under which the whole workout list is persisted.
pub const STORAGE_KEY: &str = "workouts";

pub const DATA_DIR: &str = "data/";
pub const STORAGE_FILE_EXTENSION: &str = ".json";
pub const DEFAULT_STORAGE_FILE: &str = concatcp!(DATA_DIR, STORAGE_KEY, STORAGE_FILE_EXTENSION);
