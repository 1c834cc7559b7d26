use gloo_console::{error, info};
use gloo_utils::window;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{GeolocationPosition, GeolocationPositionError, Storage};
use workout_tracker_data_management::{storage::KeyValueStore, StorageError};
use workout_tracker_lib::Coordinates;
use workout_tracker_view::{EventSink, Geolocation, Notifier, ViewEvent};

pub struct BrowserGeolocation;

impl Geolocation for BrowserGeolocation {
    fn request_position(&mut self, sink: EventSink) {
        let geolocation = match window().navigator().geolocation() {
            Ok(geolocation) => geolocation,
            Err(err) => {
                error!("Geolocation is not available", err);
                sink(ViewEvent::LocationFailed("Geolocation is not available".into()));
                return;
            }
        };

        let on_success = sink.clone();
        let success = Closure::once(move |position: GeolocationPosition| {
            let coords = position.coords();
            on_success(ViewEvent::LocationResolved(Coordinates::new(coords.latitude(), coords.longitude())));
        });
        let on_failure = sink.clone();
        let failure = Closure::once(move |err: GeolocationPositionError| {
            on_failure(ViewEvent::LocationFailed(err.message()));
        });

        match geolocation.get_current_position_with_error_callback(success.as_ref().unchecked_ref(), Some(failure.as_ref().unchecked_ref())) {
            Ok(()) => {
                // Each fires at most once and lives until then
                success.forget();
                failure.forget();
            }
            Err(err) => {
                error!("Position request was refused", err);
                sink(ViewEvent::LocationFailed("Position request was refused".into()));
            }
        }
    }
}

pub struct BrowserAlert;

impl Notifier for BrowserAlert {
    fn alert(&mut self, message: &str) {
        if let Err(err) = window().alert_with_message(message) {
            error!(format!("Could not show alert: {message}"), err);
        }
    }
}

/// `window.localStorage`. Survives reloads, scoped to the page origin.
pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, StorageError> {
        let storage = window()
            .local_storage()
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".into()))?;
        info!("Opened localStorage");
        Ok(Self { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| StorageError::Unavailable(format!("{err:?}")))
    }
}
