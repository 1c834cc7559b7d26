use std::collections::HashMap;

use workout_tracker_data_management::{storage::KeyValueStore, ValidationError, WorkoutError, WorkoutManager};
use workout_tracker_lib::{Coordinates, Workout, WorkoutId};

use crate::{
    collaborators::{Geolocation, MapWidget, Notifier, WorkoutForm, WorkoutList},
    config::ViewConfig,
    event::{EventQueue, EventSink, ViewEvent},
    presentation::{ListEntry, Popup},
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewState {
    /// Waiting for the one geolocation answer. No map yet.
    AwaitingLocation,
    /// Geolocation failed. The list works, the map never will.
    LocationUnavailable,
    MapReady,
    /// The form is visible for a workout at `coordinates`.
    FormOpen { coordinates: Coordinates },
}

/// Keeps the map markers and list entries in step with the workout store, and routes
/// every user interaction through it.
pub struct ViewReconciler<M, F, L, N, S>
where
    M: MapWidget,
    F: WorkoutForm,
    L: WorkoutList,
    N: Notifier,
    S: KeyValueStore,
{
    manager: WorkoutManager<S>,
    map: M,
    form: F,
    list: L,
    notifier: N,
    config: ViewConfig,
    state: ViewState,
    markers: HashMap<WorkoutId, M::Marker>,
    sink: Option<EventSink>,
}

impl<M, F, L, N, S> ViewReconciler<M, F, L, N, S>
where
    M: MapWidget,
    F: WorkoutForm,
    L: WorkoutList,
    N: Notifier,
    S: KeyValueStore,
{
    pub fn new(manager: WorkoutManager<S>, map: M, form: F, list: L, notifier: N, config: ViewConfig) -> Self {
        Self {
            manager,
            map,
            form,
            list,
            notifier,
            config,
            state: ViewState::AwaitingLocation,
            markers: HashMap::new(),
            sink: None,
        }
    }

    /// Subscribes to the form and list and asks for the position. Only the first call does anything.
    pub fn start(&mut self, sink: EventSink, geolocation: &mut impl Geolocation) {
        if self.sink.is_some() {
            tracing::warn!("Reconciler already started");
            return;
        }

        self.form.subscribe(sink.clone());
        self.list.subscribe(sink.clone());
        self.sink = Some(sink.clone());
        geolocation.request_position(sink);
    }

    /// Handles every queued event. Returns how many there were.
    pub fn pump(&mut self, events: &EventQueue) -> usize {
        let mut handled = 0;
        while let Some(event) = events.pop() {
            self.handle(event);
            handled += 1;
        }
        handled
    }

    pub fn handle(&mut self, event: ViewEvent) {
        match event {
            ViewEvent::LocationResolved(center) => self.on_location(center),
            ViewEvent::LocationFailed(reason) => self.on_location_failed(reason),
            ViewEvent::MapClicked(at) => self.on_map_click(at),
            ViewEvent::KindToggled(kind) => self.form.show_fields_for(kind),
            ViewEvent::FormSubmitted => self.on_submit(),
            ViewEvent::WorkoutSelected(id) => self.on_select(&id),
            ViewEvent::DeleteRequested(id) => self.on_delete(&id),
        }
    }

    /// Throws away every marker and list entry and renders them again from the store.
    pub fn resync(&mut self) {
        for (_, marker) in self.markers.drain() {
            self.map.remove_marker(marker);
        }
        self.list.clear();
        self.render_all();
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn manager(&self) -> &WorkoutManager<S> {
        &self.manager
    }

    pub fn workouts(&self) -> &[Workout] {
        self.manager.workouts()
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn form(&self) -> &F {
        &self.form
    }

    pub fn list(&self) -> &L {
        &self.list
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    fn map_is_live(&self) -> bool {
        matches!(self.state, ViewState::MapReady | ViewState::FormOpen { .. })
    }

    fn on_location(&mut self, center: Coordinates) {
        if self.state != ViewState::AwaitingLocation {
            tracing::debug!("Ignoring late location {center}");
            return;
        }
        let Some(sink) = self.sink.clone() else {
            tracing::debug!("Ignoring location before start");
            return;
        };

        self.map.set_view(center, self.config.zoom);
        self.map.subscribe_clicks(sink);
        self.state = ViewState::MapReady;
        self.render_all();
    }

    fn on_location_failed(&mut self, reason: String) {
        if self.state != ViewState::AwaitingLocation {
            tracing::debug!("Ignoring late location failure: {reason}");
            return;
        }

        tracing::warn!("Geolocation failed: {reason}");
        let err = WorkoutError::LocationUnavailable(reason);
        self.notifier.alert(&err.to_string());
        self.state = ViewState::LocationUnavailable;
        self.render_all();
    }

    fn on_map_click(&mut self, at: Coordinates) {
        match self.state {
            ViewState::MapReady => {
                self.state = ViewState::FormOpen { coordinates: at };
                self.form.show();
            }
            // Last click wins
            ViewState::FormOpen { .. } => self.state = ViewState::FormOpen { coordinates: at },
            ViewState::AwaitingLocation | ViewState::LocationUnavailable => {
                tracing::debug!("Ignoring map click without a map");
            }
        }
    }

    fn on_submit(&mut self) {
        let ViewState::FormOpen { coordinates } = self.state else {
            tracing::debug!("Ignoring submit with no open form");
            return;
        };

        match self.create_from_form(coordinates) {
            Ok(id) => {
                self.render(&id);
                self.form.clear();
                self.form.hide(self.config.form_transition);
                self.state = ViewState::MapReady;
            }
            // Form stays open with the user's input and the captured coordinates
            Err(err) => self.notifier.alert(&err.to_string()),
        }
    }

    fn create_from_form(&mut self, coordinates: Coordinates) -> Result<WorkoutId, ValidationError> {
        let parsed = self.form.read().parse()?;
        let workout = self.manager.create(coordinates, parsed.distance_km, parsed.duration_min, parsed.activity)?;
        Ok(workout.id().clone())
    }

    fn on_select(&mut self, id: &WorkoutId) {
        let Some(center) = self.manager.find(id).map(Workout::coordinates) else {
            tracing::warn!("Selected workout {id} is not in the store");
            return;
        };

        if self.map_is_live() {
            self.map.pan_to(center, self.config.zoom);
        }
        self.manager.record_interaction(id);
    }

    fn on_delete(&mut self, id: &WorkoutId) {
        self.list.remove(id);
        if let Some(marker) = self.markers.remove(id) {
            self.map.remove_marker(marker);
        }

        if let Err(err) = self.manager.delete(id) {
            tracing::warn!("{err}");
        }

        self.resync();
    }

    fn render_all(&mut self) {
        let ids: Vec<WorkoutId> = self.manager.workouts().iter().map(|workout| workout.id().clone()).collect();
        for id in &ids {
            self.render(id);
        }
    }

    fn render(&mut self, id: &WorkoutId) {
        let Some(workout) = self.manager.find(id) else {
            return;
        };
        let entry = ListEntry::from(workout);
        let popup = Popup::for_workout(workout, &self.config.popup);
        let at = workout.coordinates();

        if self.map_is_live() {
            let marker = self.map.add_marker(at, &popup);
            self.markers.insert(id.clone(), marker);
        }
        self.list.insert(&entry);
    }
}
