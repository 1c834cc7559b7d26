//! Recording doubles for every collaborator of the reconciler.

#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc, time::Duration};

use workout_tracker_data_management::{storage::MemoryStore, WorkoutManager};
use workout_tracker_lib::{Coordinates, WorkoutId, WorkoutKind};
use workout_tracker_view::{
    event_channel, EventQueue, EventSink, Geolocation, ListEntry, MapWidget, Notifier, Popup, RawWorkoutInput, ViewConfig,
    ViewEvent, ViewReconciler, WorkoutForm, WorkoutList,
};

pub type TestReconciler = ViewReconciler<FakeMap, FakeForm, FakeList, FakeNotifier, MemoryStore>;

pub struct FakeGeolocation {
    pub answer: Result<Coordinates, String>,
    pub requests: usize,
}

impl Geolocation for FakeGeolocation {
    fn request_position(&mut self, sink: EventSink) {
        self.requests += 1;
        match &self.answer {
            Ok(at) => sink(ViewEvent::LocationResolved(*at)),
            Err(reason) => sink(ViewEvent::LocationFailed(reason.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker {
    pub handle: u32,
    pub at: Coordinates,
    pub popup: Popup,
}

#[derive(Default)]
pub struct FakeMap {
    pub views: Vec<(Coordinates, f64)>,
    pub pans: Vec<(Coordinates, f64)>,
    pub markers: Vec<PlacedMarker>,
    pub removed: Vec<u32>,
    pub click_subscriptions: usize,
    next_handle: u32,
    sink: Option<EventSink>,
}

impl FakeMap {
    pub fn click(&self, at: Coordinates) {
        let sink = self.sink.as_ref().expect("map clicks were never subscribed");
        sink(ViewEvent::MapClicked(at));
    }

    pub fn marker_at(&self, at: Coordinates) -> Option<&PlacedMarker> {
        self.markers.iter().find(|marker| marker.at == at)
    }
}

impl MapWidget for FakeMap {
    type Marker = u32;

    fn set_view(&mut self, center: Coordinates, zoom: f64) {
        self.views.push((center, zoom));
    }

    fn pan_to(&mut self, center: Coordinates, zoom: f64) {
        self.pans.push((center, zoom));
    }

    fn add_marker(&mut self, at: Coordinates, popup: &Popup) -> u32 {
        self.next_handle += 1;
        self.markers.push(PlacedMarker { handle: self.next_handle, at, popup: popup.clone() });
        self.next_handle
    }

    fn remove_marker(&mut self, marker: u32) {
        self.markers.retain(|placed| placed.handle != marker);
        self.removed.push(marker);
    }

    fn subscribe_clicks(&mut self, sink: EventSink) {
        self.click_subscriptions += 1;
        self.sink = Some(sink);
    }
}

#[derive(Default)]
pub struct FakeForm {
    pub visible: bool,
    pub focused: bool,
    pub shown: usize,
    pub fields_for: Option<WorkoutKind>,
    pub hidden_for: Option<Duration>,
    pub subscriptions: usize,
    input: Rc<RefCell<RawWorkoutInput>>,
    sink: Option<EventSink>,
}

impl FakeForm {
    pub fn type_in(&self, kind: &str, distance: &str, duration: &str, cadence: &str, elevation: &str) {
        *self.input.borrow_mut() = RawWorkoutInput {
            kind: kind.into(),
            distance: distance.into(),
            duration: duration.into(),
            cadence: cadence.into(),
            elevation: elevation.into(),
        };
    }

    pub fn input(&self) -> RawWorkoutInput {
        self.input.borrow().clone()
    }

    pub fn submit(&self) {
        let sink = self.sink.as_ref().expect("form was never subscribed");
        sink(ViewEvent::FormSubmitted);
    }

    pub fn select_kind(&self, kind: WorkoutKind) {
        let sink = self.sink.as_ref().expect("form was never subscribed");
        sink(ViewEvent::KindToggled(kind));
    }
}

impl WorkoutForm for FakeForm {
    fn show(&mut self) {
        self.visible = true;
        self.focused = true;
        self.shown += 1;
    }

    fn read(&self) -> RawWorkoutInput {
        self.input()
    }

    fn show_fields_for(&mut self, kind: WorkoutKind) {
        self.fields_for = Some(kind);
    }

    fn clear(&mut self) {
        let kind = self.input.borrow().kind.clone();
        *self.input.borrow_mut() = RawWorkoutInput { kind, ..Default::default() };
    }

    fn hide(&mut self, transition: Duration) {
        self.visible = false;
        self.focused = false;
        self.hidden_for = Some(transition);
    }

    fn subscribe(&mut self, sink: EventSink) {
        self.subscriptions += 1;
        self.sink = Some(sink);
    }
}

#[derive(Default)]
pub struct FakeList {
    /// Top of the list first
    pub entries: Vec<ListEntry>,
    pub subscriptions: usize,
    sink: Option<EventSink>,
}

impl FakeList {
    pub fn click(&self, id: &WorkoutId) {
        let sink = self.sink.as_ref().expect("list was never subscribed");
        sink(ViewEvent::WorkoutSelected(id.clone()));
    }

    pub fn click_delete(&self, id: &WorkoutId) {
        let sink = self.sink.as_ref().expect("list was never subscribed");
        sink(ViewEvent::DeleteRequested(id.clone()));
    }

    pub fn ids(&self) -> Vec<WorkoutId> {
        self.entries.iter().map(|entry| entry.id.clone()).collect()
    }
}

impl WorkoutList for FakeList {
    fn insert(&mut self, entry: &ListEntry) {
        self.entries.insert(0, entry.clone());
    }

    fn remove(&mut self, id: &WorkoutId) {
        self.entries.retain(|entry| &entry.id != id);
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn subscribe(&mut self, sink: EventSink) {
        self.subscriptions += 1;
        self.sink = Some(sink);
    }
}

#[derive(Default)]
pub struct FakeNotifier {
    pub alerts: Vec<String>,
}

impl Notifier for FakeNotifier {
    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }
}

pub const HOME: Coordinates = Coordinates(56.175188, 10.196123);

pub struct Harness {
    pub reconciler: TestReconciler,
    pub events: EventQueue,
    pub geolocation: FakeGeolocation,
}

impl Harness {
    pub fn start(storage: MemoryStore, location: Result<Coordinates, String>) -> Self {
        let manager = WorkoutManager::load(storage);
        let mut reconciler = ViewReconciler::new(
            manager,
            FakeMap::default(),
            FakeForm::default(),
            FakeList::default(),
            FakeNotifier::default(),
            ViewConfig::default(),
        );

        let (sink, events) = event_channel();
        let mut geolocation = FakeGeolocation { answer: location, requests: 0 };
        reconciler.start(sink, &mut geolocation);

        let mut harness = Self { reconciler, events, geolocation };
        harness.pump();
        harness
    }

    pub fn located() -> Self {
        Self::start(MemoryStore::new(), Ok(HOME))
    }

    pub fn pump(&mut self) -> usize {
        self.reconciler.pump(&self.events)
    }

    pub fn map(&self) -> &FakeMap {
        self.reconciler.map()
    }

    pub fn form(&self) -> &FakeForm {
        self.reconciler.form()
    }

    pub fn list(&self) -> &FakeList {
        self.reconciler.list()
    }

    pub fn alerts(&self) -> &[String] {
        &self.reconciler.notifier().alerts
    }

    /// Click the map, fill the form, submit.
    pub fn record(&mut self, at: Coordinates, kind: &str, distance: &str, duration: &str, extra: &str) {
        self.map().click(at);
        self.pump();
        match kind {
            "cycling" => self.form().type_in(kind, distance, duration, "", extra),
            _ => self.form().type_in(kind, distance, duration, extra, ""),
        }
        self.form().submit();
        self.pump();
    }
}
