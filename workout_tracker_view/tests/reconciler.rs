mod support;

use std::time::Duration;

use chrono::{TimeZone, Utc};
use support::{Harness, HOME};
use workout_tracker_data_management::{codec, storage::{KeyValueStore, MemoryStore}, store::WorkoutStore, STORAGE_KEY};
use workout_tracker_lib::{workout::ActivityInput, Coordinates, WorkoutId, WorkoutKind};
use workout_tracker_view::{event_channel, ViewEvent, ViewState};

fn stored_blob(harness: &Harness) -> Option<String> {
    harness.reconciler.manager().storage().get(STORAGE_KEY)
}

fn seeded_storage() -> (MemoryStore, Vec<WorkoutId>) {
    let created_at = Utc.with_ymd_and_hms(2025, 8, 21, 6, 45, 0).unwrap();
    let mut store = WorkoutStore::new();
    let first = store
        .create_at(Coordinates::new(10., 50.), 5., 25., ActivityInput::Running { cadence_spm: 180. }, created_at)
        .unwrap()
        .id()
        .clone();
    let second = store
        .create_at(Coordinates::new(11., 51.), 20., 60., ActivityInput::Cycling { elevation_gain_m: 300. }, created_at)
        .unwrap()
        .id()
        .clone();

    let blob = codec::encode(store.all()).unwrap();
    (MemoryStore::with_value(STORAGE_KEY, &blob), vec![first, second])
}

#[test]
fn location_renders_the_stored_history() {
    let (storage, ids) = seeded_storage();
    let harness = Harness::start(storage, Ok(HOME));

    assert_eq!(harness.reconciler.state(), ViewState::MapReady);
    assert_eq!(harness.map().views, vec![(HOME, 13.)]);
    assert_eq!(harness.map().click_subscriptions, 1);
    assert_eq!(harness.form().subscriptions, 1);
    assert_eq!(harness.list().subscriptions, 1);

    assert_eq!(harness.map().markers.len(), 2);
    let marker = harness.map().marker_at(Coordinates::new(11., 51.)).unwrap();
    assert_eq!(marker.popup.content, "🚴‍♀️ Cycling on August 21");
    assert_eq!(marker.popup.class_name, "cycling-popup");

    // Each entry goes right after the form, so the newest ends up on top
    assert_eq!(harness.list().ids(), vec![ids[1].clone(), ids[0].clone()]);
    assert!(harness.alerts().is_empty());
}

#[test]
fn failed_location_alerts_and_keeps_the_list() {
    let (storage, _) = seeded_storage();
    let mut harness = Harness::start(storage, Err("User denied Geolocation".into()));

    assert_eq!(harness.reconciler.state(), ViewState::LocationUnavailable);
    assert_eq!(harness.alerts(), ["Could not find your position!"]);
    assert!(harness.map().views.is_empty());
    assert!(harness.map().markers.is_empty());
    assert_eq!(harness.map().click_subscriptions, 0);
    assert_eq!(harness.list().entries.len(), 2);

    harness.reconciler.handle(ViewEvent::MapClicked(HOME));
    assert_eq!(harness.reconciler.state(), ViewState::LocationUnavailable);
    assert!(!harness.form().visible);
}

#[test]
fn map_click_opens_form_and_last_click_wins() {
    let mut harness = Harness::located();
    let first = Coordinates::new(56.1, 10.1);
    let second = Coordinates::new(56.2, 10.2);

    harness.map().click(first);
    harness.pump();
    assert_eq!(harness.reconciler.state(), ViewState::FormOpen { coordinates: first });
    assert!(harness.form().visible);
    assert!(harness.form().focused);

    harness.map().click(second);
    harness.pump();
    assert_eq!(harness.reconciler.state(), ViewState::FormOpen { coordinates: second });
    assert_eq!(harness.form().shown, 1);
}

#[test]
fn submitting_a_run_renders_persists_and_resets() {
    let mut harness = Harness::located();
    let at = Coordinates::new(10., 50.);

    harness.record(at, "running", "5", "25", "180");

    let workouts = harness.reconciler.workouts();
    assert_eq!(workouts.len(), 1);
    let workout = &workouts[0];
    assert_eq!(workout.kind(), WorkoutKind::Running);
    assert_eq!(workout.coordinates(), at);
    assert_eq!(workout.metric().value, 5.);
    assert!(workout.description().starts_with("Running on "));

    let marker = harness.map().marker_at(at).unwrap();
    assert_eq!(marker.popup.content, format!("🏃‍♂️ {}", workout.description()));
    assert_eq!(marker.popup.class_name, "running-popup");
    assert_eq!(harness.list().ids(), vec![workout.id().clone()]);

    let stored = codec::decode(stored_blob(&harness).as_deref());
    assert_eq!(stored, workouts);

    assert_eq!(harness.reconciler.state(), ViewState::MapReady);
    assert!(!harness.form().visible);
    assert_eq!(harness.form().hidden_for, Some(Duration::from_millis(1000)));
    let input = harness.form().input();
    assert_eq!((input.distance.as_str(), input.duration.as_str(), input.cadence.as_str()), ("", "", ""));
}

#[test]
fn downhill_ride_is_accepted() {
    let mut harness = Harness::located();
    harness.record(Coordinates::new(10., 50.), "cycling", "20", "60", "-150");

    let workouts = harness.reconciler.workouts();
    assert_eq!(workouts.len(), 1);
    assert_eq!(workouts[0].kind(), WorkoutKind::Cycling);
    assert_eq!(workouts[0].metric().value, 20.);
    assert!(harness.alerts().is_empty());
}

#[test]
fn zero_distance_keeps_form_open_with_input() {
    let mut harness = Harness::located();
    let at = Coordinates::new(10., 50.);

    harness.record(at, "running", "0", "25", "180");

    assert_eq!(harness.alerts().len(), 1);
    assert!(harness.alerts()[0].contains("distance must be a positive number"));
    assert!(harness.reconciler.workouts().is_empty());
    assert_eq!(stored_blob(&harness), None);

    assert_eq!(harness.reconciler.state(), ViewState::FormOpen { coordinates: at });
    assert!(harness.form().visible);
    assert_eq!(harness.form().input().distance, "0");
    assert!(harness.map().markers.is_empty());
    assert!(harness.list().entries.is_empty());

    // Fix the typo and try again at the same spot
    harness.form().type_in("running", "5", "25", "180", "");
    harness.form().submit();
    harness.pump();
    assert_eq!(harness.reconciler.workouts().len(), 1);
    assert_eq!(harness.reconciler.workouts()[0].coordinates(), at);
}

#[test]
fn non_numeric_input_is_rejected() {
    let mut harness = Harness::located();
    harness.record(Coordinates::new(1., 1.), "cycling", "ten", "60", "");

    assert_eq!(harness.alerts().len(), 1);
    assert!(harness.alerts()[0].contains("distance"));
    assert!(harness.alerts()[0].contains("elevation gain"));
    assert!(harness.reconciler.workouts().is_empty());
}

#[test]
fn kind_toggle_only_swaps_fields() {
    let mut harness = Harness::located();
    harness.map().click(HOME);
    harness.pump();

    harness.form().select_kind(WorkoutKind::Cycling);
    harness.pump();

    assert_eq!(harness.form().fields_for, Some(WorkoutKind::Cycling));
    assert_eq!(harness.reconciler.state(), ViewState::FormOpen { coordinates: HOME });
}

#[test]
fn submit_without_open_form_is_ignored() {
    let mut harness = Harness::located();
    harness.form().type_in("running", "5", "25", "180", "");
    harness.form().submit();
    harness.pump();

    assert!(harness.reconciler.workouts().is_empty());
    assert!(harness.alerts().is_empty());
    assert_eq!(harness.reconciler.state(), ViewState::MapReady);
}

#[test]
fn selecting_an_entry_pans_and_counts() {
    let mut harness = Harness::located();
    let at = Coordinates::new(10., 50.);
    harness.record(at, "running", "5", "25", "180");
    let id = harness.reconciler.workouts()[0].id().clone();

    harness.list().click(&id);
    harness.pump();

    assert_eq!(harness.map().pans, vec![(at, 13.)]);
    assert_eq!(harness.reconciler.workouts()[0].interaction_count(), 1);
    assert_eq!(codec::decode(stored_blob(&harness).as_deref())[0].interaction_count(), 1);
    assert_eq!(harness.reconciler.workouts().len(), 1);
    assert_eq!(harness.reconciler.state(), ViewState::MapReady);
}

#[test]
fn delete_removes_everywhere_and_resyncs() {
    let (storage, ids) = seeded_storage();
    let mut harness = Harness::start(storage, Ok(HOME));

    harness.list().click_delete(&ids[0]);
    harness.pump();

    let remaining: Vec<&WorkoutId> = harness.reconciler.workouts().iter().map(|w| w.id()).collect();
    assert_eq!(remaining, vec![&ids[1]]);
    assert_eq!(harness.list().ids(), vec![ids[1].clone()]);
    assert_eq!(harness.map().markers.len(), 1);
    assert_eq!(harness.map().markers[0].at, Coordinates::new(11., 51.));
    assert!(harness.map().marker_at(Coordinates::new(10., 50.)).is_none());

    let stored = codec::decode(stored_blob(&harness).as_deref());
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id(), &ids[1]);
}

#[test]
fn deleting_an_unknown_id_changes_nothing() {
    let (storage, ids) = seeded_storage();
    let mut harness = Harness::start(storage, Ok(HOME));
    let before = stored_blob(&harness);

    harness.reconciler.handle(ViewEvent::DeleteRequested(WorkoutId::from("ghost")));

    assert_eq!(harness.reconciler.workouts().len(), 2);
    assert_eq!(harness.list().ids(), vec![ids[1].clone(), ids[0].clone()]);
    assert_eq!(harness.map().markers.len(), 2);
    assert_eq!(stored_blob(&harness), before);
    assert!(harness.alerts().is_empty());
}

#[test]
fn resync_rebuilds_views_from_the_store() {
    let (storage, _) = seeded_storage();
    let mut harness = Harness::start(storage, Ok(HOME));
    let before = harness.list().entries.clone();

    harness.reconciler.resync();

    assert_eq!(harness.list().entries, before);
    assert_eq!(harness.map().markers.len(), 2);
    assert_eq!(harness.map().removed.len(), 2);
}

#[test]
fn starting_twice_never_resubscribes() {
    let mut harness = Harness::located();
    let (sink, events) = event_channel();
    let mut geolocation = support::FakeGeolocation { answer: Ok(HOME), requests: 0 };

    harness.reconciler.start(sink, &mut geolocation);

    assert_eq!(geolocation.requests, 0);
    assert!(events.is_empty());
    assert_eq!(harness.form().subscriptions, 1);
    assert_eq!(harness.list().subscriptions, 1);
    assert_eq!(harness.geolocation.requests, 1);
}

#[test]
fn late_location_is_ignored() {
    let mut harness = Harness::located();
    harness.reconciler.handle(ViewEvent::LocationResolved(Coordinates::new(0., 0.)));
    harness.reconciler.handle(ViewEvent::LocationFailed("timeout".into()));

    assert_eq!(harness.map().views, vec![(HOME, 13.)]);
    assert_eq!(harness.map().click_subscriptions, 1);
    assert!(harness.alerts().is_empty());
}

#[test]
fn reloaded_workouts_keep_their_behavior() {
    let mut harness = Harness::located();
    harness.record(Coordinates::new(10., 50.), "running", "5", "25", "180");
    harness.record(Coordinates::new(11., 51.), "cycling", "20", "60", "-150");
    let storage = harness.reconciler.manager().storage().clone();
    let original = harness.reconciler.workouts().to_vec();

    let mut reloaded = Harness::start(storage, Ok(HOME));
    assert_eq!(reloaded.reconciler.workouts(), original.as_slice());
    assert_eq!(reloaded.map().markers.len(), 2);

    let id = original[1].id().clone();
    reloaded.list().click(&id);
    reloaded.pump();
    assert_eq!(reloaded.reconciler.workouts()[1].interaction_count(), 1);
}

#[test]
fn repeated_stored_id_keeps_views_consistent() {
    let record = |date: &str, lat: f64| {
        format!(
            r#"{{"type":"running","id":"dup","date":"{date}","coords":[{lat},10.0],"distance":5,"duration":25,"description":"Running on May 2","cadence":180}}"#
        )
    };
    let blob = format!("[{},{}]", record("2025-05-02T08:00:00Z", 56.), record("2025-05-02T09:00:00Z", 57.));
    let mut harness = Harness::start(MemoryStore::with_value(STORAGE_KEY, &blob), Ok(HOME));

    assert_eq!(harness.reconciler.workouts().len(), 1);
    assert_eq!(harness.map().markers.len(), 1);
    assert_eq!(harness.list().entries.len(), 1);

    let id = WorkoutId::from("dup");
    harness.list().click_delete(&id);
    harness.pump();
    harness.reconciler.handle(ViewEvent::DeleteRequested(id));

    assert!(harness.reconciler.workouts().is_empty());
    assert!(harness.map().markers.is_empty());
    assert!(harness.list().entries.is_empty());
}
