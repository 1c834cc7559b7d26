use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use workout_tracker_lib::{Coordinates, WorkoutId, WorkoutKind};

/// Everything the outside world can tell the reconciler.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    LocationResolved(Coordinates),
    LocationFailed(String),
    MapClicked(Coordinates),
    KindToggled(WorkoutKind),
    FormSubmitted,
    /// Click anywhere on a list entry except its delete button
    WorkoutSelected(WorkoutId),
    DeleteRequested(WorkoutId),
}

/// Handed to a collaborator once, at subscription time.
pub type EventSink = Rc<dyn Fn(ViewEvent)>;

/// Events waiting for `ViewReconciler::pump`, oldest first.
#[derive(Clone, Default)]
pub struct EventQueue {
    events: Rc<RefCell<VecDeque<ViewEvent>>>,
}

impl EventQueue {
    pub fn push(&self, event: ViewEvent) {
        self.events.borrow_mut().push_back(event);
    }

    pub fn pop(&self) -> Option<ViewEvent> {
        self.events.borrow_mut().pop_front()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

/// A sink feeding a fresh queue.
pub fn event_channel() -> (EventSink, EventQueue) {
    let queue = EventQueue::default();
    let pushed = queue.clone();
    let sink: EventSink = Rc::new(move |event: ViewEvent| pushed.push(event));
    (sink, queue)
}
