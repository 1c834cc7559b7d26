use gloo_console::{error, warn};
use gloo_utils::document;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, Event, HtmlElement};
use workout_tracker_lib::WorkoutId;
use workout_tracker_view::{EventSink, ListEntry, ViewEvent, WorkoutList};

const ID_ATTRIBUTE: &str = "data-id";

/// The `<ul>` holding the form followed by one `<li>` per workout.
pub struct DomList {
    container: HtmlElement,
    anchor: HtmlElement,
    listener: Option<Closure<dyn FnMut(Event)>>,
}

impl DomList {
    /// Entries are inserted right after `anchor`, which must already be a child of the list.
    pub fn new(anchor: &HtmlElement) -> Result<Self, JsValue> {
        let container: HtmlElement = document().create_element("ul")?.dyn_into()?;
        container.set_class_name("workouts");
        container.append_child(anchor)?;

        Ok(Self {
            container,
            anchor: anchor.clone(),
            listener: None,
        })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.container
    }

    fn entry_element(entry: &ListEntry) -> Result<Element, JsValue> {
        let item = document().create_element("li")?;
        item.set_class_name(&format!("workout workout--{}", entry.kind));
        item.set_attribute(ID_ATTRIBUTE, entry.id.as_str())?;

        let title = document().create_element("h2")?;
        title.set_class_name("workout__title");
        title.set_text_content(Some(&entry.title));
        item.append_child(&title)?;

        for stat in &entry.stats {
            let details = document().create_element("div")?;
            details.set_class_name("workout__details");
            for (class, text) in [("workout__icon", stat.icon), ("workout__value", stat.value.as_str()), ("workout__unit", stat.unit)] {
                let span = document().create_element("span")?;
                span.set_class_name(class);
                span.set_text_content(Some(text));
                details.append_child(&span)?;
            }
            item.append_child(&details)?;
        }

        let delete = document().create_element("button")?;
        delete.set_class_name("workout__delete");
        delete.set_text_content(Some("✕"));
        item.append_child(&delete)?;

        Ok(item)
    }

    fn items(&self) -> Vec<Element> {
        let items = match self.container.query_selector_all(".workout") {
            Ok(items) => items,
            Err(err) => {
                warn!("Could not list workout entries", err);
                return Vec::new();
            }
        };
        (0..items.length())
            .filter_map(|index| items.get(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    // Compared as attribute text, ids are never spliced into a selector
    fn find(&self, id: &WorkoutId) -> Option<Element> {
        self.items()
            .into_iter()
            .find(|item| item.get_attribute(ID_ATTRIBUTE).as_deref() == Some(id.as_str()))
    }
}

impl WorkoutList for DomList {
    fn insert(&mut self, entry: &ListEntry) {
        let inserted = Self::entry_element(entry).and_then(|item| self.anchor.after_with_node_1(&item));
        if let Err(err) = inserted {
            error!(format!("Could not list workout {}", entry.id), err);
        }
    }

    fn remove(&mut self, id: &WorkoutId) {
        if let Some(item) = self.find(id) {
            item.remove();
        }
    }

    fn clear(&mut self) {
        for item in self.items() {
            item.remove();
        }
    }

    fn subscribe(&mut self, sink: EventSink) {
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let Some(target) = event.target().and_then(|target| target.dyn_into::<Element>().ok()) else {
                return;
            };
            let Some(id) = target
                .closest(".workout")
                .ok()
                .flatten()
                .and_then(|item| item.get_attribute(ID_ATTRIBUTE))
            else {
                return;
            };

            let id = WorkoutId::from(id);
            if matches!(target.closest(".workout__delete"), Ok(Some(_))) {
                sink(ViewEvent::DeleteRequested(id));
            } else {
                sink(ViewEvent::WorkoutSelected(id));
            }
        });

        match self.container.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref()) {
            Ok(()) => self.listener = Some(closure),
            Err(err) => warn!("Could not listen for list clicks", err),
        }
    }
}
