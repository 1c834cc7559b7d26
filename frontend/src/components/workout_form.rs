use std::time::Duration;

use gloo_console::{error, warn};
use gloo_timers::callback::Timeout;
use gloo_utils::document;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{Element, Event, HtmlElement, HtmlFormElement, HtmlInputElement, HtmlSelectElement};
use workout_tracker_lib::WorkoutKind;
use workout_tracker_view::{EventSink, RawWorkoutInput, ViewEvent, WorkoutForm};

const TEMPLATE: &str = r#"
<div class="form__row">
  <label class="form__label">Type</label>
  <select class="form__input form__input--type">
    <option value="running">Running</option>
    <option value="cycling">Cycling</option>
  </select>
</div>
<div class="form__row">
  <label class="form__label">Distance</label>
  <input class="form__input form__input--distance" placeholder="km" />
</div>
<div class="form__row">
  <label class="form__label">Duration</label>
  <input class="form__input form__input--duration" placeholder="min" />
</div>
<div class="form__row">
  <label class="form__label">Cadence</label>
  <input class="form__input form__input--cadence" placeholder="step/min" />
</div>
<div class="form__row form__row--hidden">
  <label class="form__label">Elev Gain</label>
  <input class="form__input form__input--elevation" placeholder="meters" />
</div>
<button class="form__btn">OK</button>
"#;

const HIDDEN: &str = "hidden";
const ROW_HIDDEN: &str = "form__row--hidden";

pub struct DomForm {
    form: HtmlFormElement,
    kind: HtmlSelectElement,
    distance: HtmlInputElement,
    duration: HtmlInputElement,
    cadence: HtmlInputElement,
    elevation: HtmlInputElement,
    listeners: Vec<Closure<dyn FnMut(Event)>>,
}

impl DomForm {
    pub fn new() -> Result<Self, JsValue> {
        let form: HtmlFormElement = document().create_element("form")?.dyn_into()?;
        form.set_class_name("form hidden");
        form.set_inner_html(TEMPLATE);

        Ok(Self {
            kind: find(&form, ".form__input--type")?,
            distance: find(&form, ".form__input--distance")?,
            duration: find(&form, ".form__input--duration")?,
            cadence: find(&form, ".form__input--cadence")?,
            elevation: find(&form, ".form__input--elevation")?,
            form,
            listeners: Vec::new(),
        })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.form
    }

    fn listen(&mut self, target: &Element, event: &str, handler: impl FnMut(Event) + 'static) {
        let closure = Closure::<dyn FnMut(Event)>::new(handler);
        if let Err(err) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            error!(format!("Could not listen for {event}"), err);
            return;
        }
        self.listeners.push(closure);
    }
}

impl WorkoutForm for DomForm {
    fn show(&mut self) {
        if let Err(err) = self.form.class_list().remove_1(HIDDEN) {
            warn!("Could not reveal form", err);
        }
        if let Err(err) = self.distance.focus() {
            warn!("Could not focus distance", err);
        }
    }

    fn read(&self) -> RawWorkoutInput {
        RawWorkoutInput {
            kind: self.kind.value(),
            distance: self.distance.value(),
            duration: self.duration.value(),
            cadence: self.cadence.value(),
            elevation: self.elevation.value(),
        }
    }

    fn show_fields_for(&mut self, kind: WorkoutKind) {
        let rows = [
            (&self.cadence, kind != WorkoutKind::Running),
            (&self.elevation, kind != WorkoutKind::Cycling),
        ];
        for (input, hidden) in rows {
            let toggled = input
                .closest(".form__row")
                .and_then(|row| match row {
                    Some(row) => row.class_list().toggle_with_force(ROW_HIDDEN, hidden).map(|_| ()),
                    None => Err(JsValue::from_str("input is outside a form row")),
                });
            if let Err(err) = toggled {
                warn!("Could not toggle form row", err);
            }
        }
    }

    fn clear(&mut self) {
        for input in [&self.distance, &self.duration, &self.cadence, &self.elevation] {
            input.set_value("");
        }
    }

    fn hide(&mut self, transition: Duration) {
        let style = self.form.style();
        if let Err(err) = style.set_property("display", "none") {
            warn!("Could not take form out of layout", err);
        }
        if let Err(err) = self.form.class_list().add_1(HIDDEN) {
            warn!("Could not hide form", err);
        }

        // Back in layout once the slide-out has finished
        Timeout::new(transition.as_millis() as u32, move || {
            if let Err(err) = style.set_property("display", "grid") {
                warn!("Could not restore form layout", err);
            }
        })
        .forget();
    }

    fn subscribe(&mut self, sink: EventSink) {
        let form: Element = self.form.clone().into();
        let on_submit = sink.clone();
        self.listen(&form, "submit", move |event: Event| {
            event.prevent_default();
            on_submit(ViewEvent::FormSubmitted);
        });

        let select: Element = self.kind.clone().into();
        let kind = self.kind.clone();
        self.listen(&select, "change", move |_| match kind.value().parse::<WorkoutKind>() {
            Ok(kind) => sink(ViewEvent::KindToggled(kind)),
            Err(err) => warn!(err.to_string()),
        });
    }
}

fn find<T: JsCast>(form: &HtmlFormElement, selector: &str) -> Result<T, JsValue> {
    let element = form
        .query_selector(selector)?
        .ok_or_else(|| JsValue::from_str(&format!("Form is missing {selector}")))?;
    Ok(element.dyn_into::<T>()?)
}
