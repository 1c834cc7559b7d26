use std::rc::Rc;

use components::{leaflet_map::LeafletMap, workout_form::DomForm, workout_list::DomList};
use gloo_console::{error, info};
use platform::{BrowserAlert, BrowserGeolocation, LocalStorage};
use wasm_bindgen::JsValue;
use web_sys::Node;
use workout_tracker_data_management::{StorageError, WorkoutManager};
use workout_tracker_view::{EventSink, ViewConfig, ViewEvent, ViewReconciler};
use yew::prelude::*;

mod components;
mod platform;

type Reconciler = ViewReconciler<LeafletMap, DomForm, DomList, BrowserAlert, LocalStorage>;

enum MainMsg {
    View(ViewEvent),
}

#[derive(Debug)]
enum SetupError {
    Dom(JsValue),
    Storage(StorageError),
}

impl From<JsValue> for SetupError {
    fn from(err: JsValue) -> Self {
        Self::Dom(err)
    }
}

impl From<StorageError> for SetupError {
    fn from(err: StorageError) -> Self {
        Self::Storage(err)
    }
}

struct Model {
    reconciler: Option<Reconciler>,
}

fn build_reconciler() -> Result<Reconciler, SetupError> {
    let storage = LocalStorage::open()?;
    let manager = WorkoutManager::load(storage);
    info!(format!("Loaded {} workouts", manager.workouts().len()));

    let map = LeafletMap::new()?;
    let form = DomForm::new()?;
    let list = DomList::new(form.element())?;

    Ok(ViewReconciler::new(manager, map, form, list, BrowserAlert, ViewConfig::default()))
}

impl Component for Model {
    type Message = MainMsg;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        let reconciler = match build_reconciler() {
            Ok(reconciler) => Some(reconciler),
            Err(err) => {
                error!(format!("Could not start: {err:?}"));
                None
            }
        };

        Self { reconciler }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if !first_render {
            return;
        }
        let Some(reconciler) = &mut self.reconciler else {
            return;
        };

        reconciler.map().attach();

        let cb = ctx.link().callback(MainMsg::View);
        let sink: EventSink = Rc::new(move |event: ViewEvent| cb.emit(event));
        reconciler.start(sink, &mut BrowserGeolocation);
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            MainMsg::View(event) => {
                if let Some(reconciler) = &mut self.reconciler {
                    reconciler.handle(event);
                }
            }
        }
        // Collaborators edit their own DOM, nothing for yew to diff
        false
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        let Some(reconciler) = &self.reconciler else {
            return html! {
                <div class="error">{"Could not start the workout tracker."}</div>
            };
        };

        let list: &Node = reconciler.list().element().as_ref();
        html! {
            <>
                <div class="sidebar">
                    {Html::VRef(list.clone())}
                </div>
                {reconciler.map().render()}
            </>
        }
    }
}

fn main() {
    yew::Renderer::<Model>::new().render();
}
