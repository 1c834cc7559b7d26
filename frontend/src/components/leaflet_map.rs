use gloo_utils::document;
use leaflet::{LatLng, Map, MapOptions, Marker, MouseEvent, Popup as LeafletPopup, PopupOptions, TileLayer, TileLayerOptions};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlElement, Node};
use workout_tracker_lib::Coordinates;
use workout_tracker_view::{EventSink, MapWidget, Popup, ViewEvent};
use yew::Html;

const TILE_URL: &str = "https://{s}.tile.openstreetmap.fr/hot/{z}/{x}/{y}.png";

/// Leaflet map living in a detached container until the model mounts it.
pub struct LeafletMap {
    map: Map,
    container: HtmlElement,
}

impl LeafletMap {
    pub fn new() -> Result<Self, JsValue> {
        let container: HtmlElement = document().create_element("div")?.dyn_into()?;
        container.set_id("map");

        let map = Map::new_with_element(&container, &MapOptions::default());

        Ok(Self { map, container })
    }

    pub fn render(&self) -> Html {
        let node: &Node = self.container.as_ref();
        Html::VRef(node.clone())
    }

    /// Called once the container is in the document, Leaflet measures it here.
    pub fn attach(&self) {
        self.map.invalidate_size(false);
        add_tile_layer(&self.map);
    }
}

impl MapWidget for LeafletMap {
    type Marker = Marker;

    fn set_view(&mut self, center: Coordinates, zoom: f64) {
        self.map.set_view(&lat_lng(center), zoom);
    }

    fn pan_to(&mut self, center: Coordinates, zoom: f64) {
        self.map.fly_to(&lat_lng(center), zoom);
    }

    fn add_marker(&mut self, at: Coordinates, popup: &Popup) -> Marker {
        let opts = PopupOptions::default();
        opts.set_max_width(popup.style.max_width);
        opts.set_min_width(popup.style.min_width);
        opts.set_auto_close(popup.style.auto_close);
        opts.set_close_on_click(popup.style.close_on_click);
        opts.set_class_name(popup.class_name.clone());

        let leaflet_popup = LeafletPopup::new(&opts, None);
        // Stored descriptions are text, never markup
        let content: JsValue = match document().create_element("span") {
            Ok(span) => {
                span.set_text_content(Some(&popup.content));
                span.into()
            }
            Err(_) => JsValue::from_str(&popup.content),
        };
        leaflet_popup.set_content(&content);

        let marker = Marker::new(&lat_lng(at));
        marker.add_to(&self.map);
        marker.bind_popup(&leaflet_popup).open_popup();
        marker
    }

    fn remove_marker(&mut self, marker: Marker) {
        marker.remove();
    }

    fn subscribe_clicks(&mut self, sink: EventSink) {
        self.map.on_mouse_click(Box::new(move |event: MouseEvent| {
            let at = event.lat_lng();
            sink(ViewEvent::MapClicked(Coordinates::new(at.lat(), at.lng())));
        }));
    }
}

fn lat_lng(at: Coordinates) -> LatLng {
    LatLng::new(at.latitude(), at.longitude())
}

fn add_tile_layer(map: &Map) {
    let opts = TileLayerOptions::new();
    opts.set_update_when_idle(true);
    TileLayer::new_options(TILE_URL, &opts).add_to(map);
}
