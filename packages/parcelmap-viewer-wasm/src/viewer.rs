// Exported viewer entry point: registers the tile protocol, builds the map
// from the style document and wires every UI handler.
use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crate::background::BackgroundToggle;
use crate::interaction::{zoom_readout, InteractionController};
use crate::maplibre::{self, to_js, EngineSurface};
use crate::models::{FeatureProperties, LngLat};
use crate::style;
use crate::{console_log, console_warn};

/// Startup configuration passed from the hosting page. Every field has a
/// default, so `init_viewer()` with no argument brings up the stock viewer.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewerOptions {
    pub container: String,
    pub center: [f64; 2],
    pub zoom: f64,
    pub parcel_tiles_url: String,
    pub parcel_source_layer: String,
    pub boundary_url: String,
    pub zoom_display_id: String,
    pub background_toggle_id: String,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        ViewerOptions {
            container: "map".to_string(),
            center: [139.06343, 36.38953],
            zoom: 15.1,
            parcel_tiles_url: "pmtiles://./tiles/chibanzu_maebashi.pmtiles".to_string(),
            parcel_source_layer: "chibanzu_maebashi-layer".to_string(),
            boundary_url: "./maebashi_border.geojson".to_string(),
            zoom_display_id: "zoom-display".to_string(),
            background_toggle_id: "background-toggle".to_string(),
        }
    }
}

#[derive(Serialize)]
struct MapConstructorOptions<'a> {
    container: &'a str,
    center: [f64; 2],
    zoom: f64,
    style: &'a style::StyleDocument,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NavigationOptions {
    show_compass: bool,
    show_zoom: bool,
    visualize_pitch: bool,
}

#[derive(Serialize)]
struct HitTestOptions<'a> {
    layers: [&'a str; 1],
}

/// Live viewer handle returned to the page. Owns the event closures; the
/// handlers stay registered for as long as the page keeps this alive.
#[wasm_bindgen]
pub struct ParcelMapViewer {
    map: maplibre::Map,
    controller: Rc<RefCell<InteractionController>>,
    _handlers: Vec<Closure<dyn FnMut(JsValue)>>,
}

#[wasm_bindgen]
impl ParcelMapViewer {
    /// Currently selected district name, if any.
    #[wasm_bindgen(getter)]
    pub fn selected_district(&self) -> Option<String> {
        self.controller.borrow().selected().map(str::to_string)
    }

    /// Current zoom level of the underlying map.
    #[wasm_bindgen(getter)]
    pub fn zoom(&self) -> f64 {
        self.map.get_zoom()
    }
}

/// Build the map and wire the viewer against the hosting page's DOM.
#[wasm_bindgen]
pub fn init_viewer(options: JsValue) -> Result<ParcelMapViewer, JsValue> {
    let options: ViewerOptions = if options.is_undefined() || options.is_null() {
        ViewerOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid viewer options: {}", e)))?
    };

    // The archive reader resolves pmtiles:// URLs from here on
    let protocol = maplibre::Protocol::new();
    maplibre::add_protocol("pmtiles", &protocol.tile());

    let style_doc = style::viewer_style(&options.parcel_tiles_url, &options.parcel_source_layer);
    let map = maplibre::Map::new(&to_js(&MapConstructorOptions {
        container: &options.container,
        center: options.center,
        zoom: options.zoom,
        style: &style_doc,
    })?);

    let nav_options = to_js(&NavigationOptions {
        show_compass: true,
        show_zoom: true,
        visualize_pitch: true,
    })?;
    map.add_control(&maplibre::NavigationControl::new(&nav_options), "top-right");

    let controller = Rc::new(RefCell::new(InteractionController::new()));
    let mut handlers: Vec<Closure<dyn FnMut(JsValue)>> = Vec::new();
    let document = web_sys::window().and_then(|w| w.document());

    // Boundary source and layers go in once the engine reports ready
    {
        let map_on_load = map.clone();
        let boundary_url = options.boundary_url.clone();
        let on_load = Closure::wrap(Box::new(move |_event: JsValue| {
            if let Err(e) = add_boundary_layers(&map_on_load, &boundary_url) {
                console_warn!("Failed to add boundary layers: {:?}", e);
            }
        }) as Box<dyn FnMut(JsValue)>);
        map.on("load", on_load.as_ref().unchecked_ref());
        handlers.push(on_load);
    }

    // Zoom readout
    match document
        .as_ref()
        .and_then(|d| d.get_element_by_id(&options.zoom_display_id))
    {
        Some(readout) => {
            let map_on_zoom = map.clone();
            let on_zoom = Closure::wrap(Box::new(move |_event: JsValue| {
                readout.set_text_content(Some(&zoom_readout(map_on_zoom.get_zoom())));
            }) as Box<dyn FnMut(JsValue)>);
            map.on("zoom", on_zoom.as_ref().unchecked_ref());
            handlers.push(on_zoom);
        }
        None => {
            console_warn!(
                "Zoom display element #{} not found; readout disabled",
                options.zoom_display_id
            );
        }
    }

    // District selection: clicks that hit the boundary fill layer
    {
        let surface = EngineSurface::new(map.clone());
        let controller_select = controller.clone();
        let on_select = Closure::wrap(Box::new(move |event: JsValue| {
            let event: maplibre::MapMouseEvent = event.unchecked_into();
            let feature: maplibre::QueriedFeature = event.features().get(0).unchecked_into();
            let props: FeatureProperties =
                match serde_wasm_bindgen::from_value(feature.properties()) {
                    Ok(props) => props,
                    Err(e) => {
                        console_warn!("Unreadable feature properties: {}", e);
                        return;
                    }
                };
            let at = LngLat {
                lng: event.lng_lat().lng(),
                lat: event.lng_lat().lat(),
            };
            controller_select
                .borrow_mut()
                .click_district(&surface, &props, at);
        }) as Box<dyn FnMut(JsValue)>);
        map.on_layer(
            "click",
            style::BOUNDARY_FILL_LAYER,
            on_select.as_ref().unchecked_ref(),
        );
        handlers.push(on_select);
    }

    // Deselection: any click, hit-tested against the boundary fill layer
    {
        let hit_test = to_js(&HitTestOptions {
            layers: [style::BOUNDARY_FILL_LAYER],
        })?;
        let map_on_click = map.clone();
        let surface = EngineSurface::new(map.clone());
        let controller_click = controller.clone();
        let on_click = Closure::wrap(Box::new(move |event: JsValue| {
            let event: maplibre::MapMouseEvent = event.unchecked_into();
            let hits = map_on_click
                .query_rendered_features(&event.point(), &hit_test)
                .length() as usize;
            controller_click.borrow_mut().click_elsewhere(&surface, hits);
        }) as Box<dyn FnMut(JsValue)>);
        map.on("click", on_click.as_ref().unchecked_ref());
        handlers.push(on_click);
    }

    // Cursor affordance over the hit-test layer
    {
        let surface = EngineSurface::new(map.clone());
        let controller_enter = controller.clone();
        let on_enter = Closure::wrap(Box::new(move |_event: JsValue| {
            controller_enter.borrow().pointer_entered(&surface);
        }) as Box<dyn FnMut(JsValue)>);
        map.on_layer(
            "mouseenter",
            style::BOUNDARY_FILL_LAYER,
            on_enter.as_ref().unchecked_ref(),
        );
        handlers.push(on_enter);

        let surface = EngineSurface::new(map.clone());
        let controller_leave = controller.clone();
        let on_leave = Closure::wrap(Box::new(move |_event: JsValue| {
            controller_leave.borrow().pointer_left(&surface);
        }) as Box<dyn FnMut(JsValue)>);
        map.on_layer(
            "mouseleave",
            style::BOUNDARY_FILL_LAYER,
            on_leave.as_ref().unchecked_ref(),
        );
        handlers.push(on_leave);
    }

    // Background visibility checkbox
    match document
        .as_ref()
        .and_then(|d| d.get_element_by_id(&options.background_toggle_id))
        .and_then(|el| el.dyn_into::<web_sys::HtmlInputElement>().ok())
    {
        Some(checkbox) => {
            let surface = EngineSurface::new(map.clone());
            let toggle = BackgroundToggle::new();
            let checkbox_state = checkbox.clone();
            let on_change = Closure::wrap(Box::new(move |_event: JsValue| {
                toggle.apply(&surface, checkbox_state.checked());
            }) as Box<dyn FnMut(JsValue)>);
            if checkbox
                .add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())
                .is_err()
            {
                console_warn!("Failed to attach the background toggle handler");
            }
            handlers.push(on_change);
        }
        None => {
            console_warn!(
                "Background checkbox #{} not found; toggle disabled",
                options.background_toggle_id
            );
        }
    }

    console_log!(
        "Parcel map viewer initialized in #{} at zoom {}",
        options.container,
        options.zoom
    );

    Ok(ParcelMapViewer {
        map,
        controller,
        _handlers: handlers,
    })
}

fn add_boundary_layers(map: &maplibre::Map, boundary_url: &str) -> Result<(), JsValue> {
    map.add_source(
        style::BOUNDARY_SOURCE,
        &to_js(&style::boundary_source(boundary_url))?,
    );
    for layer in style::boundary_layers() {
        map.add_layer(&to_js(&layer)?);
    }
    Ok(())
}
