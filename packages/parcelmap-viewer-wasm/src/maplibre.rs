// Bindings to the maplibre-gl engine and the pmtiles protocol handler
// provided by the hosting page.
use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use crate::console_warn;
use crate::models::LngLat;
use crate::surface::MapSurface;

#[wasm_bindgen]
extern "C" {
    /// maplibregl.Map
    #[wasm_bindgen(js_namespace = maplibregl)]
    #[derive(Clone)]
    pub type Map;

    #[wasm_bindgen(constructor, js_namespace = maplibregl)]
    pub fn new(options: &JsValue) -> Map;

    #[wasm_bindgen(method)]
    pub fn on(this: &Map, event: &str, handler: &js_sys::Function);

    /// Layer-filtered subscription: the handler only sees events that hit a
    /// rendered feature of the named layer.
    #[wasm_bindgen(method, js_name = on)]
    pub fn on_layer(this: &Map, event: &str, layer_id: &str, handler: &js_sys::Function);

    #[wasm_bindgen(method, js_name = getZoom)]
    pub fn get_zoom(this: &Map) -> f64;

    #[wasm_bindgen(method, js_name = getCanvas)]
    pub fn get_canvas(this: &Map) -> web_sys::HtmlCanvasElement;

    #[wasm_bindgen(method, js_name = addSource)]
    pub fn add_source(this: &Map, id: &str, source: &JsValue);

    #[wasm_bindgen(method, js_name = addLayer)]
    pub fn add_layer(this: &Map, layer: &JsValue);

    #[wasm_bindgen(method, js_name = addControl)]
    pub fn add_control(this: &Map, control: &NavigationControl, position: &str);

    #[wasm_bindgen(method, js_name = setPaintProperty)]
    pub fn set_paint_property(this: &Map, layer_id: &str, property: &str, value: &JsValue);

    #[wasm_bindgen(method, js_name = setFilter)]
    pub fn set_filter(this: &Map, layer_id: &str, filter: &JsValue);

    #[wasm_bindgen(method, js_name = queryRenderedFeatures)]
    pub fn query_rendered_features(this: &Map, point: &JsValue, options: &JsValue)
        -> js_sys::Array;
}

#[wasm_bindgen]
extern "C" {
    /// maplibregl.Popup
    #[wasm_bindgen(js_namespace = maplibregl)]
    pub type Popup;

    #[wasm_bindgen(constructor, js_namespace = maplibregl)]
    pub fn new() -> Popup;

    #[wasm_bindgen(method, js_name = setLngLat)]
    pub fn set_lng_lat(this: &Popup, lnglat: &JsValue) -> Popup;

    #[wasm_bindgen(method, js_name = setHTML)]
    pub fn set_html(this: &Popup, html: &str) -> Popup;

    #[wasm_bindgen(method, js_name = addTo)]
    pub fn add_to(this: &Popup, map: &Map) -> Popup;
}

#[wasm_bindgen]
extern "C" {
    /// maplibregl.NavigationControl
    #[wasm_bindgen(js_namespace = maplibregl)]
    pub type NavigationControl;

    #[wasm_bindgen(constructor, js_namespace = maplibregl)]
    pub fn new(options: &JsValue) -> NavigationControl;

    #[wasm_bindgen(js_namespace = maplibregl, js_name = addProtocol)]
    pub fn add_protocol(scheme: &str, loader: &js_sys::Function);
}

#[wasm_bindgen]
extern "C" {
    /// pmtiles.Protocol — serves vector tiles out of a single-file archive
    #[wasm_bindgen(js_namespace = pmtiles)]
    pub type Protocol;

    #[wasm_bindgen(constructor, js_namespace = pmtiles)]
    pub fn new() -> Protocol;

    #[wasm_bindgen(method, getter)]
    pub fn tile(this: &Protocol) -> js_sys::Function;
}

#[wasm_bindgen]
extern "C" {
    /// Pointer event as the engine delivers it to click handlers
    pub type MapMouseEvent;

    #[wasm_bindgen(method, getter)]
    pub fn point(this: &MapMouseEvent) -> JsValue;

    #[wasm_bindgen(method, getter, js_name = lngLat)]
    pub fn lng_lat(this: &MapMouseEvent) -> JsLngLat;

    #[wasm_bindgen(method, getter)]
    pub fn features(this: &MapMouseEvent) -> js_sys::Array;

    pub type JsLngLat;

    #[wasm_bindgen(method, getter)]
    pub fn lng(this: &JsLngLat) -> f64;

    #[wasm_bindgen(method, getter)]
    pub fn lat(this: &JsLngLat) -> f64;

    pub type QueriedFeature;

    #[wasm_bindgen(method, getter)]
    pub fn properties(this: &QueriedFeature) -> JsValue;
}

/// Serialize into a plain JS object. The engine's style schema rejects the
/// ES `Map`s that serde-wasm-bindgen emits for map types by default.
pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::json_compatible();
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize for the engine: {}", e)))
}

/// `MapSurface` backed by the live engine. Engine exceptions (unknown layer
/// ids and the like) propagate to the browser's default error reporting.
pub struct EngineSurface {
    map: Map,
}

impl EngineSurface {
    pub fn new(map: Map) -> Self {
        EngineSurface { map }
    }
}

impl MapSurface for EngineSurface {
    fn set_paint_property(&self, layer_id: &str, property: &str, value: &Value) {
        match to_js(value) {
            Ok(js) => self.map.set_paint_property(layer_id, property, &js),
            Err(_) => console_warn!("Unserializable paint value for layer {}", layer_id),
        }
    }

    fn set_filter(&self, layer_id: &str, filter: &Value) {
        match to_js(filter) {
            Ok(js) => self.map.set_filter(layer_id, &js),
            Err(_) => console_warn!("Unserializable filter for layer {}", layer_id),
        }
    }

    fn show_popup(&self, at: LngLat, html: &str) {
        match to_js(&at) {
            Ok(lnglat) => {
                Popup::new().set_lng_lat(&lnglat).set_html(html).add_to(&self.map);
            }
            Err(_) => console_warn!("Unserializable popup anchor at {}, {}", at.lng, at.lat),
        }
    }

    fn set_cursor(&self, cursor: &str) {
        let style = self.map.get_canvas().style();
        if style.set_property("cursor", cursor).is_err() {
            console_warn!("Failed to set map cursor to {:?}", cursor);
        }
    }
}
