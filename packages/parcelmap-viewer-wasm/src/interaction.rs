// Selection state machine driving the highlight filter, the popup and the
// cursor affordance on top of the engine's event model.
use serde_json::Value;

use crate::expressions::field_equals;
use crate::models::{string_field, FeatureProperties, LngLat};
use crate::popup::district_popup_html;
use crate::style::{BOUNDARY_SELECTED_LAYER, DISTRICT_NAME_FIELD};
use crate::surface::MapSurface;

/// Highlight filter matching one district name.
pub fn highlight_filter(name: &str) -> Value {
    field_equals(DISTRICT_NAME_FIELD, name)
}

/// The "nothing selected" predicate. An empty name matches no district in
/// normal data; a feature whose name field is genuinely empty is
/// indistinguishable from this sentinel.
pub fn no_selection_filter() -> Value {
    highlight_filter("")
}

/// Text for the zoom readout element.
pub fn zoom_readout(zoom: f64) -> String {
    format!("ズームレベル : {:.1}", zoom)
}

/// Owns the current selection. Constructed once and shared by every event
/// handler; at most one district is selected at any time.
pub struct InteractionController {
    selected: Option<String>,
}

impl InteractionController {
    pub fn new() -> Self {
        InteractionController { selected: None }
    }

    /// Currently selected district name, if any.
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Click that hit the boundary fill layer: select the district, move the
    /// highlight filter to it and open its popup at the click point. Clicking
    /// the already-selected district re-asserts the same selection.
    pub fn click_district(
        &mut self,
        surface: &dyn MapSurface,
        props: &FeatureProperties,
        at: LngLat,
    ) {
        let name = string_field(props, DISTRICT_NAME_FIELD);
        surface.set_filter(BOUNDARY_SELECTED_LAYER, &highlight_filter(&name));
        surface.show_popup(at, &district_popup_html(props));
        self.selected = Some(name);
    }

    /// Click anywhere on the map, with the number of boundary features under
    /// the cursor. A miss clears the current selection; a miss with nothing
    /// selected changes nothing.
    pub fn click_elsewhere(&mut self, surface: &dyn MapSurface, boundary_hits: usize) {
        if boundary_hits == 0 && self.selected.is_some() {
            self.selected = None;
            surface.set_filter(BOUNDARY_SELECTED_LAYER, &no_selection_filter());
        }
    }

    /// Pointer entered the boundary fill layer's rendered geometry.
    pub fn pointer_entered(&self, surface: &dyn MapSurface) {
        surface.set_cursor("pointer");
    }

    /// Pointer left the boundary fill layer.
    pub fn pointer_left(&self, surface: &dyn MapSurface) {
        surface.set_cursor("");
    }
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new()
    }
}
