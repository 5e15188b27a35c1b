// Imperative surface of the map engine, as consumed by this crate.
use serde_json::Value;

use crate::models::LngLat;

/// The engine mutators the interaction handlers invoke. The live engine is
/// behind `maplibre::EngineSurface`; tests substitute a recording mock.
pub trait MapSurface {
    /// Set one paint property on a layer; the value may be a constant or a
    /// zoom-interpolation expression.
    fn set_paint_property(&self, layer_id: &str, property: &str, value: &Value);

    /// Replace a layer's feature-inclusion predicate.
    fn set_filter(&self, layer_id: &str, filter: &Value);

    /// Open a popup anchored at a geographic coordinate.
    fn show_popup(&self, at: LngLat, html: &str);

    /// Change the map canvas cursor; the empty string restores the default.
    fn set_cursor(&self, cursor: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Paint {
            layer: String,
            property: String,
            value: Value,
        },
        Filter {
            layer: String,
            filter: Value,
        },
        Popup {
            at: LngLat,
            html: String,
        },
        Cursor(String),
    }

    /// Mock surface recording every mutation in invocation order.
    #[derive(Default)]
    pub struct RecordingSurface {
        pub calls: RefCell<Vec<Call>>,
    }

    impl RecordingSurface {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.borrow().clone()
        }

        /// Most recent filter set on a layer, if any.
        pub fn last_filter(&self, layer_id: &str) -> Option<Value> {
            self.calls
                .borrow()
                .iter()
                .rev()
                .find_map(|call| match call {
                    Call::Filter { layer, filter } if layer == layer_id => Some(filter.clone()),
                    _ => None,
                })
        }

        /// Most recent paint value set on a layer property, if any.
        pub fn last_paint(&self, layer_id: &str, property_name: &str) -> Option<Value> {
            self.calls
                .borrow()
                .iter()
                .rev()
                .find_map(|call| match call {
                    Call::Paint {
                        layer,
                        property,
                        value,
                    } if layer == layer_id && property == property_name => Some(value.clone()),
                    _ => None,
                })
        }

        pub fn popups(&self) -> Vec<(LngLat, String)> {
            self.calls
                .borrow()
                .iter()
                .filter_map(|call| match call {
                    Call::Popup { at, html } => Some((*at, html.clone())),
                    _ => None,
                })
                .collect()
        }
    }

    impl MapSurface for RecordingSurface {
        fn set_paint_property(&self, layer_id: &str, property: &str, value: &Value) {
            self.calls.borrow_mut().push(Call::Paint {
                layer: layer_id.to_string(),
                property: property.to_string(),
                value: value.clone(),
            });
        }

        fn set_filter(&self, layer_id: &str, filter: &Value) {
            self.calls.borrow_mut().push(Call::Filter {
                layer: layer_id.to_string(),
                filter: filter.clone(),
            });
        }

        fn show_popup(&self, at: LngLat, html: &str) {
            self.calls.borrow_mut().push(Call::Popup {
                at,
                html: html.to_string(),
            });
        }

        fn set_cursor(&self, cursor: &str) {
            self.calls.borrow_mut().push(Call::Cursor(cursor.to_string()));
        }
    }
}
