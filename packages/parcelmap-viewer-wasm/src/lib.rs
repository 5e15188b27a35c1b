use wasm_bindgen::prelude::*;

// Create a console module for logging
pub mod console;
// Shared geographic and feature data structures
pub mod models;
// Constructors for the engine's expression language
pub mod expressions;
// Declarative style document builder
pub mod style;
// The engine surface contract consumed by the handlers
pub mod surface;
// Selection state machine and zoom readout
pub mod interaction;
// Popup body formatting
pub mod popup;
// Background raster toggle
pub mod background;
// maplibre-gl / pmtiles bindings
pub mod maplibre;
// Exported viewer entry point and wiring
pub mod viewer;

pub use viewer::{init_viewer, ParcelMapViewer, ViewerOptions};

// Enable better panic messages in console during development
#[cfg(feature = "console_error_panic_hook")]
pub use console_error_panic_hook::set_once as set_panic_hook;

// Use the macros from our console module
#[macro_export]
macro_rules! console_log {
    ($($t:tt)*) => (crate::console::log(&format!($($t)*)))
}

#[macro_export]
macro_rules! console_warn {
    ($($t:tt)*) => (crate::console::warn(&format!($($t)*)))
}

use std::sync::Once;
static INIT: Once = Once::new();

// This sets up the wasm_bindgen start functionality
#[wasm_bindgen(start)]
pub fn start() {
    INIT.call_once(|| {
        // Set the panic hook for better error messages
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        console_log!("Parcel map viewer module initialized");
    });
}
