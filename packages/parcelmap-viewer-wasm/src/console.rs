use wasm_bindgen::prelude::*;

// Browser console bindings. `warn` is reserved for degraded-but-running
// situations (missing DOM elements, unserializable values).
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    pub fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    pub fn warn(s: &str);
}

// Note: the console_log / console_warn macros are defined in lib.rs
