//! Photostack WASM - WebAssembly bindings for the Photostack filter stack
//!
//! # Module Structure
//!
//! - `stack` - The editable filter stack: stage parameters, overlays,
//!   canvas gestures, rendering
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsFilterStack, JsPixelBuffer } from '@photostack/wasm';
//!
//! await init();
//!
//! const stack = new JsFilterStack();
//! stack.set_color_adjustments({ brightness: 0.1, contrast: 1.2, saturation: 1.0 });
//! stack.add_text('Hello', 'Helvetica', 24, 0.5, 0.8);
//! stack.rotate_right();
//! const output = stack.render(new JsPixelBuffer(width, height, rgb));
//! ```

use wasm_bindgen::prelude::*;

mod stack;
mod types;

pub use stack::JsFilterStack;
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "photostack-wasm {} ready",
        version()
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
