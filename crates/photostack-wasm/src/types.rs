//! WASM-compatible wrapper types for image data.

use photostack_core::PixelBuffer;
use wasm_bindgen::prelude::*;

/// An RGB image wrapper for JavaScript.
///
/// Pixel data stays in WASM memory; `pixels()` copies it out as a
/// `Uint8Array`.
#[wasm_bindgen]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create an image from RGB pixel data (3 bytes per pixel, row-major).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsPixelBuffer {
        JsPixelBuffer {
            inner: PixelBuffer {
                width,
                height,
                pixels,
            },
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsPixelBuffer {
    pub(crate) fn from_buffer(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn buffer(&self) -> &PixelBuffer {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_pixel_buffer_creation() {
        let img = JsPixelBuffer::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
    }

    #[test]
    fn test_js_pixel_buffer_pixels() {
        let pixels = vec![255u8, 128, 64, 32, 16, 8];
        let img = JsPixelBuffer::new(2, 1, pixels.clone());
        assert_eq!(img.pixels(), pixels);
    }

    #[test]
    fn test_buffer_round_trip() {
        let buffer = PixelBuffer::filled(3, 2, [1, 2, 3]);
        let img = JsPixelBuffer::from_buffer(buffer.clone());
        assert_eq!(img.buffer(), &buffer);
    }
}
