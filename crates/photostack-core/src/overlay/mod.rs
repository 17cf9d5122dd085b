//! Overlays layered after the fixed stages: stickers and text.

mod composite;
mod sticker;
mod text;

pub use sticker::{StickerFilter, DEFAULT_STICKER_SCALE};
pub use text::{TextFilter, DEFAULT_TEXT_SCALE};
