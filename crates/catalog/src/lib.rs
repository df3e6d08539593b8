//! Clothing catalog: the fixed palette of draggable items and their icons.
//!
//! Leaf data only. Nothing in here mutates after construction.

pub mod asset;
pub mod clothing;
pub mod palette;

pub use asset::{AssetRef, Icon, CANVAS_ICON_SIZE, DEFAULT_ICON_SIZE, PALETTE_ICON_SIZE};
pub use clothing::ClothingType;
pub use palette::{Palette, PaletteItem, PaletteItemId};
