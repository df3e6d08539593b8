//! Canvas sequence domain module.
//!
//! The ordered list of items the user has placed, implemented purely as
//! deterministic domain logic (no clocks, no UI, no storage).

pub mod sequence;

pub use sequence::{
    CanvasCleared, CanvasCommand, CanvasEvent, CanvasInstance, CanvasSequence, ClearCanvas,
    ItemMoved, ItemPlaced, ItemRemoved, MoveItem, PlaceItem, RemoveItem,
};
