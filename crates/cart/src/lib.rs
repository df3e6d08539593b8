//! Cart domain module.
//!
//! Turns canvas snapshots into outfits (one item per clothing type) and keeps
//! them in an append-only cart.

pub mod cart;
pub mod outfit;
pub mod summary;

pub use cart::{Cart, CartCommand, CartEvent, OutfitAdded, SubmitOutfit};
pub use outfit::Outfit;
pub use summary::{CartSummary, format_price};
