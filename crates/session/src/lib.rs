//! `outfitter-session` — the outfit builder as a synchronous command interface.
//!
//! A front-end (web canvas, TUI, test harness) owns one [`OutfitSession`] and
//! forwards user gestures to it, either directly or through a
//! [`DragController`] that mirrors a drag-and-drop surface.

pub mod config;
pub mod drag;
pub mod notice;
pub mod session;

pub use config::SessionConfig;
pub use drag::{DragController, DragState, DropTarget};
pub use notice::{BusNotifier, Notice, Notifier, NullNotifier};
pub use session::OutfitSession;
