//! User-facing notices and the collaborator that displays them.

use serde::{Deserialize, Serialize};

use outfitter_events::EventBus;

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    /// "Add to cart" pressed with nothing on the canvas.
    EmptyCartSubmit,
    /// An outfit with `item_count` items was added to the cart.
    AddedToCart { item_count: usize },
    /// "Save outfit" pressed with nothing on the canvas.
    EmptySave,
    Saved,
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::EmptyCartSubmit => {
                "No items selected Please add items to your outfit before adding cart".to_string()
            }
            Notice::AddedToCart { item_count } => format!(
                "Added to cart!  Your outfit with {item_count} items has been added to the cart."
            ),
            Notice::EmptySave => {
                "No items selected  Please add items to your outfit before saving.".to_string()
            }
            Notice::Saved => "Your outfit has been saved successfully.".to_string(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notice::EmptyCartSubmit | Notice::EmptySave)
    }
}

impl core::fmt::Display for Notice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.message())
    }
}

/// Displays notices to the user (toast, status line, ...).
pub trait Notifier {
    fn notify(&self, notice: Notice);
}

/// Discards every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _notice: Notice) {}
}

/// Publishes notices onto a bus so any number of front-ends can subscribe.
#[derive(Debug, Clone)]
pub struct BusNotifier<B> {
    bus: B,
}

impl<B> BusNotifier<B>
where
    B: EventBus<Notice>,
{
    pub fn new(bus: B) -> Self {
        Self { bus }
    }
}

impl<B> Notifier for BusNotifier<B>
where
    B: EventBus<Notice>,
{
    fn notify(&self, notice: Notice) {
        if let Err(err) = self.bus.publish(notice) {
            tracing::warn!(error = ?err, "failed to publish notice");
        }
    }
}
