use chrono::Utc;
use tracing::{debug, info, warn};

use outfitter_canvas::{
    CanvasCommand, CanvasEvent, CanvasInstance, CanvasSequence, ClearCanvas, MoveItem, PlaceItem,
    RemoveItem,
};
use outfitter_cart::{Cart, CartCommand, CartEvent, CartSummary, Outfit, SubmitOutfit};
use outfitter_catalog::{Palette, PaletteItem, PaletteItemId};
use outfitter_core::{Aggregate, DomainError, DomainResult, InstanceId, OutfitId, SessionId};
use outfitter_events::Event;

use crate::config::SessionConfig;
use crate::notice::{Notice, Notifier, NullNotifier};

/// One outfit-building session: palette, canvas and cart, owned together.
///
/// Every method runs to completion synchronously; callers feed it one user
/// gesture at a time.
#[derive(Debug)]
pub struct OutfitSession<N = NullNotifier> {
    id: SessionId,
    config: SessionConfig,
    palette: Palette,
    canvas: CanvasSequence,
    cart: Cart,
    notifier: N,
}

impl OutfitSession<NullNotifier> {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_notifier(config, NullNotifier)
    }
}

impl<N: Notifier> OutfitSession<N> {
    pub fn with_notifier(config: SessionConfig, notifier: N) -> Self {
        Self::with_palette(config, Palette::standard().clone(), notifier)
    }

    pub fn with_palette(config: SessionConfig, palette: Palette, notifier: N) -> Self {
        let id = SessionId::new();
        let canvas = match config.canvas_limit {
            Some(limit) => CanvasSequence::with_capacity_limit(id, limit),
            None => CanvasSequence::empty(id),
        };

        Self {
            id,
            config,
            palette,
            canvas,
            cart: Cart::empty(id),
            notifier,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn canvas(&self) -> &CanvasSequence {
        &self.canvas
    }

    /// Placed instances in display order.
    pub fn instances(&self) -> &[CanvasInstance] {
        self.canvas.instances()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Place a copy of `item` at the end of the canvas.
    pub fn add(&mut self, item: &PaletteItem) -> DomainResult<InstanceId> {
        let instance_id = InstanceId::new();
        self.run_canvas(CanvasCommand::PlaceItem(PlaceItem {
            instance_id,
            item: item.clone(),
            occurred_at: Utc::now(),
        }))?;
        Ok(instance_id)
    }

    /// Place the palette entry with the given id.
    pub fn add_by_id(&mut self, id: PaletteItemId) -> DomainResult<InstanceId> {
        let item = self.palette.get(id).cloned().ok_or_else(|| {
            warn!(palette_item = %id, "drop of unknown palette item");
            DomainError::not_found()
        })?;
        self.add(&item)
    }

    /// Remove the instance with this id. Returns whether anything was removed.
    pub fn remove(&mut self, instance_id: InstanceId) -> DomainResult<bool> {
        let events = self.run_canvas(CanvasCommand::RemoveItem(RemoveItem {
            instance_id,
            occurred_at: Utc::now(),
        }))?;
        Ok(!events.is_empty())
    }

    /// Take the item at `from_index` out and reinsert it at `to_index`.
    pub fn move_item(&mut self, from_index: usize, to_index: usize) -> DomainResult<()> {
        self.run_canvas(CanvasCommand::MoveItem(MoveItem {
            from_index,
            to_index,
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    /// Clear the canvas. The cart is not affected.
    pub fn reset(&mut self) -> DomainResult<()> {
        self.run_canvas(CanvasCommand::ClearCanvas(ClearCanvas {
            occurred_at: Utc::now(),
        }))?;
        Ok(())
    }

    /// Snapshot the canvas into an outfit and append it to the cart.
    ///
    /// The canvas keeps its items afterwards so the user can keep adjusting.
    pub fn submit(&mut self) -> DomainResult<Outfit> {
        let cmd = CartCommand::SubmitOutfit(SubmitOutfit {
            outfit_id: OutfitId::new(),
            instances: self.canvas.instances().to_vec(),
            occurred_at: Utc::now(),
        });

        let events = match self.cart.execute(&cmd) {
            Ok(events) => events,
            Err(err) if err.is_user_facing() => {
                debug!(session = %self.id, "submit rejected: canvas is empty");
                self.notifier.notify(Notice::EmptyCartSubmit);
                return Err(err);
            }
            Err(err) => {
                warn!(session = %self.id, error = %err, "submit rejected");
                return Err(err);
            }
        };

        let Some(CartEvent::OutfitAdded(added)) = events.into_iter().next() else {
            return Err(DomainError::invariant("cart accepted submit without an event"));
        };
        let outfit = added.outfit;

        info!(
            session = %self.id,
            outfit = %outfit.id_typed(),
            items = outfit.item_count(),
            total_price = outfit.total_price(),
            "outfit added to cart"
        );
        self.notifier.notify(Notice::AddedToCart {
            item_count: outfit.item_count(),
        });

        Ok(outfit)
    }

    /// Check the canvas can be saved and tell the user. Nothing is stored.
    pub fn save(&self) -> DomainResult<()> {
        if self.canvas.is_empty() {
            debug!(session = %self.id, "save rejected: canvas is empty");
            self.notifier.notify(Notice::EmptySave);
            return Err(DomainError::empty_canvas());
        }

        self.notifier.notify(Notice::Saved);
        Ok(())
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::of(&self.cart)
    }

    /// Cart total formatted with the configured currency symbol.
    pub fn total_line(&self) -> String {
        self.summary().total_line(&self.config.currency_symbol)
    }

    fn run_canvas(&mut self, cmd: CanvasCommand) -> DomainResult<Vec<CanvasEvent>> {
        match self.canvas.execute(&cmd) {
            Ok(events) => {
                for event in &events {
                    debug!(
                        session = %self.id,
                        event_type = event.event_type(),
                        canvas_len = self.canvas.len(),
                        "canvas updated"
                    );
                }
                Ok(events)
            }
            Err(err) => {
                warn!(session = %self.id, error = %err, "canvas command rejected");
                Err(err)
            }
        }
    }
}
