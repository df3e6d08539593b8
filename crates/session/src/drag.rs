//! Drag-and-drop surface adapter.
//!
//! Pointer tracking stays in the front-end; it reports drag-start, hover and
//! drop, and this controller turns them into session commands.

use tracing::debug;

use outfitter_catalog::PaletteItem;
use outfitter_core::{DomainResult, InstanceId};

use crate::notice::Notifier;
use crate::session::OutfitSession;

/// Where a dragged item was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    Canvas,
    /// Anywhere that is not a drop zone.
    Outside,
}

/// What is currently being dragged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// A palette entry on its way to the canvas.
    Palette(PaletteItem),
    /// A placed item being reordered. `index` follows the item as it moves.
    Canvas {
        instance_id: InstanceId,
        index: usize,
    },
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    pub fn start_palette_drag(&mut self, item: PaletteItem) {
        self.state = DragState::Palette(item);
    }

    /// Start dragging the placed item at `index`. Ignored if there is none.
    pub fn start_canvas_drag<N: Notifier>(&mut self, session: &OutfitSession<N>, index: usize) {
        match session.canvas().get(index) {
            Some(instance) => {
                self.state = DragState::Canvas {
                    instance_id: instance.instance_id,
                    index,
                };
            }
            None => {
                debug!(index, "drag start on empty canvas slot ignored");
                self.state = DragState::Idle;
            }
        }
    }

    /// The dragged canvas item hovers over the item at `hover_index`.
    ///
    /// Moves the dragged item there right away and remembers its new index,
    /// so a drag across several items reorders step by step. Hovering its own
    /// slot, or hovering while dragging a palette entry, does nothing.
    ///
    /// The item is looked up by instance id on every hover, so edits made to
    /// the canvas mid-drag never move the wrong item. If the dragged item has
    /// been removed the drag ends.
    pub fn hover<N: Notifier>(
        &mut self,
        session: &mut OutfitSession<N>,
        hover_index: usize,
    ) -> DomainResult<()> {
        let DragState::Canvas { instance_id, .. } = self.state else {
            return Ok(());
        };

        let Some(current) = session.canvas().position_of(instance_id) else {
            debug!(instance = %instance_id, "dragged item left the canvas; drag ended");
            self.state = DragState::Idle;
            return Ok(());
        };

        self.state = DragState::Canvas {
            instance_id,
            index: current,
        };
        if current == hover_index {
            return Ok(());
        }

        session.move_item(current, hover_index)?;
        self.state = DragState::Canvas {
            instance_id,
            index: hover_index,
        };
        Ok(())
    }

    /// Release the dragged item. Returns the new instance id when a palette
    /// entry lands on the canvas.
    pub fn drop_on<N: Notifier>(
        &mut self,
        session: &mut OutfitSession<N>,
        target: DropTarget,
    ) -> DomainResult<Option<InstanceId>> {
        match (std::mem::take(&mut self.state), target) {
            (DragState::Palette(item), DropTarget::Canvas) => session.add(&item).map(Some),
            _ => Ok(None),
        }
    }

    pub fn cancel(&mut self) {
        self.state = DragState::Idle;
    }
}
