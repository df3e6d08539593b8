use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use outfitter_catalog::{ClothingType, PaletteItem};
use outfitter_core::{Aggregate, AggregateRoot, DomainError, Entity, InstanceId, SessionId};
use outfitter_events::Event;

/// A palette item placed on the canvas.
///
/// Holds its own copy of the palette entry; only `instance_id` tells two
/// placed copies of the same item apart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasInstance {
    pub instance_id: InstanceId,
    #[serde(flatten)]
    pub item: PaletteItem,
}

impl CanvasInstance {
    pub fn kind(&self) -> ClothingType {
        self.item.kind
    }

    pub fn price(&self) -> u64 {
        self.item.price
    }
}

impl Entity for CanvasInstance {
    type Id = InstanceId;

    fn id(&self) -> &Self::Id {
        &self.instance_id
    }
}

/// Aggregate root: CanvasSequence.
///
/// Insertion order is display order (top to bottom). Instance ids are unique
/// within the sequence at all times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasSequence {
    id: SessionId,
    instances: Vec<CanvasInstance>,
    capacity: Option<usize>,
    version: u64,
}

impl CanvasSequence {
    pub fn empty(id: SessionId) -> Self {
        Self {
            id,
            instances: Vec::new(),
            capacity: None,
            version: 0,
        }
    }

    /// An empty canvas that refuses placements beyond `capacity` instances.
    pub fn with_capacity_limit(id: SessionId, capacity: usize) -> Self {
        Self {
            capacity: Some(capacity),
            ..Self::empty(id)
        }
    }

    pub fn instances(&self) -> &[CanvasInstance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    pub fn get(&self, index: usize) -> Option<&CanvasInstance> {
        self.instances.get(index)
    }

    pub fn position_of(&self, instance_id: InstanceId) -> Option<usize> {
        self.instances
            .iter()
            .position(|instance| instance.instance_id == instance_id)
    }

    pub fn contains(&self, instance_id: InstanceId) -> bool {
        self.position_of(instance_id).is_some()
    }

    /// Instance ids in display order.
    pub fn instance_ids(&self) -> Vec<InstanceId> {
        self.instances.iter().map(|i| i.instance_id).collect()
    }
}

impl AggregateRoot for CanvasSequence {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: PlaceItem (drop a palette item onto the canvas).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceItem {
    pub instance_id: InstanceId,
    pub item: PaletteItem,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub instance_id: InstanceId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: MoveItem.
///
/// Remove-then-insert: the item at `from_index` is taken out, then inserted at
/// `to_index` of the shortened sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveItem {
    pub from_index: usize,
    pub to_index: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearCanvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearCanvas {
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasCommand {
    PlaceItem(PlaceItem),
    RemoveItem(RemoveItem),
    MoveItem(MoveItem),
    ClearCanvas(ClearCanvas),
}

/// Event: ItemPlaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemPlaced {
    pub instance_id: InstanceId,
    pub item: PaletteItem,
    pub position: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub instance_id: InstanceId,
    pub position: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemMoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemMoved {
    pub instance_id: InstanceId,
    pub from_index: usize,
    pub to_index: usize,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CanvasCleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasCleared {
    pub removed: usize,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CanvasEvent {
    ItemPlaced(ItemPlaced),
    ItemRemoved(ItemRemoved),
    ItemMoved(ItemMoved),
    CanvasCleared(CanvasCleared),
}

impl Event for CanvasEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CanvasEvent::ItemPlaced(_) => "canvas.item.placed",
            CanvasEvent::ItemRemoved(_) => "canvas.item.removed",
            CanvasEvent::ItemMoved(_) => "canvas.item.moved",
            CanvasEvent::CanvasCleared(_) => "canvas.cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CanvasEvent::ItemPlaced(e) => e.occurred_at,
            CanvasEvent::ItemRemoved(e) => e.occurred_at,
            CanvasEvent::ItemMoved(e) => e.occurred_at,
            CanvasEvent::CanvasCleared(e) => e.occurred_at,
        }
    }
}

impl Aggregate for CanvasSequence {
    type Command = CanvasCommand;
    type Event = CanvasEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CanvasEvent::ItemPlaced(e) => {
                self.instances.push(CanvasInstance {
                    instance_id: e.instance_id,
                    item: e.item.clone(),
                });
            }
            CanvasEvent::ItemRemoved(e) => {
                self.instances
                    .retain(|instance| instance.instance_id != e.instance_id);
            }
            CanvasEvent::ItemMoved(e) => {
                let len = self.instances.len();
                if e.from_index < len && e.to_index < len {
                    let moved = self.instances.remove(e.from_index);
                    self.instances.insert(e.to_index, moved);
                }
            }
            CanvasEvent::CanvasCleared(_) => {
                self.instances.clear();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CanvasCommand::PlaceItem(cmd) => self.handle_place(cmd),
            CanvasCommand::RemoveItem(cmd) => self.handle_remove(cmd),
            CanvasCommand::MoveItem(cmd) => self.handle_move(cmd),
            CanvasCommand::ClearCanvas(cmd) => self.handle_clear(cmd),
        }
    }
}

impl CanvasSequence {
    fn handle_place(&self, cmd: &PlaceItem) -> Result<Vec<CanvasEvent>, DomainError> {
        if self.contains(cmd.instance_id) {
            return Err(DomainError::conflict(format!(
                "instance {} is already on the canvas",
                cmd.instance_id
            )));
        }

        if let Some(capacity) = self.capacity {
            if self.instances.len() >= capacity {
                return Err(DomainError::validation(format!(
                    "canvas holds at most {capacity} items"
                )));
            }
        }

        Ok(vec![CanvasEvent::ItemPlaced(ItemPlaced {
            instance_id: cmd.instance_id,
            item: cmd.item.clone(),
            position: self.instances.len(),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveItem) -> Result<Vec<CanvasEvent>, DomainError> {
        let Some(position) = self.position_of(cmd.instance_id) else {
            return Ok(Vec::new());
        };

        Ok(vec![CanvasEvent::ItemRemoved(ItemRemoved {
            instance_id: cmd.instance_id,
            position,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_move(&self, cmd: &MoveItem) -> Result<Vec<CanvasEvent>, DomainError> {
        let len = self.instances.len();
        if cmd.from_index >= len || cmd.to_index >= len {
            return Err(DomainError::validation(format!(
                "move {} -> {} is out of range for {len} items",
                cmd.from_index, cmd.to_index
            )));
        }

        if cmd.from_index == cmd.to_index {
            return Ok(Vec::new());
        }

        let instance_id = self.instances[cmd.from_index].instance_id;

        Ok(vec![CanvasEvent::ItemMoved(ItemMoved {
            instance_id,
            from_index: cmd.from_index,
            to_index: cmd.to_index,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_clear(&self, cmd: &ClearCanvas) -> Result<Vec<CanvasEvent>, DomainError> {
        if self.instances.is_empty() {
            return Ok(Vec::new());
        }

        Ok(vec![CanvasEvent::CanvasCleared(CanvasCleared {
            removed: self.instances.len(),
            occurred_at: cmd.occurred_at,
        })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outfitter_catalog::{Palette, PaletteItemId};

    fn test_canvas_id() -> SessionId {
        SessionId::new()
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn palette_item(id: u32) -> PaletteItem {
        Palette::standard()
            .get(PaletteItemId(id))
            .cloned()
            .unwrap()
    }

    fn place(canvas: &mut CanvasSequence, id: u32) -> InstanceId {
        let instance_id = InstanceId::new();
        canvas
            .execute(&CanvasCommand::PlaceItem(PlaceItem {
                instance_id,
                item: palette_item(id),
                occurred_at: test_time(),
            }))
            .unwrap();
        instance_id
    }

    fn move_item(
        canvas: &mut CanvasSequence,
        from: usize,
        to: usize,
    ) -> Result<Vec<CanvasEvent>, DomainError> {
        canvas.execute(&CanvasCommand::MoveItem(MoveItem {
            from_index: from,
            to_index: to,
            occurred_at: test_time(),
        }))
    }

    #[test]
    fn place_item_emits_item_placed_at_the_end() {
        let mut canvas = CanvasSequence::empty(test_canvas_id());
        place(&mut canvas, 1);

        let instance_id = InstanceId::new();
        let events = canvas
            .handle(&CanvasCommand::PlaceItem(PlaceItem {
                instance_id,
                item: palette_item(2),
                occurred_at: test_time(),
            }))
            .unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            CanvasEvent::ItemPlaced(e) => {
                assert_eq!(e.instance_id, instance_id);
                assert_eq!(e.position, 1);
                assert_eq!(e.item.kind, ClothingType::Pants);
            }
            _ => panic!("Expected ItemPlaced event"),
        }
    }

    #[test]
    fn same_palette_item_can_be_placed_twice() {
        let mut canvas = CanvasSequence::empty(test_canvas_id());
        let a = place(&mut canvas, 1);
        let b = place(&mut canvas, 1);

        assert_ne!(a, b);
        assert_eq!(canvas.len(), 2);
        assert_eq!(canvas.instances()[0].item, canvas.instances()[1].item);
    }

    #[test]
    fn duplicate_instance_id_is_a_conflict() {
        let mut canvas = CanvasSequence::empty(test_canvas_id());
        let existing = place(&mut canvas, 1);

        let err = canvas
            .handle(&CanvasCommand::PlaceItem(PlaceItem {
                instance_id: existing,
                item: palette_item(2),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(canvas.len(), 1);
    }

    #[test]
    fn capacity_limit_rejects_extra_placements() {
        let mut canvas = CanvasSequence::with_capacity_limit(test_canvas_id(), 1);
        place(&mut canvas, 1);

        let err = canvas
            .execute(&CanvasCommand::PlaceItem(PlaceItem {
                instance_id: InstanceId::new(),
                item: palette_item(2),
                occurred_at: test_time(),
            }))
            .unwrap_err();
        match err {
            DomainError::Validation(msg) if msg.contains("at most 1") => {}
            other => panic!("Expected Validation error, got {other:?}"),
        }
        assert_eq!(canvas.len(), 1);
    }

    #[test]
    fn remove_deletes_only_the_matching_instance() {
        let mut canvas = CanvasSequence::empty(test_canvas_id());
        let a = place(&mut canvas, 1);
        let b = place(&mut canvas, 1);
        let c = place(&mut canvas, 2);

        canvas
            .execute(&CanvasCommand::RemoveItem(RemoveItem {
                instance_id: b,
                occurred_at: test_time(),
            }))
            .unwrap();

        assert_eq!(canvas.instance_ids(), vec![a, c]);
    }

    #[test]
    fn remove_unknown_instance_is_a_no_op() {
        let mut canvas = CanvasSequence::empty(test_canvas_id());
        place(&mut canvas, 1);
        let before = canvas.clone();

        let events = canvas
            .execute(&CanvasCommand::RemoveItem(RemoveItem {
                instance_id: InstanceId::new(),
                occurred_at: test_time(),
            }))
            .unwrap();

        assert!(events.is_empty());
        assert_eq!(canvas, before);
    }

    #[test]
    fn move_is_remove_then_insert_not_swap() {
        let mut canvas = CanvasSequence::empty(test_canvas_id());
        let a = place(&mut canvas, 1);
        let b = place(&mut canvas, 2);
        let c = place(&mut canvas, 3);
        let d = place(&mut canvas, 4);

        move_item(&mut canvas, 0, 2).unwrap();
        assert_eq!(canvas.instance_ids(), vec![b, c, a, d]);

        move_item(&mut canvas, 3, 0).unwrap();
        assert_eq!(canvas.instance_ids(), vec![d, b, c, a]);
    }

    #[test]
    fn move_to_same_index_is_a_no_op() {
        let mut canvas = CanvasSequence::empty(test_canvas_id());
        place(&mut canvas, 1);
        place(&mut canvas, 2);
        let version = canvas.version();

        let events = move_item(&mut canvas, 1, 1).unwrap();
        assert!(events.is_empty());
        assert_eq!(canvas.version(), version);
    }

    #[test]
    fn out_of_range_move_is_rejected_without_mutation() {
        let mut canvas = CanvasSequence::empty(test_canvas_id());
        place(&mut canvas, 1);
        place(&mut canvas, 2);
        let before = canvas.clone();

        for (from, to) in [(2, 0), (0, 2), (5, 5)] {
            let err = move_item(&mut canvas, from, to).unwrap_err();
            match err {
                DomainError::Validation(msg) if msg.contains("out of range") => {}
                other => panic!("Expected Validation error, got {other:?}"),
            }
        }
        assert_eq!(canvas, before);
    }

    #[test]
    fn clear_empties_the_canvas() {
        let mut canvas = CanvasSequence::empty(test_canvas_id());
        place(&mut canvas, 1);
        place(&mut canvas, 5);

        let events = canvas
            .execute(&CanvasCommand::ClearCanvas(ClearCanvas {
                occurred_at: test_time(),
            }))
            .unwrap();

        match &events[0] {
            CanvasEvent::CanvasCleared(e) => assert_eq!(e.removed, 2),
            _ => panic!("Expected CanvasCleared event"),
        }
        assert!(canvas.is_empty());
    }

    #[test]
    fn clear_on_empty_canvas_emits_nothing() {
        let canvas = CanvasSequence::empty(test_canvas_id());
        let events = canvas
            .handle(&CanvasCommand::ClearCanvas(ClearCanvas {
                occurred_at: test_time(),
            }))
            .unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut canvas = CanvasSequence::empty(test_canvas_id());
        place(&mut canvas, 1);
        place(&mut canvas, 2);
        let before = canvas.clone();

        let cmd = CanvasCommand::MoveItem(MoveItem {
            from_index: 0,
            to_index: 1,
            occurred_at: test_time(),
        });
        let events1 = canvas.handle(&cmd).unwrap();
        let events2 = canvas.handle(&cmd).unwrap();

        assert_eq!(canvas, before);
        assert_eq!(events1, events2);
    }

    #[test]
    fn version_increments_on_apply() {
        let mut canvas = CanvasSequence::empty(test_canvas_id());
        assert_eq!(canvas.version(), 0);
        place(&mut canvas, 1);
        assert_eq!(canvas.version(), 1);
        place(&mut canvas, 2);
        move_item(&mut canvas, 0, 1).unwrap();
        assert_eq!(canvas.version(), 3);
    }

    #[test]
    fn event_types_are_namespaced() {
        let event = CanvasEvent::CanvasCleared(CanvasCleared {
            removed: 1,
            occurred_at: test_time(),
        });
        assert_eq!(event.event_type(), "canvas.cleared");
        assert_eq!(Event::version(&event), 1);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashSet;

        fn canvas_with(palette_ids: &[u32]) -> CanvasSequence {
            let mut canvas = CanvasSequence::empty(test_canvas_id());
            for &id in palette_ids {
                place(&mut canvas, id);
            }
            canvas
        }

        fn sorted_ids(canvas: &CanvasSequence) -> Vec<InstanceId> {
            let mut ids = canvas.instance_ids();
            ids.sort_by_key(|id| *id.as_uuid());
            ids
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: every placed instance has a distinct id.
            #[test]
            fn placed_instance_ids_are_unique(
                palette_ids in prop::collection::vec(1u32..=6, 0..50)
            ) {
                let canvas = canvas_with(&palette_ids);
                let unique: HashSet<InstanceId> = canvas.instance_ids().into_iter().collect();
                prop_assert_eq!(unique.len(), palette_ids.len());
            }

            /// Property: a valid move only permutes the sequence.
            #[test]
            fn move_is_a_permutation(
                palette_ids in prop::collection::vec(1u32..=6, 1..20),
                from_seed in any::<usize>(),
                to_seed in any::<usize>()
            ) {
                let mut canvas = canvas_with(&palette_ids);
                let len = canvas.len();
                let from = from_seed % len;
                let to = to_seed % len;
                let before = canvas.clone();

                move_item(&mut canvas, from, to).unwrap();

                prop_assert_eq!(canvas.len(), len);
                prop_assert_eq!(sorted_ids(&canvas), sorted_ids(&before));
                prop_assert_eq!(
                    canvas.instances()[to].instance_id,
                    before.instances()[from].instance_id
                );
            }

            /// Property: remove deletes exactly one instance and keeps relative order.
            #[test]
            fn remove_is_selective(
                palette_ids in prop::collection::vec(1u32..=6, 1..20),
                pick in any::<usize>()
            ) {
                let mut canvas = canvas_with(&palette_ids);
                let before = canvas.instance_ids();
                let target = before[pick % before.len()];

                canvas
                    .execute(&CanvasCommand::RemoveItem(RemoveItem {
                        instance_id: target,
                        occurred_at: test_time(),
                    }))
                    .unwrap();

                let expected: Vec<InstanceId> =
                    before.into_iter().filter(|id| *id != target).collect();
                prop_assert_eq!(canvas.instance_ids(), expected);
            }

            /// Property: clear always leaves an empty canvas.
            #[test]
            fn clear_always_empties(
                palette_ids in prop::collection::vec(1u32..=6, 0..20)
            ) {
                let mut canvas = canvas_with(&palette_ids);
                canvas
                    .execute(&CanvasCommand::ClearCanvas(ClearCanvas {
                        occurred_at: test_time(),
                    }))
                    .unwrap();
                prop_assert_eq!(canvas.len(), 0);
            }
        }
    }
}
