use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use outfitter_canvas::CanvasInstance;
use outfitter_core::{Aggregate, AggregateRoot, DomainError, OutfitId, SessionId};
use outfitter_events::Event;

use crate::outfit::Outfit;

/// Aggregate root: Cart.
///
/// Append-only. Outfits are never edited, removed or reordered once added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: SessionId,
    outfits: Vec<Outfit>,
    version: u64,
}

impl Cart {
    pub fn empty(id: SessionId) -> Self {
        Self {
            id,
            outfits: Vec::new(),
            version: 0,
        }
    }

    pub fn outfits(&self) -> &[Outfit] {
        &self.outfits
    }

    pub fn len(&self) -> usize {
        self.outfits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outfits.is_empty()
    }

    pub fn last(&self) -> Option<&Outfit> {
        self.outfits.last()
    }

    /// Sum of every outfit's total.
    ///
    /// Submission refuses outfits that would push this past `u64::MAX`.
    pub fn grand_total(&self) -> u64 {
        self.outfits
            .iter()
            .fold(0u64, |total, outfit| total.saturating_add(outfit.total_price()))
    }
}

impl AggregateRoot for Cart {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Command: SubmitOutfit.
///
/// `instances` is the canvas snapshot at submission time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutfit {
    pub outfit_id: OutfitId,
    pub instances: Vec<CanvasInstance>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    SubmitOutfit(SubmitOutfit),
}

/// Event: OutfitAdded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitAdded {
    pub outfit: Outfit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    OutfitAdded(OutfitAdded),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::OutfitAdded(_) => "cart.outfit.added",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::OutfitAdded(e) => e.outfit.date(),
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::OutfitAdded(e) => {
                self.outfits.push(e.outfit.clone());
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::SubmitOutfit(cmd) => self.handle_submit(cmd),
        }
    }
}

impl Cart {
    fn handle_submit(&self, cmd: &SubmitOutfit) -> Result<Vec<CartEvent>, DomainError> {
        if self
            .outfits
            .iter()
            .any(|outfit| outfit.id_typed() == cmd.outfit_id)
        {
            return Err(DomainError::conflict(format!(
                "outfit {} is already in the cart",
                cmd.outfit_id
            )));
        }

        let outfit = Outfit::compose(cmd.outfit_id, &cmd.instances, cmd.occurred_at)?;
        if self.grand_total().checked_add(outfit.total_price()).is_none() {
            return Err(DomainError::validation("cart total exceeds the price range"));
        }

        Ok(vec![CartEvent::OutfitAdded(OutfitAdded { outfit })])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outfitter_catalog::{ClothingType, Palette, PaletteItem, PaletteItemId};
    use outfitter_core::InstanceId;

    fn test_cart_id() -> SessionId {
        SessionId::new()
    }

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn instance(palette_id: u32) -> CanvasInstance {
        CanvasInstance {
            instance_id: InstanceId::new(),
            item: Palette::standard()
                .get(PaletteItemId(palette_id))
                .cloned()
                .unwrap(),
        }
    }

    fn submit(instances: Vec<CanvasInstance>) -> CartCommand {
        CartCommand::SubmitOutfit(SubmitOutfit {
            outfit_id: OutfitId::new(),
            instances,
            occurred_at: test_time(),
        })
    }

    #[test]
    fn submit_emits_outfit_added_event() {
        let cart = Cart::empty(test_cart_id());
        let events = cart.handle(&submit(vec![instance(1), instance(2)])).unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            CartEvent::OutfitAdded(e) => {
                assert_eq!(e.outfit.item_count(), 2);
                assert_eq!(e.outfit.total_price(), 1300);
            }
        }
    }

    #[test]
    fn empty_submission_leaves_cart_untouched() {
        let mut cart = Cart::empty(test_cart_id());
        let err = cart.execute(&submit(Vec::new())).unwrap_err();

        assert_eq!(err, DomainError::EmptyCanvas);
        assert!(cart.is_empty());
        assert_eq!(cart.version(), 0);
    }

    #[test]
    fn resubmitting_the_same_outfit_id_is_a_conflict() {
        let mut cart = Cart::empty(test_cart_id());
        let outfit_id = OutfitId::new();
        let cmd = CartCommand::SubmitOutfit(SubmitOutfit {
            outfit_id,
            instances: vec![instance(5)],
            occurred_at: test_time(),
        });

        cart.execute(&cmd).unwrap();
        let err = cart.execute(&cmd).unwrap_err();

        assert!(matches!(err, DomainError::Conflict(_)));
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn grand_total_sums_outfit_totals() {
        let mut cart = Cart::empty(test_cart_id());
        cart.execute(&submit(vec![instance(1), instance(2)])).unwrap();
        cart.execute(&submit(vec![instance(4), instance(4)])).unwrap();

        assert_eq!(cart.grand_total(), 1300 + 3500);
    }

    #[test]
    fn submit_that_would_overflow_the_cart_total_is_rejected() {
        let mut cart = Cart::empty(test_cart_id());
        let pricey = CanvasInstance {
            instance_id: InstanceId::new(),
            item: PaletteItem::new(PaletteItemId(9), ClothingType::Dress, "Gown", u64::MAX, 160)
                .unwrap(),
        };
        cart.execute(&submit(vec![pricey])).unwrap();

        let err = cart.execute(&submit(vec![instance(5)])).unwrap_err();

        match err {
            DomainError::Validation(msg) if msg.contains("cart total") => {}
            other => panic!("expected a cart total validation error, got {other:?}"),
        }
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.grand_total(), u64::MAX);
    }

    #[test]
    fn occurred_at_is_the_outfit_date() {
        let cart = Cart::empty(test_cart_id());
        let at = test_time();
        let events = cart
            .handle(&CartCommand::SubmitOutfit(SubmitOutfit {
                outfit_id: OutfitId::new(),
                instances: vec![instance(2)],
                occurred_at: at,
            }))
            .unwrap();

        assert_eq!(events[0].occurred_at(), at);
        assert_eq!(events[0].event_type(), "cart.outfit.added");
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: each successful submit appends exactly one outfit and
            /// leaves earlier outfits untouched.
            #[test]
            fn cart_is_append_only(
                submissions in prop::collection::vec(
                    prop::collection::vec(1u32..=6, 1..10),
                    1..10
                )
            ) {
                let mut cart = Cart::empty(test_cart_id());

                for palette_ids in submissions {
                    let before: Vec<Outfit> = cart.outfits().to_vec();
                    let instances = palette_ids.into_iter().map(instance).collect();

                    cart.execute(&submit(instances)).unwrap();

                    prop_assert_eq!(cart.len(), before.len() + 1);
                    prop_assert_eq!(&cart.outfits()[..before.len()], &before[..]);
                }
            }

            /// Property: an outfit never holds two items of the same type, and its
            /// total is the sum over the kept items.
            #[test]
            fn outfit_is_deduplicated_by_type(
                palette_ids in prop::collection::vec(1u32..=6, 1..30)
            ) {
                let instances: Vec<CanvasInstance> =
                    palette_ids.iter().copied().map(instance).collect();
                let outfit = Outfit::compose(OutfitId::new(), &instances, test_time()).unwrap();

                let mut kinds = outfit.kinds();
                let kept = kinds.len();
                kinds.sort();
                kinds.dedup();
                prop_assert_eq!(kinds.len(), kept);

                let expected: u64 = outfit.items().iter().map(|i| i.price()).sum();
                prop_assert_eq!(outfit.total_price(), expected);

                for item in outfit.items() {
                    let first = instances.iter().find(|i| i.kind() == item.kind()).unwrap();
                    prop_assert_eq!(first, item);
                }
            }
        }
    }
}
