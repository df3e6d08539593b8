use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use outfitter_canvas::CanvasInstance;
use outfitter_catalog::ClothingType;
use outfitter_core::{DomainError, DomainResult, Entity, OutfitId};

/// A submitted outfit. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outfit {
    id: OutfitId,
    items: Vec<CanvasInstance>,
    total_price: u64,
    date: DateTime<Utc>,
}

impl Outfit {
    /// Build an outfit from a canvas snapshot.
    ///
    /// Keeps the first instance of each clothing type, in canvas order; later
    /// instances of an already-seen type are dropped and do not count towards
    /// the total.
    pub fn compose(
        id: OutfitId,
        instances: &[CanvasInstance],
        date: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if instances.is_empty() {
            return Err(DomainError::empty_canvas());
        }

        let mut seen: HashSet<ClothingType> = HashSet::new();
        let items: Vec<CanvasInstance> = instances
            .iter()
            .filter(|instance| seen.insert(instance.kind()))
            .cloned()
            .collect();

        let total_price = items
            .iter()
            .try_fold(0u64, |total, item| total.checked_add(item.price()))
            .ok_or_else(|| DomainError::validation("outfit total exceeds the price range"))?;

        Ok(Self {
            id,
            items,
            total_price,
            date,
        })
    }

    pub fn id_typed(&self) -> OutfitId {
        self.id
    }

    pub fn items(&self) -> &[CanvasInstance] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn total_price(&self) -> u64 {
        self.total_price
    }

    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    pub fn kinds(&self) -> Vec<ClothingType> {
        self.items.iter().map(CanvasInstance::kind).collect()
    }
}

impl Entity for Outfit {
    type Id = OutfitId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
