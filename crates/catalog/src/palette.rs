//! The palette: a fixed table of items the user can drag onto the canvas.

use std::collections::HashSet;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use outfitter_core::{DomainError, DomainResult, ValueObject};

use crate::clothing::ClothingType;

/// Identifier of a palette entry (unique within its palette).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaletteItemId(pub u32);

impl core::fmt::Display for PaletteItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// One selectable clothing item.
///
/// Deserialization goes through [`PaletteItem::new`], so a decoded item has a
/// name and a positive price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaletteItemRecord")]
pub struct PaletteItem {
    pub id: PaletteItemId,
    #[serde(rename = "type")]
    pub kind: ClothingType,
    pub name: String,
    /// Whole currency units; always positive.
    pub price: u64,
    /// Rendering hint only.
    pub height: u32,
}

impl ValueObject for PaletteItem {}

/// Wire shape of [`PaletteItem`] before validation.
#[derive(Deserialize)]
struct PaletteItemRecord {
    id: PaletteItemId,
    #[serde(rename = "type")]
    kind: ClothingType,
    name: String,
    price: u64,
    height: u32,
}

impl TryFrom<PaletteItemRecord> for PaletteItem {
    type Error = DomainError;

    fn try_from(record: PaletteItemRecord) -> Result<Self, Self::Error> {
        PaletteItem::new(
            record.id,
            record.kind,
            record.name,
            record.price,
            record.height,
        )
    }
}

impl PaletteItem {
    pub fn new(
        id: PaletteItemId,
        kind: ClothingType,
        name: impl Into<String>,
        price: u64,
        height: u32,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("palette item name cannot be empty"));
        }
        if price == 0 {
            return Err(DomainError::validation("palette item price must be positive"));
        }

        Ok(Self {
            id,
            kind,
            name,
            price,
            height,
        })
    }
}

// (id, type, name, price, height)
const STANDARD_ITEMS: [(u32, ClothingType, &str, u64, u32); 6] = [
    (1, ClothingType::Tshirt, "T-Shirt", 500, 120),
    (2, ClothingType::Pants, "Pants", 800, 150),
    (3, ClothingType::Shirt, "Jacket", 1500, 130),
    (4, ClothingType::Dress, "Dress", 3500, 160),
    (5, ClothingType::Cap, "Cap", 400, 80),
    (6, ClothingType::Shoes, "Shoes", 2000, 70),
];

static STANDARD: LazyLock<Palette> = LazyLock::new(|| Palette {
    items: STANDARD_ITEMS
        .iter()
        .map(|&(id, kind, name, price, height)| PaletteItem {
            id: PaletteItemId(id),
            kind,
            name: name.to_string(),
            price,
            height,
        })
        .collect(),
});

/// Ordered, immutable palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "PaletteRecord")]
pub struct Palette {
    items: Vec<PaletteItem>,
}

#[derive(Deserialize)]
struct PaletteRecord {
    items: Vec<PaletteItem>,
}

impl TryFrom<PaletteRecord> for Palette {
    type Error = DomainError;

    fn try_from(record: PaletteRecord) -> Result<Self, Self::Error> {
        Palette::new(record.items)
    }
}

impl Palette {
    /// Build a custom palette. Item ids must be unique.
    pub fn new(items: Vec<PaletteItem>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.id) {
                return Err(DomainError::conflict(format!(
                    "duplicate palette item id {}",
                    item.id
                )));
            }
        }
        Ok(Self { items })
    }

    /// The process-wide standard palette (six items, one per clothing type).
    pub fn standard() -> &'static Palette {
        &STANDARD
    }

    pub fn items(&self) -> &[PaletteItem] {
        &self.items
    }

    pub fn get(&self, id: PaletteItemId) -> Option<&PaletteItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
