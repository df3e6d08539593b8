use core::str::FromStr;

use serde::{Deserialize, Serialize};

use outfitter_core::DomainError;

/// Clothing category tag.
///
/// An outfit holds at most one item per tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClothingType {
    Tshirt,
    Pants,
    Shirt,
    Dress,
    Cap,
    Shoes,
}

impl ClothingType {
    pub const ALL: [ClothingType; 6] = [
        ClothingType::Tshirt,
        ClothingType::Pants,
        ClothingType::Shirt,
        ClothingType::Dress,
        ClothingType::Cap,
        ClothingType::Shoes,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ClothingType::Tshirt => "tshirt",
            ClothingType::Pants => "pants",
            ClothingType::Shirt => "shirt",
            ClothingType::Dress => "dress",
            ClothingType::Cap => "cap",
            ClothingType::Shoes => "shoes",
        }
    }
}

impl core::fmt::Display for ClothingType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClothingType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ClothingType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::validation(format!("unknown clothing type: {s:?}")))
    }
}
