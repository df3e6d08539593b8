//! Icon lookup for the rendering layer.
//!
//! A pure function of the clothing type. Unknown tag strings resolve to no icon
//! so a front-end renders nothing for them instead of failing.

use serde::Serialize;

use crate::clothing::ClothingType;

/// Icon edge used when the caller has no preference.
pub const DEFAULT_ICON_SIZE: u32 = 80;
/// Icon edge used in the palette column.
pub const PALETTE_ICON_SIZE: u32 = 60;
/// Icon edge used for items placed on the canvas.
pub const CANVAS_ICON_SIZE: u32 = 180;

/// Caps and shoes are wide and short; they render at a fixed width.
const WIDE_ITEM_WIDTH: u32 = 100;

/// Hosted image for a clothing type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssetRef {
    pub url: &'static str,
    pub alt: &'static str,
}

/// Icon ready to render: image plus box size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Icon {
    pub asset: AssetRef,
    pub width: u32,
    pub height: u32,
}

impl AssetRef {
    pub fn for_type(kind: ClothingType) -> Self {
        let url = match kind {
            ClothingType::Tshirt => {
                "https://res.cloudinary.com/dszd8jabc/image/upload/v1745349258/casual-t-shirt-_uz5ub3.png"
            }
            ClothingType::Pants => {
                "https://res.cloudinary.com/dszd8jabc/image/upload/v1745349258/pants_rbzwd0.png"
            }
            ClothingType::Shirt => {
                "https://res.cloudinary.com/dszd8jabc/image/upload/v1745349258/long-sleeve-shirt_wgarv0.png"
            }
            ClothingType::Dress => {
                "https://res.cloudinary.com/dszd8jabc/image/upload/v1745349258/dress_jxu0c1.png"
            }
            ClothingType::Cap => {
                "https://res.cloudinary.com/dszd8jabc/image/upload/v1745349257/cap_tixdzj.png"
            }
            ClothingType::Shoes => {
                "https://res.cloudinary.com/dszd8jabc/image/upload/v1745349258/shoe_s5gmlm.png"
            }
        };

        Self {
            url,
            alt: kind.as_str(),
        }
    }
}

impl Icon {
    /// Icon for a known clothing type at the requested edge size.
    pub fn for_type(kind: ClothingType, size: u32) -> Self {
        let width = match kind {
            ClothingType::Cap | ClothingType::Shoes => WIDE_ITEM_WIDTH,
            _ => size,
        };

        Self {
            asset: AssetRef::for_type(kind),
            width,
            height: size,
        }
    }

    /// Icon for a raw type tag, `None` when the tag is not a known type.
    pub fn for_tag(tag: &str, size: u32) -> Option<Self> {
        tag.parse::<ClothingType>()
            .ok()
            .map(|kind| Self::for_type(kind, size))
    }
}
