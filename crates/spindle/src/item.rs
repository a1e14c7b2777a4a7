use derive_more::{AsRef, Deref, Display, From, Into};
use palette::{Hsv, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable identifier for a wheel item. Assigned once by the store and never
/// recomputed; unique within one wheel.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    From, Into,
)]
#[serde(transparent)]
pub struct ItemId(u64);

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Title(String);

crate::impl_string_newtype!(Title);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
    #[error("item title is empty")]
    EmptyTitle,
}

/// An item on the wheel.
///
/// Edits replace the whole value under the same id; fields are never mutated
/// in place.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    id: ItemId,
    title: Title,
    hue: f64,
}

impl Item {
    /// Builds an item from a raw title. The title is trimmed and an empty
    /// result is refused; the hue is folded into `[0, 1)`.
    pub fn new(id: ItemId, title: impl AsRef<str>, hue: f64) -> Result<Self, ItemError> {
        let title = title.as_ref().trim();
        if title.is_empty() {
            return Err(ItemError::EmptyTitle);
        }
        Ok(Self {
            id,
            title: Title::new(title),
            hue: hue.rem_euclid(1.0),
        })
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn hue(&self) -> f64 {
        self.hue
    }

    /// Returns a new item with the given title, keeping id and hue.
    pub fn with_title(&self, title: impl AsRef<str>) -> Result<Self, ItemError> {
        Self::new(self.id, title, self.hue)
    }

    /// The two gradient stops of the item's wedge, inner to outer.
    pub fn colors(&self) -> (Srgb<f64>, Srgb<f64>) {
        let degrees = self.hue * 360.0;
        let inner: Srgb<f64> = Hsv::new_srgb(degrees, 0.4, 0.8).into_color();
        let outer: Srgb<f64> = Hsv::new_srgb(degrees, 0.7, 0.9).into_color();
        (inner, outer)
    }
}
