//! Configuration state: the single source of truth for a session.
//!
//! [`ConfigurationState`] is an immutable snapshot.  The two mutators,
//! [`ConfigurationState::with_color`] and
//! [`ConfigurationState::with_ring_toggled`], return a new snapshot; the owner
//! swaps it in wholesale so readers never see a half-applied edit.

use crate::color::HexColor;
use crate::constants::*;
use crate::part::{ColorSlot, PartKind, RingSlot};
use serde::{Deserialize, Serialize};

/// One colour per [`ColorSlot`].  Named fields keep all six slots present at
/// every point in the program.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorTable {
    pub global: HexColor,
    pub pommel: HexColor,
    pub ring_bottom: HexColor,
    pub body: HexColor,
    pub ring_top: HexColor,
    pub emitter: HexColor,
}

impl Default for ColorTable {
    fn default() -> Self {
        Self {
            global: DEFAULT_GLOBAL_COLOR.into(),
            pommel: DEFAULT_POMMEL_COLOR.into(),
            ring_bottom: DEFAULT_RING_BOTTOM_COLOR.into(),
            body: DEFAULT_BODY_COLOR.into(),
            ring_top: DEFAULT_RING_TOP_COLOR.into(),
            emitter: DEFAULT_EMITTER_COLOR.into(),
        }
    }
}

impl ColorTable {
    /// Every slot set to `color`.
    pub fn uniform(color: HexColor) -> Self {
        Self {
            global: color.clone(),
            pommel: color.clone(),
            ring_bottom: color.clone(),
            body: color.clone(),
            ring_top: color.clone(),
            emitter: color,
        }
    }

    pub fn get(&self, slot: ColorSlot) -> &HexColor {
        match slot {
            ColorSlot::Global => &self.global,
            ColorSlot::Pommel => &self.pommel,
            ColorSlot::RingBottom => &self.ring_bottom,
            ColorSlot::Body => &self.body,
            ColorSlot::RingTop => &self.ring_top,
            ColorSlot::Emitter => &self.emitter,
        }
    }

    fn slot_mut(&mut self, slot: ColorSlot) -> &mut HexColor {
        match slot {
            ColorSlot::Global => &mut self.global,
            ColorSlot::Pommel => &mut self.pommel,
            ColorSlot::RingBottom => &mut self.ring_bottom,
            ColorSlot::Body => &mut self.body,
            ColorSlot::RingTop => &mut self.ring_top,
            ColorSlot::Emitter => &mut self.emitter,
        }
    }

    /// Iterate `(slot, colour)` pairs in [`ColorSlot::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (ColorSlot, &HexColor)> + '_ {
        ColorSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationState {
    pub show_ring_top: bool,
    pub show_ring_bottom: bool,
    pub colors: ColorTable,
}

impl Default for ConfigurationState {
    fn default() -> Self {
        Self {
            show_ring_top: DEFAULT_SHOW_RINGS,
            show_ring_bottom: DEFAULT_SHOW_RINGS,
            colors: ColorTable::default(),
        }
    }
}

impl ConfigurationState {
    /// Snapshot with `slot` set to `color`.
    ///
    /// Writing [`ColorSlot::Global`] overwrites all six slots, discarding any
    /// per-part edits.  Any other slot changes only itself.
    #[must_use]
    pub fn with_color(&self, slot: ColorSlot, color: HexColor) -> Self {
        let mut next = self.clone();
        match slot {
            ColorSlot::Global => next.colors = ColorTable::uniform(color),
            _ => *next.colors.slot_mut(slot) = color,
        }
        next
    }

    /// Snapshot with the given ring's visibility flipped.  Colours are untouched.
    #[must_use]
    pub fn with_ring_toggled(&self, ring: RingSlot) -> Self {
        let mut next = self.clone();
        match ring {
            RingSlot::Top => next.show_ring_top = !next.show_ring_top,
            RingSlot::Bottom => next.show_ring_bottom = !next.show_ring_bottom,
        }
        next
    }

    #[inline]
    pub fn shows_ring(&self, ring: RingSlot) -> bool {
        match ring {
            RingSlot::Top => self.show_ring_top,
            RingSlot::Bottom => self.show_ring_bottom,
        }
    }

    /// Whether `part` is part of the assembled stack.  Non-ring parts always are.
    #[inline]
    pub fn is_present(&self, part: PartKind) -> bool {
        part.ring().map_or(true, |ring| self.shows_ring(ring))
    }
}
