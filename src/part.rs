//! Part identities, colour slots, and the Dimension Table.

use crate::constants::{BODY_LENGTH, EMITTER_LENGTH, POMMEL_LENGTH, RING_LENGTH};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five fixed segments, listed base to tip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PartKind {
    Pommel,
    RingBottom,
    Body,
    RingTop,
    Emitter,
}

impl PartKind {
    /// Every part in stacking order.
    pub const ALL: [PartKind; 5] = [
        PartKind::Pommel,
        PartKind::RingBottom,
        PartKind::Body,
        PartKind::RingTop,
        PartKind::Emitter,
    ];

    /// Nominal length along the stacking axis.  Always strictly positive.
    #[inline]
    pub fn length(self) -> f32 {
        match self {
            PartKind::Pommel => POMMEL_LENGTH,
            PartKind::RingBottom | PartKind::RingTop => RING_LENGTH,
            PartKind::Body => BODY_LENGTH,
            PartKind::Emitter => EMITTER_LENGTH,
        }
    }

    /// The colour slot that holds this part's colour.
    #[inline]
    pub fn color_slot(self) -> ColorSlot {
        match self {
            PartKind::Pommel => ColorSlot::Pommel,
            PartKind::RingBottom => ColorSlot::RingBottom,
            PartKind::Body => ColorSlot::Body,
            PartKind::RingTop => ColorSlot::RingTop,
            PartKind::Emitter => ColorSlot::Emitter,
        }
    }

    /// `Some` for the two optional ring parts.
    #[inline]
    pub fn ring(self) -> Option<RingSlot> {
        match self {
            PartKind::RingBottom => Some(RingSlot::Bottom),
            PartKind::RingTop => Some(RingSlot::Top),
            _ => None,
        }
    }

    /// The pommel is modelled rotated 180° about the transverse axis.
    #[inline]
    pub fn is_flipped(self) -> bool {
        self == PartKind::Pommel
    }

    pub fn label(self) -> &'static str {
        match self {
            PartKind::Pommel => "Pommel",
            PartKind::RingBottom => "Ring Bottom",
            PartKind::Body => "Body",
            PartKind::RingTop => "Ring Top",
            PartKind::Emitter => "Emitter",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A writable colour slot.  `Global` broadcasts to every other slot on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColorSlot {
    Global,
    Pommel,
    RingBottom,
    Body,
    RingTop,
    Emitter,
}

impl ColorSlot {
    /// Every slot, `Global` first then stacking order.
    pub const ALL: [ColorSlot; 6] = [
        ColorSlot::Global,
        ColorSlot::Pommel,
        ColorSlot::RingBottom,
        ColorSlot::Body,
        ColorSlot::RingTop,
        ColorSlot::Emitter,
    ];

    /// Field name used in the persisted record.
    pub fn key(self) -> &'static str {
        match self {
            ColorSlot::Global => "global",
            ColorSlot::Pommel => "pommel",
            ColorSlot::RingBottom => "ringBottom",
            ColorSlot::Body => "body",
            ColorSlot::RingTop => "ringTop",
            ColorSlot::Emitter => "emitter",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColorSlot::Global => "Global",
            ColorSlot::Pommel => "Pommel",
            ColorSlot::RingBottom => "Ring Bottom",
            ColorSlot::Body => "Body",
            ColorSlot::RingTop => "Ring Top",
            ColorSlot::Emitter => "Emitter",
        }
    }

    /// Next slot in [`ColorSlot::ALL`], wrapping around.
    pub fn next(self) -> ColorSlot {
        let index = ColorSlot::ALL
            .iter()
            .position(|slot| *slot == self)
            .unwrap_or(0);
        ColorSlot::ALL[(index + 1) % ColorSlot::ALL.len()]
    }
}

impl From<PartKind> for ColorSlot {
    fn from(part: PartKind) -> Self {
        part.color_slot()
    }
}

/// One of the two optional ring positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RingSlot {
    Top,
    Bottom,
}

impl RingSlot {
    #[inline]
    pub fn part(self) -> PartKind {
        match self {
            RingSlot::Top => PartKind::RingTop,
            RingSlot::Bottom => PartKind::RingBottom,
        }
    }
}
