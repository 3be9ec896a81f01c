//! Colour resolution for individual parts.
//!
//! A global write is copied into every slot at the moment it happens, so the
//! stored per-slot value is already the effective colour.  Resolution is a
//! plain lookup; there is no override bit and no read-time fallback.

use crate::color::HexColor;
use crate::part::PartKind;
use crate::state::ConfigurationState;

/// The colour `part` is displayed in.
#[inline]
pub fn effective_color(config: &ConfigurationState, part: PartKind) -> &HexColor {
    config.colors.get(part.color_slot())
}
