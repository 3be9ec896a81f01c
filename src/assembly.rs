//! Assembly facade: the one call the renderer needs.
//!
//! [`resolve`] combines [`crate::layout::compute_layout`] with
//! [`crate::resolve::effective_color`] into an [`AssemblyPlan`].  It is pure
//! and cheap (five parts), so it is simply re-run after every mutation; a plan
//! is never patched in place.

use crate::color::HexColor;
use crate::layout::compute_layout;
use crate::part::PartKind;
use crate::resolve::effective_color;
use crate::state::ConfigurationState;
use bevy::prelude::Resource;

#[derive(Debug, Clone, PartialEq)]
pub struct PlanEntry {
    pub part: PartKind,
    pub position: f32,
    pub length: f32,
    pub color: HexColor,
    /// `false` for a hidden ring.  Its entry is still emitted so consumers can
    /// react to the disappearance.
    pub visible: bool,
    pub flipped: bool,
}

/// Per-change snapshot of what to draw: five entries, base to tip.
///
/// Also a Bevy resource, replaced wholesale by
/// [`crate::plugin::apply_configuration_requests_system`].
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct AssemblyPlan {
    entries: [PlanEntry; 5],
    total_length: f32,
}

impl AssemblyPlan {
    pub fn entries(&self) -> &[PlanEntry; 5] {
        &self.entries
    }

    pub fn entry(&self, part: PartKind) -> &PlanEntry {
        &self.entries[part as usize]
    }

    pub fn visible(&self) -> impl Iterator<Item = &PlanEntry> {
        self.entries.iter().filter(|entry| entry.visible)
    }

    /// Length of the assembled object, from the base to the top of the tip.
    pub fn total_length(&self) -> f32 {
        self.total_length
    }
}

impl Default for AssemblyPlan {
    fn default() -> Self {
        resolve(&ConfigurationState::default())
    }
}

pub fn resolve(config: &ConfigurationState) -> AssemblyPlan {
    let layout = compute_layout(config);
    let entries = layout.0.map(|placement| PlanEntry {
        part: placement.part,
        position: placement.position,
        length: placement.length,
        color: effective_color(config, placement.part).clone(),
        visible: placement.visible,
        flipped: placement.flipped,
    });
    AssemblyPlan {
        entries,
        total_length: layout.extent(),
    }
}
