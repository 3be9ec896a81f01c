//! Stack layout: where each part sits along the stacking axis.
//!
//! A single base-to-tip pass keeps a running `base` coordinate.  Each part is
//! placed at `base` (the pommel at `base + length`, since it is modelled
//! upside down with its origin at its tip) and, if present, advances `base` by
//! its own length.  Positions are therefore a prefix sum over the lengths of
//! present parts: no gaps, no overlaps, for every combination of ring flags.
//!
//! A hidden ring is still reported, with `visible == false` and the position
//! it would take if it were shown.  Nothing above it depends on that value.

use crate::part::PartKind;
use crate::state::ConfigurationState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub part: PartKind,
    /// Origin of the part's model along the stacking axis.
    pub position: f32,
    /// Nominal length, copied from the Dimension Table.
    pub length: f32,
    pub visible: bool,
    /// Rotated 180° about the transverse axis (origin at the far end).
    pub flipped: bool,
}

impl Placement {
    /// Lowest point the part occupies on the stacking axis.
    #[inline]
    pub fn start(&self) -> f32 {
        if self.flipped {
            self.position - self.length
        } else {
            self.position
        }
    }

    /// Highest point the part occupies on the stacking axis.
    #[inline]
    pub fn end(&self) -> f32 {
        self.start() + self.length
    }
}

/// Placements for all five parts, indexed in [`PartKind::ALL`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackLayout(pub [Placement; 5]);

impl StackLayout {
    pub fn get(&self, part: PartKind) -> &Placement {
        &self.0[part as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> {
        self.0.iter()
    }

    /// Height of the assembled stack: the top of the highest visible part.
    pub fn extent(&self) -> f32 {
        self.iter()
            .filter(|placement| placement.visible)
            .map(Placement::end)
            .fold(0.0, f32::max)
    }
}

/// Lay out every part for `config`.  Total over the four ring-flag states.
pub fn compute_layout(config: &ConfigurationState) -> StackLayout {
    let mut base = 0.0;
    let placements = PartKind::ALL.map(|part| {
        let length = part.length();
        let visible = config.is_present(part);
        let flipped = part.is_flipped();
        let position = if flipped { base + length } else { base };
        if visible {
            base += length;
        }
        Placement {
            part,
            position,
            length,
            visible,
            flipped,
        }
    });
    StackLayout(placements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::part::RingSlot;

    fn config(show_ring_top: bool, show_ring_bottom: bool) -> ConfigurationState {
        ConfigurationState {
            show_ring_top,
            show_ring_bottom,
            ..Default::default()
        }
    }

    fn positions(layout: &StackLayout) -> [f32; 5] {
        layout.0.map(|p| p.position)
    }

    #[test]
    fn both_rings_shown() {
        let layout = compute_layout(&config(true, true));
        assert_eq!(positions(&layout), [34.0, 34.0, 44.0, 224.0, 234.0]);
        assert!(layout.iter().all(|p| p.visible));
    }

    #[test]
    fn both_rings_hidden() {
        let layout = compute_layout(&config(false, false));
        assert_eq!(layout.get(PartKind::Pommel).position, 34.0);
        assert_eq!(layout.get(PartKind::Body).position, 34.0);
        assert_eq!(layout.get(PartKind::Emitter).position, 214.0);
        assert!(!layout.get(PartKind::RingBottom).visible);
        assert!(!layout.get(PartKind::RingTop).visible);
    }

    #[test]
    fn only_bottom_ring_shown() {
        let layout = compute_layout(&config(false, true));
        assert_eq!(layout.get(PartKind::RingBottom).position, 34.0);
        assert_eq!(layout.get(PartKind::Body).position, 44.0);
        assert_eq!(layout.get(PartKind::Emitter).position, 224.0);
    }

    #[test]
    fn only_top_ring_shown() {
        let layout = compute_layout(&config(true, false));
        assert_eq!(layout.get(PartKind::Body).position, 34.0);
        assert_eq!(layout.get(PartKind::RingTop).position, 214.0);
        assert_eq!(layout.get(PartKind::Emitter).position, 224.0);
    }

    #[test]
    fn visible_parts_abut_for_every_flag_combination() {
        for top in [false, true] {
            for bottom in [false, true] {
                let layout = compute_layout(&config(top, bottom));
                let visible: Vec<&Placement> = layout.iter().filter(|p| p.visible).collect();

                assert_eq!(visible[0].start(), 0.0, "stack must start at the origin");
                for pair in visible.windows(2) {
                    assert_eq!(
                        pair[0].end(),
                        pair[1].start(),
                        "{} and {} must touch (top={top}, bottom={bottom})",
                        pair[0].part,
                        pair[1].part
                    );
                }
            }
        }
    }

    #[test]
    fn hiding_a_ring_shifts_everything_above_by_its_length() {
        let full = compute_layout(&ConfigurationState::default());
        let without_bottom =
            compute_layout(&ConfigurationState::default().with_ring_toggled(RingSlot::Bottom));

        for part in [PartKind::Body, PartKind::RingTop, PartKind::Emitter] {
            assert_eq!(
                full.get(part).position - without_bottom.get(part).position,
                PartKind::RingBottom.length()
            );
        }
        assert_eq!(
            full.get(PartKind::Pommel).position,
            without_bottom.get(PartKind::Pommel).position
        );
    }

    #[test]
    fn re_enabling_restores_original_positions() {
        let original = ConfigurationState::default();
        let round_trip = original
            .with_ring_toggled(RingSlot::Top)
            .with_ring_toggled(RingSlot::Bottom)
            .with_ring_toggled(RingSlot::Top)
            .with_ring_toggled(RingSlot::Bottom);
        assert_eq!(compute_layout(&original), compute_layout(&round_trip));
    }

    #[test]
    fn extent_is_the_top_of_the_highest_visible_part() {
        assert_eq!(compute_layout(&config(true, true)).extent(), 298.0);
        assert_eq!(compute_layout(&config(false, true)).extent(), 288.0);
        // The hidden top ring sits at 214..224 but must not count.
        assert_eq!(compute_layout(&config(false, false)).extent(), 278.0);
    }

    #[test]
    fn layout_is_deterministic() {
        let config = config(true, false);
        assert_eq!(compute_layout(&config), compute_layout(&config));
    }

    #[test]
    fn only_the_pommel_is_flipped() {
        let layout = compute_layout(&ConfigurationState::default());
        for placement in layout.iter() {
            assert_eq!(placement.flipped, placement.part == PartKind::Pommel);
        }
    }
}
