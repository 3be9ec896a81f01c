//! Keyboard controls, status HUD, and screenshot export.
//!
//! | Key             | Action                                         |
//! |-----------------|------------------------------------------------|
//! | `T` / `B`       | Toggle the top / bottom ring                   |
//! | `Tab`           | Cycle the active colour slot                   |
//! | `Left`/`Right`  | Step the active slot through the palette       |
//! | `P`             | Save a PNG of the window to `screenshot_dir`   |
//!
//! Input systems only emit [`SetColor`] / [`ToggleRing`]; the state itself is
//! changed by [`crate::plugin::apply_configuration_requests_system`].

use crate::assembly::AssemblyPlan;
use crate::color::HexColor;
use crate::config::{load_configurator_config, ConfiguratorConfig};
use crate::part::{ColorSlot, RingSlot};
use crate::plugin::{ConfiguratorSet, SetColor, ToggleRing};
use crate::session::Configurator;
use crate::state::ConfigurationState;
use bevy::prelude::*;
use bevy::render::view::screenshot::{save_to_disk, Screenshot};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

/// The colour slot that `Left`/`Right` edit.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveSlot(pub ColorSlot);

impl Default for ActiveSlot {
    fn default() -> Self {
        Self(ColorSlot::Global)
    }
}

/// Marker for the status HUD text.
#[derive(Component)]
pub struct HudStatusDisplay;

pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ActiveSlot>()
            .add_systems(Startup, setup_hud.after(load_configurator_config))
            .add_systems(
                Update,
                (
                    (keyboard_controls_system, screenshot_system).in_set(ConfiguratorSet::Input),
                    hud_display_system.in_set(ConfiguratorSet::Render),
                ),
            );
    }
}

// ── Palette ───────────────────────────────────────────────────────────────────

/// The palette colour `delta` steps from `current`, wrapping at both ends.
///
/// A colour that is not in the palette steps onto its first (`delta > 0`) or
/// last entry.  `None` when the palette is empty.
pub fn step_palette(palette: &[String], current: &HexColor, delta: i32) -> Option<HexColor> {
    if palette.is_empty() {
        return None;
    }
    let len = palette.len() as i32;
    let next = match palette
        .iter()
        .position(|c| c.eq_ignore_ascii_case(current.as_str()))
    {
        Some(index) => (index as i32 + delta).rem_euclid(len),
        None if delta > 0 => 0,
        None => len - 1,
    };
    Some(HexColor::new(palette[next as usize].clone()))
}

// ── Input ─────────────────────────────────────────────────────────────────────

pub fn keyboard_controls_system(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<ConfiguratorConfig>,
    configurator: Option<Res<Configurator>>,
    mut active: ResMut<ActiveSlot>,
    mut set_color: MessageWriter<SetColor>,
    mut toggle_ring: MessageWriter<ToggleRing>,
) {
    if keys.just_pressed(KeyCode::KeyT) {
        toggle_ring.write(ToggleRing { ring: RingSlot::Top });
    }
    if keys.just_pressed(KeyCode::KeyB) {
        toggle_ring.write(ToggleRing {
            ring: RingSlot::Bottom,
        });
    }
    if keys.just_pressed(KeyCode::Tab) {
        active.0 = active.0.next();
    }

    let delta = if keys.just_pressed(KeyCode::ArrowRight) {
        1
    } else if keys.just_pressed(KeyCode::ArrowLeft) {
        -1
    } else {
        return;
    };
    let Some(configurator) = configurator else {
        return;
    };

    let current = configurator.state().colors.get(active.0);
    if let Some(color) = step_palette(&config.palette, current, delta) {
        set_color.write(SetColor {
            slot: active.0,
            color,
        });
    }
}

fn current_unix_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Export the primary window as a PNG when `P` is pressed.
pub fn screenshot_system(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<ConfiguratorConfig>,
) {
    if !keys.just_pressed(KeyCode::KeyP) {
        return;
    }

    let dir = PathBuf::from(&config.screenshot_dir);
    if let Err(err) = std::fs::create_dir_all(&dir) {
        error!("Failed to create screenshot dir {}: {}", dir.display(), err);
        return;
    }
    let path = dir.join(format!("hilt-{}.png", current_unix_timestamp()));
    info!("Saving screenshot to {}", path.display());
    commands
        .spawn(Screenshot::primary_window())
        .observe(save_to_disk(path));
}

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Spawn the top-left status text.
pub fn setup_hud(mut commands: Commands, config: Res<ConfiguratorConfig>) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(10.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: config.hud_font_size,
                    ..default()
                },
                TextColor(Color::srgb(0.92, 0.92, 0.95)),
                HudStatusDisplay,
            ));
        });
}

fn on_off(shown: bool) -> &'static str {
    if shown {
        "on"
    } else {
        "off"
    }
}

/// Text shown in the HUD for `state`, with the active slot marked.
pub fn hud_text(state: &ConfigurationState, active: ColorSlot, total_length: f32) -> String {
    let mut text = format!(
        "Ring top [T]: {}   Ring bottom [B]: {}\nLength: {} mm\n\nColours [Tab / Left / Right]\n",
        on_off(state.show_ring_top),
        on_off(state.show_ring_bottom),
        total_length
    );
    for (slot, color) in state.colors.iter() {
        let marker = if slot == active { ">" } else { " " };
        text.push_str(&format!("{marker} {:<12} {}\n", slot.label(), color));
    }
    text.push_str("\n[P] screenshot");
    text
}

pub fn hud_display_system(
    plan: Res<AssemblyPlan>,
    active: Res<ActiveSlot>,
    configurator: Option<Res<Configurator>>,
    mut q_text: Query<&mut Text, With<HudStatusDisplay>>,
) {
    if !plan.is_changed() && !active.is_changed() {
        return;
    }
    let Some(configurator) = configurator else {
        return;
    };
    let content = hud_text(configurator.state(), active.0, plan.total_length());
    for mut text in q_text.iter_mut() {
        text.0 = content.clone();
    }
}
