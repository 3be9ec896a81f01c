//! Runtime application configuration loaded from `assets/configurator.toml`.
//!
//! [`ConfiguratorConfig`] is a Bevy [`Resource`] whose defaults come from
//! [`crate::constants`].  At startup, [`load_configurator_config`] reads
//! `assets/configurator.toml` and overrides any values present in the file;
//! missing keys keep their compiled defaults, so a minimal TOML can override
//! just the values you care about.
//!
//! Part lengths are not configurable; they live in [`crate::part`].
//!
//! Example:
//!
//! ```toml
//! storage_dir = "/tmp/hilts"
//! camera_distance = 420.0
//! palette = ["#000000", "#ffffff"]
//! ```

use crate::color::HexColor;
use crate::constants::*;
use crate::part::PartKind;
use bevy::prelude::*;
use serde::Deserialize;

pub const CONFIG_PATH: &str = "assets/configurator.toml";

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConfiguratorConfig {
    // ── Persistence ──────────────────────────────────────────────────────────
    pub storage_dir: String,
    pub storage_key: String,

    // ── Camera ───────────────────────────────────────────────────────────────
    pub camera_distance: f32,
    pub camera_fov_degrees: f32,
    pub camera_target_height: f32,

    // ── Models (paths relative to `assets/`) ─────────────────────────────────
    pub pommel_model: String,
    pub ring_model: String,
    pub body_model: String,
    pub emitter_model: String,

    // ── Placeholder geometry ─────────────────────────────────────────────────
    pub placeholder_ring_radius: f32,
    pub placeholder_part_radius: f32,

    // ── Scene ────────────────────────────────────────────────────────────────
    pub grid_size: f32,
    pub grid_divisions: u32,

    // ── Controls / export ────────────────────────────────────────────────────
    pub hud_font_size: f32,
    pub screenshot_dir: String,
    pub palette: Vec<String>,
}

impl Default for ConfiguratorConfig {
    fn default() -> Self {
        Self {
            storage_dir: STORAGE_DIR.to_string(),
            storage_key: STORAGE_KEY.to_string(),
            camera_distance: CAMERA_DISTANCE,
            camera_fov_degrees: CAMERA_FOV_DEGREES,
            camera_target_height: CAMERA_TARGET_HEIGHT,
            pommel_model: POMMEL_MODEL.to_string(),
            ring_model: RING_MODEL.to_string(),
            body_model: BODY_MODEL.to_string(),
            emitter_model: EMITTER_MODEL.to_string(),
            placeholder_ring_radius: PLACEHOLDER_RING_RADIUS,
            placeholder_part_radius: PLACEHOLDER_PART_RADIUS,
            grid_size: GRID_SIZE,
            grid_divisions: GRID_DIVISIONS,
            hud_font_size: HUD_FONT_SIZE,
            screenshot_dir: SCREENSHOT_DIR.to_string(),
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl ConfiguratorConfig {
    /// Model asset for `part`.  Both rings share one model.
    pub fn model_for(&self, part: PartKind) -> &str {
        match part {
            PartKind::Pommel => &self.pommel_model,
            PartKind::RingBottom | PartKind::RingTop => &self.ring_model,
            PartKind::Body => &self.body_model,
            PartKind::Emitter => &self.emitter_model,
        }
    }

    /// Radius of the cylinder drawn when `part`'s model is unavailable.
    pub fn placeholder_radius(&self, part: PartKind) -> f32 {
        if part.ring().is_some() {
            self.placeholder_ring_radius
        } else {
            self.placeholder_part_radius
        }
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

/// Startup system: attempt to load `assets/configurator.toml` and overwrite
/// the `ConfiguratorConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are logged
/// but do not abort the app.  A missing file is not an error.
pub fn load_configurator_config(mut config: ResMut<ConfiguratorConfig>) {
    let path = CONFIG_PATH;
    match std::fs::read_to_string(path) {
        Ok(contents) => match ConfiguratorConfig::from_toml(&contents) {
            Ok(mut loaded) => {
                loaded.palette.retain(|entry| {
                    let valid = HexColor::new(entry.as_str()).is_canonical();
                    if !valid {
                        warn!("Dropping palette entry '{entry}' from {path}: expected #rrggbb");
                    }
                    valid
                });
                *config = loaded;
                info!("Loaded configurator config from {path}");
            }
            Err(e) => {
                warn!("Failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            info!("No {path} found; using compiled defaults");
        }
    }
}
