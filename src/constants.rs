//! Centralised dimensions, presets, and storage constants.
//!
//! All fixed values live here so they can be found and reasoned about in one
//! place.  [`crate::config::ConfiguratorConfig`] mirrors the subset that is
//! tunable at runtime and uses these as its compiled defaults.

// ── Dimension Table (mm along the stacking axis) ──────────────────────────────

/// Length of the pommel.
///
/// The pommel is modelled upside down, so its origin sits at its tip and its
/// placement position equals this height.
pub const POMMEL_LENGTH: f32 = 34.0;

/// Length of either ring.  Top and bottom rings share one model.
pub const RING_LENGTH: f32 = 10.0;

/// Length of the body.
pub const BODY_LENGTH: f32 = 180.0;

/// Length of the emitter.
pub const EMITTER_LENGTH: f32 = 64.0;

// ── Default preset ────────────────────────────────────────────────────────────

pub const DEFAULT_GLOBAL_COLOR: &str = "#ffffff";
pub const DEFAULT_POMMEL_COLOR: &str = "#cccccc";
pub const DEFAULT_RING_BOTTOM_COLOR: &str = "#ff0000";
pub const DEFAULT_BODY_COLOR: &str = "#cccccc";
pub const DEFAULT_RING_TOP_COLOR: &str = "#ff0000";
pub const DEFAULT_EMITTER_COLOR: &str = "#cccccc";

/// Both rings are shown on a fresh session.
pub const DEFAULT_SHOW_RINGS: bool = true;

// ── Persistence ───────────────────────────────────────────────────────────────

/// Key the configuration record is stored under.
pub const STORAGE_KEY: &str = "hilt-config";

/// Directory used by the file-backed store, relative to the working directory.
pub const STORAGE_DIR: &str = "saves";

/// Current schema version of the persisted record.
///
/// Records without a `version` field predate versioning and are read as 1.
pub const SCHEMA_VERSION: u32 = 1;

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Placeholder cylinder radius for rings.
pub const PLACEHOLDER_RING_RADIUS: f32 = 22.0;

/// Placeholder cylinder radius for every non-ring part.
pub const PLACEHOLDER_PART_RADIUS: f32 = 18.0;

pub const POMMEL_MODEL: &str = "models/pommel_v2.glb";
pub const RING_MODEL: &str = "models/ring_v1.glb";
pub const BODY_MODEL: &str = "models/body_v2.glb";
pub const EMITTER_MODEL: &str = "models/emitter_v2.glb";

/// Camera distance from the origin along each axis.
pub const CAMERA_DISTANCE: f32 = 350.0;

/// Vertical field of view in degrees.
pub const CAMERA_FOV_DEGREES: f32 = 50.0;

/// Height of the point the camera looks at; roughly the middle of a full stack.
pub const CAMERA_TARGET_HEIGHT: f32 = 150.0;

/// Edge length of the square ground grid.
pub const GRID_SIZE: f32 = 500.0;

/// Number of cells along each edge of the ground grid.
pub const GRID_DIVISIONS: u32 = 10;

// ── Window / UI ───────────────────────────────────────────────────────────────

pub const WINDOW_TITLE: &str = "Hiltsmith";
pub const WINDOW_WIDTH: u32 = 1200;
pub const WINDOW_HEIGHT: u32 = 720;

pub const HUD_FONT_SIZE: f32 = 15.0;

/// Directory that exported screenshots are written to.
pub const SCREENSHOT_DIR: &str = "screenshots";

/// Colours offered by the keyboard palette, in cycling order.
pub const DEFAULT_PALETTE: [&str; 10] = [
    "#ffffff", "#cccccc", "#888888", "#222222", "#ff0000", "#ff8800", "#ffd700", "#00c853",
    "#2196f3", "#9c27b0",
];
