//! Headless tests for [`ConfiguratorPlugin`].
//!
//! These tests use [`MinimalPlugins`] (no window, no rendering) and a
//! [`MemoryStore`], so they run fast and deterministically in CI.
//!
//! Covered scenarios:
//! 1. The initial plan is published at startup.
//! 2. `SetColor(Global)` broadcasts; a later per-part write diverges.
//! 3. `ToggleRing` re-stacks the parts and is persisted before the plan is read.
//! 4. A session restored from the store reproduces the previous plan.
//! 5. A corrupted store starts from the defaults.

use bevy::ecs::message::Messages;
use bevy::prelude::*;
use hiltsmith::assembly::AssemblyPlan;
use hiltsmith::constants::STORAGE_KEY;
use hiltsmith::part::{ColorSlot, PartKind, RingSlot};
use hiltsmith::persist::{self, FileStore, KeyValueStore, MemoryStore};
use hiltsmith::plugin::{ConfiguratorPlugin, SetColor, ToggleRing};
use hiltsmith::session::Configurator;
use hiltsmith::state::ConfigurationState;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a headless app whose session is backed by `store`.
fn app_with_store(store: impl KeyValueStore + 'static) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, ConfiguratorPlugin));
    app.insert_resource(Configurator::open(Box::new(store), STORAGE_KEY));
    app
}

fn set_color(app: &mut App, slot: ColorSlot, color: &str) {
    app.world_mut()
        .resource_mut::<Messages<SetColor>>()
        .write(SetColor {
            slot,
            color: color.into(),
        });
}

fn toggle_ring(app: &mut App, ring: RingSlot) {
    app.world_mut()
        .resource_mut::<Messages<ToggleRing>>()
        .write(ToggleRing { ring });
}

fn plan(app: &App) -> &AssemblyPlan {
    app.world().resource::<AssemblyPlan>()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn startup_publishes_the_default_plan() {
    let mut app = app_with_store(MemoryStore::new());
    app.update();

    let plan = plan(&app);
    assert_eq!(plan, &AssemblyPlan::default());
    assert_eq!(plan.entry(PartKind::Emitter).position, 234.0);
}

#[test]
fn global_colour_broadcasts_then_single_part_diverges() {
    let mut app = app_with_store(MemoryStore::new());
    app.update();

    set_color(&mut app, ColorSlot::Global, "#202020");
    app.update();
    for entry in plan(&app).entries() {
        assert_eq!(entry.color.as_str(), "#202020", "{} must follow Global", entry.part);
    }

    set_color(&mut app, ColorSlot::Pommel, "#ff0000");
    app.update();
    let plan = plan(&app);
    assert_eq!(plan.entry(PartKind::Pommel).color.as_str(), "#ff0000");
    assert_eq!(plan.entry(PartKind::Body).color.as_str(), "#202020");
}

#[test]
fn toggling_rings_restacks_and_persists() {
    let store = MemoryStore::new();
    let mut app = app_with_store(store.clone());
    app.update();

    toggle_ring(&mut app, RingSlot::Bottom);
    toggle_ring(&mut app, RingSlot::Top);
    app.update();

    let plan = plan(&app);
    assert_eq!(plan.entry(PartKind::Body).position, 34.0);
    assert_eq!(plan.entry(PartKind::Emitter).position, 214.0);
    assert!(!plan.entry(PartKind::RingBottom).visible);
    assert!(!plan.entry(PartKind::RingTop).visible);

    let stored = persist::load(&store, STORAGE_KEY).expect("toggles must be persisted");
    assert!(!stored.show_ring_top);
    assert!(!stored.show_ring_bottom);
}

#[test]
fn frames_without_requests_leave_the_store_untouched() {
    let store = MemoryStore::new();
    let mut app = app_with_store(store.clone());
    for _ in 0..3 {
        app.update();
    }
    assert!(store.is_empty(), "nothing is written until the first edit");
}

#[test]
fn restored_session_reproduces_previous_plan() {
    let store = MemoryStore::new();

    let mut first = app_with_store(store.clone());
    first.update();
    set_color(&mut first, ColorSlot::Emitter, "#00ff00");
    toggle_ring(&mut first, RingSlot::Top);
    first.update();
    let expected = plan(&first).clone();

    let mut second = app_with_store(store);
    second.update();
    assert_eq!(plan(&second), &expected);
}

#[test]
fn corrupted_store_starts_from_defaults() {
    let mut store = MemoryStore::new();
    store
        .set(STORAGE_KEY, "this is { not toml")
        .expect("memory store never fails");

    let mut app = app_with_store(store);
    app.update();

    let configurator = app.world().resource::<Configurator>();
    assert_eq!(configurator.state(), &ConfigurationState::default());
}

#[test]
fn file_backed_session_survives_restart() {
    let dir = std::env::temp_dir().join(format!(
        "hiltsmith-session-{}-restart",
        std::process::id()
    ));

    let mut first = app_with_store(FileStore::new(&dir));
    first.update();
    set_color(&mut first, ColorSlot::Body, "#0000ff");
    first.update();

    let mut second = app_with_store(FileStore::new(&dir));
    second.update();
    assert_eq!(
        plan(&second).entry(PartKind::Body).color.as_str(),
        "#0000ff"
    );

    let _ = std::fs::remove_dir_all(&dir);
}
